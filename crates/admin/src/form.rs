//! Form state for the entity editors.
//!
//! A form holds one record and the edit-mode flag. Every change goes through
//! [`reduce`], which takes the current record plus one `(field, value)` pair
//! and returns the next record, leaving the input untouched on error.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::model::{CharacterBuild, RelicPiece, RelicSet};
use crate::stats::{Slot, UnknownName};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("`{value}` is not a valid number for {field}")]
    InvalidNumber { field: String, value: String },
    #[error("unknown form field `{0}`")]
    UnknownField(String),
}

/// A record that can be edited through a form and listed in a table.
pub trait Record:
    Clone + Default + PartialEq + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Typed field key; parses from the form input name.
    type Field: Copy + fmt::Debug + FromStr<Err = UnknownName> + Send;
    /// Reference lists the form's dropdowns are built from.
    type References: Clone + Default + fmt::Debug + Send + Sync + 'static;

    fn id(&self) -> &str;

    /// Return `self` with one field replaced by the parsed `value`.
    fn with_field(self, field: Self::Field, value: &str) -> Result<Self, FormError>;

    /// Column headers, in the order [`Record::cells`] returns values.
    fn headers() -> &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

/// Pure reducer: `(state, field, value) -> state`.
pub fn reduce<R: Record>(state: &R, field: R::Field, value: &str) -> Result<R, FormError> {
    state.clone().with_field(field, value)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Creating,
    Editing,
}

impl Mode {
    /// Name carried by the hidden `mode` input of rendered forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Creating => "create",
            Mode::Editing => "update",
        }
    }
}

impl FromStr for Mode {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Mode::Creating),
            "update" => Ok(Mode::Editing),
            other => Err(UnknownName(other.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState<R> {
    record: R,
    mode: Mode,
}

impl<R: Record> FormState<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a form from submitted `(name, value)` pairs, applied in order.
    /// Pairs not naming a field of `R` are ignored. A value that fails to
    /// parse leaves its field untouched; the first such error is returned
    /// next to the form so the rest of the input survives.
    pub fn restore<'a, I>(mode: Mode, pairs: I) -> (Self, Option<FormError>)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut form = Self {
            record: R::default(),
            mode,
        };
        let mut first_error = None;
        for (name, value) in pairs {
            match form.set_named(name, value) {
                Ok(()) | Err(FormError::UnknownField(_)) => {}
                Err(err) => {
                    first_error.get_or_insert(err);
                }
            }
        }
        (form, first_error)
    }

    pub fn record(&self) -> &R {
        &self.record
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == Mode::Editing
    }

    pub fn begin_create(&mut self) {
        self.record = R::default();
        self.mode = Mode::Creating;
    }

    pub fn begin_edit(&mut self, record: R) {
        self.record = record;
        self.mode = Mode::Editing;
    }

    /// Return to an empty create form.
    pub fn reset(&mut self) {
        self.begin_create();
    }

    pub fn set(&mut self, field: R::Field, value: &str) -> Result<(), FormError> {
        self.record = reduce(&self.record, field, value)?;
        Ok(())
    }

    pub fn set_named(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        let field = name
            .parse::<R::Field>()
            .map_err(|_| FormError::UnknownField(name.to_owned()))?;
        self.set(field, value)
    }
}

fn parse_int(field: &str, value: &str) -> Result<i32, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0);
    }
    value.parse().map_err(|_| FormError::InvalidNumber {
        field: field.to_owned(),
        value: value.to_owned(),
    })
}

fn parse_number(field: &str, value: &str) -> Result<f64, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0.0);
    }
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(FormError::InvalidNumber {
            field: field.to_owned(),
            value: value.to_owned(),
        }),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceField {
    Id,
    MainStat,
    MainStatNum,
    /// Substat name, numbered 1 to 4.
    Substat(u8),
    SubstatNum(u8),
    RelicSetId,
}

impl FromStr for PieceField {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s {
            "id" => PieceField::Id,
            "main_stat" => PieceField::MainStat,
            "main_stat_num" => PieceField::MainStatNum,
            "Relic_Set_id" => PieceField::RelicSetId,
            "substat_1" => PieceField::Substat(1),
            "substat_2" => PieceField::Substat(2),
            "substat_3" => PieceField::Substat(3),
            "substat_4" => PieceField::Substat(4),
            "substat_1_num" => PieceField::SubstatNum(1),
            "substat_2_num" => PieceField::SubstatNum(2),
            "substat_3_num" => PieceField::SubstatNum(3),
            "substat_4_num" => PieceField::SubstatNum(4),
            other => return Err(UnknownName(other.to_owned())),
        };
        Ok(field)
    }
}

impl RelicPiece {
    fn substat_mut(&mut self, n: u8) -> Option<(&mut String, &mut f64)> {
        match n {
            1 => Some((&mut self.substat_1, &mut self.substat_1_num)),
            2 => Some((&mut self.substat_2, &mut self.substat_2_num)),
            3 => Some((&mut self.substat_3, &mut self.substat_3_num)),
            4 => Some((&mut self.substat_4, &mut self.substat_4_num)),
            _ => None,
        }
    }
}

impl Record for RelicPiece {
    type Field = PieceField;
    type References = Vec<RelicSet>;

    fn id(&self) -> &str {
        &self.id
    }

    fn with_field(mut self, field: PieceField, value: &str) -> Result<Self, FormError> {
        match field {
            PieceField::Id => self.id = value.to_owned(),
            PieceField::MainStat => self.main_stat = value.to_owned(),
            PieceField::MainStatNum => self.main_stat_num = parse_int("main_stat_num", value)?,
            PieceField::RelicSetId => self.relic_set_id = value.to_owned(),
            PieceField::Substat(n) => {
                let (name, num) = self
                    .substat_mut(n)
                    .ok_or_else(|| FormError::UnknownField(format!("substat_{n}")))?;
                // a new stat starts from an empty roll
                *name = value.to_owned();
                *num = 0.0;
            }
            PieceField::SubstatNum(n) => {
                let parsed = parse_number(&format!("substat_{n}_num"), value)?;
                let (_, num) = self
                    .substat_mut(n)
                    .ok_or_else(|| FormError::UnknownField(format!("substat_{n}_num")))?;
                *num = parsed;
            }
        }
        Ok(self)
    }

    fn headers() -> &'static [&'static str] {
        &[
            "ID",
            "Main Stat",
            "Main Stat Number",
            "Substat 1",
            "Substat 1 Number",
            "Substat 2",
            "Substat 2 Number",
            "Substat 3",
            "Substat 3 Number",
            "Substat 4",
            "Substat 4 Number",
            "Relic Set ID",
        ]
    }

    fn cells(&self) -> Vec<String> {
        let mut cells = vec![
            self.id.clone(),
            self.main_stat.clone(),
            self.main_stat_num.to_string(),
        ];
        for (name, value) in self.substats() {
            cells.push(name.to_owned());
            cells.push(value.to_string());
        }
        cells.push(self.relic_set_id.clone());
        cells
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildField {
    Id,
    Character,
    Relic(Slot),
}

impl FromStr for BuildField {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(BuildField::Id),
            "Playable_Characters_id" => Ok(BuildField::Character),
            other => Slot::ALL
                .iter()
                .find(|slot| slot.build_field() == other)
                .map(|slot| BuildField::Relic(*slot))
                .ok_or_else(|| UnknownName(other.to_owned())),
        }
    }
}

impl Record for CharacterBuild {
    type Field = BuildField;
    type References = crate::model::BuildReferences;

    fn id(&self) -> &str {
        &self.id
    }

    fn with_field(mut self, field: BuildField, value: &str) -> Result<Self, FormError> {
        match field {
            BuildField::Id => self.id = value.to_owned(),
            BuildField::Character => self.playable_character_id = value.to_owned(),
            BuildField::Relic(slot) => *self.relic_mut(slot) = value.to_owned(),
        }
        Ok(self)
    }

    fn headers() -> &'static [&'static str] {
        &[
            "Character",
            "Relic Headpiece",
            "Relic Handpiece",
            "Relic Bodypiece",
            "Relic Feetpiece",
            "Relic Planarsphere",
            "Relic Linkrope",
        ]
    }

    fn cells(&self) -> Vec<String> {
        let mut cells = vec![self.playable_character_id.clone()];
        cells.extend(Slot::ALL.iter().map(|slot| self.relic(*slot).to_owned()));
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_piece() -> RelicPiece {
        RelicPiece {
            id: "relic001".into(),
            main_stat: "ATK".into(),
            main_stat_num: 500,
            substat_1: "SPD".into(),
            substat_1_num: 4.0,
            substat_2: "HP".into(),
            substat_2_num: 33.0,
            substat_3: "CRIT Rate".into(),
            substat_3_num: 2.9,
            substat_4: "CRIT DMG".into(),
            substat_4_num: 5.8,
            relic_set_id: "genius".into(),
        }
    }

    #[test]
    fn reducer_leaves_input_untouched() {
        let before = RelicPiece::default();
        let after = reduce(&before, PieceField::MainStat, "ATK").unwrap();
        assert_eq!(before, RelicPiece::default());
        assert_eq!(after.main_stat, "ATK");
    }

    #[test]
    fn changing_substat_name_clears_its_value() {
        let piece = sample_piece();
        let next = reduce(&piece, PieceField::Substat(2), "DEF").unwrap();
        assert_eq!(next.substat_2, "DEF");
        assert_eq!(next.substat_2_num, 0.0);
        assert_eq!(next.substat_1_num, 4.0);
    }

    #[test]
    fn numeric_fields_parse_and_reject_garbage() {
        let piece = RelicPiece::default();
        let next = reduce(&piece, PieceField::SubstatNum(3), "6.5").unwrap();
        assert_eq!(next.substat_3_num, 6.5);
        let next = reduce(&next, PieceField::MainStatNum, "").unwrap();
        assert_eq!(next.main_stat_num, 0);
        assert_eq!(
            reduce(&next, PieceField::MainStatNum, "lots"),
            Err(FormError::InvalidNumber {
                field: "main_stat_num".into(),
                value: "lots".into(),
            })
        );
        assert!(reduce(&next, PieceField::SubstatNum(1), "NaN").is_err());
    }

    #[test]
    fn failed_set_keeps_previous_state() {
        let mut form = FormState::<RelicPiece>::new();
        form.set(PieceField::MainStatNum, "311").unwrap();
        assert!(form.set(PieceField::MainStatNum, "x").is_err());
        assert_eq!(form.record().main_stat_num, 311);
    }

    #[test]
    fn begin_edit_copies_record_and_sets_mode() {
        let mut form = FormState::<RelicPiece>::new();
        assert_eq!(form.mode(), Mode::Creating);
        form.begin_edit(sample_piece());
        assert_eq!(form.record(), &sample_piece());
        assert!(form.is_editing());

        form.reset();
        assert_eq!(form.record(), &RelicPiece::default());
        assert_eq!(form.mode(), Mode::Creating);
    }

    #[test]
    fn restore_applies_pairs_in_order() {
        let pairs = [
            ("mode", "update"),
            ("id", "relic001"),
            ("Relic_Set_id", "genius"),
            ("main_stat", "ATK"),
            ("main_stat_num", "500"),
            ("substat_1", "SPD"),
            ("substat_1_num", "4"),
            ("substat_2", "HP"),
            ("substat_2_num", "33"),
            ("substat_3", "CRIT Rate"),
            ("substat_3_num", "2.9"),
            ("substat_4", "CRIT DMG"),
            ("substat_4_num", "5.8"),
        ];
        let (form, error) = FormState::<RelicPiece>::restore(Mode::Editing, pairs);
        assert_eq!(error, None);
        assert_eq!(form.record(), &sample_piece());
        assert!(form.is_editing());
    }

    #[test]
    fn restore_keeps_valid_fields_when_one_fails() {
        let pairs = [
            ("id", "relic001"),
            ("main_stat_num", "lots"),
            ("substat_1", "SPD"),
            ("substat_1_num", "4"),
        ];
        let (form, error) = FormState::<RelicPiece>::restore(Mode::Creating, pairs);
        assert_eq!(
            error,
            Some(FormError::InvalidNumber {
                field: "main_stat_num".into(),
                value: "lots".into(),
            })
        );
        assert_eq!(form.record().id, "relic001");
        assert_eq!(form.record().main_stat_num, 0);
        assert_eq!(form.record().substat_1_num, 4.0);
    }

    #[test]
    fn build_fields_parse_from_input_names() {
        assert_eq!(
            "Relic_Planarsphere_id".parse::<BuildField>(),
            Ok(BuildField::Relic(Slot::Planarsphere))
        );
        assert_eq!(
            "Playable_Characters_id".parse::<BuildField>(),
            Ok(BuildField::Character)
        );
        assert!("Relic_Ring_id".parse::<BuildField>().is_err());

        let mut form = FormState::<CharacterBuild>::new();
        form.set_named("Relic_Linkrope_id", "rope1").unwrap();
        assert_eq!(form.record().linkrope_id, "rope1");
        assert_eq!(
            form.set_named("bogus", "x"),
            Err(FormError::UnknownField("bogus".into()))
        );
    }

    #[test]
    fn cells_line_up_with_headers() {
        let piece = sample_piece();
        assert_eq!(piece.cells().len(), RelicPiece::headers().len());
        assert_eq!(piece.cells()[4], "4");
        assert_eq!(piece.cells()[8], "2.9");

        let build = CharacterBuild::default();
        assert_eq!(build.cells().len(), CharacterBuild::headers().len());
    }
}
