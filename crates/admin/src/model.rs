//! Records exchanged with the relic API.
//!
//! Field names follow the JSON the API speaks, so several fields carry serde
//! renames (`Relic_Set_id`, `Playable_Characters_id`, `mainStat`, ...).

use serde::{Deserialize, Serialize};

use crate::stats::Slot;

/// One relic piece row. All six slot tables share this shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RelicPiece {
    pub id: String,
    pub main_stat: String,
    pub main_stat_num: i32,
    pub substat_1: String,
    pub substat_1_num: f64,
    pub substat_2: String,
    pub substat_2_num: f64,
    pub substat_3: String,
    pub substat_3_num: f64,
    pub substat_4: String,
    pub substat_4_num: f64,
    #[serde(rename = "Relic_Set_id")]
    pub relic_set_id: String,
}

impl RelicPiece {
    /// Substat rolls in stored order.
    pub fn substats(&self) -> [(&str, f64); 4] {
        [
            (self.substat_1.as_str(), self.substat_1_num),
            (self.substat_2.as_str(), self.substat_2_num),
            (self.substat_3.as_str(), self.substat_3_num),
            (self.substat_4.as_str(), self.substat_4_num),
        ]
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RelicSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub head: Option<String>,
    #[serde(default)]
    pub hands: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub feet: Option<String>,
    #[serde(default)]
    pub sphere: Option<String>,
    #[serde(default)]
    pub rope: Option<String>,
}

impl RelicSet {
    /// Name of this set's piece for `slot`, if the set has one.
    pub fn piece(&self, slot: Slot) -> Option<&str> {
        let piece = match slot {
            Slot::Headpiece => &self.head,
            Slot::Handpiece => &self.hands,
            Slot::Bodypiece => &self.body,
            Slot::Feetpiece => &self.feet,
            Slot::Planarsphere => &self.sphere,
            Slot::Linkrope => &self.rope,
        };
        piece.as_deref()
    }

    /// Display name of this set's piece for `slot`, or the set name when the
    /// set has no piece there.
    pub fn piece_name(&self, slot: Slot) -> &str {
        self.piece(slot).unwrap_or(&self.name)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterBuild {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "Playable_Characters_id")]
    pub playable_character_id: String,
    #[serde(rename = "Relic_Headpiece_id")]
    pub headpiece_id: String,
    #[serde(rename = "Relic_Handpiece_id")]
    pub handpiece_id: String,
    #[serde(rename = "Relic_Bodypiece_id")]
    pub bodypiece_id: String,
    #[serde(rename = "Relic_Feetpiece_id")]
    pub feetpiece_id: String,
    #[serde(rename = "Relic_Planarsphere_id")]
    pub planarsphere_id: String,
    #[serde(rename = "Relic_Linkrope_id")]
    pub linkrope_id: String,
}

impl CharacterBuild {
    pub fn relic(&self, slot: Slot) -> &str {
        match slot {
            Slot::Headpiece => &self.headpiece_id,
            Slot::Handpiece => &self.handpiece_id,
            Slot::Bodypiece => &self.bodypiece_id,
            Slot::Feetpiece => &self.feetpiece_id,
            Slot::Planarsphere => &self.planarsphere_id,
            Slot::Linkrope => &self.linkrope_id,
        }
    }

    pub fn relic_mut(&mut self, slot: Slot) -> &mut String {
        match slot {
            Slot::Headpiece => &mut self.headpiece_id,
            Slot::Handpiece => &mut self.handpiece_id,
            Slot::Bodypiece => &mut self.bodypiece_id,
            Slot::Feetpiece => &mut self.feetpiece_id,
            Slot::Planarsphere => &mut self.planarsphere_id,
            Slot::Linkrope => &mut self.linkrope_id,
        }
    }
}

/// Joined view of a relic piece used to label build dropdowns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Relic {
    pub id: String,
    pub name: String,
    pub details: RelicDetails,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RelicDetails {
    #[serde(rename = "mainStat")]
    pub main_stat: String,
    #[serde(rename = "mainStatNum")]
    pub main_stat_num: i32,
    pub substats: Vec<Substat>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Substat {
    pub name: String,
    pub value: f64,
}

impl Relic {
    /// Join a piece with its set. Unset substat slots are skipped.
    pub fn from_piece(piece: &RelicPiece, set: Option<&RelicSet>, slot: Slot) -> Self {
        let name = match set {
            Some(set) => set.piece_name(slot).to_owned(),
            None => piece.relic_set_id.clone(),
        };
        let substats = piece
            .substats()
            .into_iter()
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, value)| Substat {
                name: name.to_owned(),
                value,
            })
            .collect();
        Self {
            id: piece.id.clone(),
            name,
            details: RelicDetails {
                main_stat: piece.main_stat.clone(),
                main_stat_num: piece.main_stat_num,
                substats,
            },
        }
    }
}

/// Relic read models for every slot, keyed the way the API returns them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RelicCatalog {
    #[serde(default)]
    pub headpieces: Vec<Relic>,
    #[serde(default)]
    pub handpieces: Vec<Relic>,
    #[serde(default)]
    pub bodypieces: Vec<Relic>,
    #[serde(default)]
    pub feetpieces: Vec<Relic>,
    #[serde(default)]
    pub planarspheres: Vec<Relic>,
    #[serde(default)]
    pub linkropes: Vec<Relic>,
}

impl RelicCatalog {
    pub fn for_slot(&self, slot: Slot) -> &[Relic] {
        match slot {
            Slot::Headpiece => &self.headpieces,
            Slot::Handpiece => &self.handpieces,
            Slot::Bodypiece => &self.bodypieces,
            Slot::Feetpiece => &self.feetpieces,
            Slot::Planarsphere => &self.planarspheres,
            Slot::Linkrope => &self.linkropes,
        }
    }

    pub fn set_slot(&mut self, slot: Slot, relics: Vec<Relic>) {
        let list = match slot {
            Slot::Headpiece => &mut self.headpieces,
            Slot::Handpiece => &mut self.handpieces,
            Slot::Bodypiece => &mut self.bodypieces,
            Slot::Feetpiece => &mut self.feetpieces,
            Slot::Planarsphere => &mut self.planarspheres,
            Slot::Linkrope => &mut self.linkropes,
        };
        *list = relics;
    }
}

/// Dropdown sources for the build form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildReferences {
    pub characters: Vec<Character>,
    pub relics: RelicCatalog,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn build_serializes_api_field_names() {
        let build = CharacterBuild {
            id: "b1".into(),
            playable_character_id: "kafka".into(),
            headpiece_id: "h1".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&build).unwrap();
        assert_eq!(value["Playable_Characters_id"], "kafka");
        assert_eq!(value["Relic_Headpiece_id"], "h1");
        assert_eq!(value["Relic_Linkrope_id"], "");
    }

    #[test]
    fn build_without_id_deserializes() {
        let build: CharacterBuild = serde_json::from_value(json!({
            "Playable_Characters_id": "kafka",
            "Relic_Headpiece_id": "h",
            "Relic_Handpiece_id": "g",
            "Relic_Bodypiece_id": "b",
            "Relic_Feetpiece_id": "f",
            "Relic_Planarsphere_id": "s",
            "Relic_Linkrope_id": "r"
        }))
        .unwrap();
        assert!(build.id.is_empty());
        assert_eq!(build.relic(Slot::Planarsphere), "s");
    }

    #[test]
    fn relic_joins_slot_piece_name_and_skips_empty_substats() {
        let set = RelicSet {
            id: "genius".into(),
            name: "Genius of Brilliant Stars".into(),
            body: Some("Genius's Metafield Suit".into()),
            ..Default::default()
        };
        let piece = RelicPiece {
            id: "relic001".into(),
            main_stat: "CRIT Rate".into(),
            main_stat_num: 32,
            substat_1: "SPD".into(),
            substat_1_num: 4.0,
            substat_2: "ATK".into(),
            substat_2_num: 38.0,
            relic_set_id: "genius".into(),
            ..Default::default()
        };

        let relic = Relic::from_piece(&piece, Some(&set), Slot::Bodypiece);
        assert_eq!(relic.name, "Genius's Metafield Suit");
        assert_eq!(relic.details.substats.len(), 2);

        let relic = Relic::from_piece(&piece, Some(&set), Slot::Headpiece);
        assert_eq!(relic.name, "Genius of Brilliant Stars");
    }

    #[test]
    fn catalog_keys_match_api_object() {
        let mut catalog = RelicCatalog::default();
        catalog.set_slot(
            Slot::Linkrope,
            vec![Relic {
                id: "rope1".into(),
                ..Default::default()
            }],
        );
        let value = serde_json::to_value(&catalog).unwrap();
        assert_eq!(value["linkropes"][0]["id"], "rope1");
        assert_eq!(catalog.for_slot(Slot::Linkrope).len(), 1);
        assert!(catalog.for_slot(Slot::Headpiece).is_empty());
    }
}
