//! Dropdown labels and option lists.
//!
//! Option values are always record ids or stat names; labels are for display
//! only and never travel back to the API.

use serde::Serialize;

use crate::model::{Character, Relic, RelicSet};
use crate::stats::{Slot, Stat};

/// `"<name> - <mainStat> (<num>) | Substats: <a> (<x>), <b> (<y>)"`.
pub fn relic_label(relic: &Relic) -> String {
    let substats = relic
        .details
        .substats
        .iter()
        .map(|sub| format!("{} ({})", sub.name, sub.value))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{} - {} ({}) | Substats: {}",
        relic.name, relic.details.main_stat, relic.details.main_stat_num, substats
    )
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    fn new(value: impl Into<String>, label: impl Into<String>, selected: &str) -> Self {
        let value = value.into();
        let selected = value == selected;
        Self {
            value,
            label: label.into(),
            selected,
        }
    }
}

fn with_placeholder(
    placeholder: &str,
    selected: &str,
    options: impl Iterator<Item = SelectOption>,
) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new("", placeholder, selected))
        .chain(options)
        .collect()
}

pub fn stat_options(placeholder: &str, stats: &[Stat], selected: &str) -> Vec<SelectOption> {
    with_placeholder(
        placeholder,
        selected,
        stats
            .iter()
            .map(|stat| SelectOption::new(stat.as_str(), stat.as_str(), selected)),
    )
}

/// Relic sets labelled by the name of their piece in `slot`.
pub fn relic_set_options(sets: &[RelicSet], slot: Slot, selected: &str) -> Vec<SelectOption> {
    with_placeholder(
        "Select Relic Set",
        selected,
        sets.iter()
            .map(|set| SelectOption::new(set.id.as_str(), set.piece_name(slot), selected)),
    )
}

pub fn character_options(characters: &[Character], selected: &str) -> Vec<SelectOption> {
    with_placeholder(
        "Select Character",
        selected,
        characters
            .iter()
            .map(|c| SelectOption::new(c.id.as_str(), c.name.as_str(), selected)),
    )
}

pub fn relic_options(slot: Slot, relics: &[Relic], selected: &str) -> Vec<SelectOption> {
    with_placeholder(
        &format!("Select {}", slot.title()),
        selected,
        relics
            .iter()
            .map(|relic| SelectOption::new(relic.id.as_str(), relic_label(relic), selected)),
    )
}
