//! Stat names and equipment slots.
//!
//! Stats travel as plain strings on the wire and in the database; [`Stat`]
//! is the checked view used when validating or building dropdowns.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stat {
    Hp,
    Atk,
    Def,
    Spd,
    BreakEffect,
    EffectHitRate,
    EffectRes,
    CritRate,
    CritDmg,
    OutgoingHealingBoost,
    EnergyRegenerationRate,
    PhysicalDmgBoost,
    FireDmgBoost,
    IceDmgBoost,
    LightningDmgBoost,
    WindDmgBoost,
    QuantumDmgBoost,
    ImaginaryDmgBoost,
}

impl Stat {
    pub const ALL: [Stat; 18] = [
        Stat::Hp,
        Stat::Atk,
        Stat::Def,
        Stat::Spd,
        Stat::BreakEffect,
        Stat::EffectHitRate,
        Stat::EffectRes,
        Stat::CritRate,
        Stat::CritDmg,
        Stat::OutgoingHealingBoost,
        Stat::EnergyRegenerationRate,
        Stat::PhysicalDmgBoost,
        Stat::FireDmgBoost,
        Stat::IceDmgBoost,
        Stat::LightningDmgBoost,
        Stat::WindDmgBoost,
        Stat::QuantumDmgBoost,
        Stat::ImaginaryDmgBoost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::Hp => "HP",
            Stat::Atk => "ATK",
            Stat::Def => "DEF",
            Stat::Spd => "SPD",
            Stat::BreakEffect => "Break Effect",
            Stat::EffectHitRate => "Effect Hit Rate",
            Stat::EffectRes => "Effect RES",
            Stat::CritRate => "CRIT Rate",
            Stat::CritDmg => "CRIT DMG",
            Stat::OutgoingHealingBoost => "Outgoing Healing Boost",
            Stat::EnergyRegenerationRate => "Energy Regeneration Rate",
            Stat::PhysicalDmgBoost => "Physical DMG Boost",
            Stat::FireDmgBoost => "Fire DMG Boost",
            Stat::IceDmgBoost => "Ice DMG Boost",
            Stat::LightningDmgBoost => "Lightning DMG Boost",
            Stat::WindDmgBoost => "Wind DMG Boost",
            Stat::QuantumDmgBoost => "Quantum DMG Boost",
            Stat::ImaginaryDmgBoost => "Imaginary DMG Boost",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stat {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stat::ALL
            .iter()
            .copied()
            .find(|stat| stat.as_str() == s)
            .ok_or_else(|| UnknownName(s.to_owned()))
    }
}

/// A stat or slot name that is not part of the known vocabulary.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown name `{0}`")]
pub struct UnknownName(pub String);

/// Names a substat roll may carry.
pub const SUBSTATS: [Stat; 9] = [
    Stat::Spd,
    Stat::Hp,
    Stat::Atk,
    Stat::Def,
    Stat::BreakEffect,
    Stat::EffectHitRate,
    Stat::EffectRes,
    Stat::CritRate,
    Stat::CritDmg,
];

/// The substat list with duplicates collapsed, first occurrence kept.
pub fn unique_substats() -> Vec<Stat> {
    let mut seen = HashSet::new();
    SUBSTATS
        .iter()
        .copied()
        .filter(|stat| seen.insert(*stat))
        .collect()
}

/// Equipment slot a relic piece occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Headpiece,
    Handpiece,
    Bodypiece,
    Feetpiece,
    Planarsphere,
    Linkrope,
}

impl Slot {
    pub const ALL: [Slot; 6] = [
        Slot::Headpiece,
        Slot::Handpiece,
        Slot::Bodypiece,
        Slot::Feetpiece,
        Slot::Planarsphere,
        Slot::Linkrope,
    ];

    /// Lowercase name used in page paths, e.g. `/relic/bodypiece`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Headpiece => "headpiece",
            Slot::Handpiece => "handpiece",
            Slot::Bodypiece => "bodypiece",
            Slot::Feetpiece => "feetpiece",
            Slot::Planarsphere => "planarsphere",
            Slot::Linkrope => "linkrope",
        }
    }

    /// Table name, which doubles as the API resource name.
    pub fn table(&self) -> &'static str {
        match self {
            Slot::Headpiece => "relic_headpiece",
            Slot::Handpiece => "relic_handpiece",
            Slot::Bodypiece => "relic_bodypiece",
            Slot::Feetpiece => "relic_feetpiece",
            Slot::Planarsphere => "relic_planarsphere",
            Slot::Linkrope => "relic_linkrope",
        }
    }

    /// Field carrying this slot's foreign key on a character build.
    pub fn build_field(&self) -> &'static str {
        match self {
            Slot::Headpiece => "Relic_Headpiece_id",
            Slot::Handpiece => "Relic_Handpiece_id",
            Slot::Bodypiece => "Relic_Bodypiece_id",
            Slot::Feetpiece => "Relic_Feetpiece_id",
            Slot::Planarsphere => "Relic_Planarsphere_id",
            Slot::Linkrope => "Relic_Linkrope_id",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Slot::Headpiece => "Relic Headpiece",
            Slot::Handpiece => "Relic Handpiece",
            Slot::Bodypiece => "Relic Bodypiece",
            Slot::Feetpiece => "Relic Feetpiece",
            Slot::Planarsphere => "Relic Planarsphere",
            Slot::Linkrope => "Relic Linkrope",
        }
    }

    /// Main stats a piece in this slot can roll.
    pub fn main_stats(&self) -> &'static [Stat] {
        match self {
            Slot::Headpiece => &[Stat::Hp],
            Slot::Handpiece => &[Stat::Atk],
            Slot::Bodypiece => &[
                Stat::Hp,
                Stat::Atk,
                Stat::Def,
                Stat::EffectHitRate,
                Stat::CritRate,
                Stat::CritDmg,
                Stat::OutgoingHealingBoost,
            ],
            Slot::Feetpiece => &[Stat::Hp, Stat::Atk, Stat::Def, Stat::Spd],
            Slot::Planarsphere => &[
                Stat::Hp,
                Stat::Atk,
                Stat::Def,
                Stat::PhysicalDmgBoost,
                Stat::FireDmgBoost,
                Stat::IceDmgBoost,
                Stat::LightningDmgBoost,
                Stat::WindDmgBoost,
                Stat::QuantumDmgBoost,
                Stat::ImaginaryDmgBoost,
            ],
            Slot::Linkrope => &[
                Stat::Hp,
                Stat::Atk,
                Stat::Def,
                Stat::BreakEffect,
                Stat::EnergyRegenerationRate,
            ],
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Slot::ALL
            .iter()
            .copied()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| UnknownName(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_substats_keeps_all_nine_in_order() {
        let unique = unique_substats();
        assert_eq!(unique.len(), 9);
        assert_eq!(unique, SUBSTATS.to_vec());
        assert_eq!(unique[0].as_str(), "SPD");
        assert_eq!(unique[8].as_str(), "CRIT DMG");
    }

    #[test]
    fn bodypiece_offers_seven_main_stats() {
        let names: Vec<&str> = Slot::Bodypiece
            .main_stats()
            .iter()
            .map(Stat::as_str)
            .collect();
        assert_eq!(
            names,
            [
                "HP",
                "ATK",
                "DEF",
                "Effect Hit Rate",
                "CRIT Rate",
                "CRIT DMG",
                "Outgoing Healing Boost",
            ]
        );
    }

    #[test]
    fn stat_names_parse_back() {
        for stat in Stat::ALL {
            assert_eq!(stat.as_str().parse::<Stat>(), Ok(stat));
        }
        assert!("Crit Rate".parse::<Stat>().is_err());
    }

    #[test]
    fn slot_parses_from_path_segment() {
        assert_eq!("linkrope".parse::<Slot>(), Ok(Slot::Linkrope));
        assert!("ring".parse::<Slot>().is_err());
    }
}
