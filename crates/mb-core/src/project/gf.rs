//! Damage types carried by projections

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::GameRng;

/// Terminal colours used for transient visuals
pub mod color {
    pub const DARK: u8 = 0;
    pub const WHITE: u8 = 1;
    pub const SLATE: u8 = 2;
    pub const ORANGE: u8 = 3;
    pub const RED: u8 = 4;
    pub const GREEN: u8 = 5;
    pub const BLUE: u8 = 6;
    pub const UMBER: u8 = 7;
    pub const L_DARK: u8 = 8;
    pub const L_WHITE: u8 = 9;
    pub const VIOLET: u8 = 10;
    pub const YELLOW: u8 = 11;
    pub const L_RED: u8 = 12;
    pub const L_GREEN: u8 = 13;
    pub const L_BLUE: u8 = 14;
    pub const L_UMBER: u8 = 15;
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum GfType {
    Arrow,
    Missile,
    Mana,
    HolyOrb,
    Acid,
    Elec,
    Fire,
    Cold,
    Pois,
    Plasma,
    Meteor,
    Ice,
    Water,
    Nether,
    Chaos,
    Disenchant,
    Nexus,
    Confusion,
    Sound,
    Shards,
    Force,
    Inertia,
    Gravity,
    Time,
    LiteWeak,
    Lite,
    DarkWeak,
    Dark,
    KillWall,
    KillDoor,
    KillTrap,
    MakeDoor,
    MakeTrap,
    OldClone,
    OldPoly,
    OldHeal,
    OldSpeed,
    OldSlow,
    OldConf,
    OldSleep,
    OldDrain,
    AwayUndead,
    AwayEvil,
    AwayAll,
    TurnUndead,
    TurnEvil,
    TurnAll,
    DispUndead,
    DispEvil,
    DispAll,
    HealPlayer,
    ProjectSpell,
    ProjectPrayer,
}

impl GfType {
    /// Helpful to players: healing and spell relays
    pub const fn is_beneficial(&self) -> bool {
        matches!(
            self,
            GfType::HealPlayer | GfType::ProjectSpell | GfType::ProjectPrayer
        )
    }

    /// The damage field carries a spell index rather than damage
    pub const fn is_relay(&self) -> bool {
        matches!(self, GfType::ProjectSpell | GfType::ProjectPrayer)
    }

    /// Colour of the visual effect
    pub fn color(&self, rng: &mut GameRng) -> u8 {
        use color::*;
        match self {
            GfType::Missile | GfType::Arrow => SLATE,
            GfType::Acid => SLATE,
            GfType::Elec => BLUE,
            GfType::Fire => RED,
            GfType::Cold => WHITE,
            GfType::Pois => GREEN,
            GfType::HolyOrb => L_DARK,
            GfType::Mana => L_DARK,
            GfType::Water => SLATE,
            GfType::Nether => L_GREEN,
            GfType::Chaos => *rng.choose(&[RED, GREEN, BLUE, YELLOW, VIOLET, ORANGE]).unwrap_or(&VIOLET),
            GfType::Disenchant => VIOLET,
            GfType::Nexus => L_RED,
            GfType::Confusion => L_UMBER,
            GfType::Sound => YELLOW,
            GfType::Shards => UMBER,
            GfType::Force => UMBER,
            GfType::Inertia => L_WHITE,
            GfType::Gravity => L_WHITE,
            GfType::Time => L_BLUE,
            GfType::LiteWeak | GfType::Lite => ORANGE,
            GfType::DarkWeak | GfType::Dark => L_DARK,
            GfType::Plasma => RED,
            GfType::Meteor => RED,
            GfType::Ice => WHITE,
            _ => WHITE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_names() {
        assert_eq!(GfType::from_str("acid").unwrap(), GfType::Acid);
        assert_eq!(GfType::from_str("kill_wall").unwrap(), GfType::KillWall);
        assert_eq!(GfType::from_str("Holy_Orb").unwrap(), GfType::HolyOrb);
        assert!(GfType::from_str("frost").is_err());
    }

    #[test]
    fn test_relays_are_beneficial() {
        for gf in GfType::iter() {
            if gf.is_relay() {
                assert!(gf.is_beneficial());
            }
        }
        assert!(!GfType::Fire.is_beneficial());
    }
}
