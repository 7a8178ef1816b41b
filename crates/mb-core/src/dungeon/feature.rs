//! Terrain features and per-cell flags

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Terrain feature of a single grid cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Feature {
    #[default]
    Floor,
    /// Trap not yet discovered; looks like floor
    InvisibleTrap,
    /// Glyph of warding
    Glyph,
    OpenDoor,
    BrokenDoor,
    UpStairs,
    DownStairs,
    /// Shop entrance (shop number)
    Shop(u8),
    /// Discovered trap (trap kind)
    Trap(u8),
    ClosedDoor,
    /// Locked door with lock power 1..=7
    LockedDoor(u8),
    /// Jammed (spiked) door with jam power 1..=7
    JammedDoor(u8),
    SecretDoor,
    Rubble,
    Magma,
    Quartz,
    MagmaTreasure,
    QuartzTreasure,
    Granite,
    PermWall,
    /// Player-owned house door
    HomeDoor(u8),
    Tree,
    Grass,
    Dirt,
    Mud,
    /// Cultivated crop; 0 is the generic kind
    Crop(u8),
}

impl Feature {
    /// Projections and sight pass through this feature
    pub const fn is_projectable(&self) -> bool {
        matches!(
            self,
            Feature::Floor
                | Feature::InvisibleTrap
                | Feature::Glyph
                | Feature::OpenDoor
                | Feature::BrokenDoor
                | Feature::UpStairs
                | Feature::DownStairs
                | Feature::Shop(_)
                | Feature::Trap(_)
                | Feature::Grass
                | Feature::Dirt
                | Feature::Mud
                | Feature::Crop(_)
        )
    }

    /// Plain ground with nothing worth remembering
    pub const fn is_boring(&self) -> bool {
        matches!(
            self,
            Feature::Floor
                | Feature::InvisibleTrap
                | Feature::Grass
                | Feature::Dirt
                | Feature::Mud
        )
    }

    /// Door that blocks movement and sight
    pub const fn is_closed_door(&self) -> bool {
        matches!(
            self,
            Feature::ClosedDoor | Feature::LockedDoor(_) | Feature::JammedDoor(_)
        )
    }

    pub const fn is_door(&self) -> bool {
        self.is_closed_door()
            || matches!(
                self,
                Feature::OpenDoor | Feature::BrokenDoor | Feature::SecretDoor
            )
    }

    pub const fn is_trap(&self) -> bool {
        matches!(self, Feature::Trap(_) | Feature::InvisibleTrap)
    }

    /// Immune to every form of terrain destruction
    pub const fn is_permanent(&self) -> bool {
        matches!(
            self,
            Feature::PermWall | Feature::HomeDoor(_) | Feature::Shop(_)
        )
    }

    pub const fn is_vein(&self) -> bool {
        matches!(
            self,
            Feature::Magma | Feature::Quartz | Feature::MagmaTreasure | Feature::QuartzTreasure
        )
    }

    pub const fn has_treasure(&self) -> bool {
        matches!(self, Feature::MagmaTreasure | Feature::QuartzTreasure)
    }

    /// Map glyph used by text dumps
    pub const fn symbol(&self) -> char {
        match self {
            Feature::Floor | Feature::InvisibleTrap => '.',
            Feature::Glyph => ';',
            Feature::OpenDoor | Feature::BrokenDoor => '\'',
            Feature::UpStairs => '<',
            Feature::DownStairs => '>',
            Feature::Shop(n) => (b'1' + (*n % 9)) as char,
            Feature::Trap(_) => '^',
            Feature::ClosedDoor
            | Feature::LockedDoor(_)
            | Feature::JammedDoor(_)
            | Feature::HomeDoor(_) => '+',
            Feature::SecretDoor | Feature::Granite | Feature::PermWall => '#',
            Feature::Rubble => ':',
            Feature::Magma | Feature::Quartz => '%',
            Feature::MagmaTreasure | Feature::QuartzTreasure => '*',
            Feature::Tree => 'T',
            Feature::Grass => '"',
            Feature::Dirt | Feature::Mud => '_',
            Feature::Crop(_) => ',',
        }
    }
}

bitflags! {
    /// Per-cell state flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct CellFlags: u8 {
        /// Permanently lit
        const GLOW = 0x01;
        /// Remembered by players
        const MARK = 0x02;
        /// No teleporting into this cell
        const ICKY = 0x04;
        /// Part of a room
        const ROOM = 0x08;
    }
}
