//! Grid coordinates and cell contents

use serde::{Deserialize, Serialize};

use super::{CellFlags, Feature};
use crate::monster::MonsterId;
use crate::object::Object;
use crate::player::PlayerId;

/// Dungeon depth; 0 is the town, negative values are wilderness
pub type Depth = i32;

/// A (y, x) location on a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Grid {
    pub y: i32,
    pub x: i32,
}

impl Grid {
    pub const fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }

    pub const fn offset(&self, dy: i32, dx: i32) -> Self {
        Self {
            y: self.y + dy,
            x: self.x + dx,
        }
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.y, self.x)
    }
}

/// Who stands on a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Occupant {
    #[default]
    Empty,
    Monster(MonsterId),
    Player(PlayerId),
}

impl Occupant {
    pub const fn is_empty(&self) -> bool {
        matches!(self, Occupant::Empty)
    }

    pub const fn monster(&self) -> Option<MonsterId> {
        match self {
            Occupant::Monster(id) => Some(*id),
            _ => None,
        }
    }

    pub const fn player(&self) -> Option<PlayerId> {
        match self {
            Occupant::Player(id) => Some(*id),
            _ => None,
        }
    }
}

/// A single map cell
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub feat: Feature,
    pub info: CellFlags,
    pub occupant: Occupant,
    pub object: Option<Object>,
}

impl Cell {
    pub fn new(feat: Feature) -> Self {
        Self {
            feat,
            ..Default::default()
        }
    }

    pub fn is_icky(&self) -> bool {
        self.info.contains(CellFlags::ICKY)
    }

    /// Glyph for text dumps: occupant, then object, then terrain
    pub fn symbol(&self, monster_glyph: impl Fn(MonsterId) -> char) -> char {
        match self.occupant {
            Occupant::Player(_) => '@',
            Occupant::Monster(id) => monster_glyph(id),
            Occupant::Empty => self
                .object
                .as_ref()
                .map_or(self.feat.symbol(), |obj| obj.kind.symbol()),
        }
    }
}
