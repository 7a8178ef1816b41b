//! Monster instances

use serde::{Deserialize, Serialize};

use super::{MonsterRace, RaceId};
use crate::GameRng;
use crate::dungeon::{Depth, Grid};

/// Stable handle into the [`MonsterList`](super::MonsterList)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonsterId(pub u32);

impl std::fmt::Display for MonsterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "m{}", self.0)
    }
}

/// A live monster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub id: MonsterId,
    pub race: RaceId,
    pub depth: Depth,
    pub grid: Grid,
    pub hp: i32,
    pub maxhp: i32,
    pub speed: i32,

    /// Turns remaining stunned
    pub stunned: i32,
    /// Turns remaining confused
    pub confused: i32,
    /// Turns remaining afraid
    pub afraid: i32,
    /// Turns remaining asleep
    pub asleep: i32,
}

impl Monster {
    /// Fresh monster of the given race; the list assigns the real id
    pub fn new(race_id: RaceId, race: &MonsterRace, depth: Depth, grid: Grid, rng: &mut GameRng) -> Self {
        let hp = race.roll_hp(rng);
        Self {
            id: MonsterId(0),
            race: race_id,
            depth,
            grid,
            hp,
            maxhp: hp,
            speed: race.speed,
            stunned: 0,
            confused: 0,
            afraid: 0,
            asleep: 0,
        }
    }

    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = hp;
        self.maxhp = self.maxhp.max(hp);
        self
    }

    pub fn is_awake(&self) -> bool {
        self.asleep == 0
    }
}
