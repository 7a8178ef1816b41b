//! Monsters: races, instances, and the monster list

mod list;
mod monst;
mod race;

pub use list::MonsterList;
pub use monst::{Monster, MonsterId};
pub use race::{BreathFlags, MonsterRace, RaceFlags, RaceId, RaceTable};
