use serde::{Deserialize, Serialize};

use crate::World;
use crate::dungeon::Grid;
use crate::monster::MonsterId;
use crate::player::PlayerId;

/// Who launched a projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// Traps and other environmental effects
    Env,
    Monster(MonsterId),
    Player(PlayerId),
}

impl Source {
    pub const fn player(&self) -> Option<PlayerId> {
        match self {
            Source::Player(id) => Some(*id),
            _ => None,
        }
    }

    /// Current position of the source, if it has one
    pub fn position(&self, world: &World) -> Option<Grid> {
        match self {
            Source::Env => None,
            Source::Monster(id) => world.monsters.get(*id).map(|m| m.grid),
            Source::Player(id) => world.players.get(*id).map(|p| p.grid),
        }
    }

    /// Cause of death recorded when this source kills a player
    pub fn killer_name(&self, world: &World) -> String {
        match self {
            Source::Env => "a trap".to_string(),
            Source::Monster(id) => match world.race_of(*id) {
                Some(race) if race.is_unique() => race.name.clone(),
                Some(race) => format!("a {}", race.name),
                None => "something".to_string(),
            },
            Source::Player(id) => world
                .players
                .get(*id)
                .map_or_else(|| "something".to_string(), |p| p.name.clone()),
        }
    }
}
