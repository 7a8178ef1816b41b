//! Error types for world mutation and configuration loading
//!
//! Projections themselves never fail; these errors come from the setup
//! API and are swallowed into "no effect" inside resolvers.

use thiserror::Error;

use crate::dungeon::{Depth, Grid};
use crate::monster::{MonsterId, RaceId};
use crate::player::PlayerId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("no level at depth {0}")]
    NoSuchLevel(Depth),

    #[error("{grid} is outside the level at depth {depth}")]
    OutOfBounds { depth: Depth, grid: Grid },

    #[error("{grid} at depth {depth} is not open floor")]
    NotFloor { depth: Depth, grid: Grid },

    #[error("{grid} at depth {depth} is already occupied")]
    Occupied { depth: Depth, grid: Grid },

    #[error("no monster with id {0}")]
    NoSuchMonster(MonsterId),

    #[error("no player with id {0}")]
    NoSuchPlayer(PlayerId),

    #[error("unknown monster race {0:?}")]
    NoSuchRace(RaceId),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config '{path}': {reason}")]
    Io { path: String, reason: String },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = WorldError::Occupied {
            depth: 3,
            grid: Grid::new(4, 7),
        };
        assert_eq!(err.to_string(), "(4, 7) at depth 3 is already occupied");
        assert_eq!(
            WorldError::NoSuchMonster(MonsterId(12)).to_string(),
            "no monster with id m12"
        );
    }
}
