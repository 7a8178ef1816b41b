//! mb-core: Spell and area-effect projection for a multiplayer dungeon
//!
//! This crate holds the world model (levels, monsters, players, floor
//! objects) and the projection engine that resolves bolts, beams, and
//! balls against it. It performs no I/O beyond loading config files;
//! everything a client should see is queued on each player's outbox.

pub mod config;
pub mod dungeon;
pub mod error;
pub mod monster;
pub mod object;
pub mod player;
pub mod project;
pub mod world;

mod consts;
mod rng;

pub use config::{EngineConfig, PvpMode};
pub use consts::*;
pub use error::{ConfigError, WorldError};
pub use project::{EffectRequest, GfType, ProjectFlags, ProjectOutcome, Source, project};
pub use rng::GameRng;
pub use world::World;
