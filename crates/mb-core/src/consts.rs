//! Core engine constants
//!
//! Tunable limits live in [`crate::EngineConfig`]; these are the fixed ones.

/// Default level dimensions
pub const DUNGEON_HGT: i32 = 66;
pub const DUNGEON_WID: i32 = 198;

/// Hard cap on cells touched by a single projection
pub const MAX_GRIDS: usize = 256;

/// Largest ring index a projection may carry
pub const MAX_RINGS: usize = 16;

/// Largest number of players notified about one visual cell
pub const MAX_VIEWERS: usize = 26;

/// Per-application damage cap against players
pub const MAX_PLAYER_DAMAGE: i32 = 1600;

/// Invulnerability ignores damage below this
pub const INVULN_THRESHOLD: i32 = 9000;

/// Ceiling for monster stun/confusion/fear counters
pub const MON_TIMER_CAP: i32 = 200;

/// Ceiling for player timed effects
pub const PLAYER_TIMER_CAP: i32 = 10000;

/// Sleep counter set by sleep-inducing projections
pub const MON_SLEEP_TURNS: i32 = 500;

/// Monster speed tiers (110 is normal)
pub const NORMAL_SPEED: i32 = 110;
pub const MON_SPEED_MAX: i32 = 150;
pub const MON_SPEED_MIN: i32 = 60;

/// Gravity teleport resistance roll
pub const RIFT_RESIST_TELEPORT: i32 = 127;

/// Experience drain multiplier for nether attacks
pub const MON_DRAIN_LIFE: i32 = 2;

/// Candidate draws per teleport round
pub const TELEPORT_TRIES: u32 = 500;

/// Teleport rounds before giving up on a packed level
pub const TELEPORT_ROUNDS: u32 = 12;

/// Polymorph race sampling attempts
pub const POLY_TRIES: u32 = 1000;

/// Player limits
pub const PY_MAX_LEVEL: i32 = 50;
pub const PY_MAX_EXP: i32 = 99_999_999;
pub const INVEN_PACK: usize = 23;

/// Stat bounds (18/100 is stored as 18 + 100)
pub const STAT_MIN: i16 = 3;
pub const STAT_MAX: i16 = 18 + 100;
