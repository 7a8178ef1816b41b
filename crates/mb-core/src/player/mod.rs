//! Players: stats, timed effects, equipment, and damage helpers

mod actor;
mod damage;
mod equip;
mod list;
mod stats;
mod timed;

pub use actor::{
    Notice, PLAYER_EXP, Panel, PartyId, Player, PlayerFlags, PlayerId, TrackTarget,
};
pub use damage::{
    acid_dam, apply_disenchant, cold_dam, elec_dam, elemental_dam, fire_dam, hp_player,
    inven_damage, minus_ac, take_hit,
};
pub use equip::{EquipSlot, Equipment};
pub use list::PlayerList;
pub use stats::{Stat, Stats};
pub use timed::{Timed, TimedEffect};
