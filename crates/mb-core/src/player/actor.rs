//! Player state as seen by the projection engine

use bitflags::bitflags;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::{Equipment, Stats, Timed, TimedEffect};
use crate::consts::{DUNGEON_HGT, DUNGEON_WID, INVEN_PACK, PY_MAX_EXP, PY_MAX_LEVEL};
use crate::dungeon::{Depth, Grid};
use crate::monster::{MonsterId, RaceFlags, RaceId};
use crate::object::Object;

/// Stable player handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// Party membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartyId(pub u16);

bitflags! {
    /// Permanent resistances and protections
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct PlayerFlags: u32 {
        const IM_ACID    = 1 << 0;
        const IM_ELEC    = 1 << 1;
        const IM_FIRE    = 1 << 2;
        const IM_COLD    = 1 << 3;
        const RES_ACID   = 1 << 4;
        const RES_ELEC   = 1 << 5;
        const RES_FIRE   = 1 << 6;
        const RES_COLD   = 1 << 7;
        const RES_POIS   = 1 << 8;
        const RES_LITE   = 1 << 9;
        const RES_DARK   = 1 << 10;
        const RES_BLIND  = 1 << 11;
        const RES_CONF   = 1 << 12;
        const RES_SOUND  = 1 << 13;
        const RES_SHARDS = 1 << 14;
        const RES_NEXUS  = 1 << 15;
        const RES_NETHER = 1 << 16;
        const RES_CHAOS  = 1 << 17;
        const RES_DISEN  = 1 << 18;
        const RES_FEAR   = 1 << 19;
        const HOLD_LIFE  = 1 << 20;
        const FREE_ACT   = 1 << 21;
    }
}

/// The part of the map a player's client is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub top: i32,
    pub left: i32,
    pub height: i32,
    pub width: i32,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            top: 0,
            left: 0,
            height: DUNGEON_HGT,
            width: DUNGEON_WID,
        }
    }
}

impl Panel {
    pub fn contains(&self, g: Grid) -> bool {
        g.y >= self.top && g.x >= self.left && g.y < self.top + self.height && g.x < self.left + self.width
    }

    /// Screen coordinates of a map grid
    pub fn to_screen(&self, g: Grid) -> (i32, i32) {
        (g.y - self.top, g.x - self.left)
    }
}

/// Something queued for delivery to the player's client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    Message(String),
    /// Transient glyph drawn at screen position (y, x)
    Visual { y: i32, x: i32, attr: u8, ch: char },
    /// Cast a spell or prayer on the player's behalf
    SpellRelay { prayer: bool, spell: i32 },
}

/// Actor shown in the player's health bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackTarget {
    Monster(MonsterId),
    Player(PlayerId),
}

/// Experience needed to reach each level after the first
pub const PLAYER_EXP: [i32; (PY_MAX_LEVEL - 1) as usize] = [
    10, 25, 45, 70, 100, 140, 200, 280, 380, 500, 650, 850, 1100, 1400, 1800, 2300, 2900, 3600,
    4400, 5400, 6800, 8400, 10200, 12500, 17500, 25000, 35000, 50000, 75000, 100000, 150000,
    200000, 275000, 350000, 450000, 550000, 700000, 850000, 1000000, 1250000, 1500000, 1800000,
    2100000, 2400000, 2700000, 3000000, 3500000, 4000000, 4500000,
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub depth: Depth,
    pub grid: Grid,

    pub chp: i32,
    pub mhp: i32,
    pub lev: i32,
    pub exp: i32,
    pub max_exp: i32,
    /// Experience penalty percentage
    pub expfact: i32,
    /// Saving throw skill (0..100)
    pub skill_sav: i32,
    /// Radius of carried light
    pub light: i32,

    pub stats: Stats,
    pub flags: PlayerFlags,
    pub timed: Timed,
    pub inventory: Vec<Object>,
    pub equipment: Equipment,

    pub party: Option<PartyId>,
    pub panel: Panel,

    pub ghost: bool,
    pub fruit_bat: bool,
    pub death: bool,
    pub died_from: String,
    /// Current action interrupted
    pub disturbed: bool,
    /// Already resolved by the projection in progress
    pub project_hurt: bool,
    /// Waiting to be moved to `depth`
    pub new_level: bool,
    pub health_track: Option<TrackTarget>,
    /// Race flags this player has witnessed
    pub lore: HashMap<RaceId, RaceFlags>,

    pub outbox: Vec<Notice>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, depth: Depth, grid: Grid) -> Self {
        Self {
            id,
            name: name.into(),
            depth,
            grid,
            chp: 100,
            mhp: 100,
            lev: 1,
            exp: 0,
            max_exp: 0,
            expfact: 100,
            skill_sav: 30,
            light: 1,
            stats: Stats::default(),
            flags: PlayerFlags::empty(),
            timed: Timed::default(),
            inventory: Vec::new(),
            equipment: Equipment::default(),
            party: None,
            panel: Panel::default(),
            ghost: false,
            fruit_bat: false,
            death: false,
            died_from: String::new(),
            disturbed: false,
            project_hurt: false,
            new_level: false,
            health_track: None,
            lore: HashMap::new(),
            outbox: Vec::new(),
        }
    }

    pub fn with_hp(mut self, hp: i32) -> Self {
        self.chp = hp;
        self.mhp = self.mhp.max(hp);
        self
    }

    pub fn with_flags(mut self, flags: PlayerFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn has(&self, flag: PlayerFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn is_blind(&self) -> bool {
        self.timed.active(TimedEffect::Blind)
    }

    /// Queue a text message
    pub fn msg(&mut self, text: impl Into<String>) {
        self.outbox.push(Notice::Message(text.into()));
    }

    /// All queued text messages, oldest first
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.outbox.iter().filter_map(|n| match n {
            Notice::Message(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Interrupt whatever the player is doing
    pub fn disturb(&mut self) {
        self.disturbed = true;
    }

    /// Adjust a timed effect and report the transition
    pub fn inc_timed(&mut self, effect: TimedEffect, amount: i32) -> bool {
        match self.timed.inc(effect, amount) {
            Some(text) => {
                self.msg(text);
                true
            }
            None => false,
        }
    }

    pub fn set_timed(&mut self, effect: TimedEffect, value: i32) -> bool {
        match self.timed.set(effect, value) {
            Some(text) => {
                self.msg(text);
                true
            }
            None => false,
        }
    }

    /// Give an item to the player; fails when the pack is full
    pub fn carry(&mut self, obj: Object) -> Result<(), Object> {
        if self.inventory.len() >= INVEN_PACK {
            return Err(obj);
        }
        self.inventory.push(obj);
        Ok(())
    }

    /// Remember that a race was seen to have some flags
    pub fn learn(&mut self, race: RaceId, flags: RaceFlags) {
        *self.lore.entry(race).or_default() |= flags;
    }

    pub fn gain_exp(&mut self, amount: i32) {
        self.exp = (self.exp + amount.max(0)).min(PY_MAX_EXP);
        self.max_exp = self.max_exp.max(self.exp);
        self.check_experience();
    }

    pub fn lose_exp(&mut self, amount: i32) {
        self.exp = (self.exp - amount.max(0)).max(0);
        self.check_experience();
    }

    /// Recompute level from experience
    pub fn check_experience(&mut self) {
        let expfact = self.expfact;
        let needed = |lev: i32| PLAYER_EXP[(lev - 1) as usize] * expfact / 100;

        while self.lev > 1 && self.exp < needed(self.lev - 1) {
            self.lev -= 1;
            let text = format!("You feel less experienced. You are now level {}.", self.lev);
            self.msg(text);
        }
        while self.lev < PY_MAX_LEVEL && self.exp >= needed(self.lev) {
            self.lev += 1;
            let text = format!("Welcome to level {}.", self.lev);
            self.msg(text);
        }
    }
}
