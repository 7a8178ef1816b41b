//! Monster races (what kind of monster something is)

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::GameRng;
use crate::consts::NORMAL_SPEED;

bitflags! {
    /// Innate race properties
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct RaceFlags: u64 {
        const UNIQUE     = 1 << 0;
        const EVIL       = 1 << 1;
        const UNDEAD     = 1 << 2;
        const DEMON      = 1 << 3;
        const ANIMAL     = 1 << 4;
        /// Mindless; "destroyed" rather than killed
        const STUPID     = 1 << 5;
        const HURT_LITE  = 1 << 6;
        const HURT_ROCK  = 1 << 7;
        const IM_ACID    = 1 << 8;
        const IM_ELEC    = 1 << 9;
        const IM_FIRE    = 1 << 10;
        const IM_COLD    = 1 << 11;
        const IM_POIS    = 1 << 12;
        const IM_WATER   = 1 << 13;
        const RES_NETH   = 1 << 14;
        const RES_PLAS   = 1 << 15;
        const RES_NEXU   = 1 << 16;
        const RES_DISE   = 1 << 17;
        const NO_CONF    = 1 << 18;
        const NO_SLEEP   = 1 << 19;
        const NO_FEAR    = 1 << 20;
        const MULTIPLY   = 1 << 21;
        const NEVER_MOVE = 1 << 22;
        const ONLY_GOLD  = 1 << 23;
        const ONLY_ITEM  = 1 << 24;
        const DROP_60    = 1 << 25;
        const DROP_90    = 1 << 26;
        const DROP_1D2   = 1 << 27;
        const DROP_2D2   = 1 << 28;
    }
}

bitflags! {
    /// Breath attacks; breathing an element grants resistance to it
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct BreathFlags: u32 {
        const ACID  = 1 << 0;
        const ELEC  = 1 << 1;
        const FIRE  = 1 << 2;
        const COLD  = 1 << 3;
        const POIS  = 1 << 4;
        const NETH  = 1 << 5;
        const LITE  = 1 << 6;
        const DARK  = 1 << 7;
        const CONF  = 1 << 8;
        const SOUN  = 1 << 9;
        const CHAO  = 1 << 10;
        const DISE  = 1 << 11;
        const NEXU  = 1 << 12;
        const TIME  = 1 << 13;
        const INER  = 1 << 14;
        const GRAV  = 1 << 15;
        const SHAR  = 1 << 16;
        const PLAS  = 1 << 17;
        /// Force
        const WALL  = 1 << 18;
    }
}

/// Index into the [`RaceTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RaceId(pub u16);

/// Static description of a monster race
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterRace {
    pub name: String,
    pub glyph: char,
    pub level: i32,
    pub speed: i32,
    /// Hit dice (count, sides)
    pub hit_dice: (i32, i32),
    /// Experience value at level 1
    pub mexp: i32,
    /// 1 in `rarity` chance to be considered; 0 never generates
    pub rarity: i32,
    pub flags: RaceFlags,
    pub breaths: BreathFlags,
}

impl MonsterRace {
    pub fn new(name: &str, glyph: char, level: i32) -> Self {
        Self {
            name: name.to_string(),
            glyph,
            level,
            speed: NORMAL_SPEED,
            hit_dice: (level.max(1), 8),
            mexp: level.max(1) * 2,
            rarity: 1,
            flags: RaceFlags::empty(),
            breaths: BreathFlags::empty(),
        }
    }

    pub fn with_flags(mut self, flags: RaceFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_breaths(mut self, breaths: BreathFlags) -> Self {
        self.breaths |= breaths;
        self
    }

    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_rarity(mut self, rarity: i32) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn is_unique(&self) -> bool {
        self.flags.contains(RaceFlags::UNIQUE)
    }

    /// Mindless and unliving monsters are "destroyed" rather than killed
    pub fn is_nonliving(&self) -> bool {
        self.flags
            .intersects(RaceFlags::DEMON | RaceFlags::UNDEAD | RaceFlags::STUPID)
            || matches!(self.glyph, 'E' | 'v' | 'g')
    }

    /// Hit points for a freshly generated monster
    pub fn roll_hp(&self, rng: &mut GameRng) -> i32 {
        let (num, sides) = self.hit_dice;
        if self.is_unique() {
            num * sides
        } else {
            rng.damroll(num, sides).max(1)
        }
    }
}

/// All known monster races
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceTable {
    races: Vec<MonsterRace>,
}

impl Default for RaceTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RaceTable {
    pub fn new(races: Vec<MonsterRace>) -> Self {
        Self { races }
    }

    pub fn get(&self, id: RaceId) -> Option<&MonsterRace> {
        self.races.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.races.len()
    }

    pub fn is_empty(&self) -> bool {
        self.races.is_empty()
    }

    pub fn find_by_name(&self, name: &str) -> Option<RaceId> {
        self.races
            .iter()
            .position(|r| r.name.eq_ignore_ascii_case(name))
            .map(|i| RaceId(i as u16))
    }

    /// First race drawn with the given map glyph
    pub fn find_by_glyph(&self, glyph: char) -> Option<RaceId> {
        self.races
            .iter()
            .position(|r| r.glyph == glyph)
            .map(|i| RaceId(i as u16))
    }

    /// Pick a random race of at most `level`, weighted by rarity
    pub fn get_mon_num(&self, level: i32, rng: &mut GameRng) -> Option<RaceId> {
        let weight = |r: &MonsterRace| if r.rarity > 0 { 100 / r.rarity } else { 0 };
        let total: i32 = self
            .races
            .iter()
            .filter(|r| r.level <= level)
            .map(weight)
            .sum();
        if total <= 0 {
            return None;
        }

        let mut roll = rng.randint0(total);
        for (i, race) in self.races.iter().enumerate() {
            if race.level > level {
                continue;
            }
            roll -= weight(race);
            if roll < 0 {
                return Some(RaceId(i as u16));
            }
        }
        None
    }

    /// The built-in bestiary
    pub fn standard() -> Self {
        use RaceFlags as F;
        let races = vec![
            MonsterRace::new("jackal", 'C', 1).with_flags(F::ANIMAL),
            MonsterRace::new("soldier ant", 'a', 1).with_flags(F::ANIMAL),
            MonsterRace::new("floating eye", 'e', 1)
                .with_flags(F::NEVER_MOVE | F::HURT_LITE | F::NO_FEAR),
            MonsterRace::new("white worm mass", 'w', 1)
                .with_flags(F::STUPID | F::MULTIPLY | F::IM_POIS | F::HURT_LITE)
                .with_speed(100),
            MonsterRace::new("kobold", 'k', 2).with_flags(F::EVIL | F::DROP_60),
            MonsterRace::new("cave spider", 'S', 2)
                .with_flags(F::ANIMAL | F::HURT_LITE)
                .with_speed(120),
            MonsterRace::new("Grip, Farmer Maggot's Dog", 'C', 2)
                .with_flags(F::UNIQUE | F::ANIMAL)
                .with_speed(120),
            MonsterRace::new("poltergeist", 'G', 3)
                .with_flags(F::UNDEAD | F::EVIL | F::IM_COLD | F::IM_POIS | F::NO_SLEEP)
                .with_speed(130),
            MonsterRace::new("green naga", 'n', 5)
                .with_flags(F::EVIL | F::IM_ACID | F::DROP_60)
                .with_breaths(BreathFlags::ACID),
            MonsterRace::new("cave bear", 'q', 9).with_flags(F::ANIMAL),
            MonsterRace::new("Bullroarer the Hobbit", 'h', 10)
                .with_flags(F::UNIQUE | F::DROP_90 | F::DROP_1D2)
                .with_rarity(3),
            MonsterRace::new("black orc", 'o', 13).with_flags(F::EVIL | F::HURT_LITE | F::DROP_60),
            MonsterRace::new("imp", 'u', 17)
                .with_flags(F::DEMON | F::EVIL | F::IM_FIRE | F::RES_NETH)
                .with_speed(120),
            MonsterRace::new("water spirit", 'E', 17)
                .with_flags(F::IM_WATER | F::IM_POIS | F::NO_FEAR | F::NO_SLEEP | F::NO_CONF)
                .with_speed(120),
            MonsterRace::new("dark elven priest", 'h', 18)
                .with_flags(F::EVIL | F::HURT_LITE | F::DROP_1D2),
            MonsterRace::new("earth hound", 'Z', 20)
                .with_flags(F::ANIMAL)
                .with_breaths(BreathFlags::SHAR),
            MonsterRace::new("vibration hound", 'Z', 25)
                .with_flags(F::ANIMAL)
                .with_breaths(BreathFlags::SOUN),
            MonsterRace::new("skeleton orc", 's', 26)
                .with_flags(
                    F::UNDEAD | F::EVIL | F::IM_POIS | F::IM_COLD | F::NO_CONF | F::NO_SLEEP | F::NO_FEAR,
                ),
            MonsterRace::new("disenchanter eye", 'e', 27)
                .with_flags(F::NEVER_MOVE | F::RES_DISE | F::HURT_LITE),
            MonsterRace::new("chaos drake", 'd', 33)
                .with_flags(F::EVIL | F::DROP_1D2)
                .with_breaths(BreathFlags::CHAO | BreathFlags::DISE),
            MonsterRace::new("gravity hound", 'Z', 35)
                .with_flags(F::ANIMAL)
                .with_breaths(BreathFlags::GRAV),
            MonsterRace::new("inertia hound", 'Z', 35)
                .with_flags(F::ANIMAL)
                .with_breaths(BreathFlags::INER),
            MonsterRace::new("impact hound", 'Z', 35)
                .with_flags(F::ANIMAL)
                .with_breaths(BreathFlags::WALL),
            MonsterRace::new("xorn", 'X', 36)
                .with_flags(F::HURT_ROCK | F::IM_FIRE | F::IM_COLD | F::IM_ELEC | F::IM_POIS),
            MonsterRace::new("time vortex", 'v', 38)
                .with_flags(F::NO_FEAR | F::NO_CONF | F::NO_SLEEP)
                .with_breaths(BreathFlags::TIME)
                .with_speed(130),
            MonsterRace::new("nexus quylthulg", 'Q', 41)
                .with_flags(F::NEVER_MOVE | F::RES_NEXU | F::NO_CONF | F::NO_SLEEP),
            MonsterRace::new("plasma vortex", 'v', 57)
                .with_flags(F::RES_PLAS | F::IM_FIRE | F::IM_ELEC | F::NO_FEAR | F::NO_CONF | F::NO_SLEEP)
                .with_breaths(BreathFlags::PLAS)
                .with_speed(130),
        ];
        Self { races }
    }
}
