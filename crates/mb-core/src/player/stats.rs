//! Player stats (STR, INT, WIS, DEX, CON, CHR)
//!
//! Values above 18 encode the 18/xx range: 18/50 is stored as 68,
//! 18/100 as 118.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

use crate::GameRng;
use crate::consts::{STAT_MAX, STAT_MIN};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumCount,
)]
#[repr(u8)]
pub enum Stat {
    Str = 0,
    Int = 1,
    Wis = 2,
    Dex = 3,
    Con = 4,
    Chr = 5,
}

impl Stat {
    pub const ALL: [Stat; 6] = [Stat::Str, Stat::Int, Stat::Wis, Stat::Dex, Stat::Con, Stat::Chr];

    pub const fn index(&self) -> usize {
        *self as usize
    }
}

/// Current and maximum value of every stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    cur: [i16; Stat::COUNT],
    max: [i16; Stat::COUNT],
}

impl Default for Stats {
    fn default() -> Self {
        Self::uniform(14)
    }
}

impl Stats {
    pub fn uniform(value: i16) -> Self {
        let value = value.clamp(STAT_MIN, STAT_MAX);
        Self {
            cur: [value; Stat::COUNT],
            max: [value; Stat::COUNT],
        }
    }

    pub fn cur(&self, stat: Stat) -> i16 {
        self.cur[stat.index()]
    }

    pub fn max(&self, stat: Stat) -> i16 {
        self.max[stat.index()]
    }

    /// Set both current and maximum
    pub fn set(&mut self, stat: Stat, value: i16) {
        let value = value.clamp(STAT_MIN, STAT_MAX);
        self.cur[stat.index()] = value;
        self.max[stat.index()] = value;
    }

    pub fn set_cur(&mut self, stat: Stat, value: i16) {
        self.cur[stat.index()] = value.clamp(STAT_MIN, STAT_MAX);
    }

    /// Swap the current and maximum values of two stats
    pub fn swap(&mut self, a: Stat, b: Stat) {
        self.cur.swap(a.index(), b.index());
        self.max.swap(a.index(), b.index());
    }

    /// Lower a stat; `amount` is a percentage-like severity
    ///
    /// With `permanent` the maximum is lowered too. Returns whether
    /// anything changed.
    pub fn dec_stat(&mut self, stat: Stat, amount: i32, permanent: bool, rng: &mut GameRng) -> bool {
        let i = stat.index();
        let mut changed = false;

        let cur = self.cur[i];
        if cur > STAT_MIN {
            let lowered = lower_value(cur, amount, rng);
            if lowered != cur {
                self.cur[i] = lowered;
                changed = true;
            }
        }

        let max = self.max[i];
        if permanent && max > STAT_MIN {
            let lowered = lower_value(max, amount, rng);
            if lowered != max {
                self.max[i] = lowered;
                changed = true;
            }
        }

        changed
    }

    /// Raise a stat, pushing the maximum along with it
    pub fn inc_stat(&mut self, stat: Stat, rng: &mut GameRng) -> bool {
        let i = stat.index();
        let mut value = self.cur[i];
        if value >= STAT_MAX {
            return false;
        }

        if value < 18 {
            value += if rng.percent(75) { 1 } else { 2 };
        } else if value < 18 + 98 {
            let gain = (((STAT_MAX - value) / 2 + 3) / 2).max(1);
            value += rng.randint1(gain as i32) as i16 + gain / 2;
            value = value.min(18 + 99);
        } else {
            value += 1;
        }

        self.cur[i] = value;
        self.max[i] = self.max[i].max(value);
        true
    }

    /// Restore a drained stat to its maximum
    pub fn res_stat(&mut self, stat: Stat) -> bool {
        let i = stat.index();
        if self.cur[i] == self.max[i] {
            return false;
        }
        self.cur[i] = self.max[i];
        true
    }
}

fn lower_value(value: i16, amount: i32, rng: &mut GameRng) -> i16 {
    let mut v = value as i32;
    if v <= 18 {
        if amount > 90 {
            v -= 1;
        }
        if amount > 50 {
            v -= 1;
        }
        if amount > 20 {
            v -= 1;
        }
        v -= 1;
    } else {
        let loss = ((v - 18) / 2 + 1) / 2 + 1;
        let loss = ((rng.randint1(loss) + loss) * amount / 100).max(amount / 2);
        v -= loss;
        if v < 18 {
            v = if amount <= 20 { 18 } else { 17 };
        }
    }
    v.max(STAT_MIN as i32) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dec_stat_low_values() {
        let mut rng = GameRng::new(42);
        let mut stats = Stats::uniform(10);
        assert!(stats.dec_stat(Stat::Str, 10, false, &mut rng));
        assert_eq!(stats.cur(Stat::Str), 9);
        assert_eq!(stats.max(Stat::Str), 10);

        assert!(stats.dec_stat(Stat::Str, 95, true, &mut rng));
        assert_eq!(stats.cur(Stat::Str), 5);
        assert_eq!(stats.max(Stat::Str), 6);
    }

    #[test]
    fn test_dec_stat_floor() {
        let mut rng = GameRng::new(42);
        let mut stats = Stats::uniform(3);
        assert!(!stats.dec_stat(Stat::Con, 100, true, &mut rng));
        assert_eq!(stats.cur(Stat::Con), 3);
    }

    #[test]
    fn test_dec_stat_high_values_stay_above_17() {
        let mut rng = GameRng::new(7);
        let mut stats = Stats::uniform(18 + 50);
        assert!(stats.dec_stat(Stat::Dex, 10, false, &mut rng));
        assert!(stats.cur(Stat::Dex) >= 18);
        assert!(stats.cur(Stat::Dex) < 18 + 50);
    }

    #[test]
    fn test_inc_and_restore() {
        let mut rng = GameRng::new(42);
        let mut stats = Stats::uniform(12);
        stats.dec_stat(Stat::Wis, 10, false, &mut rng);
        assert!(stats.res_stat(Stat::Wis));
        assert!(!stats.res_stat(Stat::Wis));

        assert!(stats.inc_stat(Stat::Wis, &mut rng));
        assert!(stats.cur(Stat::Wis) > 12);
        assert_eq!(stats.cur(Stat::Wis), stats.max(Stat::Wis));

        stats.set(Stat::Wis, STAT_MAX);
        assert!(!stats.inc_stat(Stat::Wis, &mut rng));
    }

    #[test]
    fn test_swap() {
        let mut stats = Stats::uniform(10);
        stats.set(Stat::Str, 16);
        stats.swap(Stat::Str, Stat::Int);
        assert_eq!(stats.cur(Stat::Int), 16);
        assert_eq!(stats.cur(Stat::Str), 10);
    }
}
