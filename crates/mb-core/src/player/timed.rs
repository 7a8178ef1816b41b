//! Timed player effects (blindness, stun, temporary resistances, ...)

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

use crate::consts::PLAYER_TIMER_CAP;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumCount,
)]
#[repr(u8)]
pub enum TimedEffect {
    Blind,
    Confused,
    Poisoned,
    Afraid,
    Paralyzed,
    Image,
    Slow,
    Stun,
    Cut,
    Invuln,
    OpposeAcid,
    OpposeElec,
    OpposeFire,
    OpposeCold,
    OpposePois,
}

impl TimedEffect {
    /// Messages shown when the effect starts and when it wears off
    pub const fn messages(&self) -> (&'static str, &'static str) {
        match self {
            TimedEffect::Blind => ("You are blind!", "You can see again."),
            TimedEffect::Confused => ("You are confused!", "You feel less confused now."),
            TimedEffect::Poisoned => ("You are poisoned!", "You are no longer poisoned."),
            TimedEffect::Afraid => ("You are terrified!", "You feel bolder now."),
            TimedEffect::Paralyzed => ("You are paralyzed!", "You can move again."),
            TimedEffect::Image => ("Oh, wow! Everything looks so cosmic now!", "You can see clearly again."),
            TimedEffect::Slow => ("You feel yourself moving slower!", "You feel yourself speed up."),
            TimedEffect::Stun => ("You have been stunned.", "You are no longer stunned."),
            TimedEffect::Cut => ("You have been given a graze.", "You are no longer bleeding."),
            TimedEffect::Invuln => ("You feel invulnerable!", "You feel vulnerable once more."),
            TimedEffect::OpposeAcid => ("You feel resistant to acid!", "You feel less resistant to acid."),
            TimedEffect::OpposeElec => ("You feel resistant to electricity!", "You feel less resistant to electricity."),
            TimedEffect::OpposeFire => ("You feel resistant to fire!", "You feel less resistant to fire."),
            TimedEffect::OpposeCold => ("You feel resistant to cold!", "You feel less resistant to cold."),
            TimedEffect::OpposePois => ("You feel resistant to poison!", "You feel less resistant to poison."),
        }
    }
}

/// Remaining turns of every timed effect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timed {
    values: [i32; TimedEffect::COUNT],
}

impl Timed {
    pub fn get(&self, effect: TimedEffect) -> i32 {
        self.values[effect as usize]
    }

    pub fn active(&self, effect: TimedEffect) -> bool {
        self.get(effect) > 0
    }

    /// Set a counter; returns the start/stop message if the state flipped
    pub fn set(&mut self, effect: TimedEffect, value: i32) -> Option<&'static str> {
        let value = value.clamp(0, PLAYER_TIMER_CAP);
        let old = self.values[effect as usize];
        self.values[effect as usize] = value;

        let (on, off) = effect.messages();
        match (old > 0, value > 0) {
            (false, true) => Some(on),
            (true, false) => Some(off),
            _ => None,
        }
    }

    pub fn inc(&mut self, effect: TimedEffect, amount: i32) -> Option<&'static str> {
        let cur = self.get(effect);
        self.set(effect, cur.saturating_add(amount))
    }
}
