//! Projection effects on players

use super::{GfType, Source, Tally};
use crate::consts::{MAX_PLAYER_DAMAGE, MON_DRAIN_LIFE, RIFT_RESIST_TELEPORT};
use crate::dungeon::{Depth, Grid};
use crate::player::{
    Notice, PlayerFlags, PlayerId, Stat, TimedEffect, acid_dam, apply_disenchant, cold_dam,
    elec_dam, fire_dam, hp_player, take_hit,
};
use crate::world::{teleport_player, teleport_player_level, teleport_player_to};
use crate::{GameRng, World};

/// Follow-up that needs the whole world rather than one player
enum After {
    Nothing,
    Teleport(i32),
    Nexus,
    Morph,
}

/// Apply a projection to the player standing on one cell
///
/// A player is affected at most once per projection and never by their
/// own projections. Hostile effects from another player need PvP
/// permission and are cut to a third. Returns whether the player was
/// affected.
#[allow(clippy::too_many_arguments)]
pub fn affect_player(
    world: &mut World,
    target: PlayerId,
    source: Source,
    r: i32,
    depth: Depth,
    grid: Grid,
    dam: i32,
    typ: GfType,
    tally: &mut Tally,
) -> bool {
    let Some(p) = world.players.get(target) else {
        return false;
    };
    if p.depth != depth || p.grid != grid || p.new_level || p.project_hurt {
        return false;
    }
    if source == Source::Player(target) {
        return false;
    }

    let mut dam = dam;
    if let Source::Player(caster) = source
        && !typ.is_beneficial()
        && typ != GfType::AwayAll
    {
        if !world.pvp_okay(caster, target) {
            return false;
        }
        dam = (dam + 2) / 3;
    }

    if !typ.is_relay() {
        let base = dam;
        dam = dam.min(MAX_PLAYER_DAMAGE) / (r + 1);
        if base > 0 {
            dam = dam.max(1);
        }
    }

    tally.hit(grid);
    let killer = source.killer_name(world);
    let origin = source.position(world);

    let after = {
        let Some(p) = world.players.get_mut(target) else {
            return false;
        };
        let rng = &mut world.rng;
        let mut after = After::Nothing;

        if p.is_blind() && !typ.is_beneficial() {
            p.msg("You are hit by something!");
        }

        match typ {
            GfType::Acid => acid_dam(p, dam, &killer, rng),
            GfType::Elec => elec_dam(p, dam, &killer, rng),
            GfType::Fire => fire_dam(p, dam, &killer, rng),
            GfType::Cold => cold_dam(p, dam, &killer, rng),

            GfType::Pois => {
                let resists = p.has(PlayerFlags::RES_POIS);
                let opposed = p.timed.active(TimedEffect::OpposePois);
                if resists {
                    dam = (dam + 2) / 3;
                }
                if opposed {
                    dam = (dam + 2) / 3;
                }
                take_hit(p, dam, &killer);
                if !(resists || opposed) {
                    p.inc_timed(TimedEffect::Poisoned, rng.randint0(dam) + 10);
                }
            }

            GfType::Missile | GfType::Arrow | GfType::Mana | GfType::Meteor => {
                take_hit(p, dam, &killer);
            }

            GfType::HolyOrb => {
                dam /= 2;
                take_hit(p, dam, &killer);
            }

            GfType::Plasma => {
                take_hit(p, dam, &killer);
                if !p.has(PlayerFlags::RES_SOUND) {
                    let k = if dam > 40 { 35 } else { dam * 3 / 4 + 5 };
                    p.inc_timed(TimedEffect::Stun, rng.randint1(k));
                }
            }

            GfType::Nether => {
                if p.has(PlayerFlags::RES_NETHER) {
                    dam = fraction(dam, 6, rng);
                } else if p.has(PlayerFlags::HOLD_LIFE) && rng.percent(75) {
                    p.msg("You keep hold of your life force!");
                } else if p.has(PlayerFlags::HOLD_LIFE) {
                    p.msg("You feel your life slipping away!");
                    p.lose_exp(200 + (p.exp / 1000) * MON_DRAIN_LIFE);
                } else {
                    p.msg("You feel your life draining away!");
                    p.lose_exp(200 + (p.exp / 100) * MON_DRAIN_LIFE);
                }
                take_hit(p, dam, &killer);
            }

            GfType::Water => {
                if !p.has(PlayerFlags::RES_SOUND) {
                    p.inc_timed(TimedEffect::Stun, rng.randint1(40));
                }
                if !p.has(PlayerFlags::RES_CONF) {
                    p.inc_timed(TimedEffect::Confused, rng.randint1(5) + 5);
                }
                take_hit(p, dam, &killer);
            }

            GfType::Chaos => {
                let resists = p.has(PlayerFlags::RES_CHAOS);
                if resists {
                    dam = fraction(dam, 6, rng);
                }
                if !p.has(PlayerFlags::RES_CONF) && !resists {
                    p.inc_timed(TimedEffect::Confused, rng.randint0(20) + 10);
                }
                if !resists {
                    p.inc_timed(TimedEffect::Image, rng.randint1(10));
                }
                if !p.has(PlayerFlags::RES_NETHER) && !resists {
                    if p.has(PlayerFlags::HOLD_LIFE) && rng.percent(75) {
                        p.msg("You keep hold of your life force!");
                    } else if p.has(PlayerFlags::HOLD_LIFE) {
                        p.msg("You feel your life slipping away!");
                        p.lose_exp(500 + (p.exp / 1000) * MON_DRAIN_LIFE);
                    } else {
                        p.msg("You feel your life draining away!");
                        p.lose_exp(5000 + (p.exp / 100) * MON_DRAIN_LIFE);
                    }
                }
                take_hit(p, dam, &killer);
            }

            GfType::Shards => {
                if p.has(PlayerFlags::RES_SHARDS) {
                    dam = fraction(dam, 6, rng);
                } else {
                    p.inc_timed(TimedEffect::Cut, dam);
                }
                take_hit(p, dam, &killer);
            }

            GfType::Sound => {
                if p.has(PlayerFlags::RES_SOUND) {
                    dam = fraction(dam, 5, rng);
                } else {
                    let k = if dam > 90 { 35 } else { dam / 3 + 5 };
                    p.inc_timed(TimedEffect::Stun, rng.randint1(k));
                }
                take_hit(p, dam, &killer);
            }

            GfType::Confusion => {
                if p.has(PlayerFlags::RES_CONF) {
                    dam = fraction(dam, 5, rng);
                } else {
                    p.inc_timed(TimedEffect::Confused, rng.randint1(20) + 10);
                }
                take_hit(p, dam, &killer);
            }

            GfType::Disenchant => {
                if p.has(PlayerFlags::RES_DISEN) {
                    dam = fraction(dam, 6, rng);
                } else {
                    apply_disenchant(p, rng);
                }
                take_hit(p, dam, &killer);
            }

            GfType::Nexus => {
                if p.has(PlayerFlags::RES_NEXUS) {
                    dam = fraction(dam, 6, rng);
                } else {
                    after = After::Nexus;
                }
                take_hit(p, dam, &killer);
            }

            GfType::Force => {
                if !p.has(PlayerFlags::RES_SOUND) {
                    p.inc_timed(TimedEffect::Stun, rng.randint1(20));
                }
                take_hit(p, dam, &killer);
            }

            GfType::Inertia => {
                p.inc_timed(TimedEffect::Slow, rng.randint0(4) + 4);
                take_hit(p, dam, &killer);
            }

            GfType::LiteWeak | GfType::Lite => {
                if p.has(PlayerFlags::RES_LITE) {
                    dam = fraction(dam, 4, rng);
                } else if !p.is_blind() && !p.has(PlayerFlags::RES_BLIND) {
                    p.inc_timed(TimedEffect::Blind, rng.randint1(5) + 2);
                }
                take_hit(p, dam, &killer);
            }

            GfType::DarkWeak | GfType::Dark => {
                if p.has(PlayerFlags::RES_DARK) {
                    dam = fraction(dam, 4, rng);
                } else if !p.is_blind() && !p.has(PlayerFlags::RES_BLIND) {
                    p.inc_timed(TimedEffect::Blind, rng.randint1(5) + 2);
                }
                take_hit(p, dam, &killer);
            }

            GfType::Time => {
                match rng.randint1(10) {
                    1..=5 => {
                        p.msg("You feel life has clocked back.");
                        p.lose_exp(100 + (p.exp / 100) * MON_DRAIN_LIFE);
                    }
                    6..=9 => {
                        let stat = *rng.choose(&Stat::ALL).unwrap_or(&Stat::Str);
                        p.msg(format!(
                            "You're not as {} as you used to be...",
                            stat_adjective(stat)
                        ));
                        let lowered = p.stats.cur(stat) * 3 / 4;
                        p.stats.set_cur(stat, lowered);
                    }
                    _ => {
                        p.msg("You're not as powerful as you used to be...");
                        for stat in Stat::ALL {
                            let lowered = p.stats.cur(stat) * 3 / 4;
                            p.stats.set_cur(stat, lowered);
                        }
                    }
                }
                take_hit(p, dam, &killer);
            }

            GfType::Gravity => {
                p.msg("Gravity warps around you.");
                if rng.randint1(RIFT_RESIST_TELEPORT) > p.lev {
                    after = After::Teleport(5);
                }
                p.inc_timed(TimedEffect::Slow, rng.randint0(4) + 4);
                if !p.has(PlayerFlags::RES_SOUND) {
                    let k = if dam > 90 { 35 } else { dam / 3 + 5 };
                    p.inc_timed(TimedEffect::Stun, rng.randint1(k));
                }
                take_hit(p, dam, &killer);
            }

            GfType::Ice => {
                cold_dam(p, dam, &killer, rng);
                if !p.has(PlayerFlags::RES_SHARDS) {
                    p.inc_timed(TimedEffect::Cut, rng.damroll(5, 8));
                }
                if !p.has(PlayerFlags::RES_SOUND) {
                    p.inc_timed(TimedEffect::Stun, rng.randint1(15));
                }
            }

            GfType::AwayAll => {
                after = After::Teleport(200);
            }

            GfType::OldConf => {
                if p.has(PlayerFlags::RES_CONF) || saves(p.skill_sav, dam, rng) {
                    p.msg("You disbelieve the feeble spell.");
                } else {
                    p.inc_timed(TimedEffect::Confused, dam);
                }
            }

            GfType::OldSlow => {
                if p.has(PlayerFlags::FREE_ACT) {
                    p.msg("You are unaffected!");
                } else if saves(p.skill_sav, dam, rng) {
                    p.msg("You resist the effects!");
                } else {
                    p.inc_timed(TimedEffect::Slow, dam);
                }
            }

            // Sleep lasts a few turns whatever the power
            GfType::OldSleep => {
                if p.has(PlayerFlags::FREE_ACT) {
                    p.msg("You are unaffected!");
                } else if saves(p.skill_sav, 0, rng) {
                    p.msg("You resist the effects!");
                } else {
                    p.inc_timed(TimedEffect::Paralyzed, 1 + rng.randint1(6));
                }
            }

            GfType::TurnAll => {
                if p.has(PlayerFlags::RES_FEAR) || saves(p.skill_sav, dam, rng) {
                    p.msg("You refuse to be frightened.");
                } else {
                    p.inc_timed(TimedEffect::Afraid, dam);
                }
            }

            GfType::OldPoly => {
                if p.has(PlayerFlags::RES_NEXUS) || saves(p.skill_sav, dam, rng) {
                    p.msg("You resist the effects!");
                } else {
                    after = After::Morph;
                }
            }

            GfType::HealPlayer => {
                hp_player(p, dam);
                let cut = p.timed.get(TimedEffect::Cut);
                p.set_timed(TimedEffect::Cut, (cut - 10).max(0));
            }

            GfType::ProjectSpell | GfType::ProjectPrayer => {
                p.outbox.push(Notice::SpellRelay {
                    prayer: typ == GfType::ProjectPrayer,
                    spell: dam,
                });
            }

            _ => {}
        }

        p.project_hurt = true;
        if !typ.is_beneficial() {
            p.disturb();
        }
        after
    };

    match after {
        After::Nothing => {}
        After::Teleport(dis) => {
            teleport_player(world, target, dis);
        }
        After::Nexus => apply_nexus(world, target, origin),
        After::Morph => apply_morph(world, target),
    }

    tracing::trace!(player = %target, gf = %typ, dam, "player hit");
    true
}

/// Damage left after a partial resistance: `num` parts in 7 to 12
fn fraction(dam: i32, num: i32, rng: &mut GameRng) -> i32 {
    dam * num / (rng.randint1(6) + 6)
}

/// Saving throw against a hostile status effect of strength `dam`
///
/// Stronger attacks are harder to shrug off.
fn saves(skill: i32, dam: i32, rng: &mut GameRng) -> bool {
    rng.randint0(100 + dam * 6) < skill
}

fn stat_adjective(stat: Stat) -> &'static str {
    match stat {
        Stat::Str => "strong",
        Stat::Int => "bright",
        Stat::Wis => "wise",
        Stat::Dex => "agile",
        Stat::Con => "hale",
        Stat::Chr => "beautiful",
    }
}

/// Swap two different stats at random
fn scramble(world: &mut World, id: PlayerId) {
    let a = world.rng.randint0(6) as usize;
    let b = (a + world.rng.randint1(5) as usize) % 6;
    if let Some(p) = world.players.get_mut(id) {
        p.msg("Your body starts to scramble...");
        p.stats.swap(Stat::ALL[a], Stat::ALL[b]);
    }
}

/// Random nexus side effect: teleport, teleport to the source, level
/// teleport, or stat scrambling
pub fn apply_nexus(world: &mut World, id: PlayerId, origin: Option<Grid>) {
    let Some(skill) = world.players.get(id).map(|p| p.skill_sav) else {
        return;
    };

    match world.rng.randint1(7) {
        1..=3 => {
            teleport_player(world, id, 200);
        }
        4 | 5 => match origin {
            Some(to) => {
                teleport_player_to(world, id, to);
            }
            None => {
                teleport_player(world, id, 200);
            }
        },
        6 => {
            if world.rng.randint0(100) < skill {
                if let Some(p) = world.players.get_mut(id) {
                    p.msg("You resist the effects!");
                }
            } else {
                teleport_player_level(world, id);
            }
        }
        _ => {
            if world.rng.randint0(100) < skill {
                if let Some(p) = world.players.get_mut(id) {
                    p.msg("You resist the effects!");
                }
            } else {
                scramble(world, id);
            }
        }
    }
}

/// Polymorph side effect on a player
pub fn apply_morph(world: &mut World, id: PlayerId) {
    if world.rng.one_in(2) {
        scramble(world, id);
    } else if let Some(p) = world.players.get_mut(id) {
        p.msg("You have been turned into a fruit bat!");
        p.fruit_bat = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PvpMode;
    use crate::dungeon::Level;
    use crate::player::{PartyId, Player};

    fn world() -> World {
        let mut world = World::seeded(33);
        world.add_level(Level::new_open(1, 20, 20));
        for (id, x) in [(1, 3), (2, 8)] {
            world
                .place_player(Player::new(PlayerId(id), format!("P{id}"), 1, Grid::new(10, x)))
                .unwrap();
        }
        world
    }

    fn hit(world: &mut World, source: Source, r: i32, dam: i32, typ: GfType) -> bool {
        let mut tally = Tally::default();
        affect_player(world, PlayerId(2), source, r, 1, Grid::new(10, 8), dam, typ, &mut tally)
    }

    fn hp(world: &World) -> i32 {
        world.players.get(PlayerId(2)).unwrap().chp
    }

    #[test]
    fn test_ring_falloff() {
        let mut world = world();
        assert!(hit(&mut world, Source::Env, 2, 30, GfType::Missile));
        assert_eq!(hp(&world), 90);
    }

    #[test]
    fn test_holy_orb_is_halved() {
        let mut world = world();
        assert!(hit(&mut world, Source::Env, 0, 40, GfType::HolyOrb));
        assert_eq!(hp(&world), 80);
    }

    fn timer(world: &World, effect: TimedEffect) -> i32 {
        world.players.get(PlayerId(2)).unwrap().timed.get(effect)
    }

    fn no_saves(world: &mut World) {
        world.players.get_mut(PlayerId(2)).unwrap().skill_sav = 0;
    }

    #[test]
    fn test_confusion_lasts_as_long_as_the_power() {
        let mut world = world();
        no_saves(&mut world);
        hit(&mut world, Source::Env, 0, 50, GfType::OldConf);
        assert_eq!(timer(&world, TimedEffect::Confused), 50);
        assert_eq!(hp(&world), 100);
    }

    #[test]
    fn test_slow_and_fear_scale_with_power() {
        let mut world = world();
        no_saves(&mut world);
        hit(&mut world, Source::Env, 0, 30, GfType::OldSlow);
        assert_eq!(timer(&world, TimedEffect::Slow), 30);

        let mut world = self::world();
        no_saves(&mut world);
        hit(&mut world, Source::Env, 0, 25, GfType::TurnAll);
        assert_eq!(timer(&world, TimedEffect::Afraid), 25);
    }

    #[test]
    fn test_sleep_is_short() {
        let mut world = world();
        no_saves(&mut world);
        hit(&mut world, Source::Env, 0, 200, GfType::OldSleep);
        assert!((2..=7).contains(&timer(&world, TimedEffect::Paralyzed)));
    }

    #[test]
    fn test_strong_will_resists_sleep() {
        let mut world = world();
        world.players.get_mut(PlayerId(2)).unwrap().skill_sav = 100;
        hit(&mut world, Source::Env, 0, 200, GfType::OldSleep);
        assert_eq!(timer(&world, TimedEffect::Paralyzed), 0);
        let p = world.players.get(PlayerId(2)).unwrap();
        assert!(p.messages().any(|m| m == "You resist the effects!"));
    }

    #[test]
    fn test_free_action_blocks_slow() {
        let mut world = world();
        no_saves(&mut world);
        world.players.get_mut(PlayerId(2)).unwrap().flags |= PlayerFlags::FREE_ACT;
        hit(&mut world, Source::Env, 0, 30, GfType::OldSlow);
        assert_eq!(timer(&world, TimedEffect::Slow), 0);
    }

    #[test]
    fn test_chaos_resistance_prevents_confusion() {
        let mut world = world();
        world.players.get_mut(PlayerId(2)).unwrap().flags |= PlayerFlags::RES_CHAOS;
        hit(&mut world, Source::Env, 0, 30, GfType::Chaos);
        assert_eq!(timer(&world, TimedEffect::Confused), 0);
        assert_eq!(timer(&world, TimedEffect::Image), 0);
        assert!(hp(&world) < 100);
    }

    #[test]
    fn test_chaos_confuses_the_unprotected() {
        let mut world = world();
        hit(&mut world, Source::Env, 0, 30, GfType::Chaos);
        assert!((10..=29).contains(&timer(&world, TimedEffect::Confused)));
    }

    #[test]
    fn test_at_most_once() {
        let mut world = world();
        assert!(hit(&mut world, Source::Env, 0, 10, GfType::Missile));
        assert!(!hit(&mut world, Source::Env, 0, 10, GfType::Missile));
        assert_eq!(hp(&world), 90);
    }

    #[test]
    fn test_wrong_cell_is_ignored() {
        let mut world = world();
        let mut tally = Tally::default();
        assert!(!affect_player(
            &mut world,
            PlayerId(2),
            Source::Env,
            0,
            1,
            Grid::new(10, 9),
            10,
            GfType::Missile,
            &mut tally
        ));
        assert_eq!(tally.count(), 0);
    }

    #[test]
    fn test_pvp_needs_hostility() {
        let mut world = world();
        let me = Source::Player(PlayerId(1));
        assert!(!hit(&mut world, me, 0, 30, GfType::Missile));
        assert_eq!(hp(&world), 100);

        world.declare_hostility(PlayerId(1), PlayerId(2));
        assert!(hit(&mut world, me, 0, 30, GfType::Missile));
        assert_eq!(hp(&world), 90);
    }

    #[test]
    fn test_party_members_are_spared() {
        let mut world = world();
        world.config.pvp_mode = PvpMode::Always;
        world.join_party(PlayerId(1), PartyId(4));
        world.join_party(PlayerId(2), PartyId(4));
        assert!(!hit(&mut world, Source::Player(PlayerId(1)), 0, 30, GfType::Fire));
        assert_eq!(hp(&world), 100);
    }

    #[test]
    fn test_spell_relay() {
        let mut world = world();
        world.join_party(PlayerId(1), PartyId(4));
        world.join_party(PlayerId(2), PartyId(4));
        assert!(hit(&mut world, Source::Player(PlayerId(1)), 3, 17, GfType::ProjectPrayer));
        let p = world.players.get(PlayerId(2)).unwrap();
        assert!(p.outbox.contains(&Notice::SpellRelay { prayer: true, spell: 17 }));
        assert_eq!(p.chp, 100);
    }

    #[test]
    fn test_immunity_blocks_fire() {
        let mut world = world();
        world.players.get_mut(PlayerId(2)).unwrap().flags |= PlayerFlags::IM_FIRE;
        hit(&mut world, Source::Env, 0, 60, GfType::Fire);
        assert_eq!(hp(&world), 100);
    }

    #[test]
    fn test_damage_is_capped() {
        let mut world = world();
        world.players.get_mut(PlayerId(2)).unwrap().chp = 5000;
        world.players.get_mut(PlayerId(2)).unwrap().mhp = 5000;
        hit(&mut world, Source::Env, 0, 9999, GfType::Missile);
        assert_eq!(hp(&world), 5000 - MAX_PLAYER_DAMAGE);
    }

    #[test]
    fn test_own_projection_is_harmless() {
        let mut world = world();
        assert!(!hit(&mut world, Source::Player(PlayerId(2)), 0, 30, GfType::Missile));
    }

    #[test]
    fn test_heal() {
        let mut world = world();
        world.players.get_mut(PlayerId(2)).unwrap().chp = 40;
        hit(&mut world, Source::Player(PlayerId(1)), 0, 25, GfType::HealPlayer);
        assert_eq!(hp(&world), 65);
    }
}
