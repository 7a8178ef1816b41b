//! Monster death, cloning, and polymorph

use super::{World, place_gold, place_object};
use crate::consts::POLY_TRIES;
use crate::monster::{MonsterId, RaceFlags, RaceId};
use crate::player::PlayerId;

/// Capitalise the first letter of a monster name for sentence starts
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Drop a dying monster's treasure
///
/// Must run while the monster is still in the world.
pub fn monster_death(world: &mut World, killer: Option<PlayerId>, id: MonsterId) {
    let Some((depth, grid, race_id)) = world.monsters.get(id).map(|m| (m.depth, m.grid, m.race)) else {
        return;
    };
    let Some(race) = world.race(race_id).cloned() else {
        return;
    };

    let flags = race.flags;
    let only_gold = flags.contains(RaceFlags::ONLY_GOLD);
    let only_item = flags.contains(RaceFlags::ONLY_ITEM);

    let rng = &mut world.rng;
    let mut number = 0;
    if flags.contains(RaceFlags::DROP_60) && rng.percent(60) {
        number += 1;
    }
    if flags.contains(RaceFlags::DROP_90) && rng.percent(90) {
        number += 1;
    }
    if flags.contains(RaceFlags::DROP_1D2) {
        number += rng.damroll(1, 2);
    }
    if flags.contains(RaceFlags::DROP_2D2) {
        number += rng.damroll(2, 2);
    }

    for _ in 0..number {
        let gold = only_gold || (!only_item && world.rng.percent(50));
        if gold {
            place_gold(world, depth, grid);
        } else {
            place_object(world, depth, grid);
        }
    }

    if race.is_unique()
        && let Some(killer) = killer
    {
        let name = world
            .players
            .get(killer)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        let text = format!("{} was slain by {}.", race.name, name);
        for pid in world.players_at(depth) {
            if let Some(p) = world.players.get_mut(pid) {
                p.msg(text.clone());
            }
        }
    }

    tracing::debug!(monster = %id, race = %race.name, drops = number, ?killer, "monster died");
}

/// Apply player-dealt damage to a monster
///
/// Kills the monster (awarding experience and treasure) when its hit
/// points drop below zero, otherwise it may panic and flee. Returns
/// whether the monster died.
pub fn mon_take_hit(world: &mut World, player: PlayerId, id: MonsterId, dam: i32, note_dies: &str) -> bool {
    let visible = world.monster_visible_to(player, id);
    let name = capitalize(&world.monster_name(id));
    let Some(race) = world.race_of(id).cloned() else {
        return false;
    };
    let Some(m) = world.monsters.get_mut(id) else {
        return false;
    };

    m.asleep = 0;
    m.hp -= dam;

    if m.hp < 0 {
        let text = if visible {
            format!("{name}{note_dies}")
        } else if race.is_nonliving() {
            "You have destroyed it.".to_string()
        } else {
            "You have killed it.".to_string()
        };

        if let Some(p) = world.players.get_mut(player) {
            p.msg(text);
            let exp = race.mexp * race.level / p.lev.max(1);
            p.gain_exp(exp);
        }

        monster_death(world, Some(player), id);
        world.delete_monster(id);
        return true;
    }

    if m.afraid == 0 && !race.flags.contains(RaceFlags::NO_FEAR) && dam > 0 {
        let percentage = 100 * m.hp / m.maxhp.max(1);
        let low = world.rng.randint1(10) >= percentage;
        let big = dam >= m.hp && world.rng.percent(80);
        if low || big {
            let bonus = if dam >= m.hp && percentage > 7 {
                20
            } else {
                (11 - percentage) * 5
            };
            m.afraid = world.rng.randint1(10) + bonus.max(0);
            if visible && let Some(p) = world.players.get_mut(player) {
                p.msg(format!("{name} flees in terror!"));
            }
        }
    }
    false
}

/// Choose a new race for a polymorphed monster
///
/// Uniques never change. Candidates must be non-unique and within a
/// randomised band around the original level; after `POLY_TRIES` misses
/// the original race is kept.
pub fn poly_r_idx(world: &mut World, race_id: RaceId) -> RaceId {
    let Some(race) = world.race(race_id) else {
        return race_id;
    };
    if race.is_unique() {
        return race_id;
    }
    let level = race.level;

    let rng = &mut world.rng;
    let spread_low = rng.randint1(20) / rng.randint1(9) + 1;
    let spread_high = rng.randint1(20) / rng.randint1(9) + 1;
    let (lev1, lev2) = (level - spread_low, level + spread_high);

    for _ in 0..POLY_TRIES {
        let Some(candidate) = world.races.get_mon_num(level + 5, &mut world.rng) else {
            break;
        };
        let Some(c) = world.races.get(candidate) else {
            continue;
        };
        if c.is_unique() || c.level < lev1 || c.level > lev2 {
            continue;
        }
        return candidate;
    }
    race_id
}

/// Replace a monster with a fresh one of another race on the same cell
///
/// The old monster is restored if the new one cannot be placed.
pub fn replace_monster(world: &mut World, id: MonsterId, race: RaceId) -> Option<MonsterId> {
    let old = world.delete_monster(id)?;
    match world.place_monster(race, old.depth, old.grid) {
        Ok(new_id) => {
            tracing::debug!(old = %id, new = %new_id, ?race, "monster polymorphed");
            Some(new_id)
        }
        Err(err) => {
            tracing::warn!(%err, monster = %id, "polymorph placement failed");
            if let Err(err) = world.insert_monster(old) {
                tracing::warn!(%err, "could not restore monster");
            }
            None
        }
    }
}

/// Place a copy of a monster on an adjacent empty cell
pub fn multiply_monster(world: &mut World, id: MonsterId) -> bool {
    let Some((depth, grid, race)) = world.monsters.get(id).map(|m| (m.depth, m.grid, m.race)) else {
        return false;
    };

    for _ in 0..18 {
        let g = grid.offset(world.rng.randint0(3) - 1, world.rng.randint0(3) - 1);
        if !world.level(depth).is_some_and(|l| l.in_bounds(g) && l.is_empty(g)) {
            continue;
        }
        if world.place_monster(race, depth, g).is_ok() {
            return true;
        }
    }
    tracing::warn!(monster = %id, "no room to clone monster");
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::{Grid, Level};
    use crate::player::Player;

    fn world() -> World {
        let mut world = World::seeded(42);
        world.add_level(Level::new_open(1, 15, 15));
        world
            .place_player(Player::new(PlayerId(1), "Tester", 1, Grid::new(7, 3)))
            .unwrap();
        world
    }

    #[test]
    fn test_mon_take_hit_kills_and_awards_exp() {
        let mut world = world();
        let race = world.races.find_by_name("cave bear").unwrap();
        let id = world.place_monster(race, 1, Grid::new(7, 4)).unwrap();
        world.monsters.get_mut(id).unwrap().hp = 10;

        assert!(mon_take_hit(&mut world, PlayerId(1), id, 11, " dies."));
        assert!(!world.monsters.contains(id));
        let p = world.players.get(PlayerId(1)).unwrap();
        assert_eq!(p.exp, 18 * 9);
        assert!(p.messages().any(|m| m == "The cave bear dies."));
    }

    #[test]
    fn test_mon_take_hit_zero_hp_survives() {
        let mut world = world();
        let race = world.races.find_by_name("jackal").unwrap();
        let id = world.place_monster(race, 1, Grid::new(7, 4)).unwrap();
        world.monsters.get_mut(id).unwrap().hp = 10;
        assert!(!mon_take_hit(&mut world, PlayerId(1), id, 10, " dies."));
        assert_eq!(world.monsters.get(id).unwrap().hp, 0);
    }

    #[test]
    fn test_multiply_places_neighbour() {
        let mut world = world();
        let race = world.races.find_by_name("white worm mass").unwrap();
        let id = world.place_monster(race, 1, Grid::new(7, 7)).unwrap();
        assert!(multiply_monster(&mut world, id));
        assert_eq!(world.monsters.len(), 2);
    }

    #[test]
    fn test_unique_never_polymorphs() {
        let mut world = world();
        let grip = world.races.find_by_name("Grip, Farmer Maggot's Dog").unwrap();
        for _ in 0..20 {
            assert_eq!(poly_r_idx(&mut world, grip), grip);
        }
    }

    #[test]
    fn test_polymorph_stays_in_band() {
        let mut world = world();
        let bear = world.races.find_by_name("cave bear").unwrap();
        for _ in 0..50 {
            let new = poly_r_idx(&mut world, bear);
            let race = world.race(new).unwrap();
            assert!(!race.is_unique());
            assert!((race.level - 9).abs() <= 21);
        }
    }

    #[test]
    fn test_unique_death_is_announced() {
        let mut world = world();
        let grip = world.races.find_by_name("Grip, Farmer Maggot's Dog").unwrap();
        let id = world.place_monster(grip, 1, Grid::new(7, 4)).unwrap();
        monster_death(&mut world, Some(PlayerId(1)), id);
        let p = world.players.get(PlayerId(1)).unwrap();
        assert!(p.messages().any(|m| m == "Grip, Farmer Maggot's Dog was slain by Tester."));
    }
}
