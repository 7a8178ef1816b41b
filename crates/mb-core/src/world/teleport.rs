//! Teleportation of monsters and players

use super::World;
use crate::consts::{TELEPORT_ROUNDS, TELEPORT_TRIES};
use crate::dungeon::{Depth, Feature, Grid, Level, distance};
use crate::monster::MonsterId;
use crate::player::PlayerId;

/// Search for a landing cell between `min` and `dis` away from `from`
///
/// Each round draws up to `TELEPORT_TRIES` candidates; when a round fails
/// the range is doubled (up to the configured cap) and the minimum halved.
fn find_landing(
    world: &mut World,
    depth: Depth,
    from: Grid,
    dis: i32,
    accept: impl Fn(&Level, Grid) -> bool,
) -> Option<Grid> {
    let cap = world.config.teleport_cap;
    let mut dis = dis.clamp(1, cap);
    let mut min = dis / 2;

    for _ in 0..TELEPORT_ROUNDS {
        for _ in 0..TELEPORT_TRIES {
            let g = Grid::new(
                world.rng.rand_spread(from.y, dis),
                world.rng.rand_spread(from.x, dis),
            );
            let Some(level) = world.level(depth) else {
                return None;
            };
            if !level.in_bounds(g) {
                continue;
            }
            let d = distance(from, g);
            if d < min || d > dis {
                continue;
            }
            if level.cell(g).is_some_and(|c| c.is_icky()) || !accept(level, g) {
                continue;
            }
            return Some(g);
        }
        dis = (dis * 2).min(cap);
        min /= 2;
    }
    None
}

/// Teleport a monster up to `dis` cells away
pub fn teleport_away(world: &mut World, id: MonsterId, dis: i32) -> bool {
    let Some((depth, from)) = world.monsters.get(id).map(|m| (m.depth, m.grid)) else {
        return false;
    };

    let landing = find_landing(world, depth, from, dis, |level, g| {
        level.is_empty(g) && level.feature(g) != Some(Feature::Glyph)
    });
    let Some(to) = landing else {
        tracing::warn!(monster = %id, "no room to teleport monster");
        return false;
    };

    match world.move_monster(id, to) {
        Ok(()) => {
            tracing::debug!(monster = %id, %from, %to, "monster teleported");
            true
        }
        Err(err) => {
            tracing::warn!(%err, "monster teleport failed");
            false
        }
    }
}

/// Teleport a player up to `dis` cells away
///
/// Players land on bare floor; ghosts may also land inside walls that
/// are not permanent.
pub fn teleport_player(world: &mut World, id: PlayerId, dis: i32) -> bool {
    let Some((depth, from, ghost)) = world.players.get(id).map(|p| (p.depth, p.grid, p.ghost)) else {
        return false;
    };

    let landing = find_landing(world, depth, from, dis, |level, g| {
        level.is_naked(g)
            || (ghost
                && level
                    .cell(g)
                    .is_some_and(|c| c.occupant.is_empty() && !c.feat.is_permanent()))
    });
    let Some(to) = landing else {
        tracing::warn!(player = %id, "no room to teleport player");
        return false;
    };

    if world.move_player(id, to).is_err() {
        return false;
    }
    if let Some(p) = world.players.get_mut(id) {
        p.disturb();
    }
    true
}

/// Teleport a player to somewhere near `target`
///
/// The search starts on the target itself and widens by one cell every
/// time the current radius has been tried thoroughly.
pub fn teleport_player_to(world: &mut World, id: PlayerId, target: Grid) -> bool {
    let Some(depth) = world.players.get(id).map(|p| p.depth) else {
        return false;
    };
    let cap = world.config.teleport_cap;

    let mut dis = 0;
    let mut tries = 0;
    let landing = loop {
        if dis > cap {
            break None;
        }
        let g = Grid::new(
            world.rng.rand_spread(target.y, dis),
            world.rng.rand_spread(target.x, dis),
        );
        let Some(level) = world.level(depth) else {
            break None;
        };
        if level.in_bounds(g) && level.is_empty(g) && !level.cell(g).is_some_and(|c| c.is_icky()) {
            break Some(g);
        }
        tries += 1;
        if tries > 4 * dis * dis + 4 * dis + 1 {
            tries = 0;
            dis += 1;
        }
    };

    let Some(to) = landing else {
        return false;
    };
    if world.move_player(id, to).is_err() {
        return false;
    }
    if let Some(p) = world.players.get_mut(id) {
        p.disturb();
    }
    true
}

/// Move a player one level up or down
///
/// The surface always leads down and ironman servers never go up. The
/// player is taken off the map and flagged as changing level.
pub fn teleport_player_level(world: &mut World, id: PlayerId) -> bool {
    let Some(depth) = world.players.get(id).map(|p| p.depth) else {
        return false;
    };
    let max_depth = world.config.max_depth;

    let up = if depth <= 0 {
        false
    } else if world.config.ironman {
        if depth >= max_depth {
            if let Some(p) = world.players.get_mut(id) {
                p.msg("Nothing happens.");
            }
            return false;
        }
        false
    } else if depth >= max_depth {
        true
    } else {
        world.rng.one_in(2)
    };

    let new_depth = if up { depth - 1 } else { depth.max(0) + 1 };
    world.unplace_player(id);

    let Some(p) = world.players.get_mut(id) else {
        return false;
    };
    p.msg(if up {
        "You rise up through the ceiling."
    } else {
        "You sink through the floor."
    });
    p.depth = new_depth;
    p.new_level = true;
    p.disturb();
    tracing::debug!(player = %id, from = depth, to = new_depth, "level teleport");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Occupant;
    use crate::player::Player;

    fn world() -> World {
        let mut world = World::seeded(42);
        world.add_level(Level::new_open(1, 30, 60));
        world
    }

    #[test]
    fn test_teleport_away_respects_minimum() {
        let mut world = world();
        let race = world.races.find_by_name("kobold").unwrap();
        let from = Grid::new(15, 30);
        let id = world.place_monster(race, 1, from).unwrap();

        assert!(teleport_away(&mut world, id, 10));
        let to = world.monsters.get(id).unwrap().grid;
        assert!(distance(from, to) >= 5);
        let level = world.level(1).unwrap();
        assert_eq!(level.occupant(to), Occupant::Monster(id));
        assert!(level.occupant(from).is_empty());
    }

    #[test]
    fn test_teleport_avoids_icky_cells() {
        let mut world = World::seeded(3);
        let mut level = Level::new(1, 12, 12);
        for g in [Grid::new(5, 5), Grid::new(5, 8), Grid::new(8, 8)] {
            level.set_feature(g, crate::dungeon::Feature::Floor);
        }
        level
            .cell_mut(Grid::new(8, 8))
            .unwrap()
            .info
            .insert(crate::dungeon::CellFlags::ICKY);
        world.add_level(level);
        let race = world.races.find_by_name("jackal").unwrap();
        let id = world.place_monster(race, 1, Grid::new(5, 5)).unwrap();

        assert!(teleport_away(&mut world, id, 4));
        assert_eq!(world.monsters.get(id).unwrap().grid, Grid::new(5, 8));
    }

    #[test]
    fn test_teleport_fails_without_room() {
        let mut world = World::seeded(3);
        let mut level = Level::new(1, 12, 12);
        level.set_feature(Grid::new(5, 5), crate::dungeon::Feature::Floor);
        world.add_level(level);
        let race = world.races.find_by_name("jackal").unwrap();
        let id = world.place_monster(race, 1, Grid::new(5, 5)).unwrap();
        assert!(!teleport_away(&mut world, id, 10));
        assert_eq!(world.monsters.get(id).unwrap().grid, Grid::new(5, 5));
    }

    #[test]
    fn test_teleport_player_to() {
        let mut world = world();
        world
            .place_player(Player::new(PlayerId(1), "Tester", 1, Grid::new(3, 3)))
            .unwrap();
        let target = Grid::new(20, 40);
        assert!(teleport_player_to(&mut world, PlayerId(1), target));
        let p = world.players.get(PlayerId(1)).unwrap();
        assert!(distance(p.grid, target) <= 2);
        assert!(p.disturbed);
    }

    #[test]
    fn test_teleport_player() {
        let mut world = world();
        world
            .place_player(Player::new(PlayerId(1), "Tester", 1, Grid::new(15, 30)))
            .unwrap();
        assert!(teleport_player(&mut world, PlayerId(1), 10));
        let p = world.players.get(PlayerId(1)).unwrap();
        assert_ne!(p.grid, Grid::new(15, 30));
        assert_eq!(world.level(1).unwrap().occupant(p.grid), Occupant::Player(PlayerId(1)));
    }

    #[test]
    fn test_level_teleport_from_town_goes_down() {
        let mut world = World::seeded(5);
        world.add_level(Level::new_open(0, 10, 10));
        world
            .place_player(Player::new(PlayerId(1), "Tester", 0, Grid::new(4, 4)))
            .unwrap();
        assert!(teleport_player_level(&mut world, PlayerId(1)));
        let p = world.players.get(PlayerId(1)).unwrap();
        assert_eq!(p.depth, 1);
        assert!(p.new_level);
        assert!(world.level(0).unwrap().occupant(Grid::new(4, 4)).is_empty());
    }

    #[test]
    fn test_ironman_never_rises() {
        let mut world = world();
        world.config.ironman = true;
        world
            .place_player(Player::new(PlayerId(1), "Tester", 1, Grid::new(4, 4)))
            .unwrap();
        assert!(teleport_player_level(&mut world, PlayerId(1)));
        assert_eq!(world.players.get(PlayerId(1)).unwrap().depth, 2);
    }
}
