//! Placing treasure, objects, and traps on the map

use super::World;
use crate::dungeon::{Depth, Feature, Grid, distance};
use crate::object::{Object, ObjectKind};

/// How far a dropped object may roll from where it fell
const DROP_SPREAD: i32 = 3;

/// Number of distinct trap kinds
const TRAP_KINDS: i32 = 16;

/// Put an object on or near `grid`; returns where it landed
///
/// Prefers the closest free floor cell in line of sight of `grid`.
/// The object is lost when there is nowhere to put it.
pub fn drop_near(world: &mut World, depth: Depth, grid: Grid, obj: Object) -> Option<Grid> {
    let level = world.level(depth)?;

    let mut best = Vec::new();
    let mut best_dist = i32::MAX;
    for dy in -DROP_SPREAD..=DROP_SPREAD {
        for dx in -DROP_SPREAD..=DROP_SPREAD {
            let g = grid.offset(dy, dx);
            let d = distance(grid, g);
            if d > DROP_SPREAD || d > best_dist || !level.in_bounds(g) {
                continue;
            }
            let Some(cell) = level.cell(g) else { continue };
            if !cell.feat.is_projectable() || cell.object.is_some() || !level.los(grid, g) {
                continue;
            }
            if d < best_dist {
                best.clear();
                best_dist = d;
            }
            best.push(g);
        }
    }

    let &target = world.rng.choose(&best)?;
    match world.drop_object(depth, target, obj) {
        Ok(()) => Some(target),
        Err(err) => {
            tracing::warn!(%err, "dropped object vanished");
            None
        }
    }
}

/// A pile of gold scaled to the depth
pub fn place_gold(world: &mut World, depth: Depth, grid: Grid) -> Option<Grid> {
    let base = 18 * depth.max(1);
    let amount = world.rng.randint1(base) + world.rng.randint1(base / 2 + 1) + 10;
    drop_near(world, depth, grid, Object::gold(amount))
}

/// A random ordinary object
pub fn place_object(world: &mut World, depth: Depth, grid: Grid) -> Option<Grid> {
    let obj = random_object(world, depth);
    drop_near(world, depth, grid, obj)
}

/// Hide a trap on bare floor
pub fn place_trap(world: &mut World, depth: Depth, grid: Grid) -> bool {
    let Some(level) = world.level_mut(depth) else {
        return false;
    };
    if !level.is_naked(grid) {
        return false;
    }
    level.set_feature(grid, Feature::InvisibleTrap);
    true
}

fn random_object(world: &mut World, depth: Depth) -> Object {
    let rng = &mut world.rng;
    match rng.randint0(9) {
        0 => Object::new(ObjectKind::Potion, "Potion of Cure Light Wounds"),
        1 => Object::new(ObjectKind::Scroll, "Scroll of Phase Door"),
        2 => Object::new(ObjectKind::Flask, "Flask of oil"),
        3 => {
            let bonus = rng.randint0(depth.max(0) / 5 + 2);
            Object::new(ObjectKind::Sword, "Dagger").with_bonuses(bonus, bonus, 0)
        }
        4 => {
            let mut armour = Object::new(ObjectKind::SoftArmor, "Soft Leather Armour");
            armour.ac = 8;
            armour
        }
        5 => Object::new(ObjectKind::Wand, "Wand of Magic Missile").with_pval(rng.randint1(10) + 5),
        6 => Object::new(ObjectKind::Ring, "Ring of Protection").with_bonuses(0, 0, rng.randint1(10)),
        7 => Object::new(ObjectKind::Food, "Ration of Food"),
        _ => Object::new(ObjectKind::Arrow, "Arrow").with_number(rng.damroll(6, 7) as u16),
    }
}
