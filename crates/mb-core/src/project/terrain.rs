//! Projection effects on dungeon features

use super::{GfType, Source, Witnesses};
use crate::World;
use crate::dungeon::{CellFlags, Depth, Feature, Grid};
use crate::world::{place_gold, place_object, place_trap};

fn set_feature(world: &mut World, depth: Depth, grid: Grid, feat: Feature) {
    if let Some(level) = world.level_mut(depth) {
        level.set_feature(grid, feat);
    }
}

/// Apply a projection to the terrain of one cell
///
/// Returns whether the change was obvious to the acting player.
pub fn affect_terrain(
    world: &mut World,
    source: Source,
    _r: i32,
    depth: Depth,
    grid: Grid,
    _dam: i32,
    typ: GfType,
) -> bool {
    let Some(feat) = world.level(depth).and_then(|l| l.feature(grid)) else {
        return false;
    };
    let seen = Witnesses::of(world, source, depth, grid);
    let mut obvious = false;

    match typ {
        GfType::Fire => {
            let (to, text) = match feat {
                Feature::Tree => (Feature::Dirt, "The tree burns to the ground!"),
                Feature::Grass => (Feature::Dirt, "The grass burns away!"),
                Feature::Crop(kind) if kind != 0 => (Feature::Crop(0), "The crops burn!"),
                _ => return false,
            };
            set_feature(world, depth, grid, to);
            if seen.obvious {
                seen.tell(world, text);
                obvious = true;
            }
        }

        GfType::KillTrap => match feat {
            Feature::InvisibleTrap | Feature::Trap(_) => {
                set_feature(world, depth, grid, Feature::Floor);
                world.forget_spot(depth, grid);
                if seen.obvious {
                    seen.tell(world, "There is a bright flash of light!");
                    obvious = true;
                }
            }
            Feature::SecretDoor | Feature::LockedDoor(_) => {
                set_feature(world, depth, grid, Feature::ClosedDoor);
                if seen.obvious {
                    seen.tell(world, "Click!");
                    obvious = true;
                }
            }
            _ => {}
        },

        GfType::KillDoor => {
            if feat.is_trap() || (feat.is_door() && feat != Feature::SecretDoor) {
                set_feature(world, depth, grid, Feature::Floor);
                world.forget_spot(depth, grid);
                if seen.obvious {
                    seen.tell(world, "There is a bright flash of light!");
                    obvious = true;
                }
            }
        }

        GfType::KillWall => return stone_to_mud(world, depth, grid, feat, &seen),

        GfType::MakeDoor => {
            if !world.level(depth).is_some_and(|l| l.is_naked(grid)) {
                return false;
            }
            set_feature(world, depth, grid, Feature::ClosedDoor);
            obvious = seen.obvious;
        }

        GfType::MakeTrap => {
            if !world.level(depth).is_some_and(|l| l.is_naked(grid)) {
                return false;
            }
            place_trap(world, depth, grid);
        }

        GfType::LiteWeak | GfType::Lite => {
            if let Some(cell) = world.level_mut(depth).and_then(|l| l.cell_mut(grid)) {
                cell.info.insert(CellFlags::GLOW);
                if !seen.players.is_empty() {
                    cell.info.insert(CellFlags::MARK);
                }
            }
            obvious = seen.obvious;
        }

        GfType::DarkWeak | GfType::Dark => {
            obvious = seen.obvious;
            if let Some(cell) = world.level_mut(depth).and_then(|l| l.cell_mut(grid)) {
                cell.info.remove(CellFlags::GLOW);
            }
            if feat.is_boring() {
                world.forget_spot(depth, grid);
            }
        }

        _ => {}
    }

    obvious
}

/// Turn walls, rubble, and doors to mud
///
/// Deeper levels get plain floor. On the surface walls leave a mud
/// patch and doors leave bare dirt.
fn stone_to_mud(world: &mut World, depth: Depth, grid: Grid, feat: Feature, seen: &Witnesses) -> bool {
    if feat.is_projectable() {
        return false;
    }
    if feat.is_permanent() {
        if matches!(feat, Feature::HomeDoor(_)) && seen.obvious {
            seen.tell(world, "The door resists.");
            return true;
        }
        return false;
    }

    let text = if feat.is_vein() {
        "The vein turns into mud!"
    } else if feat == Feature::Rubble {
        "The rubble turns into mud!"
    } else if feat.is_door() {
        "The door turns into mud!"
    } else if feat == Feature::Tree {
        "The tree turns into mud!"
    } else {
        "The wall turns into mud!"
    };

    let result = if depth > 0 {
        Feature::Floor
    } else if feat.is_door() {
        Feature::Dirt
    } else {
        Feature::Mud
    };
    set_feature(world, depth, grid, result);
    world.forget_spot(depth, grid);
    if seen.obvious {
        seen.tell(world, text);
    }

    if feat.has_treasure() {
        place_gold(world, depth, grid);
        if seen.obvious {
            seen.tell(world, "You have found something!");
        }
    } else if feat == Feature::Rubble && world.rng.percent(10) {
        place_object(world, depth, grid);
        if seen.obvious {
            seen.tell(world, "There was something buried in the rubble!");
        }
    }

    tracing::trace!(%grid, ?feat, "stone to mud");
    seen.obvious
}
