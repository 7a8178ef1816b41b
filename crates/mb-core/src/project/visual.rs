//! Transient bolt and blast glyphs sent to onlookers

use super::{GfType, ProjectFlags, Projection};
use crate::World;
use crate::consts::MAX_VIEWERS;
use crate::dungeon::{Depth, Grid};
use crate::player::{Notice, PlayerId};

/// Glyph for a bolt moving from `from` to `to`
pub fn bolt_pict(from: Grid, to: Grid) -> char {
    let dy = to.y - from.y;
    let dx = to.x - from.x;
    match (dy, dx) {
        (0, 0) => '*',
        (0, _) => '-',
        (_, 0) => '|',
        _ if dy == dx => '\\',
        _ if dy == -dx => '/',
        _ => '*',
    }
}

/// Players who would see a visual on this cell
fn viewers(world: &World, depth: Depth, grid: Grid) -> Vec<PlayerId> {
    world
        .players
        .iter()
        .filter(|p| !p.is_blind() && p.panel.contains(grid))
        .map(|p| p.id)
        .filter(|&pid| world.player_has_los(pid, depth, grid))
        .take(MAX_VIEWERS)
        .collect()
}

fn send(world: &mut World, depth: Depth, grid: Grid, attr: u8, ch: char) {
    for pid in viewers(world, depth, grid) {
        if let Some(p) = world.players.get_mut(pid) {
            let (y, x) = p.panel.to_screen(grid);
            p.outbox.push(Notice::Visual { y, x, attr, ch });
        }
    }
}

/// Queue visuals for a traced projection
///
/// Every step of the path is drawn. Blast cells beyond the epicenter are
/// thinned: each is sent with probability one in `visual_density`, or one
/// in half that for beams.
pub fn draw(world: &mut World, depth: Depth, proj: &Projection, typ: GfType, flags: ProjectFlags) {
    let mut prev: Option<Grid> = None;
    for &g in &proj.path {
        let ch = prev.map_or('*', |p| bolt_pict(p, g));
        let attr = typ.color(&mut world.rng);
        send(world, depth, g, attr, ch);
        prev = Some(g);
    }

    let mut density = world.config.visual_density.max(1);
    if flags.contains(ProjectFlags::BEAM) {
        density = (density / 2).max(1);
    }

    for (d, g) in proj.cells() {
        if d > 0 && !world.rng.one_in(density) {
            continue;
        }
        let attr = typ.color(&mut world.rng);
        send(world, depth, g, attr, '*');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Level;
    use crate::player::{Player, TimedEffect};
    use crate::project::{PathLimits, trace};

    #[test]
    fn test_bolt_pict() {
        let o = Grid::new(5, 5);
        assert_eq!(bolt_pict(o, Grid::new(5, 6)), '-');
        assert_eq!(bolt_pict(o, Grid::new(4, 5)), '|');
        assert_eq!(bolt_pict(o, Grid::new(6, 6)), '\\');
        assert_eq!(bolt_pict(o, Grid::new(4, 6)), '/');
    }

    fn scene(blind: bool) -> (World, Projection) {
        let mut world = World::seeded(2);
        world.add_level(Level::new_open(1, 12, 12));
        let mut p = Player::new(PlayerId(1), "Watcher", 1, Grid::new(2, 2));
        if blind {
            p.timed.set(TimedEffect::Blind, 10);
        }
        world.place_player(p).unwrap();
        let level = world.level(1).unwrap();
        let limits = PathLimits {
            max_range: 20,
            max_grids: 256,
            max_radius: 9,
        };
        let proj = trace(level, Grid::new(6, 2), Grid::new(6, 8), 0, ProjectFlags::KILL, limits, |_| false);
        (world, proj)
    }

    #[test]
    fn test_onlookers_see_the_bolt() {
        let (mut world, proj) = scene(false);
        draw(&mut world, 1, &proj, GfType::Fire, ProjectFlags::KILL);
        let p = world.players.get(PlayerId(1)).unwrap();
        let visuals = p
            .outbox
            .iter()
            .filter(|n| matches!(n, Notice::Visual { .. }))
            .count();
        // six path steps plus the epicenter
        assert_eq!(visuals, 7);
    }

    #[test]
    fn test_blind_players_see_nothing() {
        let (mut world, proj) = scene(true);
        draw(&mut world, 1, &proj, GfType::Fire, ProjectFlags::KILL);
        assert!(world.players.get(PlayerId(1)).unwrap().outbox.is_empty());
    }
}
