//! Projection geometry: the travelled path and the blast around its end

use serde::{Deserialize, Serialize};

use super::ProjectFlags;
use crate::consts::{MAX_GRIDS, MAX_RINGS};
use crate::dungeon::{Grid, Level, distance, step_toward};

/// Limits applied while tracing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathLimits {
    pub max_range: i32,
    pub max_grids: usize,
    pub max_radius: i32,
}

/// Every cell a projection touches, grouped into rings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Projection {
    /// Cells the projection passed through, start excluded
    pub path: Vec<Grid>,
    /// Affected cells in resolution order
    pub grids: Vec<Grid>,
    /// `grids[rings[d]..rings[d + 1]]` lie at distance `d` from the epicenter
    pub rings: Vec<usize>,
    pub epicenter: Grid,
    /// The projection flew past its range and did not explode
    pub out_of_range: bool,
}

impl Projection {
    pub fn ring_count(&self) -> usize {
        self.rings.len().saturating_sub(1)
    }

    pub fn ring(&self, d: usize) -> &[Grid] {
        match (self.rings.get(d), self.rings.get(d + 1)) {
            (Some(&lo), Some(&hi)) => &self.grids[lo..hi],
            _ => &[],
        }
    }

    /// Affected cells paired with their ring distance
    pub fn cells(&self) -> impl Iterator<Item = (i32, Grid)> + '_ {
        self.rings
            .windows(2)
            .enumerate()
            .flat_map(move |(d, w)| self.grids[w[0]..w[1]].iter().map(move |&g| (d as i32, g)))
    }
}

/// Trace a projection from `start` toward `target` and expand its blast
///
/// With `JUMP` the projection appears at `target` directly. `stops_at` decides whether an occupied cell halts a `STOP` projection;
/// the starting cell is never tested.
pub fn trace(
    level: &Level,
    start: Grid,
    target: Grid,
    rad: i32,
    mut flags: ProjectFlags,
    limits: PathLimits,
    stops_at: impl Fn(Grid) -> bool,
) -> Projection {
    let max_grids = limits.max_grids.min(MAX_GRIDS);
    let rad = rad.clamp(0, limits.max_radius.min(MAX_RINGS as i32 - 2));

    let start = if flags.contains(ProjectFlags::JUMP) { target } else { start };
    if start == target {
        flags.remove(ProjectFlags::THRU);
    }

    let mut proj = Projection::default();
    let mut cur = start;
    let mut dist = 0;

    loop {
        if flags.contains(ProjectFlags::BEAM) {
            if proj.grids.len() >= max_grids {
                break;
            }
            proj.grids.push(cur);
        }

        // Bolts and beams end inside the first wall they reach
        if dist > 0 && !level.is_floor(cur) {
            break;
        }
        if !flags.contains(ProjectFlags::THRU) && cur == target {
            break;
        }
        if flags.contains(ProjectFlags::STOP) && dist > 0 && stops_at(cur) {
            break;
        }

        let next = step_toward(cur, start, target);
        if next == cur || !level.contains(next) {
            break;
        }
        // Balls explode in front of walls
        if rad > 0 && !level.is_floor(next) {
            break;
        }

        cur = next;
        proj.path.push(cur);
        dist += 1;
        if dist > limits.max_range {
            proj.out_of_range = true;
            break;
        }
    }

    proj.epicenter = cur;
    proj.rings.push(0);

    if proj.out_of_range {
        proj.rings.push(proj.grids.len());
        return proj;
    }

    // Beam cells already in the list stay in ring 0
    let beam_len = proj.grids.len();
    let centre = cur;
    'rings: for d in 0..=rad {
        for y in (centre.y - d)..=(centre.y + d) {
            for x in (centre.x - d)..=(centre.x + d) {
                let g = Grid::new(y, x);
                if !level.contains(g) || distance(centre, g) != d {
                    continue;
                }
                if !level.los(centre, g) || proj.grids[..beam_len].contains(&g) {
                    continue;
                }
                if proj.grids.len() >= max_grids {
                    tracing::debug!(%centre, rad, "blast truncated at grid cap");
                    proj.rings.push(proj.grids.len());
                    break 'rings;
                }
                proj.grids.push(g);
            }
        }
        proj.rings.push(proj.grids.len());
    }

    debug_assert!(proj.grids.len() <= MAX_GRIDS);
    debug_assert_eq!(proj.rings.last().copied(), Some(proj.grids.len()));
    proj
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Feature;
    use proptest::prelude::*;

    const LIMITS: PathLimits = PathLimits {
        max_range: 32,
        max_grids: MAX_GRIDS,
        max_radius: 9,
    };

    fn never(_: Grid) -> bool {
        false
    }

    #[test]
    fn test_bolt_hits_only_target() {
        let level = Level::new_open(1, 15, 15);
        let proj = trace(
            &level,
            Grid::new(7, 2),
            Grid::new(7, 9),
            0,
            ProjectFlags::STOP | ProjectFlags::KILL,
            LIMITS,
            never,
        );
        assert_eq!(proj.grids, vec![Grid::new(7, 9)]);
        assert_eq!(proj.rings, vec![0, 1]);
        assert_eq!(proj.epicenter, Grid::new(7, 9));
        assert_eq!(proj.path.len(), 7);
    }

    #[test]
    fn test_stop_halts_at_first_occupant() {
        let level = Level::new_open(1, 15, 15);
        let blocker = Grid::new(7, 5);
        let proj = trace(
            &level,
            Grid::new(7, 2),
            Grid::new(7, 9),
            0,
            ProjectFlags::STOP,
            LIMITS,
            |g| g == blocker,
        );
        assert_eq!(proj.epicenter, blocker);
    }

    #[test]
    fn test_ball_stops_before_wall() {
        let mut level = Level::new_open(1, 15, 15);
        level.set_feature(Grid::new(5, 8), Feature::Granite);
        let proj = trace(
            &level,
            Grid::new(5, 2),
            Grid::new(5, 10),
            2,
            ProjectFlags::GRID,
            LIMITS,
            never,
        );
        assert_eq!(proj.epicenter, Grid::new(5, 7));
        assert_eq!(proj.ring(0), &[Grid::new(5, 7)]);
        // Nothing behind the wall is reached
        assert!(!proj.grids.contains(&Grid::new(5, 9)));
        // The wall itself is in sight of the epicenter
        assert!(proj.ring(1).contains(&Grid::new(5, 8)));
    }

    #[test]
    fn test_bolt_ends_in_wall() {
        let mut level = Level::new_open(1, 15, 15);
        level.set_feature(Grid::new(5, 8), Feature::ClosedDoor);
        let proj = trace(
            &level,
            Grid::new(5, 2),
            Grid::new(5, 12),
            0,
            ProjectFlags::GRID,
            LIMITS,
            never,
        );
        assert_eq!(proj.grids, vec![Grid::new(5, 8)]);
    }

    #[test]
    fn test_beam_covers_path_without_duplicates() {
        let level = Level::new_open(1, 15, 20);
        let proj = trace(
            &level,
            Grid::new(5, 2),
            Grid::new(5, 8),
            1,
            ProjectFlags::BEAM | ProjectFlags::KILL,
            LIMITS,
            never,
        );
        for x in 2..=8 {
            assert!(proj.ring(0).contains(&Grid::new(5, x)));
        }
        let mut seen = proj.grids.clone();
        seen.sort_by_key(|g| (g.y, g.x));
        seen.dedup();
        assert_eq!(seen.len(), proj.grids.len());
    }

    #[test]
    fn test_jump_starts_at_target() {
        let level = Level::new_open(1, 15, 15);
        let proj = trace(
            &level,
            Grid::new(2, 2),
            Grid::new(10, 10),
            1,
            ProjectFlags::JUMP,
            LIMITS,
            never,
        );
        assert!(proj.path.is_empty());
        assert_eq!(proj.epicenter, Grid::new(10, 10));
    }

    #[test]
    fn test_out_of_range_does_not_explode() {
        let level = Level::new_open(1, 10, 80);
        let proj = trace(
            &level,
            Grid::new(5, 1),
            Grid::new(5, 70),
            2,
            ProjectFlags::KILL,
            PathLimits { max_range: 10, ..LIMITS },
            never,
        );
        assert!(proj.out_of_range);
        assert!(proj.grids.is_empty());
        assert_eq!(proj.rings, vec![0, 0]);
    }

    #[test]
    fn test_thru_continues_past_target() {
        let level = Level::new_open(1, 15, 15);
        let proj = trace(
            &level,
            Grid::new(7, 2),
            Grid::new(7, 5),
            0,
            ProjectFlags::THRU,
            LIMITS,
            never,
        );
        // Runs into the east border wall
        assert_eq!(proj.epicenter, Grid::new(7, 14));
    }

    proptest! {
        #[test]
        fn prop_blast_is_capped_and_partitioned(
            sy in 1i32..29, sx in 1i32..49,
            ty in 1i32..29, tx in 1i32..49,
            rad in 0i32..10,
            beam in any::<bool>(),
            walls in proptest::collection::vec((1i32..29, 1i32..49), 0..60),
        ) {
            let mut level = Level::new_open(1, 30, 50);
            for (y, x) in walls {
                level.set_feature(Grid::new(y, x), Feature::Granite);
            }
            let mut flags = ProjectFlags::KILL;
            if beam {
                flags |= ProjectFlags::BEAM;
            }
            let proj = trace(&level, Grid::new(sy, sx), Grid::new(ty, tx), rad, flags, LIMITS, never);

            prop_assert!(proj.grids.len() <= MAX_GRIDS);
            prop_assert_eq!(proj.rings[0], 0);
            prop_assert_eq!(*proj.rings.last().unwrap(), proj.grids.len());
            prop_assert!(proj.rings.windows(2).all(|w| w[0] <= w[1]));
            if !beam {
                for (d, g) in proj.cells() {
                    prop_assert_eq!(distance(proj.epicenter, g), d);
                }
            }
        }

        #[test]
        fn prop_bolt_touches_one_cell(
            sy in 1i32..14, sx in 1i32..14,
            ty in 1i32..14, tx in 1i32..14,
        ) {
            let level = Level::new_open(1, 15, 15);
            let proj = trace(&level, Grid::new(sy, sx), Grid::new(ty, tx), 0, ProjectFlags::STOP, LIMITS, never);
            prop_assert_eq!(proj.ring_count(), 1);
            prop_assert_eq!(proj.grids, vec![Grid::new(ty, tx)]);
        }
    }
}
