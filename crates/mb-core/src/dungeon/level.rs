//! Level structure and the geometric primitives built on it

use serde::{Deserialize, Serialize};

use super::{Cell, CellFlags, Depth, Feature, Grid, Occupant};

/// A single dungeon level
///
/// Cells are stored row-major. The outermost ring of cells is always a
/// permanent wall, so interior code can step one cell in any direction
/// from an in-bounds grid without checking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub depth: Depth,
    height: i32,
    width: i32,
    cells: Vec<Cell>,
}

impl Level {
    /// Create a level of solid granite inside a permanent border
    pub fn new(depth: Depth, height: i32, width: i32) -> Self {
        Self::filled(depth, height, width, Feature::Granite)
    }

    /// Create a level whose interior is open floor
    pub fn new_open(depth: Depth, height: i32, width: i32) -> Self {
        Self::filled(depth, height, width, Feature::Floor)
    }

    fn filled(depth: Depth, height: i32, width: i32, interior: Feature) -> Self {
        let height = height.max(3);
        let width = width.max(3);
        let mut cells = Vec::with_capacity((height * width) as usize);
        for y in 0..height {
            for x in 0..width {
                let border = y == 0 || x == 0 || y == height - 1 || x == width - 1;
                cells.push(Cell::new(if border {
                    Feature::PermWall
                } else {
                    interior
                }));
            }
        }
        Self {
            depth,
            height,
            width,
            cells,
        }
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    /// Anywhere on the map, border included
    pub fn contains(&self, g: Grid) -> bool {
        g.y >= 0 && g.x >= 0 && g.y < self.height && g.x < self.width
    }

    /// Strictly inside the permanent border
    pub fn in_bounds(&self, g: Grid) -> bool {
        g.y > 0 && g.x > 0 && g.y < self.height - 1 && g.x < self.width - 1
    }

    fn index(&self, g: Grid) -> Option<usize> {
        self.contains(g)
            .then(|| (g.y * self.width + g.x) as usize)
    }

    pub fn cell(&self, g: Grid) -> Option<&Cell> {
        self.index(g).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, g: Grid) -> Option<&mut Cell> {
        self.index(g).map(move |i| &mut self.cells[i])
    }

    pub fn feature(&self, g: Grid) -> Option<Feature> {
        self.cell(g).map(|c| c.feat)
    }

    pub fn set_feature(&mut self, g: Grid, feat: Feature) {
        if let Some(cell) = self.cell_mut(g) {
            cell.feat = feat;
        }
    }

    pub fn occupant(&self, g: Grid) -> Occupant {
        self.cell(g).map_or(Occupant::Empty, |c| c.occupant)
    }

    /// Projections pass through this cell
    pub fn is_floor(&self, g: Grid) -> bool {
        self.cell(g).is_some_and(|c| c.feat.is_projectable())
    }

    /// Floor-class cell with nobody standing on it
    pub fn is_empty(&self, g: Grid) -> bool {
        self.cell(g)
            .is_some_and(|c| c.feat.is_projectable() && c.occupant.is_empty())
    }

    /// Bare floor: no object, no occupant
    pub fn is_naked(&self, g: Grid) -> bool {
        self.cell(g).is_some_and(|c| {
            c.feat == Feature::Floor && c.object.is_none() && c.occupant.is_empty()
        })
    }

    pub fn is_glowing(&self, g: Grid) -> bool {
        self.cell(g).is_some_and(|c| c.info.contains(CellFlags::GLOW))
    }

    /// Line of sight between two cells
    ///
    /// Only intermediate cells block: a wall at either end is still visible.
    pub fn los(&self, from: Grid, to: Grid) -> bool {
        let (mut x, mut y) = (from.x, from.y);

        let dx = (to.x - x).abs();
        let dy = -(to.y - y).abs();
        let sx = if x < to.x { 1 } else { -1 };
        let sy = if y < to.y { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            if x == to.x && y == to.y {
                return true;
            }
            if (x != from.x || y != from.y) && !self.is_floor(Grid::new(y, x)) {
                return false;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Iterate every grid on the level in row-major order
    pub fn grids(&self) -> impl Iterator<Item = Grid> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Grid::new(y, x)))
    }
}

/// Approximate distance between two grids
///
/// The long axis plus half the short axis.
pub fn distance(a: Grid, b: Grid) -> i32 {
    let dy = (a.y - b.y).abs();
    let dx = (a.x - b.x).abs();
    if dy > dx { dy + (dx >> 1) } else { dx + (dy >> 1) }
}

/// Next grid when travelling from `start` through `target`
///
/// `cur` is the current position on the line. The line is extended past
/// `target` when stepping beyond it. Returns `cur` unchanged when
/// `start == target`.
pub fn step_toward(cur: Grid, start: Grid, target: Grid) -> Grid {
    let dist = (cur.y - start.y).abs().max((cur.x - start.x).abs()) + 1;

    let dy = (target.y - start.y).abs();
    let dx = (target.x - start.x).abs();
    if dy == 0 && dx == 0 {
        return cur;
    }

    let toward = |from: i32, to: i32, n: i32| if to < from { from - n } else { from + n };

    if dy > dx {
        let shift = (dist * dx + (dy - 1) / 2) / dy;
        Grid::new(
            toward(start.y, target.y, dist),
            toward(start.x, target.x, shift),
        )
    } else {
        let shift = (dist * dy + (dx - 1) / 2) / dx;
        Grid::new(
            toward(start.y, target.y, shift),
            toward(start.x, target.x, dist),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_is_permanent() {
        let level = Level::new_open(1, 10, 12);
        assert_eq!(level.feature(Grid::new(0, 5)), Some(Feature::PermWall));
        assert_eq!(level.feature(Grid::new(9, 11)), Some(Feature::PermWall));
        assert_eq!(level.feature(Grid::new(5, 5)), Some(Feature::Floor));
        assert!(!level.in_bounds(Grid::new(0, 5)));
        assert!(level.contains(Grid::new(0, 5)));
        assert!(!level.contains(Grid::new(10, 5)));
    }

    #[test]
    fn test_distance() {
        let o = Grid::new(5, 5);
        assert_eq!(distance(o, o), 0);
        assert_eq!(distance(o, Grid::new(5, 8)), 3);
        assert_eq!(distance(o, Grid::new(6, 6)), 1);
        assert_eq!(distance(o, Grid::new(7, 9)), 5);
    }

    #[test]
    fn test_step_reaches_target() {
        let start = Grid::new(2, 3);
        let target = Grid::new(9, 14);
        let mut cur = start;
        for _ in 0..11 {
            cur = step_toward(cur, start, target);
        }
        assert_eq!(cur, target);
    }

    #[test]
    fn test_step_extends_past_target() {
        let start = Grid::new(5, 5);
        let target = Grid::new(5, 7);
        let mut cur = start;
        for _ in 0..4 {
            cur = step_toward(cur, start, target);
        }
        assert_eq!(cur, Grid::new(5, 9));
    }

    #[test]
    fn test_line_of_sight_blocked_by_wall() {
        let mut level = Level::new_open(1, 11, 11);
        level.set_feature(Grid::new(5, 6), Feature::Granite);
        assert!(!level.los(Grid::new(5, 5), Grid::new(5, 7)));
        // The wall itself is visible
        assert!(level.los(Grid::new(5, 5), Grid::new(5, 6)));
        assert!(level.los(Grid::new(5, 5), Grid::new(3, 5)));
    }

    #[test]
    fn test_naked_and_empty() {
        let mut level = Level::new_open(1, 7, 7);
        let g = Grid::new(3, 3);
        assert!(level.is_naked(g));
        level.set_feature(g, Feature::OpenDoor);
        assert!(!level.is_naked(g));
        assert!(level.is_empty(g));
        level.set_feature(g, Feature::Granite);
        assert!(!level.is_empty(g));
    }
}
