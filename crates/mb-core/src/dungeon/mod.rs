//! Dungeon levels: terrain, cells, geometry

mod cell;
mod feature;
mod level;

pub use cell::{Cell, Depth, Grid, Occupant};
pub use feature::{CellFlags, Feature};
pub use level::{Level, distance, step_toward};
