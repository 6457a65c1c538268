//! **pathgrid-core**: board model for grid shortest-path search.
//!
//! This crate provides the types the search engine runs on: geometry
//! primitives, terrain classes, cells with their per-run search state, the
//! 8-connected [`Grid`] with its 10/14 step costs, random board generation,
//! and the saved-layout text format.

pub mod cell;
pub mod config;
pub mod distance;
pub mod error;
pub mod geom;
pub mod grid;
pub mod layout;
pub mod mapgen;
pub mod terrain;

pub use cell::{Cell, UNREACHABLE};
pub use config::BoardConfig;
pub use distance::{DIAGONAL_COST, ORTHOGONAL_COST, octile, step_cost};
pub use error::{GridError, LayoutError};
pub use geom::{Point, Range};
pub use grid::{Grid, MIN_SIZE};
pub use layout::{Layout, Panel};
pub use terrain::Terrain;

/// Total step cost along `path`, summing [`step_cost`] over consecutive
/// pairs. Empty and single-cell paths cost 0.
pub fn path_cost(path: &[Point]) -> i32 {
    path.windows(2).map(|w| step_cost(w[0], w[1])).sum()
}
