//! The [`Cell`] type, a board node with its per-run search state.

use crate::geom::Point;
use crate::terrain::Terrain;

/// Sentinel cost meaning "not reached yet" (+infinity).
pub const UNREACHABLE: i32 = i32::MAX;

/// A single board cell.
///
/// `pos` never changes once the cell is created. `cost` and `parent` are the
/// search bookkeeping: the cheapest known cost from the source and the arena
/// index of the cell it was reached from. Following `parent` links back to
/// the source yields the cell's best-known path prefix.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pos: Point,
    pub(crate) terrain: Terrain,
    cost: i32,
    parent: Option<usize>,
}

impl Cell {
    /// Create an unreached cell.
    #[inline]
    pub const fn new(pos: Point, terrain: Terrain) -> Self {
        Self {
            pos,
            terrain,
            cost: UNREACHABLE,
            parent: None,
        }
    }

    /// Board coordinate of this cell.
    #[inline]
    pub const fn pos(&self) -> Point {
        self.pos
    }

    /// Terrain class of this cell.
    #[inline]
    pub const fn terrain(&self) -> Terrain {
        self.terrain
    }

    /// Cheapest known cost from the source, or [`UNREACHABLE`].
    #[inline]
    pub const fn cost(&self) -> i32 {
        self.cost
    }

    /// Arena index of the predecessor on the best-known route.
    #[inline]
    pub const fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Whether a route to this cell has been found.
    #[inline]
    pub const fn is_reached(&self) -> bool {
        self.cost != UNREACHABLE
    }

    /// Record a cheaper route through `parent`, replacing the previous one.
    #[inline]
    pub(crate) fn relax(&mut self, cost: i32, parent: usize) {
        self.cost = cost;
        self.parent = Some(parent);
    }

    /// Forget any route; the cell becomes a search origin when `origin` is
    /// set, otherwise unreached.
    #[inline]
    pub(crate) fn clear_route(&mut self, origin: bool) {
        self.cost = if origin { 0 } else { UNREACHABLE };
        self.parent = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_unreached() {
        let c = Cell::new(Point::new(1, 2), Terrain::Open);
        assert_eq!(c.pos(), Point::new(1, 2));
        assert_eq!(c.cost(), UNREACHABLE);
        assert_eq!(c.parent(), None);
        assert!(!c.is_reached());
    }

    #[test]
    fn relax_replaces_route() {
        let mut c = Cell::new(Point::new(0, 0), Terrain::Open);
        c.relax(24, 3);
        c.relax(20, 7);
        assert_eq!(c.cost(), 20);
        assert_eq!(c.parent(), Some(7));
        c.clear_route(true);
        assert_eq!(c.cost(), 0);
        assert_eq!(c.parent(), None);
    }
}
