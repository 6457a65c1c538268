use pathgrid_core::{Grid, Point, UNREACHABLE};

/// Result of a finished search run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOutcome {
    /// Whether the target was reached.
    pub found: bool,
    /// Source to target inclusive, or empty when the target was not reached.
    pub path: Vec<Point>,
    /// Cost of `path`, or [`UNREACHABLE`].
    pub cost: i32,
    /// Number of cells settled during the run.
    pub expanded: usize,
}

impl SearchOutcome {
    /// Outcome of a run whose frontier ran dry.
    pub fn not_found(expanded: usize) -> Self {
        Self {
            found: false,
            path: Vec::new(),
            cost: UNREACHABLE,
            expanded,
        }
    }
}

/// Walk the recorded routes back from `to` and return the path from the
/// grid's source to `to`, both inclusive.
///
/// This only reads the per-cell predecessor links left by the last run.
/// Returns an empty path when `to` is off the board, was never reached, or
/// its chain does not lead back to the source.
pub fn extract_path(grid: &Grid, to: Point) -> Vec<Point> {
    let Some(end) = grid.idx(to) else {
        return Vec::new();
    };
    if !grid.cell_at(end).is_reached() {
        return Vec::new();
    }

    let mut path = Vec::new();
    let mut cur = Some(end);
    while let Some(i) = cur {
        // Costs strictly decrease along parent links, so a chain can never
        // be longer than the board.
        if path.len() >= grid.len() {
            return Vec::new();
        }
        path.push(grid.point(i));
        cur = grid.cell_at(i).parent();
    }
    path.reverse();

    if path.first() != Some(&grid.source()) {
        return Vec::new();
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreached_cells_have_no_path() {
        let g = Grid::from_ascii("S..\n...\n..T").unwrap();
        assert!(extract_path(&g, g.target()).is_empty());
        assert!(extract_path(&g, Point::new(7, 7)).is_empty());
    }

    #[test]
    fn source_path_is_itself() {
        let g = Grid::from_ascii("S.\n.T").unwrap();
        assert_eq!(extract_path(&g, g.source()), vec![g.source()]);
    }

    #[test]
    fn follows_parent_links() {
        let mut g = Grid::from_ascii("S..\n...\n..T").unwrap();
        let s = g.idx(g.source()).unwrap();
        let mid = g.idx(Point::new(1, 1)).unwrap();
        let t = g.idx(g.target()).unwrap();
        g.relax(mid, 14, s);
        g.relax(t, 28, mid);
        assert_eq!(
            extract_path(&g, g.target()),
            vec![Point::new(0, 0), Point::new(1, 1), Point::new(2, 2)]
        );
    }

    #[test]
    fn broken_chain_yields_nothing() {
        let mut g = Grid::from_ascii("S..\n...\n..T").unwrap();
        let mid = g.idx(Point::new(1, 1)).unwrap();
        let t = g.idx(g.target()).unwrap();
        // mid claims a route but has no parent and is not the source.
        g.relax(t, 28, mid);
        assert!(extract_path(&g, g.target()).is_empty());
    }
}
