//! The [`Grid`] type: the board the search runs on.
//!
//! Cells live in a flat row-major arena. A cell's arena index is stable for
//! the lifetime of the board, which lets search state refer to predecessors
//! by index instead of carrying whole paths around.

use std::fmt;

use crate::cell::Cell;
use crate::distance::step_cost;
use crate::error::GridError;
use crate::geom::{Point, Range};
use crate::terrain::Terrain;

/// Smallest allowed board dimension.
pub const MIN_SIZE: i32 = 2;

/// An 8-connected weighted board with one source and one target cell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridRepr"))]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    source: Point,
    target: Point,
}

impl Grid {
    /// Create an all-open board with the given endpoints.
    pub fn new(width: i32, height: i32, source: Point, target: Point) -> Result<Self, GridError> {
        check_size(width, height)?;
        let bounds = Range::new(0, 0, width, height);
        for pos in [source, target] {
            if !bounds.contains(pos) {
                return Err(GridError::OutOfBounds { pos, width, height });
            }
        }
        if source == target {
            return Err(GridError::SourceIsTarget(source));
        }
        let cells = bounds
            .iter()
            .map(|p| {
                let terrain = if p == source {
                    Terrain::Source
                } else if p == target {
                    Terrain::Target
                } else {
                    Terrain::Open
                };
                Cell::new(p, terrain)
            })
            .collect();
        let mut grid = Self {
            width,
            height,
            cells,
            source,
            target,
        };
        grid.reset();
        Ok(grid)
    }

    /// Build a board from row-major terrain classes.
    ///
    /// Exactly one cell must be [`Terrain::Source`] and exactly one
    /// [`Terrain::Target`].
    pub fn from_terrain(width: i32, height: i32, terrain: &[Terrain]) -> Result<Self, GridError> {
        check_size(width, height)?;
        let bounds = Range::new(0, 0, width, height);
        if terrain.len() != bounds.len() {
            return Err(GridError::CellCount {
                expected: bounds.len(),
                actual: terrain.len(),
            });
        }

        let mut source = None;
        let mut target = None;
        let mut cells = Vec::with_capacity(terrain.len());
        for (p, &t) in bounds.iter().zip(terrain) {
            match t {
                Terrain::Source => {
                    if let Some(first) = source {
                        return Err(GridError::DuplicateSource { first, second: p });
                    }
                    source = Some(p);
                }
                Terrain::Target => {
                    if let Some(first) = target {
                        return Err(GridError::DuplicateTarget { first, second: p });
                    }
                    target = Some(p);
                }
                _ => {}
            }
            cells.push(Cell::new(p, t));
        }

        let mut grid = Self {
            width,
            height,
            cells,
            source: source.ok_or(GridError::MissingSource)?,
            target: target.ok_or(GridError::MissingTarget)?,
        };
        for cell in grid.cells.iter_mut() {
            cell.clear_route(cell.pos() == grid.source);
        }
        Ok(grid)
    }

    /// Parse a board drawn with terrain glyphs (`.`, `#`, `S`, `T`, `*`,
    /// `+`), one line per row.
    ///
    /// Handy for building fixed boards in tests and tools; surrounding
    /// whitespace on each line is ignored.
    pub fn from_ascii(s: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |r| r.chars().count()) as i32;
        let terrain: Vec<Terrain> = rows
            .iter()
            .flat_map(|r| r.chars())
            .map(|ch| match ch {
                '#' => Terrain::Blocked,
                'S' => Terrain::Source,
                'T' => Terrain::Target,
                '*' => Terrain::PathTrail,
                '+' => Terrain::FrontierPreview,
                _ => Terrain::Open,
            })
            .collect();
        if rows.iter().any(|r| r.chars().count() as i32 != width) {
            return Err(GridError::CellCount {
                expected: (width * height).max(0) as usize,
                actual: terrain.len(),
            });
        }
        Self::from_terrain(width, height, &terrain)
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The board rectangle.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a board has at least 2x2 cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Position of the source cell.
    #[inline]
    pub fn source(&self) -> Point {
        self.source
    }

    /// Position of the target cell.
    #[inline]
    pub fn target(&self) -> Point {
        self.target
    }

    /// Whether `p` is on the board.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Arena index of `p`, or `None` if it is off the board.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width as usize + p.x as usize)
    }

    /// Board position of an arena index.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let w = self.width as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// The cell at `p`, if it is on the board.
    #[inline]
    pub fn cell(&self, p: Point) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    /// The cell at arena index `idx`.
    #[inline]
    pub fn cell_at(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    /// Record a cheaper route to the cell at arena index `idx`, reached
    /// with `cost` from the cell at arena index `parent`.
    #[inline]
    pub fn relax(&mut self, idx: usize, cost: i32, parent: usize) {
        self.cells[idx].relax(cost, parent);
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Terrain at `p`, if it is on the board.
    #[inline]
    pub fn terrain(&self, p: Point) -> Option<Terrain> {
        self.cell(p).map(|c| c.terrain)
    }

    /// Cost of stepping between adjacent cells `a` and `b`.
    #[inline]
    pub fn cost(&self, a: Point, b: Point) -> i32 {
        step_cost(a, b)
    }

    /// Append the passable 8-neighbors of `p` to `buf`.
    ///
    /// Neighbors are visited column by column (`dx` outer, `dy` inner), and
    /// only positions inside the board are produced. The caller clears
    /// `buf` before calling.
    pub fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let n = p.shift(dx, dy);
                if let Some(i) = self.idx(n) {
                    if self.cells[i].terrain.is_passable() {
                        buf.push(n);
                    }
                }
            }
        }
    }

    /// Restore the board to its pre-search state.
    ///
    /// The source gets cost 0, every other cell is unreached, all routes are
    /// forgotten, and run markers are cleared. Calling it twice is the same
    /// as calling it once.
    pub fn reset(&mut self) {
        self.clear_marks();
        let source = self.source;
        for cell in self.cells.iter_mut() {
            cell.clear_route(cell.pos() == source);
        }
    }

    /// Terrain-only part of [`reset`](Self::reset): restores the endpoint
    /// classes and turns path/preview markers back into open cells.
    ///
    /// Returns the positions whose terrain changed.
    pub fn clear_marks(&mut self) -> Vec<Point> {
        let (source, target) = (self.source, self.target);
        let mut changed = Vec::new();
        for cell in self.cells.iter_mut() {
            let resting = if cell.pos() == source {
                Terrain::Source
            } else if cell.pos() == target {
                Terrain::Target
            } else if cell.terrain.is_transient() {
                Terrain::Open
            } else {
                cell.terrain
            };
            if resting != cell.terrain {
                cell.terrain = resting;
                changed.push(cell.pos());
            }
        }
        changed
    }

    /// Paint a transient marker on an open or marked cell.
    ///
    /// Endpoints and walls are never painted. Returns whether the terrain
    /// changed.
    pub fn mark(&mut self, idx: usize, marker: Terrain) -> bool {
        debug_assert!(marker.is_transient());
        let cell = &mut self.cells[idx];
        let paintable = cell.terrain == Terrain::Open || cell.terrain.is_transient();
        if !paintable || cell.terrain == marker {
            return false;
        }
        cell.terrain = marker;
        true
    }

    /// Turn a marked cell back into an open one. Returns whether the
    /// terrain changed.
    pub fn unmark(&mut self, idx: usize) -> bool {
        let cell = &mut self.cells[idx];
        if !cell.terrain.is_transient() {
            return false;
        }
        cell.terrain = Terrain::Open;
        true
    }

    /// Flip `p` between open and blocked.
    ///
    /// Endpoints and positions off the board are left alone. Returns whether
    /// anything changed.
    pub fn toggle_wall(&mut self, p: Point) -> bool {
        let Some(i) = self.idx(p) else {
            return false;
        };
        let cell = &mut self.cells[i];
        cell.terrain = match cell.terrain {
            Terrain::Blocked => Terrain::Open,
            Terrain::Open | Terrain::PathTrail | Terrain::FrontierPreview => Terrain::Blocked,
            Terrain::Source | Terrain::Target => return false,
        };
        true
    }

    /// Swap in a freshly built cell arena. The caller guarantees the
    /// endpoint invariants.
    pub(crate) fn replace_cells(
        &mut self,
        width: i32,
        height: i32,
        cells: Vec<Cell>,
        source: Point,
        target: Point,
    ) {
        debug_assert_eq!(cells.len(), (width * height) as usize);
        self.width = width;
        self.height = height;
        self.cells = cells;
        self.source = source;
        self.target = target;
        self.reset();
    }

    /// Cells row by row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width as usize)
    }
}

/// Unchecked wire form of a [`Grid`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    source: Point,
    target: Point,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> {
        let terrain: Vec<Terrain> = repr.cells.iter().map(Cell::terrain).collect();
        let mut grid = Self::from_terrain(repr.width, repr.height, &terrain)?;
        for (recorded, found) in [(repr.source, grid.source), (repr.target, grid.target)] {
            if recorded != found {
                return Err(GridError::EndpointMismatch { recorded, found });
            }
        }
        for (i, cell) in repr.cells.into_iter().enumerate() {
            let expected = grid.point(i);
            if cell.pos() != expected {
                return Err(GridError::CellPosition {
                    index: i,
                    expected,
                    found: cell.pos(),
                });
            }
            if let Some(parent) = cell.parent() {
                if parent >= grid.len() {
                    return Err(GridError::DanglingParent {
                        pos: expected,
                        parent,
                    });
                }
            }
            grid.cells[i] = cell;
        }
        Ok(grid)
    }
}

fn check_size(width: i32, height: i32) -> Result<(), GridError> {
    if width < MIN_SIZE || height < MIN_SIZE {
        return Err(GridError::TooSmall { width, height });
    }
    Ok(())
}

impl fmt::Display for Grid {
    /// One line of terrain glyphs per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.terrain.glyph())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::UNREACHABLE;

    fn open(w: i32, h: i32) -> Grid {
        Grid::new(w, h, Point::new(0, 0), Point::new(w - 1, h - 1)).unwrap()
    }

    fn snapshot(g: &Grid) -> Vec<(Terrain, i32, Option<usize>)> {
        g.cells()
            .iter()
            .map(|c| (c.terrain, c.cost(), c.parent()))
            .collect()
    }

    #[test]
    fn new_grid_has_endpoints() {
        let g = open(4, 3);
        assert_eq!(g.len(), 12);
        assert_eq!(g.terrain(Point::new(0, 0)), Some(Terrain::Source));
        assert_eq!(g.terrain(Point::new(3, 2)), Some(Terrain::Target));
        assert_eq!(g.cell(Point::new(0, 0)).unwrap().cost(), 0);
        assert_eq!(g.cell(Point::new(1, 0)).unwrap().cost(), UNREACHABLE);
    }

    #[test]
    fn rejects_invalid_boards() {
        let p = Point::new(0, 0);
        assert_eq!(
            Grid::new(1, 5, p, Point::new(0, 4)),
            Err(GridError::TooSmall { width: 1, height: 5 })
        );
        assert_eq!(Grid::new(3, 3, p, p), Err(GridError::SourceIsTarget(p)));
        assert!(matches!(
            Grid::new(3, 3, p, Point::new(3, 0)),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn from_terrain_validates_endpoints() {
        use Terrain::*;
        assert_eq!(
            Grid::from_terrain(2, 2, &[Open, Open, Open, Target]),
            Err(GridError::MissingSource)
        );
        assert_eq!(
            Grid::from_terrain(2, 2, &[Source, Open, Open, Open]),
            Err(GridError::MissingTarget)
        );
        assert_eq!(
            Grid::from_terrain(2, 2, &[Source, Source, Open, Target]),
            Err(GridError::DuplicateSource {
                first: Point::new(0, 0),
                second: Point::new(1, 0)
            })
        );
        assert_eq!(
            Grid::from_terrain(2, 2, &[Source, Target, Open]),
            Err(GridError::CellCount {
                expected: 4,
                actual: 3
            })
        );
        let g = Grid::from_terrain(2, 2, &[Blocked, Source, Target, Open]).unwrap();
        assert_eq!(g.source(), Point::new(1, 0));
        assert_eq!(g.target(), Point::new(0, 1));
    }

    #[test]
    fn ascii_round_trip() {
        let text = "S.#\n.#.\n..T";
        let g = Grid::from_ascii(text).unwrap();
        assert_eq!(g.width(), 3);
        assert_eq!(g.height(), 3);
        assert_eq!(g.terrain(Point::new(2, 0)), Some(Terrain::Blocked));
        assert_eq!(g.to_string(), text);
    }

    #[test]
    fn idx_and_point_agree() {
        let g = open(5, 4);
        for p in g.bounds() {
            let i = g.idx(p).unwrap();
            assert_eq!(g.point(i), p);
            assert_eq!(g.cell_at(i).pos(), p);
        }
        assert_eq!(g.idx(Point::new(5, 0)), None);
        assert_eq!(g.idx(Point::new(0, -1)), None);
    }

    #[test]
    fn neighbor_counts() {
        let g = open(4, 4);
        let mut buf = Vec::new();
        g.neighbors(Point::new(0, 0), &mut buf);
        assert_eq!(buf.len(), 3);
        buf.clear();
        g.neighbors(Point::new(2, 0), &mut buf);
        assert_eq!(buf.len(), 5);
        buf.clear();
        g.neighbors(Point::new(1, 1), &mut buf);
        assert_eq!(buf.len(), 8);
        assert!(buf.iter().all(|&n| g.contains(n) && n != Point::new(1, 1)));
    }

    #[test]
    fn neighbor_order_is_column_major() {
        let g = open(3, 3);
        let mut buf = Vec::new();
        g.neighbors(Point::new(1, 1), &mut buf);
        assert_eq!(
            buf,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(0, 2),
                Point::new(1, 0),
                Point::new(1, 2),
                Point::new(2, 0),
                Point::new(2, 1),
                Point::new(2, 2),
            ]
        );
    }

    #[test]
    fn neighbors_skip_walls() {
        let g = Grid::from_ascii("S#.\n##.\n..T").unwrap();
        let mut buf = Vec::new();
        g.neighbors(Point::new(0, 0), &mut buf);
        assert!(buf.is_empty());
        g.neighbors(Point::new(2, 1), &mut buf);
        assert_eq!(buf, vec![Point::new(1, 2), Point::new(2, 0), Point::new(2, 2)]);
    }

    #[test]
    fn cost_symmetric() {
        let g = open(3, 3);
        let c = Point::new(1, 1);
        let mut buf = Vec::new();
        g.neighbors(c, &mut buf);
        for n in buf {
            assert_eq!(g.cost(c, n), g.cost(n, c));
        }
    }

    #[test]
    fn editing_never_adds_endpoints() {
        let mut g = Grid::from_ascii("S..\n.#.\n..T").unwrap();
        for p in g.bounds() {
            g.toggle_wall(p);
        }
        for i in 0..g.len() {
            g.mark(i, Terrain::PathTrail);
            g.relax(i, 10, 0);
        }
        g.reset();
        let count = |t| g.cells().iter().filter(|c| c.terrain() == t).count();
        assert_eq!(count(Terrain::Source), 1);
        assert_eq!(count(Terrain::Target), 1);
        assert_eq!(g.to_string(), "S##\n#.#\n##T");
    }

    #[test]
    fn reset_is_idempotent() {
        let mut g = Grid::from_ascii("S+*\n.#*\n.+T").unwrap();
        let i = g.idx(Point::new(1, 0)).unwrap();
        g.relax(i, 10, 0);
        g.reset();
        let once = snapshot(&g);
        g.reset();
        assert_eq!(snapshot(&g), once);
        assert_eq!(g.to_string(), "S..\n.#.\n..T");
        assert_eq!(g.cell_at(i).cost(), UNREACHABLE);
        assert_eq!(g.cell_at(i).parent(), None);
    }

    #[test]
    fn clear_marks_reports_changes() {
        let mut g = Grid::from_ascii("S+\n.T").unwrap();
        let changed = g.clear_marks();
        assert_eq!(changed, vec![Point::new(1, 0)]);
        assert!(g.clear_marks().is_empty());
    }

    #[test]
    fn mark_leaves_endpoints_and_walls() {
        let mut g = Grid::from_ascii("S#\n.T").unwrap();
        for i in 0..g.len() {
            g.mark(i, Terrain::FrontierPreview);
        }
        assert_eq!(g.to_string(), "S#\n+T");
        assert!(g.unmark(2));
        assert!(!g.unmark(2));
    }

    #[test]
    fn toggle_wall_flips_open_cells_only() {
        let mut g = open(3, 3);
        let p = Point::new(1, 1);
        assert!(g.toggle_wall(p));
        assert_eq!(g.terrain(p), Some(Terrain::Blocked));
        assert!(g.toggle_wall(p));
        assert_eq!(g.terrain(p), Some(Terrain::Open));
        assert!(!g.toggle_wall(g.source()));
        assert!(!g.toggle_wall(Point::new(9, 9)));
    }
}
