//! Error types for board construction and layout loading.

use thiserror::Error;

use crate::geom::Point;

/// A board that would violate the grid invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("board must be at least 2x2, got {width}x{height}")]
    TooSmall { width: i32, height: i32 },
    #[error("{pos} lies outside the {width}x{height} board")]
    OutOfBounds { pos: Point, width: i32, height: i32 },
    #[error("source and target are the same cell {0}")]
    SourceIsTarget(Point),
    #[error("board has no source cell")]
    MissingSource,
    #[error("board has no target cell")]
    MissingTarget,
    #[error("board has more than one source cell: {first} and {second}")]
    DuplicateSource { first: Point, second: Point },
    #[error("board has more than one target cell: {first} and {second}")]
    DuplicateTarget { first: Point, second: Point },
    #[error("expected {expected} cells for the board, got {actual}")]
    CellCount { expected: usize, actual: usize },
    #[error("endpoint recorded at {recorded} but the cells mark it at {found}")]
    EndpointMismatch { recorded: Point, found: Point },
    #[error("cell {index} should be at {expected}, found {found}")]
    CellPosition {
        index: usize,
        expected: Point,
        found: Point,
    },
    #[error("cell {pos} links to arena index {parent}, past the end of the board")]
    DanglingParent { pos: Point, parent: usize },
}

/// A board layout that could not be read.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout is empty")]
    Empty,
    #[error("layout header needs 6 fields (rows,cols,x,y,width,height), got {0}")]
    Header(usize),
    #[error("line {line}: `{value}` is not an integer")]
    NotAnInteger { line: usize, value: String },
    #[error("line {line}: unknown terrain code {code}")]
    UnknownTerrain { line: usize, code: i64 },
    #[error("expected {expected} rows of cells, got {actual}")]
    RowCount { expected: usize, actual: usize },
    #[error("line {line}: expected {expected} columns, got {actual}")]
    ColumnCount {
        line: usize,
        expected: usize,
        actual: usize,
    },
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
