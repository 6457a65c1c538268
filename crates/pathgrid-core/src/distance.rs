use crate::geom::Point;

/// Cost of an orthogonal step.
pub const ORTHOGONAL_COST: i32 = 10;

/// Cost of a diagonal step (10·√2 rounded down).
pub const DIAGONAL_COST: i32 = 14;

/// Cost of moving between two adjacent cells: 14 when both coordinates
/// change, 10 otherwise.
#[inline]
pub fn step_cost(a: Point, b: Point) -> i32 {
    if a.x != b.x && a.y != b.y {
        DIAGONAL_COST
    } else {
        ORTHOGONAL_COST
    }
}

/// Octile distance with 10/14 weights, ignoring obstacles.
///
/// Takes as many diagonal steps as both axes allow, then walks the rest
/// straight. Equals [`step_cost`] for adjacent cells.
#[inline]
pub fn octile(a: Point, b: Point) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let diag = dx.min(dy);
    DIAGONAL_COST * diag + ORTHOGONAL_COST * (dx.max(dy) - diag)
}
