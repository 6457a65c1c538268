use pathgrid_core::{Point, octile};

/// Decides which frontier cell the search expands next.
///
/// The search loop always expands the frontier cell with the smallest
/// priority; everything else about the loop is shared between strategies.
pub trait FrontierPriority {
    /// Short name used in log output.
    const NAME: &'static str;

    /// Priority of a frontier cell at `pos` reached with `cost`, when
    /// searching towards `target`.
    fn priority(&self, pos: Point, cost: i32, target: Point) -> i32;
}

/// Uniform-cost search (Dijkstra): expand the cheapest known cell first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UniformCost;

impl FrontierPriority for UniformCost {
    const NAME: &'static str = "uniform-cost";

    #[inline]
    fn priority(&self, _pos: Point, cost: i32, _target: Point) -> i32 {
        cost
    }
}

/// A*: cost so far plus the octile distance left to the target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Heuristic;

impl FrontierPriority for Heuristic {
    const NAME: &'static str = "a*";

    #[inline]
    fn priority(&self, pos: Point, cost: i32, target: Point) -> i32 {
        cost + octile(pos, target)
    }
}

/// Which strategy a [`run`](crate::run) uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchMode {
    UniformCost,
    #[default]
    Heuristic,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_cost_ignores_target() {
        let p = Point::new(1, 1);
        assert_eq!(UniformCost.priority(p, 42, Point::new(9, 9)), 42);
        assert_eq!(UniformCost.priority(p, 42, p), 42);
    }

    #[test]
    fn heuristic_adds_octile_distance() {
        let target = Point::new(2, 2);
        assert_eq!(Heuristic.priority(Point::new(0, 1), 10, target), 10 + 24);
        assert_eq!(Heuristic.priority(Point::new(1, 1), 14, target), 28);
        assert_eq!(Heuristic.priority(target, 28, target), 28);
    }
}
