//! Hooks a host uses to watch a search while it runs.

use pathgrid_core::{Point, Terrain};

use crate::engine::SearchStatus;

/// Receives notifications from a running [`SearchEngine`].
///
/// All methods default to doing nothing. Callbacks run on the search
/// thread between relaxations; a host that wants to animate should redraw
/// here and drive the engine with [`SearchEngine::step`] so it can yield
/// between steps.
///
/// [`SearchEngine`]: crate::SearchEngine
/// [`SearchEngine::step`]: crate::SearchEngine::step
pub trait SearchObserver {
    /// The terrain of `pos` changed and should be redrawn.
    fn terrain_changed(&mut self, _pos: Point, _terrain: Terrain) {}

    /// `pos` was reached more cheaply, with total `cost`, through `prefix`
    /// (source first, ending at the cell `pos` was reached from).
    fn relaxed(&mut self, _pos: Point, _cost: i32, _prefix: &[Point]) {}

    /// `pos` left the frontier with its final `cost`.
    fn settled(&mut self, _pos: Point, _cost: i32) {}

    /// The run ended with `status` ([`Found`](SearchStatus::Found) or
    /// [`Exhausted`](SearchStatus::Exhausted)).
    fn finished(&mut self, _status: SearchStatus) {}
}

/// One recorded observer notification.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchEvent {
    TerrainChanged { pos: Point, terrain: Terrain },
    Relaxed { pos: Point, cost: i32, prefix: Vec<Point> },
    Settled { pos: Point, cost: i32 },
    Finished(SearchStatus),
}

/// Records every notification in order.
impl SearchObserver for Vec<SearchEvent> {
    fn terrain_changed(&mut self, pos: Point, terrain: Terrain) {
        self.push(SearchEvent::TerrainChanged { pos, terrain });
    }

    fn relaxed(&mut self, pos: Point, cost: i32, prefix: &[Point]) {
        self.push(SearchEvent::Relaxed {
            pos,
            cost,
            prefix: prefix.to_vec(),
        });
    }

    fn settled(&mut self, pos: Point, cost: i32) {
        self.push(SearchEvent::Settled { pos, cost });
    }

    fn finished(&mut self, status: SearchStatus) {
        self.push(SearchEvent::Finished(status));
    }
}
