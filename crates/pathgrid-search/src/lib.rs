//! Uniform-cost and A* search over [`pathgrid_core::Grid`] boards.
//!
//! Both strategies share one frontier loop, [`SearchEngine`], and differ
//! only in how they rank frontier cells ([`FrontierPriority`]):
//!
//! - [`UniformCost`] expands the cheapest known cell first.
//! - [`Heuristic`] adds the octile distance to the target (A*).
//!
//! The loop stops the moment the target is first reached. With the octile
//! heuristic that route is always a cheapest one; uniform-cost search stops
//! on first discovery too, so on boards with walls it can return a route
//! that costs more than the best.
//!
//! A run writes costs and predecessor links into the board's cells and,
//! when [`SearchConfig::visualize`] is set, paints the best-known route as
//! it goes. Hosts watch progress through a [`SearchObserver`].

mod config;
mod engine;
mod observer;
mod path;
mod priority;

pub use config::SearchConfig;
pub use engine::{SearchEngine, SearchStatus};
pub use observer::{SearchEvent, SearchObserver};
pub use path::{SearchOutcome, extract_path};
pub use priority::{FrontierPriority, Heuristic, SearchMode, UniformCost};

use pathgrid_core::Grid;

/// Run a complete search on `grid` with the strategy picked by `mode`.
pub fn run(grid: &mut Grid, mode: SearchMode, config: SearchConfig) -> SearchOutcome {
    match mode {
        SearchMode::UniformCost => SearchEngine::new(grid, UniformCost)
            .with_config(config)
            .run(),
        SearchMode::Heuristic => SearchEngine::new(grid, Heuristic)
            .with_config(config)
            .run(),
    }
}

/// Like [`run`], reporting progress to `observer`.
pub fn run_observed(
    grid: &mut Grid,
    mode: SearchMode,
    config: SearchConfig,
    observer: &mut dyn SearchObserver,
) -> SearchOutcome {
    match mode {
        SearchMode::UniformCost => SearchEngine::new(grid, UniformCost)
            .with_config(config)
            .with_observer(observer)
            .run(),
        SearchMode::Heuristic => SearchEngine::new(grid, Heuristic)
            .with_config(config)
            .with_observer(observer)
            .run(),
    }
}
