//! The frontier-driven search loop shared by every [`FrontierPriority`].

use std::collections::BinaryHeap;

use pathgrid_core::{Grid, Point, Terrain, UNREACHABLE};

use crate::config::SearchConfig;
use crate::observer::SearchObserver;
use crate::path::{SearchOutcome, extract_path};
use crate::priority::FrontierPriority;

/// Where a [`SearchEngine`] is in its run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// Created, nothing touched yet.
    Idle,
    /// Frontier is being expanded.
    Running,
    /// The target was reached.
    Found,
    /// The frontier ran dry before the target was reached.
    Exhausted,
}

impl SearchStatus {
    /// Whether the run has ended.
    #[inline]
    pub fn is_done(self) -> bool {
        matches!(self, Self::Found | Self::Exhausted)
    }
}

/// Frontier heap entry, ordered so that `BinaryHeap` pops the smallest
/// priority first and, among equal priorities, the cell that joined the
/// frontier first.
#[derive(Clone, Copy, Eq, PartialEq)]
struct FrontierRef {
    idx: usize,
    priority: i32,
    seq: u64,
    /// Cell cost when the entry was pushed; stale once the cell is relaxed
    /// again.
    cost: i32,
}

impl Ord for FrontierRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// One search run over a borrowed [`Grid`].
///
/// The engine holds the board mutably for its whole lifetime, so only one
/// run can be active on a board at a time. Cell costs and predecessor links
/// are written straight into the board's cells; the frontier and settled
/// set live here and are dropped with the engine.
///
/// ```
/// use pathgrid_core::{Grid, Point};
/// use pathgrid_search::{Heuristic, SearchConfig, SearchEngine};
///
/// let mut grid = Grid::from_ascii("S..\n...\n..T").unwrap();
/// let outcome = SearchEngine::new(&mut grid, Heuristic)
///     .with_config(SearchConfig::QUIET)
///     .run();
/// assert!(outcome.found);
/// assert_eq!(outcome.cost, 28);
/// assert_eq!(outcome.path, vec![Point::new(0, 0), Point::new(1, 1), Point::new(2, 2)]);
/// ```
pub struct SearchEngine<'g, P: FrontierPriority> {
    grid: &'g mut Grid,
    strategy: P,
    config: SearchConfig,
    observer: Option<&'g mut dyn SearchObserver>,
    status: SearchStatus,
    frontier: BinaryHeap<FrontierRef>,
    in_frontier: Vec<bool>,
    settled: Vec<bool>,
    seqs: Vec<u64>,
    next_seq: u64,
    expanded: usize,
    // cells currently painted as preview, and a scratch mask for repainting
    preview: Vec<usize>,
    keep: Vec<bool>,
    nbuf: Vec<Point>,
}

impl<'g, P: FrontierPriority> SearchEngine<'g, P> {
    /// Bind a new, idle engine to `grid`.
    pub fn new(grid: &'g mut Grid, strategy: P) -> Self {
        Self {
            grid,
            strategy,
            config: SearchConfig::default(),
            observer: None,
            status: SearchStatus::Idle,
            frontier: BinaryHeap::new(),
            in_frontier: Vec::new(),
            settled: Vec::new(),
            seqs: Vec::new(),
            next_seq: 0,
            expanded: 0,
            preview: Vec::new(),
            keep: Vec::new(),
            nbuf: Vec::with_capacity(8),
        }
    }

    /// Use `config` for this run.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Report progress to `observer`.
    pub fn with_observer(mut self, observer: &'g mut dyn SearchObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Current state of the run.
    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Number of cells settled so far.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// The board being searched.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    /// Whether `p` has been expanded in this run.
    pub fn is_settled(&self, p: Point) -> bool {
        self.grid
            .idx(p)
            .and_then(|i| self.settled.get(i).copied())
            .unwrap_or(false)
    }

    /// Whether `p` is waiting in the frontier.
    pub fn in_frontier(&self, p: Point) -> bool {
        self.grid
            .idx(p)
            .and_then(|i| self.in_frontier.get(i).copied())
            .unwrap_or(false)
    }

    /// Run to completion and report the outcome.
    pub fn run(&mut self) -> SearchOutcome {
        while !self.step().is_done() {}
        self.outcome()
    }

    /// Advance the run by one select/settle/expand iteration.
    ///
    /// The first call on an idle engine resets the board and seeds the
    /// frontier with the source. Once the run has ended, further calls do
    /// nothing and return the final status.
    pub fn step(&mut self) -> SearchStatus {
        match self.status {
            SearchStatus::Idle => self.start(),
            SearchStatus::Running => {}
            done => return done,
        }

        let Some(ci) = self.select() else {
            self.finish(SearchStatus::Exhausted);
            return self.status;
        };
        self.in_frontier[ci] = false;
        self.settled[ci] = true;
        self.expanded += 1;

        let cp = self.grid.point(ci);
        let current_cost = self.grid.cell_at(ci).cost();
        log::trace!("settle {cp} at cost {current_cost}");
        if let Some(obs) = self.observer.as_deref_mut() {
            obs.settled(cp, current_cost);
        }

        let target = self.grid.target();
        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.grid.neighbors(cp, &mut nbuf);

        for &np in nbuf.iter() {
            let Some(ni) = self.grid.idx(np) else {
                continue;
            };
            let candidate = current_cost + self.grid.cost(cp, np);
            if candidate >= self.grid.cell_at(ni).cost() {
                continue;
            }

            self.grid.relax(ni, candidate, ci);
            if !self.settled[ni] {
                self.push(ni, np, candidate);
            }
            self.report_relax(ni, candidate);

            // First discovery of the target ends the run; the remaining
            // neighbors of this cell are not examined.
            if np == target {
                self.finish(SearchStatus::Found);
                break;
            }
        }

        self.nbuf = nbuf;
        self.status
    }

    /// Outcome of the run so far: the path is only filled in once the
    /// target has been found.
    pub fn outcome(&self) -> SearchOutcome {
        if self.status != SearchStatus::Found {
            return SearchOutcome::not_found(self.expanded);
        }
        let target = self.grid.target();
        let path = extract_path(&*self.grid, target);
        let cost = self.grid.cell(target).map_or(UNREACHABLE, |c| c.cost());
        SearchOutcome {
            found: !path.is_empty(),
            path,
            cost,
            expanded: self.expanded,
        }
    }

    fn start(&mut self) {
        for p in self.grid.clear_marks() {
            self.notify(p, self.grid.terrain(p).unwrap_or_default());
        }
        self.grid.reset();

        let len = self.grid.len();
        self.frontier.clear();
        self.in_frontier = vec![false; len];
        self.settled = vec![false; len];
        self.seqs = vec![0; len];
        self.keep = vec![false; len];
        self.preview.clear();
        self.next_seq = 0;
        self.expanded = 0;

        let source = self.grid.source();
        if let Some(si) = self.grid.idx(source) {
            self.push(si, source, 0);
        }
        self.status = SearchStatus::Running;
        log::debug!(
            "{} search on {}x{} board from {} to {}",
            P::NAME,
            self.grid.width(),
            self.grid.height(),
            source,
            self.grid.target()
        );
    }

    /// Pop the frontier cell with the lowest priority, skipping entries
    /// made stale by a later relaxation.
    fn select(&mut self) -> Option<usize> {
        while let Some(entry) = self.frontier.pop() {
            if self.in_frontier[entry.idx] && self.grid.cell_at(entry.idx).cost() == entry.cost {
                return Some(entry.idx);
            }
        }
        None
    }

    /// Add `idx` to the frontier, or refresh its priority if it is already
    /// there. A cell keeps the insertion rank it got when it first joined.
    fn push(&mut self, idx: usize, pos: Point, cost: i32) {
        if !self.in_frontier[idx] {
            self.in_frontier[idx] = true;
            self.seqs[idx] = self.next_seq;
            self.next_seq += 1;
        }
        let priority = self.strategy.priority(pos, cost, self.grid.target());
        self.frontier.push(FrontierRef {
            idx,
            priority,
            seq: self.seqs[idx],
            cost,
        });
    }

    fn report_relax(&mut self, idx: usize, cost: i32) {
        if self.observer.is_none() && !self.config.visualize {
            return;
        }
        let prefix = self.prefix_of(idx);
        if self.config.visualize {
            self.repaint_preview(&prefix);
        }
        if let Some(obs) = self.observer.as_deref_mut() {
            let points: Vec<Point> = prefix.iter().map(|&i| self.grid.point(i)).collect();
            obs.relaxed(self.grid.point(idx), cost, &points);
        }
    }

    /// Arena indices from the source up to, not including, `idx`.
    fn prefix_of(&self, idx: usize) -> Vec<usize> {
        let mut prefix = Vec::new();
        let mut cur = self.grid.cell_at(idx).parent();
        while let Some(i) = cur {
            prefix.push(i);
            cur = self.grid.cell_at(i).parent();
        }
        prefix.reverse();
        prefix
    }

    fn repaint_preview(&mut self, prefix: &[usize]) {
        let old = std::mem::take(&mut self.preview);
        for &i in prefix {
            self.keep[i] = true;
        }
        for i in old {
            if !self.keep[i] && self.grid.unmark(i) {
                self.notify(self.grid.point(i), Terrain::Open);
            }
        }
        for &i in prefix {
            self.keep[i] = false;
            if self.grid.mark(i, Terrain::FrontierPreview) {
                self.notify(self.grid.point(i), Terrain::FrontierPreview);
            }
        }
        self.preview = prefix.to_vec();
    }

    fn finish(&mut self, status: SearchStatus) {
        self.status = status;
        for i in std::mem::take(&mut self.preview) {
            if self.grid.unmark(i) {
                self.notify(self.grid.point(i), Terrain::Open);
            }
        }

        if status == SearchStatus::Found && self.config.mark_trail {
            for p in extract_path(&*self.grid, self.grid.target()) {
                if let Some(i) = self.grid.idx(p) {
                    if self.grid.mark(i, Terrain::PathTrail) {
                        self.notify(p, Terrain::PathTrail);
                    }
                }
            }
        }

        match status {
            SearchStatus::Found => log::debug!(
                "{} search found target at cost {} after {} expansions",
                P::NAME,
                self.grid.cell(self.grid.target()).map_or(UNREACHABLE, |c| c.cost()),
                self.expanded
            ),
            _ => log::debug!(
                "{} search exhausted the frontier after {} expansions",
                P::NAME,
                self.expanded
            ),
        }
        if let Some(obs) = self.observer.as_deref_mut() {
            obs.finished(status);
        }
    }

    fn notify(&mut self, pos: Point, terrain: Terrain) {
        if let Some(obs) = self.observer.as_deref_mut() {
            obs.terrain_changed(pos, terrain);
        }
    }
}
