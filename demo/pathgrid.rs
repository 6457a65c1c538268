//! Terminal pathfinding demo.
//!
//! Builds a random board (or loads a saved layout), runs one search and
//! prints the board with the found route.
//!
//! Run: cargo run --bin pathgrid -- [--dijkstra] [--no-visualize] [--save FILE] [SEED] [LAYOUT]

use std::fs::File;
use std::io::{BufReader, BufWriter};

use pathgrid_core::{BoardConfig, Grid, Layout, Point, Terrain};
use pathgrid_search::{SearchConfig, SearchMode, SearchObserver, SearchStatus};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Default)]
struct Options {
    mode: SearchMode,
    search: SearchConfig,
    seed: Option<u64>,
    layout: Option<String>,
    save: Option<String>,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut opts = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--dijkstra" => opts.mode = SearchMode::UniformCost,
                "--no-visualize" => opts.search.visualize = false,
                "--save" => {
                    opts.save = Some(args.next().ok_or("--save needs a file name")?);
                }
                flag if flag.starts_with("--") => return Err(format!("unknown flag {flag}")),
                other => match other.parse::<u64>() {
                    Ok(seed) => opts.seed = Some(seed),
                    Err(_) => opts.layout = Some(other.to_string()),
                },
            }
        }
        Ok(opts)
    }
}

/// Counts what the search reports.
#[derive(Default)]
struct Tally {
    relaxed: usize,
    repaints: usize,
}

impl SearchObserver for Tally {
    fn terrain_changed(&mut self, _pos: Point, _terrain: Terrain) {
        self.repaints += 1;
    }

    fn relaxed(&mut self, _pos: Point, _cost: i32, _prefix: &[Point]) {
        self.relaxed += 1;
    }

    fn finished(&mut self, status: SearchStatus) {
        log::info!("search finished: {status:?}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Options::parse(std::env::args().skip(1))?;

    let (mut grid, panel) = match &opts.layout {
        Some(path) => {
            let layout = Layout::read_from(BufReader::new(File::open(path)?))?;
            log::info!("loaded {path}, panel {:?}", layout.panel);
            (layout.grid, layout.panel)
        }
        None => {
            let seed = opts.seed.unwrap_or_else(|| rand::rng().random());
            println!("seed {seed}");
            let mut rng = StdRng::seed_from_u64(seed);
            let cfg = BoardConfig::default();
            (Grid::random(&cfg, &mut rng)?, cfg.panel)
        }
    };

    let mut tally = Tally::default();
    let outcome = pathgrid_search::run_observed(&mut grid, opts.mode, opts.search, &mut tally);

    println!("{grid}");
    println!();
    if outcome.found {
        println!(
            "{:?}: cost {} over {} steps, {} cells expanded",
            opts.mode,
            outcome.cost,
            outcome.path.len() - 1,
            outcome.expanded
        );
    } else {
        println!(
            "{:?}: target unreachable, {} cells expanded",
            opts.mode, outcome.expanded
        );
    }
    println!("{} relaxations, {} repaints", tally.relaxed, tally.repaints);

    if let Some(path) = &opts.save {
        Layout::new(grid, panel).write_to(BufWriter::new(File::create(path)?))?;
        println!("saved {path}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Options, String> {
        Options::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults() {
        let opts = parse(&[]).unwrap();
        assert_eq!(opts.mode, SearchMode::Heuristic);
        assert!(opts.search.visualize);
        assert!(opts.seed.is_none() && opts.layout.is_none());
    }

    #[test]
    fn flags_seed_and_layout() {
        let opts = parse(&[
            "--dijkstra",
            "42",
            "--no-visualize",
            "board.csv",
            "--save",
            "out.csv",
        ])
        .unwrap();
        assert_eq!(opts.mode, SearchMode::UniformCost);
        assert!(!opts.search.visualize);
        assert_eq!(opts.seed, Some(42));
        assert_eq!(opts.layout.as_deref(), Some("board.csv"));
        assert_eq!(opts.save.as_deref(), Some("out.csv"));
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(parse(&["--fast"]).is_err());
        assert!(parse(&["--save"]).is_err());
    }
}
