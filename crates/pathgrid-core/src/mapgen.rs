//! Random board generation and resizing.

use rand::Rng;

use crate::cell::Cell;
use crate::config::BoardConfig;
use crate::error::GridError;
use crate::geom::{Point, Range};
use crate::grid::{Grid, MIN_SIZE};
use crate::terrain::Terrain;

impl Grid {
    /// Generate a `cfg.cols` × `cfg.rows` board with random endpoints and
    /// walls.
    pub fn random<R: Rng>(cfg: &BoardConfig, rng: &mut R) -> Result<Self, GridError> {
        let mut grid = Self::new(cfg.cols, cfg.rows, Point::new(0, 0), Point::new(1, 0))?;
        grid.randomize(cfg.wall_pct, rng);
        Ok(grid)
    }

    /// Recreate every cell with the current dimensions.
    ///
    /// Source and target are placed on two distinct random cells. Every
    /// other cell starts as a wall and is opened when a roll in `1..100`
    /// reaches `wall_pct`.
    pub fn randomize<R: Rng>(&mut self, wall_pct: u32, rng: &mut R) {
        self.generate(self.width(), self.height(), wall_pct, rng);
    }

    /// Grow both dimensions by `cfg.resize_step` and regenerate the board.
    pub fn enlarge<R: Rng>(&mut self, cfg: &BoardConfig, rng: &mut R) {
        let step = cfg.resize_step.max(0);
        self.generate(self.width() + step, self.height() + step, cfg.wall_pct, rng);
    }

    /// Shrink both dimensions by `cfg.resize_step` and regenerate the board.
    ///
    /// A dimension that would drop below 2 keeps its current size.
    pub fn shrink<R: Rng>(&mut self, cfg: &BoardConfig, rng: &mut R) {
        let step = cfg.resize_step.max(0);
        let shrunk = |d: i32| if d - step >= MIN_SIZE { d - step } else { d };
        self.generate(shrunk(self.width()), shrunk(self.height()), cfg.wall_pct, rng);
    }

    fn generate<R: Rng>(&mut self, w: i32, h: i32, wall_pct: u32, rng: &mut R) {
        let source = Point::new(rng.random_range(0..w), rng.random_range(0..h));
        let target = loop {
            let p = Point::new(rng.random_range(0..w), rng.random_range(0..h));
            if p != source {
                break p;
            }
        };

        let cells: Vec<Cell> = Range::new(0, 0, w, h)
            .iter()
            .map(|p| {
                let t = if p == source {
                    Terrain::Source
                } else if p == target {
                    Terrain::Target
                } else if rng.random_range(1..100u32) >= wall_pct {
                    Terrain::Open
                } else {
                    Terrain::Blocked
                };
                Cell::new(p, t)
            })
            .collect();
        self.replace_cells(w, h, cells, source, target);
        log::debug!("generated {w}x{h} board, source {source} target {target}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn count(g: &Grid, t: Terrain) -> usize {
        g.cells().iter().filter(|c| c.terrain == t).count()
    }

    #[test]
    fn random_board_has_one_source_and_target() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let g = Grid::random(&BoardConfig::default(), &mut rng).unwrap();
            assert_eq!(g.width(), 32);
            assert_eq!(g.height(), 32);
            assert_eq!(count(&g, Terrain::Source), 1);
            assert_eq!(count(&g, Terrain::Target), 1);
            assert_ne!(g.source(), g.target());
            assert_eq!(g.terrain(g.source()), Some(Terrain::Source));
            assert_eq!(g.terrain(g.target()), Some(Terrain::Target));
            assert_eq!(g.cell(g.source()).unwrap().cost(), 0);
        }
    }

    #[test]
    fn wall_pct_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut cfg = BoardConfig {
            rows: 6,
            cols: 6,
            wall_pct: 0,
            ..BoardConfig::default()
        };
        let g = Grid::random(&cfg, &mut rng).unwrap();
        assert_eq!(count(&g, Terrain::Blocked), 0);

        cfg.wall_pct = 100;
        let g = Grid::random(&cfg, &mut rng).unwrap();
        assert_eq!(count(&g, Terrain::Blocked), 34);
    }

    #[test]
    fn tiny_board_still_gets_distinct_endpoints() {
        let mut rng = StdRng::seed_from_u64(99);
        let cfg = BoardConfig {
            rows: 2,
            cols: 2,
            ..BoardConfig::default()
        };
        for _ in 0..20 {
            let g = Grid::random(&cfg, &mut rng).unwrap();
            assert_ne!(g.source(), g.target());
        }
    }

    #[test]
    fn enlarge_and_shrink() {
        let mut rng = StdRng::seed_from_u64(3);
        let cfg = BoardConfig {
            rows: 4,
            cols: 5,
            ..BoardConfig::default()
        };
        let mut g = Grid::random(&cfg, &mut rng).unwrap();
        g.enlarge(&cfg, &mut rng);
        assert_eq!((g.width(), g.height()), (7, 6));
        g.shrink(&cfg, &mut rng);
        g.shrink(&cfg, &mut rng);
        assert_eq!((g.width(), g.height()), (3, 2));
        g.shrink(&cfg, &mut rng);
        assert_eq!((g.width(), g.height()), (3, 2));
        assert_eq!(g.len(), 6);
    }

    #[test]
    fn shrinking_two_by_two_keeps_dimensions() {
        let mut rng = StdRng::seed_from_u64(11);
        let cfg = BoardConfig {
            rows: 2,
            cols: 2,
            ..BoardConfig::default()
        };
        let mut g = Grid::random(&cfg, &mut rng).unwrap();
        for _ in 0..5 {
            g.shrink(&cfg, &mut rng);
            assert_eq!((g.width(), g.height()), (2, 2));
        }
    }

    #[test]
    fn dimensions_never_drop_below_two() {
        let mut rng = StdRng::seed_from_u64(5);
        let cfg = BoardConfig {
            rows: 3,
            cols: 4,
            ..BoardConfig::default()
        };
        let mut g = Grid::random(&cfg, &mut rng).unwrap();
        for i in 0..40u32 {
            if rng.random_range(0..3u32) == 0 || i % 7 == 0 {
                g.enlarge(&cfg, &mut rng);
            } else {
                g.shrink(&cfg, &mut rng);
            }
            assert!(g.width() >= MIN_SIZE && g.height() >= MIN_SIZE);
            assert_eq!(g.len(), (g.width() * g.height()) as usize);
        }
    }
}
