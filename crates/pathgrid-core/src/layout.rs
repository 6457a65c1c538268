//! Saved board layouts.
//!
//! ## Text format
//!
//! ```text
//! rows,cols,panelX,panelY,panelWidth,panelHeight
//! c,c,c,...        (cols terrain codes)
//! ...              (rows lines)
//! ```
//!
//! Terrain codes are the [`Terrain`] discriminants (0 open, 1 blocked,
//! 2 source, 3 target, 4 path trail, 5 preview). The panel fields describe
//! where a host drew the board; they are carried through untouched.

use std::fmt;
use std::io::{self, BufRead, Read, Write};
use std::str::FromStr;

use crate::error::{GridError, LayoutError};
use crate::grid::{Grid, MIN_SIZE};
use crate::terrain::Terrain;

/// Pixel rectangle of the host panel a board is drawn in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Panel {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            x: 2,
            y: 102,
            width: 800,
            height: 800,
        }
    }
}

/// A board together with its panel placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub grid: Grid,
    pub panel: Panel,
}

impl Layout {
    pub fn new(grid: Grid, panel: Panel) -> Self {
        Self { grid, panel }
    }

    /// Parse a layout. Blank lines are ignored.
    pub fn parse(s: &str) -> Result<Self, LayoutError> {
        let mut lines = s
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        let (header_line, header) = lines.next().ok_or(LayoutError::Empty)?;
        let fields = parse_ints(header_line, header)?;
        let [rows, cols, x, y, width, height] = fields[..] else {
            return Err(LayoutError::Header(fields.len()));
        };
        let (rows, cols) = (to_i32(header_line, rows)?, to_i32(header_line, cols)?);
        if rows < MIN_SIZE || cols < MIN_SIZE {
            return Err(GridError::TooSmall {
                width: cols,
                height: rows,
            }
            .into());
        }
        let panel = Panel {
            x: to_i32(header_line, x)?,
            y: to_i32(header_line, y)?,
            width: to_i32(header_line, width)?,
            height: to_i32(header_line, height)?,
        };

        // Grown row by row: the header alone says nothing about how much
        // input actually follows.
        let (rows_n, cols_n) = (rows as usize, cols as usize);
        let mut terrain = Vec::new();
        let mut seen_rows = 0;
        for (line, text) in lines {
            seen_rows += 1;
            if seen_rows > rows_n {
                continue;
            }
            let codes = parse_ints(line, text)?;
            if codes.len() != cols_n {
                return Err(LayoutError::ColumnCount {
                    line,
                    expected: cols_n,
                    actual: codes.len(),
                });
            }
            for code in codes {
                let t = Terrain::from_code(code)
                    .ok_or(LayoutError::UnknownTerrain { line, code })?;
                terrain.push(t);
            }
        }
        if seen_rows != rows_n {
            return Err(LayoutError::RowCount {
                expected: rows_n,
                actual: seen_rows,
            });
        }

        let grid = Grid::from_terrain(cols, rows, &terrain)?;
        Ok(Self { grid, panel })
    }

    /// Read a whole layout from `reader`.
    pub fn read_from<R: BufRead>(mut reader: R) -> Result<Self, LayoutError> {
        let mut s = String::new();
        reader.read_to_string(&mut s)?;
        Self::parse(&s)
    }

    /// Write the layout to `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "{self}")
    }
}

impl FromStr for Layout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.panel;
        writeln!(
            f,
            "{},{},{},{},{},{}",
            self.grid.height(),
            self.grid.width(),
            p.x,
            p.y,
            p.width,
            p.height
        )?;
        for row in self.grid.rows() {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{}", cell.terrain)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Grid {
    /// Replace this board with the one stored in `s`.
    ///
    /// On failure the board is left exactly as it was.
    pub fn load_layout(&mut self, s: &str) -> Result<Panel, LayoutError> {
        match Layout::parse(s) {
            Ok(layout) => {
                log::debug!(
                    "loaded {}x{} layout, source {} target {}",
                    layout.grid.width(),
                    layout.grid.height(),
                    layout.grid.source(),
                    layout.grid.target()
                );
                *self = layout.grid;
                Ok(layout.panel)
            }
            Err(e) => {
                log::warn!("rejected board layout: {e}");
                Err(e)
            }
        }
    }
}

fn parse_ints(line: usize, text: &str) -> Result<Vec<i64>, LayoutError> {
    text.split(',')
        .map(str::trim)
        .map(|v| {
            v.parse::<i64>().map_err(|_| LayoutError::NotAnInteger {
                line,
                value: v.to_string(),
            })
        })
        .collect()
}

fn to_i32(line: usize, v: i64) -> Result<i32, LayoutError> {
    i32::try_from(v).map_err(|_| LayoutError::NotAnInteger {
        line,
        value: v.to_string(),
    })
}
