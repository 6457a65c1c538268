//! Board configuration.

use crate::layout::Panel;

/// Settings for generating and resizing boards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BoardConfig {
    /// Number of rows of a freshly generated board.
    pub rows: i32,
    /// Number of columns of a freshly generated board.
    pub cols: i32,
    /// A generated cell stays a wall unless a roll in `1..100` reaches this
    /// value.
    pub wall_pct: u32,
    /// How many rows and columns enlarge/shrink add or remove.
    pub resize_step: i32,
    /// Host panel the board is drawn in; only carried through layouts.
    pub panel: Panel,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: 32,
            cols: 32,
            wall_pct: 50,
            resize_step: 2,
            panel: Panel::default(),
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn partial_config_uses_defaults() {
        let cfg: BoardConfig = serde_json::from_str(r#"{"rows": 8, "cols": 12}"#).unwrap();
        assert_eq!(cfg.rows, 8);
        assert_eq!(cfg.cols, 12);
        assert_eq!(cfg.wall_pct, 50);
        assert_eq!(cfg.resize_step, 2);
    }
}
