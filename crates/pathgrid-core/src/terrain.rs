//! The [`Terrain`] class of a board cell.

use std::fmt;

/// What occupies a cell.
///
/// The discriminants are the integer codes used by the board layout format.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Terrain {
    #[default]
    Open = 0,
    Blocked = 1,
    Source = 2,
    Target = 3,
    /// Final path painted after a successful search.
    PathTrail = 4,
    /// Best-known path painted while a visualized search is running.
    FrontierPreview = 5,
}

impl Terrain {
    /// All terrain classes, in code order.
    pub const ALL: [Terrain; 6] = [
        Self::Open,
        Self::Blocked,
        Self::Source,
        Self::Target,
        Self::PathTrail,
        Self::FrontierPreview,
    ];

    /// Integer code of this class.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Terrain class for an integer code, if there is one.
    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| i64::from(t.code()) == code)
    }

    /// Whether search may step onto this cell.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Blocked)
    }

    /// Markers painted by a search run, cleared on reset.
    #[inline]
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::PathTrail | Self::FrontierPreview)
    }

    /// Single-character glyph used by text renderings of a board.
    pub const fn glyph(self) -> char {
        match self {
            Self::Open => '.',
            Self::Blocked => '#',
            Self::Source => 'S',
            Self::Target => 'T',
            Self::PathTrail => '*',
            Self::FrontierPreview => '+',
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
