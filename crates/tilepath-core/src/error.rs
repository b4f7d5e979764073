//! Errors raised by [`Grid`](crate::Grid) construction and queries.

use std::fmt;

use crate::Grid;
use crate::geom::Coord;

/// Errors that can occur when building or querying a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A query or mutation addressed a cell outside `[0, width) × [0, height)`.
    OutOfBounds { pos: Coord, width: i32, height: i32 },
    /// A dimension was not in `1..=Grid::MAX_SIDE`.
    InvalidSize { width: i32, height: i32 },
    /// An ASCII map contained a character other than `.` or `#`.
    InvalidTile { ch: char, pos: Coord },
    /// An ASCII map had rows of different widths.
    InconsistentWidth { row: i32, expected: i32, found: i32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos, width, height } => {
                write!(f, "coordinate {pos} is outside the {width}x{height} grid")
            }
            Self::InvalidSize { width, height } => {
                write!(
                    f,
                    "invalid grid size {width}x{height}: both sides must be in 1..={}",
                    Grid::MAX_SIDE
                )
            }
            Self::InvalidTile { ch, pos } => {
                write!(f, "invalid tile \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::InconsistentWidth {
                row,
                expected,
                found,
            } => write!(f, "row {row} is {found} wide, expected {expected}"),
        }
    }
}

impl std::error::Error for GridError {}
