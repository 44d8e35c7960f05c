use itertools::Itertools;
use ndarray::Array2;
use strum::VariantArray;

use crate::location::Location;

/// The four orthogonal steps of the square lattice.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    Up,
    Down,
    Left,
    Right,
}

impl SquareStep {
    /// "Forward" directions move to a location indexed higher in row-major order.
    pub(crate) const FORWARD_VARIANTS: &'static [Self] = &[Self::Right, Self::Down];

    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    ///
    /// No bounds are checked; stepping off the top or left edge wraps to a huge coordinate.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((0, -1)),
            Self::Down => location.offset_by((0, 1)),
            Self::Left => location.offset_by((-1, 0)),
            Self::Right => location.offset_by((1, 0)),
        }
    }

    /// Determine the direction from `a` to `b`, or [`None`] if they are not orthogonally adjacent.
    pub fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }
}

/// Dump an array of display cells, one board row per line.
pub(crate) fn print(board: Array2<String>) -> String {
    let width = board.iter().map(String::len).max().unwrap_or(1);
    let mut out = String::with_capacity(board.nrows() * (board.ncols() * (width + 1) + 1));

    for row in board.rows() {
        let line = row.iter()
            .map(|cell| format!("{:>width$}", cell, width = width))
            .join(if width > 1 { " " } else { "" });
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}
