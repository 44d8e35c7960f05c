use std::num::NonZero;

use ndarray::Ix;

pub(crate) type Coord = usize;
/// A board dimension; boards are never zero cells wide or tall.
pub type Dimension = NonZero<Coord>;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A location `(x, y)` on a board. The top left corner is `Location(0, 0)`.
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// The `(row, column)` index of this location in an [`ndarray::Array2`].
    pub fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        // wrapping keeps steps off the top or left edge far out of bounds rather than panicking
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// Taxicab distance between two locations.
    pub fn manhattan_distance(&self, other: &Location) -> usize {
        self.0.abs_diff(other.0) + self.1.abs_diff(other.1)
    }

    /// Whether `other` is one orthogonal step away.
    pub fn is_adjacent(&self, other: &Location) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}
