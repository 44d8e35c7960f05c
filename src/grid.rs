use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;

use crate::domain::Domain;
use crate::location::Location;
use crate::shape;

/// A numbered board, the same shape as its [`Domain`]'s bounding rectangle.
///
/// `0` marks a blank cell. A positive `k` is a clue: the solving path must pass through clue `k`
/// after clue `k - 1` and before clue `k + 1`. When every cell is clued, `k` is simply the step number.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Grid {
    pub(crate) cells: Array2<usize>,
}

impl Grid {
    /// A grid over `domain` with no clues at all.
    pub fn empty(domain: &Domain) -> Self {
        Self { cells: Array2::zeros(domain.shape()) }
    }

    /// Number `waypoints` in order from 1, leaving every other cell blank.
    ///
    /// Locations outside the bounding rectangle are skipped.
    pub fn from_waypoints(domain: &Domain, waypoints: &[Location]) -> Self {
        let mut grid = Self::empty(domain);
        for (index, location) in waypoints.iter().enumerate() {
            if let Some(cell) = grid.cells.get_mut(location.as_index()) {
                *cell = index + 1;
            }
        }

        grid
    }

    /// The clue at `location`, or `0` if it is blank or out of bounds.
    pub fn clue(&self, location: Location) -> usize {
        self.cells.get(location.as_index()).copied().unwrap_or(0)
    }

    /// Number of clued cells.
    pub fn clue_count(&self) -> usize {
        self.cells.iter().filter(|clue| **clue != 0).count()
    }

    /// Clued locations, ordered by clue.
    pub fn waypoints(&self) -> Vec<Location> {
        self.cells.indexed_iter()
            .filter(|(_, clue)| **clue != 0)
            .sorted_by_key(|(_, clue)| **clue)
            .map(|(ind, _)| Location::from(ind))
            .collect_vec()
    }

    /// The underlying array, indexed `(row, column)`.
    pub fn cells(&self) -> &Array2<usize> {
        &self.cells
    }

    pub(crate) fn shape(&self) -> (usize, usize) {
        self.cells.dim()
    }
}

impl From<Array2<usize>> for Grid {
    fn from(cells: Array2<usize>) -> Self {
        Self { cells }
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", shape::print(self.cells.map(|clue| match clue {
            0 => ".".to_string(),
            clue => clue.to_string(),
        })))
    }
}
