use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::domain::Domain;
use crate::grid::Grid;
use crate::location::Location;

/// Reasons a sequence of locations is not a self-avoiding walk.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PathError {
    /// A path must visit at least one location.
    Empty,
    /// The location is visited more than once.
    Revisited(Location),
    /// Two consecutive locations are not one orthogonal step apart.
    Gap(Location, Location),
}

impl Display for PathError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "path is empty"),
            Self::Revisited(location) => write!(f, "path visits {:?} more than once", location),
            Self::Gap(a, b) => write!(f, "path jumps from {:?} to {:?}", a, b),
        }
    }
}

impl std::error::Error for PathError {}

/// A non-empty self-avoiding walk on the square lattice, in visiting order.
///
/// Construction from a [`Vec`] checks self-avoidance and adjacency but not membership in any particular [`Domain`];
/// use [`Path::is_hamiltonian`] for that.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Path {
    steps: Vec<Location>,
}

impl Path {
    /// Wrap a walk already known to be valid.
    pub(crate) fn from_walk(steps: Vec<Location>) -> Self {
        debug_assert!(!steps.is_empty());
        Self { steps }
    }

    /// The first location; puzzles always begin here.
    pub fn start(&self) -> Location {
        self.steps[0]
    }

    pub fn end(&self) -> Location {
        self.steps[self.steps.len() - 1]
    }

    /// Number of locations visited.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn locations(&self) -> &[Location] {
        &self.steps
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.steps.iter()
    }

    /// Whether this path visits every cell of `domain` exactly once using only steps the domain allows.
    pub fn is_hamiltonian(&self, domain: &Domain) -> bool {
        self.len() == domain.cell_count()
            && self.steps.iter().all(|location| domain.contains(*location))
            && self.steps.iter().tuple_windows().all(|(a, b)| domain.connects(*a, *b))
    }

    /// Number every location of this path by its position, starting from 1.
    pub fn to_grid(&self, domain: &Domain) -> Grid {
        Grid::from_waypoints(domain, &self.steps)
    }
}

impl TryFrom<Vec<Location>> for Path {
    type Error = PathError;

    fn try_from(steps: Vec<Location>) -> Result<Self, Self::Error> {
        if steps.is_empty() {
            return Err(PathError::Empty);
        }

        if let Some((a, b)) = steps.iter().tuple_windows().find(|(a, b)| !a.is_adjacent(b)) {
            return Err(PathError::Gap(*a, *b));
        }

        if let Some(location) = steps.iter().duplicates().next() {
            return Err(PathError::Revisited(*location));
        }

        Ok(Self { steps })
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Location;
    type IntoIter = std::slice::Iter<'a, Location>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
