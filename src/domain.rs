use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Dfs;
use strum::VariantArray;

use crate::location::{Dimension, Location};
use crate::shape::{self, SquareStep};

/// The play area: the cells of a rectangular lattice which remain after holes are dropped,
/// connected orthogonally except where walls separate them.
///
/// [`Domain`]s should be built using a [`Builder`](crate::builder::Builder) such as [`SquareDomainBuilder`](crate::builder::SquareDomainBuilder).
/// A built domain is immutable and is the only authority on membership and adjacency;
/// every sampler, search and minimizer asks it rather than looking at coordinates directly.
#[derive(Clone, Debug)]
pub struct Domain {
    // edge weights are the forward direction from the lower indexed endpoint
    pub(crate) graph: UnGraphMap<Location, SquareStep>,
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) mask: Array2<bool>,
}

impl Domain {
    /// Whether `location` is part of the play area.
    pub fn contains(&self, location: Location) -> bool {
        self.mask.get(location.as_index()).copied().unwrap_or(false)
    }

    /// Step from `location` in `direction`, returning the destination only if it is in the domain and no wall is crossed.
    pub fn step(&self, location: Location, direction: SquareStep) -> Option<Location> {
        let destination = direction.attempt_from(location);
        self.graph.contains_edge(location, destination).then_some(destination)
    }

    /// All locations reachable from `location` in one step, in [`SquareStep`] order.
    pub fn neighbors(&self, location: Location) -> Vec<Location> {
        SquareStep::VARIANTS.iter()
            .filter_map(|direction| self.step(location, *direction))
            .collect_vec()
    }

    /// Whether `a` and `b` are joined by a single step within the domain.
    pub fn connects(&self, a: Location, b: Location) -> bool {
        self.graph.contains_edge(a, b)
    }

    /// The number of cells in the play area, i.e. the length of any Hamiltonian path.
    pub fn cell_count(&self) -> usize {
        self.graph.node_count()
    }

    /// The `(width, height)` of the bounding rectangle.
    pub fn dims(&self) -> (usize, usize) {
        (self.dims.0.get(), self.dims.1.get())
    }

    /// The shape of any [`Grid`](crate::grid::Grid) over this domain, in `(rows, columns)` order.
    pub(crate) fn shape(&self) -> (usize, usize) {
        (self.dims.1.get(), self.dims.0.get())
    }

    /// Every location in the play area, in row-major order.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.mask.indexed_iter()
            .filter(|(_, member)| **member)
            .map(|(ind, _)| Location::from(ind))
    }

    /// Whether every cell can reach every other cell; a disconnected domain has no Hamiltonian path.
    pub fn is_connected(&self) -> bool {
        let Some(first) = self.locations().next() else {
            return false;
        };

        let mut dfs = Dfs::new(&self.graph, first);
        let mut reached = 0;
        while dfs.next(&self.graph).is_some() {
            reached += 1;
        }

        reached == self.cell_count()
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", shape::print(self.mask.map(|member| if *member { ".".to_string() } else { " ".to_string() })))
    }
}
