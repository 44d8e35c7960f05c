use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;
use unordered_pair::UnorderedPair;

use crate::domain::Domain;
use crate::location::{Dimension, Location};
use crate::shape::SquareStep;

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// A feature like a hole or wall was placed outside the bounds specified by `dims` on a builder.
    FeatureOutOfBounds,
    /// Every location was dropped, leaving nothing to play on.
    EmptyDomain,
}

impl Display for BuilderInvalidReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FeatureOutOfBounds => write!(f, "feature placed outside the board"),
            Self::EmptyDomain => write!(f, "every cell was dropped from the board"),
        }
    }
}

impl std::error::Error for BuilderInvalidReason {}

/// Functionality all domain builders must implement.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
pub trait Builder: Clone {
    /// Construct a new [`Self`] with the specified dimensions, specified in `(x, y)` order.
    fn with_dims(dims: (Dimension, Dimension)) -> Self;
    /// Drop a location from the play area, leaving a hole.
    /// Keep in mind this may leave the domain without any Hamiltonian path.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if `location` is out of bounds,
    /// or an [`EmptyDomain`](BuilderInvalidReason::EmptyDomain) invalid state if no location remains.
    /// If the builder is already in an invalid state, this function does nothing.
    fn drop_location(&mut self, location: Location) -> &mut Self;
    /// Disconnect the two `locations`, i.e. place a wall between them.
    ///
    /// A wall prevents paths from crossing it.
    /// If the two locations are not adjacent, this function does nothing and does not invalidate the builder.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if either location is out of bounds.
    /// If the builder is already in an invalid state, this function does nothing.
    fn disconnect(&mut self, locations: UnorderedPair<Location>) -> &mut Self;
    /// Shorthand for multiple calls to [`Self::disconnect`], with the same conditions.
    ///
    /// Disconnect cells neighboring `location`.
    fn disconnect_around(&mut self, location: Location, directions: Vec<SquareStep>) -> &mut Self;
    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>>;
    /// Convert the state of this builder into a [`Domain`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    fn build(&self) -> Result<Domain, &Vec<BuilderInvalidReason>>;
}

/// A builder for square-lattice domains: a rectangle, optionally with holes and walls.
#[derive(Clone)]
pub struct SquareDomainBuilder {
    // width, height
    dims: (Dimension, Dimension),
    invalid_reasons: Vec<BuilderInvalidReason>,
    // walls
    edge_blacklist: HashSet<UnorderedPair<Location>>,
    // holes
    location_blacklist: HashSet<Location>,
}

impl Default for SquareDomainBuilder {
    fn default() -> Self {
        Self::with_dims((NonZero::new(5).unwrap(), NonZero::new(5).unwrap()))
    }
}

impl Builder for SquareDomainBuilder {
    fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            invalid_reasons: Default::default(),
            edge_blacklist: Default::default(),
            location_blacklist: Default::default(),
        }
    }

    fn drop_location(&mut self, location: Location) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !self.in_bounds(location) {
            self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
            return self;
        }

        self.location_blacklist.insert(location);
        if self.location_blacklist.len() == self.area() {
            self.invalid_reasons.push(BuilderInvalidReason::EmptyDomain);
        }

        self
    }

    fn disconnect(&mut self, locations: UnorderedPair<Location>) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        for location in [locations.0, locations.1] {
            if !self.in_bounds(location) {
                self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
                return self;
            }
        }

        if SquareStep::direction_to(locations.0, locations.1).is_none() {
            return self;
        }

        self.edge_blacklist.insert(locations);

        self
    }

    fn disconnect_around(&mut self, location: Location, directions: Vec<SquareStep>) -> &mut Self {
        for direction in directions {
            self.disconnect(UnorderedPair::from((location, direction.attempt_from(location))));
        }

        self
    }

    fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    fn build(&self) -> Result<Domain, &Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        let (width, height) = (self.dims.0.get(), self.dims.1.get());
        let mask = Array2::from_shape_fn((height, width), |ind| !self.location_blacklist.contains(&Location::from(ind)));

        let mut graph = UnGraphMap::with_capacity(
            self.area() - self.location_blacklist.len(),
            // "horizontal" edges
            (width - 1) * height
                // "vertical" edges
                + (height - 1) * width,
        );

        // isolated cells still count toward the domain, so every node goes in before any edge
        for (ind, _) in mask.indexed_iter().filter(|(_, member)| **member) {
            graph.add_node(Location::from(ind));
        }

        for (ind, _) in mask.indexed_iter().filter(|(_, member)| **member) {
            let location = Location::from(ind);
            // add edges down and to the right, if possible
            for direction in SquareStep::FORWARD_VARIANTS {
                let other = direction.attempt_from(location);
                let walled = self.edge_blacklist.contains(&UnorderedPair::from((location, other)));
                if !walled && mask.get(other.as_index()).copied().unwrap_or(false) {
                    graph.add_edge(location, other, *direction);
                }
            }
        }

        Ok(Domain {
            graph,
            dims: self.dims,
            mask,
        })
    }
}

impl SquareDomainBuilder {
    #[inline]
    fn area(&self) -> usize {
        self.dims.0.get() * self.dims.1.get()
    }

    #[inline]
    fn in_bounds(&self, location: Location) -> bool {
        location.0 < self.dims.0.get() && location.1 < self.dims.1.get()
    }

    /// Keep only the locations for which `predicate` holds, dropping every other one as if by [`Builder::drop_location`].
    ///
    /// This is the general way to carve non-rectangular shapes out of the bounding rectangle.
    pub fn retain<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(Location) -> bool,
    {
        for y in 0..self.dims.1.get() {
            for x in 0..self.dims.0.get() {
                let location = Location(x, y);
                if !predicate(location) {
                    self.drop_location(location);
                }
            }
        }

        self
    }
}
