use rand::Rng;
use strum::VariantArray;

use crate::domain::Domain;
use crate::location::Location;
use crate::path::Path;
use crate::shape::SquareStep;

/// What a single [`WalkSampler::backbite`] transition did to the walk.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Backbite {
    /// The proposed step left the domain or crossed a wall; the walk is unchanged.
    Rejected,
    /// The proposed step hit the walk itself and the loop it closed was reversed.
    /// Length and the set of visited locations are unchanged.
    Reversed,
    /// The proposed step reached a fresh location, which is now an endpoint.
    Extended,
}

/// A self-avoiding walk on a [`Domain`], evolved by the backbiting Markov chain of
/// Oberdorf, Ferguson, Jacobsen and Kondev (Phys. Rev. E 74, 051801).
///
/// Repeated transitions grow the walk until it cannot grow any further, at which point it is a Hamiltonian path,
/// and keep reshaping it afterward.
/// The chain is believed to be ergodic but this has not been proven, and its stationary distribution is not uniform.
pub struct WalkSampler<'a> {
    domain: &'a Domain,
    walk: Vec<Location>,
}

impl<'a> WalkSampler<'a> {
    /// Start a walk consisting of `start` alone. Returns [`None`] if `start` is not in `domain`.
    pub fn new(domain: &'a Domain, start: Location) -> Option<Self> {
        domain.contains(start).then(|| Self { domain, walk: vec![start] })
    }

    /// Resume the chain from an existing walk.
    pub fn from_path(domain: &'a Domain, path: Path) -> Self {
        Self { domain, walk: path.locations().to_vec() }
    }

    pub fn len(&self) -> usize {
        self.walk.len()
    }

    /// Whether the walk covers the whole domain.
    pub fn is_hamiltonian(&self) -> bool {
        self.walk.len() == self.domain.cell_count()
    }

    pub fn walk(&self) -> &[Location] {
        &self.walk
    }

    pub fn path(&self) -> Path {
        Path::from_walk(self.walk.clone())
    }

    pub fn into_path(self) -> Path {
        Path::from_walk(self.walk)
    }

    /// Perform one transition: propose a step in a random direction from a random end of the walk.
    pub fn backbite<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Backbite {
        let direction = SquareStep::VARIANTS[rng.random_range(0..SquareStep::VARIANTS.len())];
        if rng.random_bool(0.5) {
            self.backbite_left(direction)
        } else {
            self.backbite_right(direction)
        }
    }

    pub(crate) fn backbite_left(&mut self, direction: SquareStep) -> Backbite {
        let Some(neighbour) = self.domain.step(self.walk[0], direction) else {
            return Backbite::Rejected;
        };

        // the neighbour has the opposite colour to walk[0], so it can only sit at an odd index
        match (1..self.walk.len()).step_by(2).find(|j| self.walk[*j] == neighbour) {
            Some(j) => {
                self.walk[..j].reverse();
                Backbite::Reversed
            }
            None => {
                self.walk.reverse();
                self.walk.push(neighbour);
                Backbite::Extended
            }
        }
    }

    pub(crate) fn backbite_right(&mut self, direction: SquareStep) -> Backbite {
        let n = self.walk.len();
        let Some(neighbour) = self.domain.step(self.walk[n - 1], direction) else {
            return Backbite::Rejected;
        };

        // likewise, only n - 2, n - 4, ... can hold the neighbour
        match (0..n - 1).rev().step_by(2).find(|j| self.walk[*j] == neighbour) {
            Some(j) => {
                self.walk[j + 1..].reverse();
                Backbite::Reversed
            }
            None => {
                self.walk.push(neighbour);
                Backbite::Extended
            }
        }
    }
}
