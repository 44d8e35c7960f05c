use std::fmt::{Display, Formatter};

use log::debug;
use rand::seq::IteratorRandom;
use rand::Rng;

use crate::builder::BuilderInvalidReason;
use crate::domain::Domain;
use crate::path::Path;
use crate::walk::WalkSampler;

/// Reasons a [`PathGenerator`] (or anything driving one) may fail.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GenerationFailure {
    /// The domain could not be built.
    InvalidDomain(Vec<BuilderInvalidReason>),
    /// Some cells cannot reach others, so no Hamiltonian path exists.
    Disconnected,
    /// The walk did not reach the requested shape within the configured number of batches.
    /// Either the domain admits no Hamiltonian path or the budget is too small for it.
    BudgetExhausted {
        /// Batches of backbite moves run before giving up.
        batches: usize,
    },
}

impl Display for GenerationFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDomain(reasons) => {
                write!(f, "invalid domain:")?;
                for reason in reasons {
                    write!(f, " {};", reason)?;
                }
                Ok(())
            }
            Self::Disconnected => write!(f, "domain is disconnected"),
            Self::BudgetExhausted { batches } => write!(f, "no Hamiltonian path after {} batches", batches),
        }
    }
}

impl std::error::Error for GenerationFailure {}

/// Configuration for [`PathGenerator`].
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorConfig {
    /// Multiplier on the number of backbite moves per batch.
    pub attempts_scale: f64,
    /// Maximum number of batches before reporting [`GenerationFailure::BudgetExhausted`].
    pub max_batches: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            attempts_scale: 1.0,
            max_batches: 1000,
        }
    }
}

impl GeneratorConfig {
    /// Backbite moves per batch for a domain of `cell_count` cells: `1 + q·10·N·ln²(2 + N)`.
    ///
    /// This is a conservative guess at the time needed to reach equilibrium, not a certainty.
    pub fn attempts_per_batch(&self, cell_count: usize) -> usize {
        let n = cell_count as f64;
        1 + (self.attempts_scale * 10.0 * n * (2.0 + n).ln().powi(2)) as usize
    }
}

/// Drives a [`WalkSampler`] in batches until its walk covers the whole [`Domain`].
pub struct PathGenerator<'a> {
    domain: &'a Domain,
    config: GeneratorConfig,
}

impl<'a> PathGenerator<'a> {
    pub fn new(domain: &'a Domain, config: GeneratorConfig) -> Self {
        Self { domain, config }
    }

    /// Seed a walk at a location chosen uniformly from the domain.
    fn seed_walk<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<WalkSampler<'a>, GenerationFailure> {
        self.domain.locations()
            .choose(rng)
            .and_then(|start| WalkSampler::new(self.domain, start))
            .ok_or(GenerationFailure::InvalidDomain(vec![BuilderInvalidReason::EmptyDomain]))
    }

    /// Generate a random Hamiltonian path over the domain.
    ///
    /// Batches of [`GeneratorConfig::attempts_per_batch`] backbite moves run until the walk covers every cell.
    /// The walk keeps evolving until the end of the batch in which it first becomes Hamiltonian.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Path, GenerationFailure> {
        if !self.domain.is_connected() {
            return Err(GenerationFailure::Disconnected);
        }

        let target = self.domain.cell_count();
        let per_batch = self.config.attempts_per_batch(target);
        let mut sampler = self.seed_walk(rng)?;

        for batch in 1..=self.config.max_batches {
            for _ in 0..per_batch {
                sampler.backbite(rng);
            }

            debug!("batch {}: walk covers {} of {} cells", batch, sampler.len(), target);
            if sampler.is_hamiltonian() {
                return Ok(sampler.into_path());
            }
        }

        Err(GenerationFailure::BudgetExhausted { batches: self.config.max_batches })
    }

    /// Run a single batch from a fresh seed and return whatever walk results, usually not Hamiltonian.
    pub fn sample_walk<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Path, GenerationFailure> {
        let mut sampler = self.seed_walk(rng)?;
        for _ in 0..self.config.attempts_per_batch(self.domain.cell_count()) {
            sampler.backbite(rng);
        }

        Ok(sampler.into_path())
    }

    /// Generate a Hamiltonian path whose endpoints are as close as the lattice allows:
    /// adjacent when the cell count is even (a Hamiltonian circuit missing one edge),
    /// two steps apart when it is odd.
    ///
    /// Because circuits are subsampled from paths, they are not drawn uniformly either.
    pub fn generate_circuit<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Path, GenerationFailure> {
        let path = self.generate(rng)?;
        if path.len() == 1 {
            return Ok(path);
        }

        let closed = |sampler: &WalkSampler| {
            let (start, end) = (sampler.walk()[0], sampler.walk()[sampler.len() - 1]);
            if sampler.len() % 2 == 0 {
                self.domain.connects(start, end)
            } else {
                start.manhattan_distance(&end) == 2
            }
        };

        let mut sampler = WalkSampler::from_path(self.domain, path);
        if closed(&sampler) {
            return Ok(sampler.into_path());
        }

        // stop at the first closed walk rather than the end of a batch
        let per_batch = self.config.attempts_per_batch(self.domain.cell_count());
        for batch in 1..=self.config.max_batches {
            for _ in 0..per_batch {
                sampler.backbite(rng);
                if closed(&sampler) {
                    debug!("closed a circuit of {} cells during batch {}", sampler.len(), batch);
                    return Ok(sampler.into_path());
                }
            }
        }

        Err(GenerationFailure::BudgetExhausted { batches: self.config.max_batches })
    }
}
