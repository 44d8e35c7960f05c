use std::fmt::{Display, Formatter};

use ndarray::{Array2, Zip};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::builder::Builder;
use crate::domain::Domain;
use crate::generator::{GenerationFailure, GeneratorConfig, PathGenerator};
use crate::grid::Grid;
use crate::location::Location;
use crate::minimizer::{ClueMinimizer, MinimizerConfig};
use crate::path::Path;
use crate::shape;

/// A finished puzzle: the clues to play with and the path that solves them.
///
/// This is an immutable snapshot; nothing in it refers back to the generator that made it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Puzzle {
    pub(crate) grid: Grid,
    pub(crate) solution: Path,
    pub(crate) waypoints: Vec<Location>,
    pub(crate) mask: Array2<bool>,
}

impl Puzzle {
    /// The clues, 0 for blank cells.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The unique solution, for revealing the answer.
    pub fn solution(&self) -> &Path {
        &self.solution
    }

    /// Where the solving path begins; always clue 1.
    pub fn start(&self) -> Location {
        self.solution.start()
    }

    /// Clued locations in clue order.
    pub fn waypoints(&self) -> &[Location] {
        &self.waypoints
    }

    pub fn clue_count(&self) -> usize {
        self.waypoints.len()
    }
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let cells = Zip::from(&self.grid.cells).and(&self.mask).map_collect(|clue, member| match (*clue, *member) {
            (_, false) => " ".to_string(),
            (0, true) => ".".to_string(),
            (clue, true) => clue.to_string(),
        });

        write!(f, "{}", shape::print(cells))
    }
}

/// Configuration for [`PuzzleGenerator`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PuzzleConfig {
    pub generator: GeneratorConfig,
    pub minimizer: MinimizerConfig,
}

/// Produces fresh puzzles over one [`Domain`]: a random Hamiltonian path, then as few clues as keep it unique.
///
/// All randomness comes from one [`ChaCha20Rng`], so a seeded generator yields the same sequence of puzzles every run.
pub struct PuzzleGenerator {
    domain: Domain,
    config: PuzzleConfig,
    rng: ChaCha20Rng,
}

impl PuzzleGenerator {
    /// A generator seeded from the thread-local entropy source.
    pub fn new(domain: Domain, config: PuzzleConfig) -> Self {
        Self {
            domain,
            config,
            rng: ChaCha20Rng::from_rng(&mut rand::rng()),
        }
    }

    /// A reproducible generator.
    pub fn with_seed(domain: Domain, config: PuzzleConfig, seed: u64) -> Self {
        Self {
            domain,
            config,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Build the domain from `builder`, failing with [`GenerationFailure::InvalidDomain`] if it is invalid.
    pub fn from_builder<B: Builder>(builder: &B, config: PuzzleConfig, seed: Option<u64>) -> Result<Self, GenerationFailure> {
        let domain = builder.build().map_err(|reasons| GenerationFailure::InvalidDomain(reasons.clone()))?;

        Ok(match seed {
            Some(seed) => Self::with_seed(domain, config, seed),
            None => Self::new(domain, config),
        })
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Generate a new puzzle. Each call is independent of the puzzles before it except through the random state.
    pub fn generate(&mut self) -> Result<Puzzle, GenerationFailure> {
        let solution = PathGenerator::new(&self.domain, self.config.generator.clone()).generate(&mut self.rng)?;
        let puzzle = ClueMinimizer::new(&self.domain, self.config.minimizer.clone()).minimize(&solution, &mut self.rng);

        Ok(puzzle)
    }
}
