use itertools::Itertools;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::Domain;
use crate::grid::Grid;
use crate::location::Location;
use crate::path::Path;
use crate::puzzle::Puzzle;
use crate::verifier::Verifier;

/// The order in which a [`ClueMinimizer`] tries intermediate clues within a round.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ScanOrder {
    /// From the last intermediate clue back toward the start.
    #[default]
    Reverse,
    /// A fresh random order every round.
    Shuffled,
}

/// Configuration for [`ClueMinimizer`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MinimizerConfig {
    pub scan_order: ScanOrder,
    /// Passed to [`Verifier::with_node_limit`]; a removal whose check runs out is not made.
    pub node_limit: Option<usize>,
}

/// Strips clues from a fully numbered path while the puzzle keeps exactly one solution.
///
/// Rounds repeat until one removes nothing, so the result is a local minimum:
/// dropping any single remaining intermediate clue would make the puzzle ambiguous.
/// It is not a global minimum, and other scan orders can land on smaller or larger clue sets.
/// The first and last locations of the path always stay clued.
pub struct ClueMinimizer<'a> {
    domain: &'a Domain,
    verifier: Verifier<'a>,
    config: MinimizerConfig,
}

impl<'a> ClueMinimizer<'a> {
    pub fn new(domain: &'a Domain, config: MinimizerConfig) -> Self {
        let verifier = match config.node_limit {
            Some(limit) => Verifier::new(domain).with_node_limit(limit),
            None => Verifier::new(domain),
        };

        Self { domain, verifier, config }
    }

    /// Reduce the clues of `solution`, which should be a Hamiltonian path over the domain.
    ///
    /// If the fully numbered grid is itself not verifiably unique, it is returned unreduced.
    pub fn minimize<R: Rng + ?Sized>(&self, solution: &Path, rng: &mut R) -> Puzzle {
        let start = solution.start();
        let mut waypoints = solution.locations().to_vec();

        if !self.verifier.is_unique(start, &Grid::from_waypoints(self.domain, &waypoints)) {
            debug!("full numbering of a {} cell path is not verifiably unique; leaving it as is", solution.len());
            return self.puzzle(waypoints, solution);
        }

        for round in 1.. {
            let mut candidates = waypoints.iter()
                .skip(1)
                .take(waypoints.len().saturating_sub(2))
                .copied()
                .collect_vec();
            match self.config.scan_order {
                ScanOrder::Reverse => candidates.reverse(),
                ScanOrder::Shuffled => candidates.shuffle(rng),
            }

            let mut removed = 0;
            for candidate in candidates {
                let Some(index) = waypoints.iter().position(|waypoint| *waypoint == candidate) else {
                    continue;
                };

                let mut shorter = waypoints.clone();
                shorter.remove(index);
                if self.verifier.is_unique(start, &Grid::from_waypoints(self.domain, &shorter)) {
                    waypoints = shorter;
                    removed += 1;
                }
            }

            debug!("round {}: removed {} clues, {} remain", round, removed, waypoints.len());
            if removed == 0 {
                break;
            }
        }

        self.puzzle(waypoints, solution)
    }

    fn puzzle(&self, waypoints: Vec<Location>, solution: &Path) -> Puzzle {
        Puzzle {
            grid: Grid::from_waypoints(self.domain, &waypoints),
            solution: solution.clone(),
            waypoints,
            mask: self.domain.mask.clone(),
        }
    }
}
