use log::trace;
use ndarray::Array2;
use strum::VariantArray;

use crate::domain::Domain;
use crate::grid::Grid;
use crate::location::Location;
use crate::path::Path;
use crate::shape::SquareStep;

/// The verdict of a [`Verifier`] on a numbered grid.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Uniqueness {
    /// No path from the start satisfies the clues.
    Unsolvable,
    /// Exactly one path does.
    Unique,
    /// At least two paths do.
    Ambiguous,
    /// The node limit ran out before a second solution was found or the search finished.
    Undecided,
}

impl Uniqueness {
    /// Whether the grid is a valid puzzle. [`Undecided`](Self::Undecided) counts as not unique.
    pub fn is_unique(&self) -> bool {
        *self == Self::Unique
    }
}

// One entry per location on the candidate path.
struct Frame {
    location: Location,
    // value of the most recent clue on the path so far
    clue: usize,
    // index into SquareStep::VARIANTS of the next direction to try
    next_direction: usize,
}

#[derive(Default)]
struct Search {
    solutions: usize,
    first: Option<Vec<Location>>,
    exhausted: bool,
}

/// Exhaustive depth-first search for Hamiltonian paths through a [`Grid`]'s clues.
///
/// A candidate path starts at the given location and may step into a blank cell at any time,
/// but into a clued cell only when its clue is one more than the last clue visited.
/// It is a solution once it covers every cell of the [`Domain`].
///
/// The search keeps its own stack of frames, so its depth is bounded only by memory,
/// and stops as soon as it has seen as many solutions as the caller cares about.
/// The worst case is still exponential in the number of cells; [`Self::with_node_limit`] bounds it.
#[derive(Clone, Copy)]
pub struct Verifier<'a> {
    domain: &'a Domain,
    node_limit: Option<usize>,
}

impl<'a> Verifier<'a> {
    pub fn new(domain: &'a Domain) -> Self {
        Self { domain, node_limit: None }
    }

    /// Give up after extending candidate paths `limit` times in a single search.
    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Decide whether exactly one solution starts at `start`.
    pub fn verify(&self, start: Location, grid: &Grid) -> Uniqueness {
        let search = self.search(start, grid, 2, false);
        let verdict = match (search.solutions, search.exhausted) {
            (0, false) => Uniqueness::Unsolvable,
            (1, false) => Uniqueness::Unique,
            (0 | 1, true) => Uniqueness::Undecided,
            _ => Uniqueness::Ambiguous,
        };

        trace!("{} clues from {:?}: {:?}", grid.clue_count(), start, verdict);
        verdict
    }

    /// Shorthand for [`Self::verify`] followed by [`Uniqueness::is_unique`].
    pub fn is_unique(&self, start: Location, grid: &Grid) -> bool {
        self.verify(start, grid).is_unique()
    }

    /// Count solutions starting at `start`, stopping once `limit` have been found.
    ///
    /// Returns [`None`] if the node limit ran out first.
    pub fn count_solutions(&self, start: Location, grid: &Grid, limit: usize) -> Option<usize> {
        let search = self.search(start, grid, limit, false);
        (!search.exhausted || search.solutions >= limit).then_some(search.solutions)
    }

    /// The first solution found, if any.
    pub fn solve(&self, start: Location, grid: &Grid) -> Option<Path> {
        self.search(start, grid, 1, true).first.map(Path::from_walk)
    }

    fn search(&self, start: Location, grid: &Grid, limit: usize, keep_first: bool) -> Search {
        let mut search = Search::default();
        if limit == 0 || grid.shape() != self.domain.shape() || !self.domain.contains(start) {
            return search;
        }

        let start_clue = grid.clue(start);
        if start_clue > 1 {
            return search;
        }

        let target = self.domain.cell_count();
        if target == 1 {
            search.solutions = 1;
            search.first = keep_first.then(|| vec![start]);
            return search;
        }

        let mut visited = Array2::from_elem(self.domain.shape(), false);
        visited[start.as_index()] = true;
        let mut stack = Vec::with_capacity(target);
        stack.push(Frame { location: start, clue: start_clue, next_direction: 0 });
        let mut nodes = 0;

        while let Some(frame) = stack.last_mut() {
            let Some(direction) = SquareStep::VARIANTS.get(frame.next_direction) else {
                // every direction from here is spent; backtrack
                visited[frame.location.as_index()] = false;
                stack.pop();
                continue;
            };
            frame.next_direction += 1;

            let Some(next) = self.domain.step(frame.location, *direction) else {
                continue;
            };
            if visited[next.as_index()] {
                continue;
            }
            let clue = match grid.clue(next) {
                0 => frame.clue,
                clue if clue == frame.clue + 1 => clue,
                _ => continue,
            };

            nodes += 1;
            if self.node_limit.is_some_and(|node_limit| nodes > node_limit) {
                search.exhausted = true;
                break;
            }

            if stack.len() + 1 == target {
                search.solutions += 1;
                if keep_first && search.first.is_none() {
                    let mut solution: Vec<Location> = stack.iter().map(|frame| frame.location).collect();
                    solution.push(next);
                    search.first = Some(solution);
                }
                if search.solutions >= limit {
                    break;
                }
                continue;
            }

            visited[next.as_index()] = true;
            stack.push(Frame { location: next, clue, next_direction: 0 });
        }

        search
    }
}
