#![warn(missing_docs)]

//! # `zipline`
//!
//! A generator for numbered-path puzzles on the square lattice, in the style of LinkedIn's *Zip*:
//! draw one path through every cell of the board, passing the numbered cells in order.
//!
//! Begin by describing the play area with a builder such as [`SquareDomainBuilder`](builder::SquareDomainBuilder),
//! which can drop cells to make holes or irregular outlines and place walls between neighbouring cells.
//! Hand the resulting [`Domain`] to a [`PuzzleGenerator`] and call [`generate()`](PuzzleGenerator::generate)
//! to receive a [`Puzzle`]: a [`Grid`] of clues together with the [`Path`] that solves it.
//!
//! # Internals
//! Generation runs in two stages.
//!
//! First, a random Hamiltonian path is drawn by the backbiting Markov chain
//! (Oberdorf, Ferguson, Jacobsen and Kondev, *Secondary structures in long compact polymers*, Phys. Rev. E 74, 051801, 2006).
//! A [`WalkSampler`](walk::WalkSampler) starts from a single cell and repeatedly proposes a step from a random end of its walk:
//! into a fresh cell it grows the walk, into the walk itself it reverses the loop so formed,
//! and off the board it does nothing.
//! The walk grows until it covers the board. The chain is believed to be ergodic, but this has not been proven,
//! and it does not sample paths uniformly.
//!
//! Second, the path is fully numbered, which trivially has one solution, and a [`ClueMinimizer`](minimizer::ClueMinimizer)
//! removes numbers one at a time as long as a [`Verifier`](verifier::Verifier), an exhaustive backtracking search,
//! still finds exactly one path consistent with the remaining numbers.
//!
//! Both stages are bounded: the sampler by a batch budget, the verifier optionally by a node budget.

pub use domain::Domain;
pub use grid::Grid;
pub use location::{Dimension, Location};
pub use path::{Path, PathError};
pub use puzzle::{Puzzle, PuzzleConfig, PuzzleGenerator};

mod tests;
pub mod builder;
pub(crate) mod domain;
pub mod generator;
pub(crate) mod grid;
pub(crate) mod location;
pub mod minimizer;
pub(crate) mod path;
pub(crate) mod puzzle;
pub mod shape;
pub mod verifier;
pub mod walk;
#[cfg(feature = "wasm")]
pub mod wasm;
