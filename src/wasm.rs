//! Bindings for a browser front end. Everything crosses the boundary as flat numeric arrays.

use std::num::NonZero;

use wasm_bindgen::prelude::*;

use crate::builder::{Builder, SquareDomainBuilder};
use crate::puzzle::{Puzzle, PuzzleConfig, PuzzleGenerator};

/// A generated puzzle, flattened for JavaScript.
#[wasm_bindgen]
pub struct WasmPuzzle {
    width: usize,
    height: usize,
    grid: Vec<u32>,
    solution: Vec<u32>,
}

#[wasm_bindgen]
impl WasmPuzzle {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Clues in row-major order, 0 for blank cells.
    pub fn grid(&self) -> Vec<u32> {
        self.grid.clone()
    }

    /// The solving path as `x0, y0, x1, y1, ...`.
    pub fn solution(&self) -> Vec<u32> {
        self.solution.clone()
    }
}

impl From<&Puzzle> for WasmPuzzle {
    fn from(puzzle: &Puzzle) -> Self {
        let (height, width) = puzzle.grid().cells().dim();

        Self {
            width,
            height,
            grid: puzzle.grid().cells().iter().map(|clue| *clue as u32).collect(),
            solution: puzzle.solution()
                .iter()
                .flat_map(|location| [location.0 as u32, location.1 as u32])
                .collect(),
        }
    }
}

/// Generate a puzzle on a full `width` by `height` rectangle, reproducibly if `seed` is given.
#[wasm_bindgen(js_name = generatePuzzle)]
pub fn generate_puzzle(width: usize, height: usize, seed: Option<u64>) -> Result<WasmPuzzle, String> {
    let (Some(width), Some(height)) = (NonZero::new(width), NonZero::new(height)) else {
        return Err("board dimensions must be positive".to_string());
    };

    let builder = SquareDomainBuilder::with_dims((width, height));
    let mut generator = PuzzleGenerator::from_builder(&builder, PuzzleConfig::default(), seed)
        .map_err(|failure| failure.to_string())?;
    let puzzle = generator.generate().map_err(|failure| failure.to_string())?;

    Ok(WasmPuzzle::from(&puzzle))
}
