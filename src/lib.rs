//! Fill a crossword grid with words from a vocabulary by treating it as a constraint
//! satisfaction problem: every slot is a variable, its domain is the set of words that could
//! still go there, and crossing slots must agree on their shared letter. Domains are pruned with
//! node consistency and AC-3 before a heuristic backtracking search looks for a fill.

use log::info;

pub mod arc_consistency;
pub mod domains;
pub mod grid;
pub mod puzzle;
pub mod render;
pub mod search;
pub mod slot;
pub mod vocabulary;

pub use domains::Domains;
pub use grid::{Grid, LoadError};
pub use puzzle::Puzzle;
pub use render::{letter_grid, render_grid, save_grid};
pub use search::{Assignment, Choice, FillFailure, FillSuccess, Solver, SolverOptions, Statistics};
pub use slot::Slot;
pub use vocabulary::{Vocabulary, Word};

/// The expected maximum length for a single slot.
pub const MAX_SLOT_LENGTH: usize = 21;

/// An identifier for a given slot, based on its index in the Puzzle's `slots` field.
pub type SlotId = usize;

/// An identifier for a given word, based on its index in the Vocabulary's `words` field.
pub type WordId = usize;

/// Zero-indexed (row, column) coords for a cell in the grid, where row = 0 is the top row.
pub type GridCoord = (usize, usize);

/// Direction that a slot is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Across,
    Down,
}

/// Build the puzzle for a grid, seed its domains from the vocabulary and search for a fill.
pub fn solve(
    grid: &Grid,
    vocabulary: &Vocabulary,
    options: SolverOptions,
) -> Result<FillSuccess, FillFailure> {
    let puzzle = Puzzle::new(grid.slots());
    info!(
        "Solving {}x{} grid with {} slots",
        grid.width(),
        grid.height(),
        puzzle.slot_count()
    );

    Solver::new(&puzzle, vocabulary, options).solve()
}
