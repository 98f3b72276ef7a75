use std::fmt::{Display, Formatter};

use smallvec::SmallVec;

use crate::{Direction, GridCoord, MAX_SLOT_LENGTH};

/// A run of cells in the grid that needs to hold a single word. Slots are plain values: two slots
/// are the same slot iff they start in the same cell, face the same way and have the same length.
///
/// The derived ordering (row, then column, then direction, then length) is the fixed order in
/// which a `Puzzle` stores its slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Slot {
    pub fn new(row: usize, col: usize, direction: Direction, length: usize) -> Slot {
        Slot { row, col, direction, length }
    }

    /// The coords of the cell at `idx` within this slot.
    pub fn cell(&self, idx: usize) -> GridCoord {
        match self.direction {
            Direction::Across => (self.row, self.col + idx),
            Direction::Down => (self.row + idx, self.col),
        }
    }

    /// Generate the coords for each cell of this slot.
    pub fn cells(&self) -> SmallVec<[GridCoord; MAX_SLOT_LENGTH]> {
        (0..self.length).map(|idx| self.cell(idx)).collect()
    }

    /// If this slot and `other` share a cell, return `(i, j)` such that the `i`th letter of this
    /// slot's word and the `j`th letter of `other`'s word land in that cell. A slot never overlaps
    /// itself.
    ///
    /// Slots from a well-formed grid share at most one cell; if they share more, the first shared
    /// cell (in this slot's order) is reported.
    pub fn overlap(&self, other: &Slot) -> Option<(usize, usize)> {
        if self == other {
            return None;
        }

        let other_cells = other.cells();
        self.cells().iter().enumerate().find_map(|(i, cell)| {
            other_cells.iter().position(|other_cell| other_cell == cell).map(|j| (i, j))
        })
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let direction = match self.direction {
            Direction::Across => "across",
            Direction::Down => "down",
        };
        write!(f, "({}, {}) {} : {}", self.row, self.col, direction, self.length)
    }
}
