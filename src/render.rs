use std::fs;
use std::io;
use std::path::Path;

use crate::{Choice, Grid};

/// How a blocked cell is drawn.
pub const BLOCK: char = '█';

/// The letter in every cell of the grid once the given choices are written in. Blocked cells and
/// usable cells that no choice covers are `None`.
pub fn letter_grid(grid: &Grid, choices: &[Choice]) -> Vec<Vec<Option<char>>> {
    let mut letters = vec![vec![None; grid.width()]; grid.height()];

    for choice in choices {
        for ((row, col), letter) in choice.slot.cells().into_iter().zip(choice.word.chars()) {
            if grid.is_usable(row, col) {
                letters[row][col] = Some(letter);
            }
        }
    }

    letters
}

/// Turn the given grid and fill choices into a rendered string.
pub fn render_grid(grid: &Grid, choices: &[Choice]) -> String {
    letter_grid(grid, choices)
        .iter()
        .enumerate()
        .map(|(row, letters)| {
            letters
                .iter()
                .enumerate()
                .map(|(col, letter)| {
                    if !grid.is_usable(row, col) {
                        BLOCK
                    } else {
                        letter.unwrap_or(' ')
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the rendered grid to a file.
pub fn save_grid<P: AsRef<Path>>(grid: &Grid, choices: &[Choice], path: P) -> io::Result<()> {
    fs::write(path, render_grid(grid, choices) + "\n")
}
