use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::{fs, io};

use crate::{Direction, Slot};

/// The character marking a usable cell in a structure file. Anything else is a block.
pub const OPEN_CELL: char = '_';

/// Problems reading a structure or word list.
#[derive(Debug)]
pub enum LoadError {
    Io { path: PathBuf, source: io::Error },
    EmptyStructure,
    EmptyVocabulary,
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io { path, source } => write!(f, "Failed to read {}: {}", path.display(), source),
            LoadError::EmptyStructure => write!(f, "Structure has no rows"),
            LoadError::EmptyVocabulary => write!(f, "Word list has no words"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub(crate) fn read_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })
}

/// The shape of a crossword: which cells can hold letters and which are blocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    usable: Vec<Vec<bool>>,
}

impl Grid {
    /// Parse a structure template, with `_` representing usable cells and any other character
    /// representing blocks. Short rows are padded with blocks.
    pub fn parse(template: &str) -> Result<Grid, LoadError> {
        // Blank lines at either end are dropped; blank lines in between are rows with no usable
        // cells.
        let lines: Vec<&str> = template.lines().collect();
        let first = lines.iter().position(|line| !line.trim().is_empty());
        let last = lines.iter().rposition(|line| !line.trim().is_empty());
        let rows = match (first, last) {
            (Some(first), Some(last)) => &lines[first..=last],
            _ => return Err(LoadError::EmptyStructure),
        };

        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let usable = rows
            .iter()
            .map(|row| {
                let mut cells: Vec<bool> = row.chars().map(|c| c == OPEN_CELL).collect();
                cells.resize(width, false);
                cells
            })
            .collect();

        Ok(Grid { width, height: rows.len(), usable })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Grid, LoadError> {
        Grid::parse(&read_file(path.as_ref())?)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the given cell can hold a letter. Cells outside the grid are treated as blocked.
    pub fn is_usable(&self, row: usize, col: usize) -> bool {
        self.usable.get(row).and_then(|cells| cells.get(col)).copied().unwrap_or(false)
    }

    /// Every maximal run of usable cells at least two long, across then down.
    pub fn slots(&self) -> Vec<Slot> {
        let mut result = vec![];

        for row in 0..self.height {
            let mut col = 0;
            while col < self.width {
                if self.is_usable(row, col) && (col == 0 || !self.is_usable(row, col - 1)) {
                    let length = (col..self.width).take_while(|&c| self.is_usable(row, c)).count();
                    if length > 1 {
                        result.push(Slot::new(row, col, Direction::Across, length));
                    }
                    col += length;
                } else {
                    col += 1;
                }
            }
        }

        for col in 0..self.width {
            let mut row = 0;
            while row < self.height {
                if self.is_usable(row, col) && (row == 0 || !self.is_usable(row - 1, col)) {
                    let length = (row..self.height).take_while(|&r| self.is_usable(r, col)).count();
                    if length > 1 {
                        result.push(Slot::new(row, col, Direction::Down, length));
                    }
                    row += length;
                } else {
                    row += 1;
                }
            }
        }

        result
    }
}
