//! Board occupancy model.
//!
//! A fixed grid of cells, each carrying a bonus tag and at most one letter.
//! [`Board::try_place`] is the only way a cell gains a letter; an occupied
//! cell rejects placement until it is cleared.

use crate::config::{ConfigError, ConfigResult};
use crate::geometry::CellCoord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scoring multiplier category of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Bonus {
    #[default]
    None,
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
    /// The starting square.
    Center,
}

impl Bonus {
    /// Parse a legend tag (`""`, `"DL"`, `"TL"`, `"DW"`, `"TW"`, `"★"`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "" => Some(Bonus::None),
            "DL" => Some(Bonus::DoubleLetter),
            "TL" => Some(Bonus::TripleLetter),
            "DW" => Some(Bonus::DoubleWord),
            "TW" => Some(Bonus::TripleWord),
            "★" | "*" => Some(Bonus::Center),
            _ => None,
        }
    }

    /// Legend tag for this bonus.
    pub fn tag(self) -> &'static str {
        match self {
            Bonus::None => "",
            Bonus::DoubleLetter => "DL",
            Bonus::TripleLetter => "TL",
            Bonus::DoubleWord => "DW",
            Bonus::TripleWord => "TW",
            Bonus::Center => "★",
        }
    }
}

/// Standard 11×11 legend.
pub const STANDARD_LEGEND: [[&str; 11]; 11] = [
    ["TW", "", "", "DL", "", "", "", "DL", "", "", "TW"],
    ["", "DW", "", "", "", "TL", "", "", "", "DW", ""],
    ["", "", "DW", "", "", "", "", "", "DW", "", ""],
    ["DL", "", "", "DW", "", "", "", "DW", "", "", "DL"],
    ["", "", "", "", "DW", "", "DW", "", "", "", ""],
    ["", "TL", "", "", "", "★", "", "", "", "TL", ""],
    ["", "", "", "", "DW", "", "DW", "", "", "", ""],
    ["DL", "", "", "DW", "", "", "", "DW", "", "", "DL"],
    ["", "", "DW", "", "", "", "", "", "DW", "", ""],
    ["", "DW", "", "", "", "TL", "", "", "", "DW", ""],
    ["TW", "", "", "DL", "", "", "", "DL", "", "", "TW"],
];

/// Standard legend as owned rows, e.g. for configuration defaults.
pub fn standard_legend() -> Vec<Vec<String>> {
    STANDARD_LEGEND
        .iter()
        .map(|row| row.iter().map(|tag| tag.to_string()).collect())
        .collect()
}

/// One board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCell {
    row: usize,
    col: usize,
    bonus: Bonus,
    occupant: Option<char>,
}

impl BoardCell {
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn coord(&self) -> CellCoord {
        CellCoord::new(self.row, self.col)
    }

    pub fn bonus(&self) -> Bonus {
        self.bonus
    }

    /// Letter placed on the cell, if any.
    pub fn occupant(&self) -> Option<char> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

/// Why a single-letter placement was refused.
///
/// A refused placement is an ordinary game outcome, not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("out of bounds")]
    OutOfBounds,
    #[error("cell occupied")]
    Occupied,
}

/// Why [`Board::place_word`] placed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WordRejection {
    #[error("empty word")]
    EmptyWord,
    #[error(transparent)]
    Cell(#[from] Rejection),
}

/// Orientation of a multi-letter placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Horizontal,
    Vertical,
}

impl Direction {
    /// Cell reached after `step` letters from `start`.
    fn offset(self, start: CellCoord, step: usize) -> CellCoord {
        match self {
            Direction::Horizontal => CellCoord::new(start.row, start.col + step),
            Direction::Vertical => CellCoord::new(start.row + step, start.col),
        }
    }
}

/// Fixed-size grid of cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Row-major cells.
    cells: Vec<BoardCell>,
}

impl Board {
    /// Create an empty board with no bonus tags.
    pub fn new(rows: usize, cols: usize) -> Self {
        let cells = (0..rows)
            .flat_map(|row| {
                (0..cols).map(move |col| BoardCell {
                    row,
                    col,
                    bonus: Bonus::None,
                    occupant: None,
                })
            })
            .collect();
        Self { rows, cols, cells }
    }

    /// Build a board from a row-major legend of bonus tags.
    ///
    /// The legend must be non-empty and rectangular, and every tag must be
    /// known.
    pub fn from_legend<S: AsRef<str>>(legend: &[Vec<S>]) -> ConfigResult<Self> {
        let rows = legend.len();
        let cols = legend.first().map(Vec::len).unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyLegend);
        }

        let mut board = Self::new(rows, cols);
        for (row, tags) in legend.iter().enumerate() {
            if tags.len() != cols {
                return Err(ConfigError::NonRectangularLegend {
                    row,
                    expected: cols,
                    found: tags.len(),
                });
            }
            for (col, tag) in tags.iter().enumerate() {
                let tag = tag.as_ref();
                let bonus = Bonus::from_tag(tag).ok_or_else(|| ConfigError::UnknownBonusTag {
                    tag: tag.to_string(),
                    row,
                    col,
                })?;
                board.cells[row * cols + col].bonus = bonus;
            }
        }
        Ok(board)
    }

    /// The standard 11×11 board.
    pub fn standard() -> Self {
        let mut board = Self::new(STANDARD_LEGEND.len(), STANDARD_LEGEND[0].len());
        for (row, tags) in STANDARD_LEGEND.iter().enumerate() {
            for (col, tag) in tags.iter().enumerate() {
                let index = row * board.cols + col;
                board.cells[index].bonus = Bonus::from_tag(tag).unwrap_or_default();
            }
        }
        board
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the coordinate lies on the grid.
    pub fn is_valid_position(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        self.is_valid_position(row, col)
            .then_some(row * self.cols + col)
    }

    /// Cell at the coordinate.
    pub fn cell(&self, row: usize, col: usize) -> Option<&BoardCell> {
        self.index(row, col).map(|index| &self.cells[index])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[BoardCell] {
        &self.cells
    }

    /// Place a letter, reporting why it was refused.
    ///
    /// The letter is stored upper-cased. The bonus tag is kept.
    pub fn try_place(&mut self, row: usize, col: usize, letter: char) -> Result<(), Rejection> {
        let index = self.index(row, col).ok_or(Rejection::OutOfBounds)?;
        let cell = &mut self.cells[index];
        if cell.occupant.is_some() {
            return Err(Rejection::Occupied);
        }
        cell.occupant = Some(normalize_letter(letter));
        Ok(())
    }

    /// Place a letter. Returns false, changing nothing, if the cell is out of
    /// bounds or occupied.
    pub fn place(&mut self, row: usize, col: usize, letter: char) -> bool {
        match self.try_place(row, col, letter) {
            Ok(()) => true,
            Err(rejection) => {
                log::debug!("Placement of {} at ({}, {}) rejected: {}", letter, row, col, rejection);
                false
            }
        }
    }

    /// Place every letter of a word in a line, or nothing at all.
    pub fn place_word(
        &mut self,
        word: &str,
        start: CellCoord,
        direction: Direction,
    ) -> Result<(), WordRejection> {
        let letters: Vec<char> = word.chars().collect();
        if letters.is_empty() {
            return Err(WordRejection::EmptyWord);
        }

        // Validate the whole run before touching any cell.
        for step in 0..letters.len() {
            let coord = direction.offset(start, step);
            let cell = self
                .cell(coord.row, coord.col)
                .ok_or(Rejection::OutOfBounds)?;
            if cell.is_occupied() {
                return Err(Rejection::Occupied.into());
            }
        }

        for (step, &letter) in letters.iter().enumerate() {
            let coord = direction.offset(start, step);
            self.try_place(coord.row, coord.col, letter)?;
        }
        log::debug!("Placed word {} at ({}, {}) {:?}", word, start.row, start.col, direction);
        Ok(())
    }

    /// Empty a cell regardless of its prior state. Out-of-bounds is a no-op.
    pub fn clear(&mut self, row: usize, col: usize) {
        if let Some(index) = self.index(row, col) {
            self.cells[index].occupant = None;
        }
    }

    /// Empty every cell. Bonus tags stay.
    pub fn reset_all(&mut self) {
        for cell in &mut self.cells {
            cell.occupant = None;
        }
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_occupied()).count()
    }
}

fn normalize_letter(letter: char) -> char {
    let mut upper = letter.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        // Letters without a single-char upper case are kept as given.
        _ => letter,
    }
}
