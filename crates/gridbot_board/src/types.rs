//! Core domain types for square N-in-a-row boards.

use crate::rules;
use derive_more::{Display, Error};
use tracing::instrument;

/// Mark held by a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Mark of the side that moves first.
    PlayerOne,
    /// Mark of the side that moves second.
    PlayerTwo,
}

impl Cell {
    /// Returns the opposing mark. `Empty` has no opponent and maps to itself.
    pub fn opponent(self) -> Self {
        match self {
            Cell::PlayerOne => Cell::PlayerTwo,
            Cell::PlayerTwo => Cell::PlayerOne,
            Cell::Empty => Cell::Empty,
        }
    }

    /// Checks if the cell is unoccupied.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Errors raised when building a board from raw dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Width was zero.
    #[display("Board width must be positive")]
    ZeroWidth,

    /// Width squared does not fit in memory addressing.
    #[display("Board width {} is too large", _0)]
    TooWide(#[error(not(source))] usize),

    /// Win length was zero or exceeded the width.
    #[display("Win length {win_length} must be between 1 and width {width}")]
    WinLength {
        /// Board width.
        width: usize,
        /// Requested win length.
        win_length: usize,
    },

    /// Cell vector did not hold exactly `width²` entries.
    #[display("Expected {expected} cells, got {actual}")]
    CellCount {
        /// `width * width`.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },
}

/// Errors raised when applying a move.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// Index lies outside the grid.
    #[display("Cell {index} is outside a board of {cells} cells")]
    OutOfBounds {
        /// Requested index.
        index: usize,
        /// Number of cells on the board.
        cells: usize,
    },

    /// Cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    Occupied(#[error(not(source))] usize),
}

/// Square board of `width × width` cells in row-major order.
///
/// Boards are values: [`Board::play`] returns a new board and never mutates
/// the receiver. Whose turn it is follows from cell parity, see
/// [`Board::to_move`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    win_length: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] if `width` is zero or too large, or if
    /// `win_length` is not in `1..=width`.
    #[instrument]
    pub fn new(width: usize, win_length: usize) -> Result<Self, BoardError> {
        let count = Self::cell_count_for(width, win_length)?;
        Ok(Self {
            width,
            win_length,
            cells: vec![Cell::Empty; count],
        })
    }

    /// Creates a board from an existing cell vector.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] on invalid dimensions or when `cells` does not
    /// hold exactly `width²` entries.
    #[instrument(skip(cells), fields(len = cells.len()))]
    pub fn from_cells(
        width: usize,
        win_length: usize,
        cells: Vec<Cell>,
    ) -> Result<Self, BoardError> {
        let expected = Self::cell_count_for(width, win_length)?;
        if cells.len() != expected {
            return Err(BoardError::CellCount {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            win_length,
            cells,
        })
    }

    /// Validates dimensions and returns `width²`.
    pub(crate) fn cell_count_for(width: usize, win_length: usize) -> Result<usize, BoardError> {
        if width == 0 {
            return Err(BoardError::ZeroWidth);
        }
        if win_length == 0 || win_length > width {
            return Err(BoardError::WinLength { width, win_length });
        }
        width.checked_mul(width).ok_or(BoardError::TooWide(width))
    }

    /// Side length of the grid.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Run length required to win.
    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Total number of cells (`width²`).
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Gets the cell at `index`.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Checks if `index` is on the board and unoccupied.
    pub fn is_empty_at(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Mark of the side to move: `PlayerOne` on even occupancy, otherwise
    /// `PlayerTwo`.
    pub fn to_move(&self) -> Cell {
        if self.occupied() % 2 == 0 {
            Cell::PlayerOne
        } else {
            Cell::PlayerTwo
        }
    }

    /// Mark of the side that made the most recent move, if any.
    pub fn last_mover(&self) -> Option<Cell> {
        match self.occupied() {
            0 => None,
            _ => Some(self.to_move().opponent()),
        }
    }

    /// Checks that mark counts could arise from alternating play with
    /// `PlayerOne` first.
    pub fn is_balanced(&self) -> bool {
        let ones = self.cells.iter().filter(|c| **c == Cell::PlayerOne).count();
        let twos = self.cells.iter().filter(|c| **c == Cell::PlayerTwo).count();
        ones == twos || ones == twos + 1
    }

    /// Indices of every empty cell, ascending.
    pub fn empty_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
    }

    /// Cells grouped into rows of `width`.
    pub fn rows(&self) -> std::slice::Chunks<'_, Cell> {
        self.cells.chunks(self.width)
    }

    /// Returns a new board with the side to move placed at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] if `index` is off the board or already occupied.
    #[instrument(skip(self), fields(width = self.width, mark = ?self.to_move()))]
    pub fn play(&self, index: usize) -> Result<Board, MoveError> {
        match self.get(index) {
            None => Err(MoveError::OutOfBounds {
                index,
                cells: self.cell_count(),
            }),
            Some(Cell::Empty) => {
                let mut cells = self.cells.clone();
                cells[index] = self.to_move();
                Ok(Board {
                    width: self.width,
                    win_length: self.win_length,
                    cells,
                })
            }
            Some(_) => Err(MoveError::Occupied(index)),
        }
    }

    /// Checks if the mark at `index` completes a winning line.
    pub fn is_winning_stroke(&self, index: usize) -> bool {
        rules::is_winning_stroke(self, index)
    }

    /// Checks if no empty cell remains.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Formats the board as a human-readable grid.
    pub fn display(&self) -> String {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Cell::Empty => ".",
                        Cell::PlayerOne => "X",
                        Cell::PlayerTwo => "O",
                    })
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
