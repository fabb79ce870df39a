//! Full-board detection.

use crate::{Board, Cell};
use tracing::instrument;

/// Checks if the board is full (no cell is empty).
///
/// A full board with no winning stroke is a draw.
#[instrument(skip(board), fields(width = board.width()))]
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|c| *c != Cell::Empty)
}
