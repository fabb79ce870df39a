//! Win detection for arbitrary width and win length.

use crate::{Board, Cell};
use tracing::instrument;

/// Row/column steps for horizontal, vertical, main diagonal and anti-diagonal.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Checks if the mark at `index` lies on a run of at least `win_length`
/// identical marks.
///
/// Returns false for empty or out-of-range cells.
#[instrument(skip(board), fields(width = board.width(), win_length = board.win_length()))]
pub fn is_winning_stroke(board: &Board, index: usize) -> bool {
    match board.get(index) {
        Some(Cell::Empty) | None => false,
        Some(mark) => completes_line(board, index, mark),
    }
}

/// Checks if `mark` placed at `index` would complete a winning line.
///
/// The current content of `index` is ignored, so this also answers the
/// question for empty cells.
pub fn completes_line(board: &Board, index: usize, mark: Cell) -> bool {
    if mark == Cell::Empty || index >= board.cell_count() {
        return false;
    }

    let width = board.width() as isize;
    let row = index as isize / width;
    let col = index as isize % width;

    DIRECTIONS.iter().any(|&(dr, dc)| {
        let run = 1
            + run_length(board, row, col, dr, dc, mark)
            + run_length(board, row, col, -dr, -dc, mark);
        run >= board.win_length()
    })
}

/// Counts consecutive `mark` cells starting one step away from `(row, col)`.
fn run_length(board: &Board, row: isize, col: isize, dr: isize, dc: isize, mark: Cell) -> usize {
    let width = board.width() as isize;
    let mut count = 0;
    let (mut r, mut c) = (row + dr, col + dc);

    while (0..width).contains(&r) && (0..width).contains(&c) {
        if board.cells()[(r * width + c) as usize] != mark {
            break;
        }
        count += 1;
        r += dr;
        c += dc;
    }

    count
}
