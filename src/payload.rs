//! Callback payloads embedded in keyboard buttons.
//!
//! Two shapes exist on the wire:
//!
//! - `OCCUPIED_CELL`: the sentinel carried by every inert button
//! - `MOVE_<index>_<board>`: an actionable button, where `<board>` is the
//!   encoded board *after* `index` was played
//!
//! The payload is the only game state the bot ever sees, so it is checked
//! for internal consistency on top of the board codec.

use gridbot_board::{Board, Cell, DecodeError, deserialize, serialize};
use tracing::{debug, instrument};

/// Sentinel for inert buttons.
pub const OCCUPIED_CELL: &str = "OCCUPIED_CELL";

/// Prefix of actionable buttons.
pub const MOVE_PREFIX: &str = "MOVE_";

/// Decoded callback payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackPayload {
    /// Inert button: occupied cell or locked board.
    OccupiedCell,
    /// Actionable button.
    Move {
        /// Cell the human chose.
        index: usize,
        /// Board with that move already applied.
        board: Board,
    },
}

impl CallbackPayload {
    /// Encodes the payload for a button.
    pub fn encode(&self) -> String {
        match self {
            CallbackPayload::OccupiedCell => OCCUPIED_CELL.to_string(),
            CallbackPayload::Move { index, board } => {
                format!("{MOVE_PREFIX}{index}_{}", serialize(board))
            }
        }
    }

    /// Cheap shape check for the sentinel.
    pub fn is_occupied_cell(data: &str) -> bool {
        data == OCCUPIED_CELL
    }

    /// Cheap shape check for move payloads. Does not validate.
    pub fn is_move(data: &str) -> bool {
        data.starts_with(MOVE_PREFIX)
    }

    /// Decodes and validates a payload.
    ///
    /// A move payload is accepted only if the board decodes, `index` is on
    /// the board, the cell at `index` holds the mark of the side that moved
    /// last, the mark counts are balanced, and the board before that move
    /// held no completed line.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Malformed`] for anything else.
    #[instrument]
    pub fn parse(data: &str) -> Result<Self, DecodeError> {
        if Self::is_occupied_cell(data) {
            return Ok(CallbackPayload::OccupiedCell);
        }

        let rest = data
            .strip_prefix(MOVE_PREFIX)
            .ok_or_else(|| DecodeError::malformed("unknown payload kind"))?;
        let (index, encoded) = rest
            .split_once('_')
            .ok_or_else(|| DecodeError::malformed("missing move index"))?;

        if index.is_empty()
            || !index.bytes().all(|b| b.is_ascii_digit())
            || (index.len() > 1 && index.starts_with('0'))
        {
            return Err(DecodeError::malformed(format!("bad move index {index:?}")));
        }
        let index: usize = index
            .parse()
            .map_err(|_| DecodeError::malformed("move index out of range"))?;

        let board = deserialize(encoded)?;

        if !board.is_balanced() {
            return Err(DecodeError::malformed("unbalanced mark counts"));
        }
        match (board.get(index), board.last_mover()) {
            (Some(cell), Some(mover)) if cell == mover => {}
            (cell, mover) => {
                debug!(index, ?cell, ?mover, "Move index does not match last mover");
                return Err(DecodeError::malformed(format!(
                    "cell {index} does not hold the last move"
                )));
            }
        }

        if let Some(decided) = completed_before(&board, index) {
            debug!(index, decided, "Move played on a finished board");
            return Err(DecodeError::malformed(format!(
                "line through cell {decided} was complete before the move"
            )));
        }

        Ok(CallbackPayload::Move { index, board })
    }
}

/// Finds a winning cell on `board` with the move at `index` taken back.
fn completed_before(board: &Board, index: usize) -> Option<usize> {
    let mut cells = board.cells().to_vec();
    cells[index] = Cell::Empty;
    let before = Board::from_cells(board.width(), board.win_length(), cells).ok()?;
    (0..before.cell_count()).find(|&cell| before.is_winning_stroke(cell))
}
