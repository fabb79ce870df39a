//! Inline keyboard rendering.
//!
//! Every actionable button carries the board that results from pressing it,
//! computed here at render time. The serde shape matches the Telegram
//! `InlineKeyboardMarkup` object, so keyboards received with a callback can
//! be echoed back unchanged.

use crate::payload::CallbackPayload;
use derive_getters::Getters;
use derive_new::new;
use gridbot_board::{Board, Cell};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Label shown on an empty cell.
pub const EMPTY_LABEL: &str = "·";
/// Label shown on a cell held by the first mover.
pub const PLAYER_ONE_LABEL: &str = "❌";
/// Label shown on a cell held by the second mover.
pub const PLAYER_TWO_LABEL: &str = "⭕";

/// A single keyboard button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Button {
    /// Visible label.
    text: String,
    /// Payload delivered when pressed. Buttons of other kinds have none.
    #[serde(default)]
    callback_data: String,
}

/// Grid of buttons.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Keyboard {
    #[serde(rename = "inline_keyboard")]
    rows: Vec<Vec<Button>>,
}

impl Keyboard {
    /// Creates a keyboard from rows of buttons.
    pub fn new(rows: Vec<Vec<Button>>) -> Self {
        Self { rows }
    }

    /// Button rows, top to bottom.
    pub fn rows(&self) -> &[Vec<Button>] {
        &self.rows
    }

    /// All buttons in row-major order.
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }

    /// Number of buttons whose payload is a move.
    pub fn actionable_count(&self) -> usize {
        self.buttons()
            .filter(|button| CallbackPayload::is_move(button.callback_data()))
            .count()
    }
}

/// Label for a cell mark.
pub fn mark_label(cell: Cell) -> &'static str {
    match cell {
        Cell::Empty => EMPTY_LABEL,
        Cell::PlayerOne => PLAYER_ONE_LABEL,
        Cell::PlayerTwo => PLAYER_TWO_LABEL,
    }
}

/// Renders `board` as `width` rows of `width` buttons.
///
/// Occupied cells, and every cell of a locked board, carry the
/// `OCCUPIED_CELL` sentinel. Empty cells of an unlocked board carry a move
/// payload with the resulting board.
#[instrument(skip(board), fields(width = board.width()))]
pub fn build_keyboard(board: &Board, locked: bool) -> Keyboard {
    let buttons = board.cells().iter().enumerate().map(|(index, cell)| {
        let payload = match (cell, locked) {
            (Cell::Empty, false) => match board.play(index) {
                Ok(next) => CallbackPayload::Move { index, board: next },
                Err(e) => {
                    warn!(index, error = %e, "Empty cell refused a move");
                    CallbackPayload::OccupiedCell
                }
            },
            _ => CallbackPayload::OccupiedCell,
        };
        Button::new(mark_label(*cell).to_string(), payload.encode())
    });

    let buttons: Vec<Button> = buttons.collect();
    Keyboard::new(
        buttons
            .chunks(board.width())
            .map(|row| row.to_vec())
            .collect(),
    )
}
