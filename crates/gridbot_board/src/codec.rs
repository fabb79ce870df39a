//! Compact wire encoding for boards.
//!
//! Format: `<width>_<win_length>_<digits>` where `digits` holds exactly
//! `width²` characters, one per cell in row-major order. Encoded boards
//! travel through untrusted UI controls, so decoding rejects anything that
//! is not the exact output of [`serialize`].

use crate::{Board, Cell};
use derive_more::{Display, Error};
use tracing::{debug, instrument};

/// Field separator.
pub const SEPARATOR: char = '_';

/// Cell-to-digit table. Index is the digit value.
const CELL_DIGITS: [Cell; 3] = [Cell::Empty, Cell::PlayerOne, Cell::PlayerTwo];

/// Error returned when an encoded board cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum DecodeError {
    /// Input is not a well-formed board encoding.
    #[display("Malformed board encoding: {reason}")]
    Malformed {
        /// What was wrong with the input.
        reason: String,
    },
}

impl DecodeError {
    /// Creates a `Malformed` error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}

/// Encodes a board as `<width>_<win_length>_<digits>`.
#[instrument(skip(board), fields(width = board.width()))]
pub fn serialize(board: &Board) -> String {
    let mut out = format!(
        "{}{SEPARATOR}{}{SEPARATOR}",
        board.width(),
        board.win_length()
    );
    out.extend(board.cells().iter().map(|cell| cell_digit(*cell)));
    out
}

/// Decodes a board produced by [`serialize`].
///
/// # Errors
///
/// Returns [`DecodeError::Malformed`] if the field count is not three, a
/// dimension is not a canonical positive integer, the dimensions are
/// inconsistent, the digit count is not `width²`, or any digit is outside
/// the cell table. No partial board is ever returned.
#[instrument]
pub fn deserialize(input: &str) -> Result<Board, DecodeError> {
    let mut fields = input.split(SEPARATOR);
    let (Some(width), Some(win_length), Some(digits), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        debug!("Wrong number of fields");
        return Err(DecodeError::malformed("expected exactly 3 fields"));
    };

    let width = parse_dimension(width, "width")?;
    let win_length = parse_dimension(win_length, "win length")?;
    let expected = Board::cell_count_for(width, win_length)
        .map_err(|e| DecodeError::malformed(e.to_string()))?;

    // Length is checked before any allocation proportional to width².
    if digits.len() != expected {
        return Err(DecodeError::malformed(format!(
            "expected {} cell digits, got {}",
            expected,
            digits.len()
        )));
    }

    let cells = digits
        .bytes()
        .map(|byte| {
            digit_cell(byte).ok_or_else(|| {
                DecodeError::malformed(format!("invalid cell digit {:?}", byte as char))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Board::from_cells(width, win_length, cells).map_err(|e| DecodeError::malformed(e.to_string()))
}

/// Parses a positive integer without sign or leading zeros.
fn parse_dimension(field: &str, name: &str) -> Result<usize, DecodeError> {
    let canonical = !field.is_empty()
        && field.bytes().all(|b| b.is_ascii_digit())
        && !field.starts_with('0');
    if !canonical {
        return Err(DecodeError::malformed(format!("{name} {field:?} is not a positive integer")));
    }
    field
        .parse()
        .map_err(|_| DecodeError::malformed(format!("{name} {field:?} is out of range")))
}

fn cell_digit(cell: Cell) -> char {
    let value = CELL_DIGITS
        .iter()
        .position(|c| *c == cell)
        .unwrap_or_default();
    char::from(b'0' + value as u8)
}

fn digit_cell(byte: u8) -> Option<Cell> {
    byte.checked_sub(b'0')
        .and_then(|value| CELL_DIGITS.get(usize::from(value)))
        .copied()
}
