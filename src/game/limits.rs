//! Transport payload ceiling.
//!
//! The whole game state rides in each button's callback payload, so the
//! platform's payload limit caps the board size.

use crate::payload::{MOVE_PREFIX, OCCUPIED_CELL};
use derive_new::new;

/// Telegram's `callback_data` limit in bytes.
pub const TELEGRAM_CALLBACK_LIMIT: usize = 64;

/// Largest callback payload the transport accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, new)]
pub struct PayloadLimit {
    max_bytes: usize,
}

impl PayloadLimit {
    /// Payload ceiling in bytes.
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Length of the longest move payload for a `width × width` board.
    ///
    /// Saturates at `usize::MAX` for widths no transport could carry.
    pub fn longest_payload(width: usize) -> usize {
        Self::payload_len(width).unwrap_or(usize::MAX)
    }

    /// Largest width whose payloads all fit, or zero if none do.
    pub fn max_width(&self) -> usize {
        if OCCUPIED_CELL.len() > self.max_bytes {
            return 0;
        }
        // a payload carries one digit per cell, so nothing wider than the
        // square root fits
        let mut width = self.max_bytes.isqrt();
        while width > 0 && Self::payload_len(width).is_none_or(|len| len > self.max_bytes) {
            width -= 1;
        }
        width
    }

    fn payload_len(width: usize) -> Option<usize> {
        let cells = width.checked_mul(width)?;
        let fixed = MOVE_PREFIX.len()
            + decimal_len(cells.saturating_sub(1))
            + 1
            + 2 * decimal_len(width)
            + 2;
        cells.checked_add(fixed)
    }

    /// Checks if a board of `width` can be rendered.
    pub fn supports(&self, width: usize) -> bool {
        width >= 1 && width <= self.max_width()
    }
}

impl Default for PayloadLimit {
    fn default() -> Self {
        Self::new(TELEGRAM_CALLBACK_LIMIT)
    }
}

fn decimal_len(n: usize) -> usize {
    n.checked_ilog10().map_or(1, |digits| digits as usize + 1)
}
