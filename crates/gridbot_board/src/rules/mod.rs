//! Game rules for N-in-a-row boards.
//!
//! Pure functions over [`Board`](crate::Board). Rules are kept apart from
//! board storage so callers can ask hypothetical questions, like whether an
//! empty cell would win for a given mark.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{completes_line, is_winning_stroke};
