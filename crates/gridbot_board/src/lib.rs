//! Pure board logic for N-in-a-row grid games.
//!
//! - [`Board`]: square grid of [`Cell`]s with a configurable win length
//! - [`rules`]: winning-stroke and full-board predicates
//! - [`codec`]: compact wire encoding safe to embed in UI controls
//!
//! Nothing here performs I/O; every transition returns a new [`Board`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod rules;
mod types;

pub use codec::{DecodeError, deserialize, serialize};
pub use types::{Board, BoardError, Cell, MoveError};
