//! Turn state machine and the payload ceiling it renders under.

mod flow;
mod limits;

pub use flow::{GameFlow, Prompt, Turn, WRONG_MOVE, escalate_warning};
pub use limits::{PayloadLimit, TELEGRAM_CALLBACK_LIMIT};
