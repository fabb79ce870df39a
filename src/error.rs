//! Bot error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong while handling an update.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum BotErrorKind {
    /// Board size cannot be rendered within the payload ceiling.
    #[display("Unsupported board width {width} (supported: 1..={max})")]
    UnsupportedWidth {
        /// Requested width.
        width: usize,
        /// Largest width the payload ceiling allows.
        max: usize,
    },

    /// The roster had no strategy with a move where one was required.
    #[display("No strategy in the roster has a move")]
    NoStrategy,

    /// A strategy picked a cell that cannot be played.
    #[display("Strategy {strategy} chose illegal cell {index}")]
    IllegalAgentMove {
        /// Name of the offending strategy.
        strategy: &'static str,
        /// Cell it picked.
        index: usize,
    },

    /// Network or HTTP failure talking to the messaging platform.
    #[display("Transport failure: {}", _0)]
    Transport(String),

    /// The messaging platform answered but refused the call.
    #[display("{method} rejected: {description}")]
    Api {
        /// API method name.
        method: String,
        /// Platform-provided reason.
        description: String,
    },
}

/// Error raised while handling an update, with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Bot error: {} at {}:{}", kind, file, line)]
pub struct BotError {
    /// Error category.
    pub kind: BotErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl BotError {
    /// Creates a new bot error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: BotErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error category.
    pub fn kind(&self) -> &BotErrorKind {
        &self.kind
    }

    /// Configuration-class errors abort the update outright; everything else
    /// is a failure to deliver.
    pub fn is_config(&self) -> bool {
        matches!(
            self.kind,
            BotErrorKind::NoStrategy
                | BotErrorKind::IllegalAgentMove { .. }
                | BotErrorKind::UnsupportedWidth { .. }
        )
    }
}

impl From<reqwest::Error> for BotError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::new(BotErrorKind::Transport(err.to_string()))
    }
}
