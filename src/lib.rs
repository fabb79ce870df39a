//! Gridbot library - stateless chat bot for N-in-a-row grid games.
//!
//! The bot keeps no sessions. The whole game travels inside the inline
//! keyboard it sends: every actionable button carries the board that
//! results from pressing it.
//!
//! # Architecture
//!
//! - **Board**: pure board logic and wire codec (`gridbot_board`)
//! - **Keyboard**: renders a board into buttons with embedded next states
//! - **Game**: the turn state machine, consulting a strategy roster
//! - **Handlers**: ordered chain of responsibility over inbound updates
//! - **Transport**: messaging seam plus a Telegram Bot API client
//!
//! # Example
//!
//! ```
//! use gridbot::{AgentRoster, GameFlow, NewGame, PayloadLimit, StrategyKind};
//!
//! let flow = GameFlow::new(
//!     AgentRoster::from_kinds(&StrategyKind::defaults()),
//!     PayloadLimit::default(),
//! );
//! let game = NewGame::parse("/new_game_3x3_player1").unwrap();
//! let turn = flow.new_game(&game).unwrap();
//! assert_eq!(turn.text(), "Your turn!");
//! assert_eq!(turn.keyboard().actionable_count(), 9);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod agent;
mod bot;
mod command;
mod config;
mod error;
mod game;
mod handlers;
mod keyboard;
mod payload;
mod transport;

// Crate-level exports - Board core
pub use gridbot_board::{Board, Cell, DecodeError, MoveError};

// Crate-level exports - Strategy roster
pub use agent::{
    AgentMove, AgentRoster, BlockingMove, CenterMove, FirstFree, Strategy, StrategyKind,
    WinningMove,
};

// Crate-level exports - Configuration and errors
pub use config::{BotConfig, ConfigError};
pub use error::{BotError, BotErrorKind};

// Crate-level exports - Protocol
pub use command::{NEW_GAME_PREFIX, NewGame, Starter, command_name};
pub use keyboard::{
    Button, EMPTY_LABEL, Keyboard, PLAYER_ONE_LABEL, PLAYER_TWO_LABEL, build_keyboard, mark_label,
};
pub use payload::{CallbackPayload, MOVE_PREFIX, OCCUPIED_CELL};

// Crate-level exports - Game flow
pub use game::{
    GameFlow, PayloadLimit, Prompt, TELEGRAM_CALLBACK_LIMIT, Turn, WRONG_MOVE, escalate_warning,
};

// Crate-level exports - Routing and transport
pub use bot::Bot;
pub use handlers::{
    Dispatch, Dispatcher, HelpHandler, LoggingHandler, NewGameHandler, NormalMoveHandler,
    UpdateHandler, WrongMoveHandler,
};
pub use transport::{
    CallbackQuery, ChatId, MessageHandle, MessageId, MessagingClient, TelegramClient, TextMessage,
    Update, UpdateBatch, User,
};
