//! Turn state machine.
//!
//! No state survives between updates. Each transition starts from a board
//! carried by the update (or a fresh one) and ends with the next surface to
//! render:
//!
//! ```text
//! awaiting human move ──press──▶ roster replies ──▶ awaiting human move
//!                                      │
//!                                      └──────────▶ terminal (locked or full)
//! ```

use super::limits::PayloadLimit;
use crate::agent::AgentRoster;
use crate::command::{NewGame, Starter};
use crate::error::{BotError, BotErrorKind};
use crate::keyboard::{Keyboard, build_keyboard};
use derive_getters::Getters;
use derive_more::Display;
use gridbot_board::Board;
use tracing::{debug, info, instrument};

/// Warning shown when an inert button is pressed.
pub const WRONG_MOVE: &str = "Wrong move";

/// Text accompanying a rendered board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Prompt {
    /// Game continues, human to move.
    #[display("Your turn!")]
    YourTurn,
    /// Human completed a line.
    #[display("You win!")]
    YouWin,
    /// Roster completed a line.
    #[display("You lose!")]
    YouLose,
    /// No winner and nothing left to play.
    #[display("Game over!")]
    GameOver,
}

/// Result of one transition: what to show next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    prompt: Prompt,
    board: Board,
    locked: bool,
}

impl Turn {
    /// Outcome prompt.
    pub fn prompt(&self) -> Prompt {
        self.prompt
    }

    /// Board to render.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Whether every button must be inert.
    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Renders the board for this turn.
    pub fn keyboard(&self) -> Keyboard {
        build_keyboard(&self.board, self.locked)
    }

    /// Message text for this turn.
    pub fn text(&self) -> String {
        self.prompt.to_string()
    }
}

/// The game controller. Holds only read-only configuration.
#[derive(Debug, Getters)]
pub struct GameFlow {
    roster: AgentRoster,
    limit: PayloadLimit,
}

impl GameFlow {
    /// Creates a controller around a strategy roster.
    #[instrument(skip(roster), fields(strategies = ?roster.names()))]
    pub fn new(roster: AgentRoster, limit: PayloadLimit) -> Self {
        info!("Creating game flow");
        Self { roster, limit }
    }

    /// Starts a game on an empty `width × width` board with win length
    /// `width`.
    ///
    /// When the roster opens, its move is applied before rendering.
    ///
    /// # Errors
    ///
    /// Returns [`BotErrorKind::UnsupportedWidth`] if the board cannot be
    /// rendered under the payload limit, and [`BotErrorKind::NoStrategy`]
    /// if the roster must open but has no move.
    #[instrument(skip(self))]
    pub fn new_game(&self, game: &NewGame) -> Result<Turn, BotError> {
        let unsupported = || {
            BotError::new(BotErrorKind::UnsupportedWidth {
                width: game.width,
                max: self.limit.max_width(),
            })
        };
        if !self.limit.supports(game.width) {
            return Err(unsupported());
        }
        let board = Board::new(game.width, game.width).map_err(|_| unsupported())?;

        match game.starter {
            Starter::Human => Ok(Turn {
                prompt: Prompt::YourTurn,
                board,
                locked: false,
            }),
            Starter::Agent => {
                let (board, index) = self
                    .agent_reply(&board)?
                    .ok_or_else(|| BotError::new(BotErrorKind::NoStrategy))?;
                Ok(Self::after_agent_move(board, index))
            }
        }
    }

    /// Answers a human move.
    ///
    /// `board` already contains the human's mark at `index`. If that mark
    /// wins, the roster is not consulted.
    ///
    /// # Errors
    ///
    /// Returns [`BotErrorKind::IllegalAgentMove`] if a strategy picks a cell
    /// that cannot be played.
    #[instrument(skip(self, board), fields(occupied = board.occupied()))]
    pub fn respond(&self, index: usize, board: &Board) -> Result<Turn, BotError> {
        let human_won = board.is_winning_stroke(index);

        let reply = if human_won {
            debug!("Human completed a line, roster not consulted");
            None
        } else {
            self.agent_reply(board)?
        };

        let turn = match reply {
            Some((final_board, agent_index)) => Self::after_agent_move(final_board, agent_index),
            None => Turn {
                prompt: if human_won {
                    Prompt::YouWin
                } else {
                    Prompt::GameOver
                },
                board: board.clone(),
                locked: human_won,
            },
        };

        info!(prompt = %turn.prompt, locked = turn.locked, "Turn resolved");
        Ok(turn)
    }

    /// Applies the roster's move, if it has one.
    fn agent_reply(&self, board: &Board) -> Result<Option<(Board, usize)>, BotError> {
        let Some(choice) = self.roster.choose(board) else {
            return Ok(None);
        };
        let next = board.play(choice.index).map_err(|e| {
            debug!(error = %e, "Strategy returned an unplayable cell");
            BotError::new(BotErrorKind::IllegalAgentMove {
                strategy: choice.strategy,
                index: choice.index,
            })
        })?;
        debug!(strategy = choice.strategy, index = choice.index, "Roster moved");
        Ok(Some((next, choice.index)))
    }

    fn after_agent_move(board: Board, index: usize) -> Turn {
        let agent_won = board.is_winning_stroke(index);
        let prompt = if agent_won {
            Prompt::YouLose
        } else if board.is_full() {
            Prompt::GameOver
        } else {
            Prompt::YourTurn
        };
        Turn {
            prompt,
            board,
            locked: agent_won,
        }
    }
}

/// Next text after an inert button press, or `None` if the warning is
/// already escalated.
///
/// Escalation stops after one emphasis mark.
pub fn escalate_warning(current: &str) -> Option<String> {
    let escalated = format!("{WRONG_MOVE}!");
    if current == escalated {
        None
    } else if current == WRONG_MOVE {
        Some(escalated)
    } else {
        Some(WRONG_MOVE.to_string())
    }
}
