//! Update routing.
//!
//! A [`Dispatcher`] offers each update to a fixed, ordered list of
//! handlers. The first handler that claims the update ends the chain.
//! Handlers decide with a cheap shape check and must not touch the outside
//! world on the not-claimed path.

mod help;
mod logging;
mod new_game;
mod normal_move;
mod wrong_move;

pub use help::HelpHandler;
pub use logging::LoggingHandler;
pub use new_game::NewGameHandler;
pub use normal_move::NormalMoveHandler;
pub use wrong_move::WrongMoveHandler;

use crate::error::BotError;
use crate::game::GameFlow;
use crate::transport::{MessagingClient, Update};
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

/// One link of the chain.
#[async_trait::async_trait]
pub trait UpdateHandler: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Handles the update. `Ok(true)` claims it and stops the chain.
    async fn handle(&self, update: &Update) -> Result<bool, BotError>;
}

/// How an update left the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Claimed and handled.
    Claimed(&'static str),
    /// Claimed, but handling failed.
    Failed(&'static str),
    /// Nobody claimed it.
    Unclaimed,
}

/// Ordered chain of handlers.
pub struct Dispatcher {
    handlers: Vec<Box<dyn UpdateHandler>>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("handlers", &self.handler_names())
            .finish()
    }
}

impl Dispatcher {
    /// Creates a dispatcher trying `handlers` in order.
    pub fn new(handlers: Vec<Box<dyn UpdateHandler>>) -> Self {
        Self { handlers }
    }

    /// The bot's chain: logging, help, new game, normal move, wrong move.
    #[instrument(skip_all)]
    pub fn standard(client: Arc<dyn MessagingClient>, flow: Arc<GameFlow>) -> Self {
        let max_width = flow.limit().max_width();
        Self::new(vec![
            Box::new(LoggingHandler),
            Box::new(HelpHandler::new(client.clone(), max_width)),
            Box::new(NewGameHandler::new(client.clone(), flow.clone())),
            Box::new(NormalMoveHandler::new(client.clone(), flow)),
            Box::new(WrongMoveHandler::new(client)),
        ])
    }

    /// Handler names in priority order.
    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Offers `update` to each handler until one claims it.
    ///
    /// Handler errors are logged here and never escape: one failed update
    /// does not stop the bot.
    #[instrument(skip_all, fields(chat_id = update.chat_id()))]
    pub async fn dispatch(&self, update: &Update) -> Dispatch {
        for handler in &self.handlers {
            match handler.handle(update).await {
                Ok(true) => {
                    debug!(handler = handler.name(), "Update claimed");
                    return Dispatch::Claimed(handler.name());
                }
                Ok(false) => {}
                Err(e) if e.is_config() => {
                    error!(handler = handler.name(), error = %e, "Update aborted");
                    return Dispatch::Failed(handler.name());
                }
                Err(e) => {
                    warn!(handler = handler.name(), error = %e, "Update not delivered");
                    return Dispatch::Failed(handler.name());
                }
            }
        }
        debug!("Update not claimed");
        Dispatch::Unclaimed
    }
}
