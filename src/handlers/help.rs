//! `/start` and `/help`.

use super::UpdateHandler;
use crate::command::{NEW_GAME_PREFIX, command_name};
use crate::error::BotError;
use crate::transport::{MessagingClient, Update};
use std::sync::Arc;
use tracing::{info, instrument};

/// Replies with the command grammar.
pub struct HelpHandler {
    client: Arc<dyn MessagingClient>,
    max_width: usize,
}

impl HelpHandler {
    /// Creates the handler; `max_width` is quoted in the reply.
    pub fn new(client: Arc<dyn MessagingClient>, max_width: usize) -> Self {
        Self { client, max_width }
    }

    /// Usage text.
    pub fn usage(&self) -> String {
        format!(
            "Start a game with {NEW_GAME_PREFIX}<N>x<N>_player<1|2>\n\
             N is the board width and the run needed to win (1 to {max}).\n\
             player1: you move first. player2: I move first.\n\
             Example: {NEW_GAME_PREFIX}3x3_player1",
            max = self.max_width
        )
    }
}

#[async_trait::async_trait]
impl UpdateHandler for HelpHandler {
    fn name(&self) -> &'static str {
        "help"
    }

    #[instrument(skip_all)]
    async fn handle(&self, update: &Update) -> Result<bool, BotError> {
        let Update::Message(message) = update else {
            return Ok(false);
        };
        if !matches!(command_name(&message.text), "/start" | "/help") {
            return Ok(false);
        }
        self.client.send(message.chat_id, &self.usage(), None).await?;
        info!(chat_id = message.chat_id, "<- usage");
        Ok(true)
    }
}
