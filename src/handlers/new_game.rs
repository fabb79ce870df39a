//! `/new_game_<N>x<N>_player<1|2>`.

use super::UpdateHandler;
use crate::command::NewGame;
use crate::error::BotError;
use crate::game::GameFlow;
use crate::transport::{MessagingClient, Update};
use std::sync::Arc;
use tracing::{info, instrument};

/// Starts a game and sends the first board.
pub struct NewGameHandler {
    client: Arc<dyn MessagingClient>,
    flow: Arc<GameFlow>,
}

impl NewGameHandler {
    /// Creates the handler.
    pub fn new(client: Arc<dyn MessagingClient>, flow: Arc<GameFlow>) -> Self {
        Self { client, flow }
    }
}

#[async_trait::async_trait]
impl UpdateHandler for NewGameHandler {
    fn name(&self) -> &'static str {
        "new_game"
    }

    #[instrument(skip_all)]
    async fn handle(&self, update: &Update) -> Result<bool, BotError> {
        let Update::Message(message) = update else {
            return Ok(false);
        };
        let Some(game) = NewGame::parse(&message.text) else {
            return Ok(false);
        };

        let max = self.flow.limit().max_width();
        if !self.flow.limit().supports(game.width) {
            let text = format!("Board size {0}x{0} is not supported, pick 1 to {max}", game.width);
            self.client.send(message.chat_id, &text, None).await?;
            info!(width = game.width, max, "<- unsupported size");
            return Ok(true);
        }

        let turn = self.flow.new_game(&game)?;
        let handle = self
            .client
            .send(message.chat_id, &turn.text(), Some(&turn.keyboard()))
            .await?;
        info!(
            chat_id = handle.chat_id,
            message_id = handle.message_id,
            width = game.width,
            starter = ?game.starter,
            prompt = %turn.prompt(),
            "<- new board"
        );
        Ok(true)
    }
}
