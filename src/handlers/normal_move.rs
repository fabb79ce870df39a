//! Presses on actionable cells.

use super::UpdateHandler;
use crate::error::BotError;
use crate::game::GameFlow;
use crate::payload::CallbackPayload;
use crate::transport::{MessagingClient, Update};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Decodes the human's move, lets the roster answer and edits the board in
/// place.
pub struct NormalMoveHandler {
    client: Arc<dyn MessagingClient>,
    flow: Arc<GameFlow>,
}

impl NormalMoveHandler {
    /// Creates the handler.
    pub fn new(client: Arc<dyn MessagingClient>, flow: Arc<GameFlow>) -> Self {
        Self { client, flow }
    }
}

#[async_trait::async_trait]
impl UpdateHandler for NormalMoveHandler {
    fn name(&self) -> &'static str {
        "normal_move"
    }

    #[instrument(skip_all)]
    async fn handle(&self, update: &Update) -> Result<bool, BotError> {
        let Update::Callback(query) = update else {
            return Ok(false);
        };
        if !CallbackPayload::is_move(&query.data) {
            return Ok(false);
        }
        let (index, board) = match CallbackPayload::parse(&query.data) {
            Ok(CallbackPayload::Move { index, board }) => (index, board),
            Ok(CallbackPayload::OccupiedCell) => return Ok(false),
            Err(e) => {
                debug!(error = %e, "Ignoring undecodable move");
                return Ok(false);
            }
        };

        let turn = self.flow.respond(index, &board)?;
        self.client
            .edit(query.chat_id, query.message_id, &turn.text(), &turn.keyboard())
            .await?;
        info!(
            chat_id = query.chat_id,
            message_id = query.message_id,
            index,
            prompt = %turn.prompt(),
            locked = turn.locked(),
            "<- board edited"
        );

        if let Err(e) = self.client.answer_callback(&query.id).await {
            warn!(error = %e, "Failed to acknowledge press");
        }
        Ok(true)
    }
}
