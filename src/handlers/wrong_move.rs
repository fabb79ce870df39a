//! Presses on inert cells.

use super::UpdateHandler;
use crate::error::BotError;
use crate::game::escalate_warning;
use crate::payload::CallbackPayload;
use crate::transport::{MessagingClient, Update};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Replaces the prompt with a warning, keeping the board as it is.
pub struct WrongMoveHandler {
    client: Arc<dyn MessagingClient>,
}

impl WrongMoveHandler {
    /// Creates the handler.
    pub fn new(client: Arc<dyn MessagingClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl UpdateHandler for WrongMoveHandler {
    fn name(&self) -> &'static str {
        "wrong_move"
    }

    #[instrument(skip_all)]
    async fn handle(&self, update: &Update) -> Result<bool, BotError> {
        let Update::Callback(query) = update else {
            return Ok(false);
        };
        if !CallbackPayload::is_occupied_cell(&query.data) {
            return Ok(false);
        }

        match escalate_warning(&query.message_text) {
            Some(text) => {
                self.client
                    .edit(query.chat_id, query.message_id, &text, &query.keyboard)
                    .await?;
                info!(chat_id = query.chat_id, message_id = query.message_id, %text, "<- warning");
            }
            // The platform rejects edits that change nothing.
            None => debug!("Warning already escalated"),
        }

        if let Err(e) = self.client.answer_callback(&query.id).await {
            warn!(error = %e, "Failed to acknowledge press");
        }
        Ok(true)
    }
}
