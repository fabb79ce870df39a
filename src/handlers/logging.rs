//! Observer that logs every update.

use super::UpdateHandler;
use crate::error::BotError;
use crate::transport::Update;
use tracing::info;

/// Logs the sender and content of each update, then lets it through.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHandler;

#[async_trait::async_trait]
impl UpdateHandler for LoggingHandler {
    fn name(&self) -> &'static str {
        "logging"
    }

    async fn handle(&self, update: &Update) -> Result<bool, BotError> {
        let from = update
            .sender()
            .map(|user| user.verbose())
            .unwrap_or_else(|| "unknown".to_string());
        info!(%from, content = %update.content(), "->");
        Ok(false)
    }
}
