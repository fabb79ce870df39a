//! Long-polling loop.

use crate::handlers::Dispatcher;
use crate::transport::TelegramClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Pulls updates from Telegram and feeds them to the dispatcher.
#[derive(Debug)]
pub struct Bot {
    client: Arc<TelegramClient>,
    dispatcher: Dispatcher,
    poll_timeout: Duration,
    retry_delay: Duration,
}

impl Bot {
    /// Creates a bot.
    pub fn new(
        client: Arc<TelegramClient>,
        dispatcher: Dispatcher,
        poll_timeout: Duration,
        retry_delay: Duration,
    ) -> Self {
        Self {
            client,
            dispatcher,
            poll_timeout,
            retry_delay,
        }
    }

    /// Polls until Ctrl-C.
    ///
    /// Updates are handled one at a time in arrival order; a send always
    /// completes before any later edit of the same message is attempted.
    /// Poll failures are logged and retried after `retry_delay`.
    #[instrument(skip(self))]
    pub async fn run(self) {
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        let mut offset = None;
        info!(handlers = ?self.dispatcher.handler_names(), "Start listening");

        loop {
            let batch = tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested");
                    break;
                }
                batch = self.client.get_updates(offset, self.poll_timeout) => batch,
            };

            match batch {
                Ok(batch) => {
                    if batch.next_offset.is_some() {
                        offset = batch.next_offset;
                    }
                    for update in &batch.updates {
                        self.dispatcher.dispatch(update).await;
                    }
                }
                Err(e) => {
                    warn!(error = %e, delay = ?self.retry_delay, "Polling failed, retrying");
                    tokio::time::sleep(self.retry_delay).await;
                }
            }
        }
    }
}
