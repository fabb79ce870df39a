//! Telegram Bot API client.

use super::{
    CallbackQuery, ChatId, MessageHandle, MessageId, MessagingClient, TextMessage, Update, User,
};
use crate::error::{BotError, BotErrorKind};
use crate::keyboard::Keyboard;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Extra time allowed on top of the long-poll timeout before the HTTP
/// request itself gives up.
const HTTP_GRACE: Duration = Duration::from_secs(10);

/// Envelope of every Bot API response.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Unwraps a successful result, mapping refusals to [`BotErrorKind::Api`].
    fn into_result(self, method: &str) -> Result<T, BotError> {
        match self {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse { description, .. } => {
                let description = description.unwrap_or_else(|| "no description".to_string());
                warn!(method, %description, "Bot API call rejected");
                Err(BotError::new(BotErrorKind::Api {
                    method: method.to_string(),
                    description,
                }))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireChat {
    id: ChatId,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    message_id: MessageId,
    chat: WireChat,
    from: Option<User>,
    text: Option<String>,
    reply_markup: Option<Keyboard>,
}

#[derive(Debug, Deserialize)]
struct WireCallback {
    id: String,
    from: User,
    message: Option<WireMessage>,
    data: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUpdate {
    update_id: i64,
    message: Option<WireMessage>,
    callback_query: Option<WireCallback>,
}

impl WireUpdate {
    /// Converts to an [`Update`], dropping kinds the bot does not handle.
    fn into_update(self) -> Option<Update> {
        if let Some(message) = self.message {
            return Some(Update::Message(TextMessage {
                chat_id: message.chat.id,
                message_id: message.message_id,
                from: message.from,
                text: message.text?,
            }));
        }

        let query = self.callback_query?;
        // Inline-mode callbacks have no message to edit.
        let message = query.message?;
        Some(Update::Callback(CallbackQuery {
            id: query.id,
            from: query.from,
            chat_id: message.chat.id,
            message_id: message.message_id,
            message_text: message.text.unwrap_or_default(),
            keyboard: message.reply_markup.unwrap_or_default(),
            data: query.data?,
        }))
    }
}

/// Updates fetched by one poll.
#[derive(Debug, Default)]
pub struct UpdateBatch {
    /// Offset for the next poll, if anything was received.
    pub next_offset: Option<i64>,
    /// Updates the bot understands, in arrival order.
    pub updates: Vec<Update>,
}

/// HTTP client for the Telegram Bot API.
pub struct TelegramClient {
    endpoint: String,
    http: reqwest::Client,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // endpoint embeds the token
        f.debug_struct("TelegramClient").finish_non_exhaustive()
    }
}

impl TelegramClient {
    /// Creates a client for `api_url` authenticated by `token`.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the HTTP client cannot be built.
    #[instrument(skip(token))]
    pub fn new(api_url: &str, token: &str, poll_timeout: Duration) -> Result<Self, BotError> {
        let http = reqwest::Client::builder()
            .timeout(poll_timeout + HTTP_GRACE)
            .build()?;
        info!("Telegram client ready");
        Ok(Self {
            endpoint: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
            http,
        })
    }

    /// Calls a Bot API method and unwraps the response envelope.
    async fn call<R: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<R, BotError> {
        debug!(method, "Calling Bot API");
        let response: ApiResponse<R> = self
            .http
            .post(format!("{}/{}", self.endpoint, method))
            .json(&params)
            .send()
            .await?
            .json()
            .await?;

        response.into_result(method)
    }

    /// Long-polls for updates starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns transport or API errors; the caller retries.
    #[instrument(skip(self))]
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout: Duration,
    ) -> Result<UpdateBatch, BotError> {
        let raw: Vec<WireUpdate> = self
            .call(
                "getUpdates",
                json!({
                    "offset": offset,
                    "timeout": timeout.as_secs(),
                    "allowed_updates": ["message", "callback_query"],
                }),
            )
            .await?;

        let next_offset = raw.iter().map(|u| u.update_id + 1).max();
        let received = raw.len();
        let updates: Vec<Update> = raw.into_iter().filter_map(WireUpdate::into_update).collect();
        debug!(received, usable = updates.len(), ?next_offset, "Polled updates");

        Ok(UpdateBatch {
            next_offset,
            updates,
        })
    }
}

#[async_trait::async_trait]
impl MessagingClient for TelegramClient {
    #[instrument(skip(self, keyboard))]
    async fn send(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<MessageHandle, BotError> {
        let mut params = json!({ "chat_id": chat_id, "text": text });
        if let Some(keyboard) = keyboard {
            params["reply_markup"] = json!(keyboard);
        }
        let message: WireMessage = self.call("sendMessage", params).await?;
        Ok(MessageHandle {
            chat_id: message.chat.id,
            message_id: message.message_id,
        })
    }

    #[instrument(skip(self, keyboard))]
    async fn edit(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        text: &str,
        keyboard: &Keyboard,
    ) -> Result<(), BotError> {
        // Result is the edited message, or `true` for inline messages.
        let _: serde_json::Value = self
            .call(
                "editMessageText",
                json!({
                    "chat_id": chat_id,
                    "message_id": message_id,
                    "text": text,
                    "reply_markup": keyboard,
                }),
            )
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn answer_callback(&self, callback_id: &str) -> Result<(), BotError> {
        let _: bool = self
            .call(
                "answerCallbackQuery",
                json!({ "callback_query_id": callback_id }),
            )
            .await?;
        Ok(())
    }
}
