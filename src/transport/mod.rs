//! Messaging platform boundary.
//!
//! Handlers only see the transport-neutral [`Update`] and talk back through
//! [`MessagingClient`]. [`TelegramClient`] is the production implementation.

mod telegram;

pub use telegram::{TelegramClient, UpdateBatch};

use crate::error::BotError;
use crate::keyboard::Keyboard;
use serde::Deserialize;

/// Chat identifier.
pub type ChatId = i64;

/// Message identifier, unique within a chat.
pub type MessageId = i64;

/// Sender of an update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct User {
    /// Platform user id.
    pub id: i64,
    /// First name.
    #[serde(default)]
    pub first_name: String,
    /// Last name, if set.
    pub last_name: Option<String>,
    /// Username, if set.
    pub username: Option<String>,
}

impl User {
    /// `First Last (username, id=N)` for logs.
    pub fn verbose(&self) -> String {
        format!(
            "{} {} ({}, id={})",
            self.first_name,
            self.last_name.as_deref().unwrap_or("-"),
            self.username.as_deref().unwrap_or("-"),
            self.id
        )
    }
}

/// A text message sent to the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMessage {
    /// Chat the message arrived in.
    pub chat_id: ChatId,
    /// Message id.
    pub message_id: MessageId,
    /// Sender, absent for channel posts.
    pub from: Option<User>,
    /// Message text.
    pub text: String,
}

/// A keyboard button press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackQuery {
    /// Query id, used to acknowledge the press.
    pub id: String,
    /// Who pressed.
    pub from: User,
    /// Chat holding the keyboard.
    pub chat_id: ChatId,
    /// Message holding the keyboard.
    pub message_id: MessageId,
    /// Current text of that message.
    pub message_text: String,
    /// Current keyboard of that message.
    pub keyboard: Keyboard,
    /// Payload of the pressed button.
    pub data: String,
}

/// Inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// Text message.
    Message(TextMessage),
    /// Button press.
    Callback(CallbackQuery),
}

impl Update {
    /// Sender, when known.
    pub fn sender(&self) -> Option<&User> {
        match self {
            Update::Message(message) => message.from.as_ref(),
            Update::Callback(query) => Some(&query.from),
        }
    }

    /// Message text or callback payload.
    pub fn content(&self) -> &str {
        match self {
            Update::Message(message) => &message.text,
            Update::Callback(query) => &query.data,
        }
    }

    /// Chat the update belongs to.
    pub fn chat_id(&self) -> ChatId {
        match self {
            Update::Message(message) => message.chat_id,
            Update::Callback(query) => query.chat_id,
        }
    }
}

/// Identity of a sent message, needed to edit it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageHandle {
    /// Chat id.
    pub chat_id: ChatId,
    /// Message id.
    pub message_id: MessageId,
}

/// Outbound side of the messaging platform.
#[async_trait::async_trait]
pub trait MessagingClient: Send + Sync {
    /// Sends a new message, optionally with a keyboard.
    async fn send(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<MessageHandle, BotError>;

    /// Replaces the text and keyboard of an existing message.
    async fn edit(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        text: &str,
        keyboard: &Keyboard,
    ) -> Result<(), BotError>;

    /// Acknowledges a button press.
    async fn answer_callback(&self, callback_id: &str) -> Result<(), BotError>;
}
