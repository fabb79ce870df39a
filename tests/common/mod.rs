//! Shared test fixtures: an in-memory messaging client and update builders.

#![allow(dead_code)]

use gridbot::{
    BotError, BotErrorKind, CallbackQuery, ChatId, Keyboard, MessageHandle, MessageId,
    MessagingClient, TextMessage, Update, User,
};
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

pub const CHAT: ChatId = 42;

/// Everything the bot tried to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Sent {
        message_id: MessageId,
        text: String,
        keyboard: Option<Keyboard>,
    },
    Edited {
        message_id: MessageId,
        text: String,
        keyboard: Keyboard,
    },
    Answered(String),
}

/// Messaging client that records calls instead of talking to a server.
#[derive(Debug, Default)]
pub struct RecordingClient {
    log: Mutex<Vec<Outbound>>,
    next_id: AtomicI64,
    fail_edits: bool,
}

impl RecordingClient {
    pub fn failing_edits() -> Self {
        Self {
            fail_edits: true,
            ..Self::default()
        }
    }

    pub fn log(&self) -> Vec<Outbound> {
        self.log.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Outbound> {
        self.log.lock().unwrap().last().cloned()
    }

    /// Most recent send or edit, skipping acknowledgements.
    pub fn last_surface(&self) -> Option<(MessageId, String, Keyboard)> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find_map(|entry| match entry {
                Outbound::Sent {
                    message_id,
                    text,
                    keyboard,
                } => Some((*message_id, text.clone(), keyboard.clone().unwrap_or_default())),
                Outbound::Edited {
                    message_id,
                    text,
                    keyboard,
                } => Some((*message_id, text.clone(), keyboard.clone())),
                Outbound::Answered(_) => None,
            })
    }

    fn record(&self, entry: Outbound) {
        self.log.lock().unwrap().push(entry);
    }
}

#[async_trait::async_trait]
impl MessagingClient for RecordingClient {
    async fn send(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<MessageHandle, BotError> {
        let message_id = self.next_id.fetch_add(1, Ordering::SeqCst) + 100;
        self.record(Outbound::Sent {
            message_id,
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        Ok(MessageHandle {
            chat_id,
            message_id,
        })
    }

    async fn edit(
        &self,
        _chat_id: ChatId,
        message_id: MessageId,
        text: &str,
        keyboard: &Keyboard,
    ) -> Result<(), BotError> {
        if self.fail_edits {
            return Err(BotError::new(BotErrorKind::Transport(
                "connection reset".to_string(),
            )));
        }
        self.record(Outbound::Edited {
            message_id,
            text: text.to_string(),
            keyboard: keyboard.clone(),
        });
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), BotError> {
        self.record(Outbound::Answered(callback_id.to_string()));
        Ok(())
    }
}

pub fn player() -> User {
    User {
        id: 7,
        first_name: "Ada".to_string(),
        last_name: Some("Lovelace".to_string()),
        username: Some("ada".to_string()),
    }
}

pub fn text(text: &str) -> Update {
    Update::Message(TextMessage {
        chat_id: CHAT,
        message_id: 1,
        from: Some(player()),
        text: text.to_string(),
    })
}

/// A press on the button at `index` (row-major) of a message's keyboard.
pub fn press(message_id: MessageId, message_text: &str, keyboard: &Keyboard, index: usize) -> Update {
    let data = keyboard
        .buttons()
        .nth(index)
        .map(|button| button.callback_data().clone())
        .unwrap_or_default();
    raw_press(message_id, message_text, keyboard, &data)
}

/// A press carrying arbitrary callback data.
pub fn raw_press(
    message_id: MessageId,
    message_text: &str,
    keyboard: &Keyboard,
    data: &str,
) -> Update {
    Update::Callback(CallbackQuery {
        id: format!("cb-{message_id}-{data}"),
        from: player(),
        chat_id: CHAT,
        message_id,
        message_text: message_text.to_string(),
        keyboard: keyboard.clone(),
        data: data.to_string(),
    })
}

/// Button labels in row-major order.
pub fn labels(keyboard: &Keyboard) -> Vec<String> {
    keyboard.buttons().map(|b| b.text().clone()).collect()
}
