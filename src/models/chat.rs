use chrono::Local;
use serde::Serialize;

use crate::ids::TimeIds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Security,
}

/// One line of the security chat transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub id: i64,
    pub sender: Sender,
    pub message: String,
    /// Local wall-clock time, `HH:MM`.
    pub time: String,
}

/// Chat overlay state: visibility, draft buffer and transcript.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    pub open: bool,
    pub draft: String,
    messages: Vec<ChatMessage>,
    ids: TimeIds,
}

impl ChatSession {
    /// Appends a message stamped with the current local time.
    pub fn append(&mut self, sender: Sender, message: impl Into<String>) -> ChatMessage {
        let message = ChatMessage {
            id: self.ids.next(),
            sender,
            message: message.into(),
            time: Local::now().format("%H:%M").to_string(),
        };
        self.messages.push(message.clone());
        message
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Empties the transcript and the draft and hides the overlay.
    pub fn clear(&mut self) {
        self.open = false;
        self.draft.clear();
        self.messages.clear();
    }
}
