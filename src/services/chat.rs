use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::error::{AppError, Result};
use crate::models::chat::{ChatMessage, ChatSession, Sender};
use crate::state::AppState;

/// The scripted answer from campus security.
pub const SECURITY_REPLY: &str = "Received! We are checking the situation.";

/// The first line of every session's transcript.
pub const SECURITY_GREETING: &str = "Hello! How can we help you?";

/// Opens a fresh transcript with the security greeting.
pub fn seed(chat: &mut ChatSession) {
    chat.append(Sender::Security, SECURITY_GREETING);
}

/// Starts the worker that answers chat messages for one session.
///
/// Each send enqueues its send instant; the worker answers them one at a
/// time, each no earlier than `sent_at + chat_reply_delay`, so replies arrive
/// in send order. Replies tagged with a stale epoch are dropped and stop the
/// worker.
///
/// # Returns
///
/// The queue the send path pushes into.
pub fn start_reply_worker(state: &AppState, epoch: u64) -> mpsc::UnboundedSender<Instant> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Instant>();
    let worker_state = state.clone();
    let delay = state.config.chat_reply_delay;

    state.tasks.spawn("chat-replies", async move {
        while let Some(sent_at) = rx.recv().await {
            tokio::time::sleep_until(sent_at + delay).await;

            let delivered = worker_state
                .mutate(|store| {
                    if store.epoch != epoch {
                        return false;
                    }
                    store.chat.append(Sender::Security, SECURITY_REPLY);
                    true
                })
                .await;

            if !delivered {
                tracing::debug!("Chat worker for epoch {} stopped", epoch);
                break;
            }
            tracing::debug!("💬 Security replied");
        }
    });

    tx
}

/// Sends a chat message to security.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `text` - The message text; surrounding whitespace is dropped.
///
/// # Returns
///
/// The stored message, or `None` when the text was blank.
pub async fn send_chat_message(state: &AppState, text: &str) -> Result<Option<ChatMessage>> {
    let text = text.trim();

    state
        .mutate(|store| {
            if !store.session.logged_in {
                return Err(AppError::NotLoggedIn);
            }
            if text.is_empty() {
                tracing::debug!("Blank chat message ignored");
                return Ok(None);
            }

            let message = store.chat.append(Sender::User, text);
            store.chat.draft.clear();

            match &store.chat_replies {
                Some(replies) => {
                    if replies.send(Instant::now()).is_err() {
                        tracing::warn!("Chat reply worker is gone; no reply will follow");
                    }
                }
                None => tracing::warn!("No chat reply worker for this session"),
            }

            tracing::info!("💬 Chat message {} sent", message.id);
            Ok(Some(message))
        })
        .await
}

/// Shows the chat overlay.
pub async fn open_chat(state: &AppState) -> Result<()> {
    set_open(state, true).await
}

/// Hides the chat overlay. The transcript is kept.
pub async fn close_chat(state: &AppState) -> Result<()> {
    set_open(state, false).await
}

/// Replaces the unsent draft.
pub async fn update_draft(state: &AppState, text: &str) -> Result<()> {
    state
        .mutate(|store| {
            if !store.session.logged_in {
                return Err(AppError::NotLoggedIn);
            }
            store.chat.draft = text.to_string();
            Ok(())
        })
        .await
}

async fn set_open(state: &AppState, open: bool) -> Result<()> {
    state
        .mutate(|store| {
            if !store.session.logged_in {
                return Err(AppError::NotLoggedIn);
            }
            store.chat.open = open;
            Ok(())
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_transcript_starts_with_the_greeting() {
        let mut chat = ChatSession::default();
        seed(&mut chat);

        let messages = chat.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::Security);
        assert_eq!(messages[0].message, SECURITY_GREETING);
        assert!(!chat.open);
        assert!(chat.draft.is_empty());
    }
}
