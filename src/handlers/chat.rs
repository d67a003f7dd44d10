use crate::error::Result;
use crate::models::feedback::Feedback;
use crate::services::chat as chat_service;
use crate::state::AppState;

pub async fn open_chat(state: &AppState) -> Result<Feedback> {
    chat_service::open_chat(state).await?;
    Ok(Feedback::info("Security chat", "Chat opened"))
}

pub async fn close_chat(state: &AppState) -> Result<Feedback> {
    chat_service::close_chat(state).await?;
    Ok(Feedback::info("Security chat", "Chat closed"))
}

pub async fn update_draft(state: &AppState, text: &str) -> Result<Feedback> {
    chat_service::update_draft(state, text).await?;
    Ok(Feedback::info("Security chat", "Draft updated"))
}

/// Sends `text`, or the current draft when `text` is `None`.
pub async fn send_message(state: &AppState, text: Option<&str>) -> Result<Feedback> {
    let text = match text {
        Some(text) => text.to_string(),
        None => state.read(|store| store.chat.draft.clone()).await,
    };

    match chat_service::send_chat_message(state, &text).await? {
        Some(message) => Ok(Feedback::info(
            "Security chat",
            format!("Sent at {}", message.time),
        )),
        None => Ok(Feedback::info("Security chat", "Type a message first")),
    }
}
