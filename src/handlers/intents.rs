use crate::error::Result;
use crate::handlers::{auth, chat, emergency};
use crate::models::feedback::Feedback;
use crate::models::session::Tab;
use crate::state::AppState;

/// Everything the presentation layer can ask the store to do.
#[derive(Debug, Clone)]
pub enum Intent {
    Login(auth::LoginRequest),
    RequestLogout,
    ConfirmLogout,
    CancelLogout,
    TriggerEmergency,
    ToggleRole,
    SelectTab(Tab),
    OpenChat,
    CloseChat,
    UpdateChatDraft(String),
    /// Sends the given text, or the draft when `None`.
    SendChatMessage(Option<String>),
}

/// Applies an intent and returns what the user should see.
///
/// Failures never escape: they are turned into `Feedback` through
/// `AppError::feedback`.
pub async fn dispatch(state: &AppState, intent: Intent) -> Feedback {
    tracing::debug!("➡️ Dispatching {:?}", intent);
    match handle(state, intent).await {
        Ok(feedback) => feedback,
        Err(e) => e.feedback(),
    }
}

async fn handle(state: &AppState, intent: Intent) -> Result<Feedback> {
    match intent {
        Intent::Login(payload) => auth::login(state, payload).await,
        Intent::RequestLogout => auth::request_logout(state).await,
        Intent::ConfirmLogout => Ok(auth::confirm_logout(state).await),
        Intent::CancelLogout => Ok(auth::cancel_logout(state).await),
        Intent::TriggerEmergency => emergency::trigger_emergency(state).await,
        Intent::ToggleRole => auth::toggle_role(state).await,
        Intent::SelectTab(tab) => auth::select_tab(state, tab).await,
        Intent::OpenChat => chat::open_chat(state).await,
        Intent::CloseChat => chat::close_chat(state).await,
        Intent::UpdateChatDraft(text) => chat::update_draft(state, &text).await,
        Intent::SendChatMessage(text) => chat::send_message(state, text.as_deref()).await,
    }
}
