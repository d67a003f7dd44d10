use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::Result;
use crate::models::feedback::Feedback;
use crate::models::session::{Role, Tab};
use crate::services::auth as auth_service;
use crate::state::AppState;

/// The sign-in form.
#[derive(Deserialize, Clone, Zeroize, ZeroizeOnDrop)]
pub struct LoginRequest {
    pub rga: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(rga: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            rga: rga.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("rga", &self.rga)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Handles the sign-in form.
pub async fn login(state: &AppState, payload: LoginRequest) -> Result<Feedback> {
    tracing::info!("🔐 Login attempt - RGA: {}", payload.rga);
    let session = auth_service::login(state, &payload.rga, &payload.password).await?;

    Ok(Feedback::success(
        "Welcome",
        format!("Signed in as {}", session.rga.unwrap_or_default()),
    ))
}

/// Handles the profile tab's sign-out action by opening the confirmation.
pub async fn request_logout(state: &AppState) -> Result<Feedback> {
    auth_service::request_logout(state).await?;
    Ok(Feedback::info(
        "Sign out",
        "Are you sure you want to leave the app?",
    ))
}

/// Handles the "Sign out" choice of the confirmation prompt.
pub async fn confirm_logout(state: &AppState) -> Feedback {
    if auth_service::confirm_logout(state).await {
        Feedback::info("Signed out", "See you soon")
    } else {
        Feedback::info("Sign out", "Nothing to confirm")
    }
}

/// Handles the "Cancel" choice of the confirmation prompt.
pub async fn cancel_logout(state: &AppState) -> Feedback {
    auth_service::cancel_logout(state).await;
    Feedback::info("Sign out", "Cancelled")
}

/// Handles the role switch used to preview the security view.
pub async fn toggle_role(state: &AppState) -> Result<Feedback> {
    let role = auth_service::toggle_role(state).await?;
    let message = match role {
        Role::Student => "Student view: the SOS button is available",
        Role::Security => "Security view: monitoring active alerts",
    };
    Ok(Feedback::info("View changed", message))
}

pub async fn select_tab(state: &AppState, tab: Tab) -> Result<Feedback> {
    auth_service::select_tab(state, tab).await?;
    Ok(Feedback::info("Navigation", format!("{:?}", tab)))
}
