use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::session::{Prompt, Role, Session, Tab};
use crate::services::chat;
use crate::state::AppState;
use crate::validation::auth::validate_login_form;

/// Compares the submitted pair against the configured account.
///
/// Both fields are always compared so the check takes the same time whichever
/// field is wrong.
fn verify_credentials(config: &Config, rga: &str, password: &str) -> bool {
    let mut password_bytes = password.as_bytes().to_vec();
    let rga_ok = rga.as_bytes().ct_eq(config.rga.as_bytes());
    let password_ok = password_bytes.ct_eq(config.password.as_bytes());
    let result: bool = (rga_ok & password_ok).into();

    password_bytes.zeroize();
    tracing::debug!("Credential verification completed");
    result
}

/// Authenticates the user.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `rga` - The student registration identifier.
/// * `password` - The password.
///
/// # Returns
///
/// A `Result` containing the new `Session`.
pub async fn login(state: &AppState, rga: &str, password: &str) -> Result<Session> {
    validate_login_form(rga, password)?;

    state
        .mutate(|store| {
            if store.session.logged_in {
                return Err(AppError::AlreadyLoggedIn);
            }
            if store.login_pending {
                return Err(AppError::LoginInProgress);
            }
            store.login_pending = true;
            Ok(())
        })
        .await?;

    tracing::debug!("🔐 Authenticating RGA: {}", rga);
    tokio::time::sleep(state.config.login_delay).await;

    if !verify_credentials(&state.config, rga, password) {
        state.mutate(|store| store.login_pending = false).await;
        return Err(AppError::InvalidCredentials);
    }

    let session = state
        .mutate(|store| {
            store.login_pending = false;
            store.session = Session::student(rga);
            store.epoch += 1;
            store.active_tab = Tab::Home;
            store.prompt = None;
            store.emergency.reset();
            store.chat.clear();
            chat::seed(&mut store.chat);
            store.chat_replies = Some(chat::start_reply_worker(state, store.epoch));
            store.session.clone()
        })
        .await;

    tracing::info!(
        "✅ Signed in: {} (session {:?})",
        session.user_id(),
        session.session_id
    );
    Ok(session)
}

/// Opens the sign-out confirmation prompt.
pub async fn request_logout(state: &AppState) -> Result<()> {
    state
        .mutate(|store| {
            if !store.session.logged_in {
                return Err(AppError::NotLoggedIn);
            }
            store.prompt = Some(Prompt::ConfirmLogout);
            Ok(())
        })
        .await
}

/// Closes the sign-out prompt without signing out.
pub async fn cancel_logout(state: &AppState) {
    state.mutate(|store| store.prompt = None).await;
    tracing::debug!("Logout cancelled");
}

/// Signs out if the confirmation prompt is open.
///
/// Cancels the cooldown timer and the chat reply worker before resetting the
/// session, so no deferred work lands on the next session.
///
/// # Returns
///
/// `true` if the session was ended, `false` if no prompt was open.
pub async fn confirm_logout(state: &AppState) -> bool {
    let confirmed = state
        .read(|store| store.prompt == Some(Prompt::ConfirmLogout))
        .await;
    if !confirmed {
        tracing::debug!("Logout confirmation ignored: no prompt open");
        return false;
    }

    state.tasks.cancel_all();
    let user_id = state
        .mutate(|store| {
            let user_id = store.session.user_id();
            store.end_session();
            user_id
        })
        .await;

    tracing::info!("👋 Signed out: {}", user_id);
    true
}

/// Switches between the student and security views.
///
/// # Returns
///
/// The role now active.
pub async fn toggle_role(state: &AppState) -> Result<Role> {
    let role = state
        .mutate(|store| {
            if !store.session.logged_in {
                return Err(AppError::NotLoggedIn);
            }
            store.session.role = store.session.role.toggled();
            Ok(store.session.role)
        })
        .await?;

    tracing::info!("🔁 Role switched to {:?}", role);
    Ok(role)
}

/// Changes the visible tab.
pub async fn select_tab(state: &AppState, tab: Tab) -> Result<()> {
    state
        .mutate(|store| {
            if !store.session.logged_in {
                return Err(AppError::NotLoggedIn);
            }
            store.active_tab = tab;
            Ok(())
        })
        .await
}
