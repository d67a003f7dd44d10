mod common;

use std::time::Duration;

use campus_guard::config::{DEFAULT_PASSWORD, DEFAULT_RGA};
use campus_guard::geolocation::ScriptedGeolocation;
use campus_guard::handlers::auth::LoginRequest;
use campus_guard::models::feedback::FeedbackLevel;
use campus_guard::models::session::{Prompt, Role, Tab};
use campus_guard::services::{auth, emergency};
use campus_guard::{AppError, Intent, dispatch};

use common::{sign_out, signed_in, test_state};

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_default_credentials_sign_in_as_student() {
        let state = test_state(ScriptedGeolocation::without_fix());
        let started = tokio::time::Instant::now();

        let session = auth::login(&state, "20241234", "123456").await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(2000));
        assert!(session.logged_in);
        assert_eq!(session.role, Role::Student);

        let snapshot = state.snapshot();
        assert!(snapshot.session.logged_in);
        assert_eq!(snapshot.session.role, Role::Student);
        assert_eq!(snapshot.active_tab, Tab::Home);
        assert!(!snapshot.login_pending);
        assert!(snapshot.capabilities.trigger_emergency);
        assert_eq!(snapshot.profile.as_ref().unwrap().rga, "20241234");
    }

    #[tokio::test(start_paused = true)]
    async fn test_any_other_pair_is_rejected() {
        let state = test_state(ScriptedGeolocation::without_fix());
        let attempts = [
            ("20241234", "654321"),
            ("20241235", "123456"),
            ("202412340", "123456"),
            ("20241234", "123456 "),
            ("abcdefgh", "password"),
        ];

        for (rga, password) in attempts {
            let result = auth::login(&state, rga, password).await;
            assert_eq!(result, Err(AppError::InvalidCredentials), "{}/{}", rga, password);
            let snapshot = state.snapshot();
            assert!(!snapshot.session.logged_in);
            assert!(!snapshot.login_pending);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_validation_fails_without_delay_or_state_change() {
        let state = test_state(ScriptedGeolocation::without_fix());
        let before = state.snapshot();
        let started = tokio::time::Instant::now();

        let blank = auth::login(&state, "", "123456").await;
        assert_eq!(
            blank,
            Err(AppError::Validation("Please fill in all fields".to_string()))
        );

        let short = auth::login(&state, "2024123", "123456").await;
        assert_eq!(
            short,
            Err(AppError::Validation("RGA must have at least 8 digits".to_string()))
        );

        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(*state.snapshot(), *before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_login_during_delay_is_refused() {
        let state = test_state(ScriptedGeolocation::without_fix());

        let first_state = state.clone();
        let first = tokio::spawn(async move {
            auth::login(&first_state, DEFAULT_RGA, DEFAULT_PASSWORD).await
        });

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(state.snapshot().login_pending);
        assert_eq!(
            auth::login(&state, DEFAULT_RGA, DEFAULT_PASSWORD).await,
            Err(AppError::LoginInProgress)
        );

        assert!(first.await.unwrap().is_ok());
        assert_eq!(
            auth::login(&state, DEFAULT_RGA, DEFAULT_PASSWORD).await,
            Err(AppError::AlreadyLoggedIn)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_needs_confirmation() {
        let state = signed_in(ScriptedGeolocation::without_fix()).await;

        assert!(!auth::confirm_logout(&state).await);
        assert!(state.snapshot().session.logged_in);

        auth::request_logout(&state).await.unwrap();
        assert_eq!(state.snapshot().prompt, Some(Prompt::ConfirmLogout));

        auth::cancel_logout(&state).await;
        let snapshot = state.snapshot();
        assert!(snapshot.session.logged_in);
        assert_eq!(snapshot.prompt, None);

        auth::request_logout(&state).await.unwrap();
        assert!(auth::confirm_logout(&state).await);
        assert!(!state.snapshot().session.logged_in);
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_resets_role_tab_and_alerts() {
        let state = signed_in(ScriptedGeolocation::without_fix()).await;
        emergency::trigger_emergency(&state).await.unwrap();
        auth::select_tab(&state, Tab::Map).await.unwrap();
        auth::toggle_role(&state).await.unwrap();

        let snapshot = state.snapshot();
        assert_eq!(snapshot.session.role, Role::Security);
        assert_eq!(snapshot.emergency.alerts.len(), 1);

        sign_out(&state).await;

        let snapshot = state.snapshot();
        assert!(!snapshot.session.logged_in);
        assert_eq!(snapshot.session.role, Role::Student);
        assert_eq!(snapshot.active_tab, Tab::Home);
        assert!(snapshot.emergency.alerts.is_empty());
        assert!(!snapshot.emergency.active);
        assert!(snapshot.profile.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_role_toggle_switches_capabilities() {
        let state = signed_in(ScriptedGeolocation::without_fix()).await;

        assert_eq!(auth::toggle_role(&state).await, Ok(Role::Security));
        let snapshot = state.snapshot();
        assert!(!snapshot.capabilities.trigger_emergency);
        assert!(snapshot.capabilities.monitor_alerts);
        assert_eq!(snapshot.profile.as_ref().unwrap().role_label, "Security");

        assert_eq!(auth::toggle_role(&state).await, Ok(Role::Student));
        assert!(state.snapshot().capabilities.trigger_emergency);
    }

    #[tokio::test(start_paused = true)]
    async fn test_signed_out_intents_are_rejected() {
        let state = test_state(ScriptedGeolocation::without_fix());
        assert_eq!(auth::toggle_role(&state).await, Err(AppError::NotLoggedIn));
        assert_eq!(
            auth::select_tab(&state, Tab::Profile).await,
            Err(AppError::NotLoggedIn)
        );
        assert_eq!(auth::request_logout(&state).await, Err(AppError::NotLoggedIn));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_turns_errors_into_feedback() {
        let state = test_state(ScriptedGeolocation::without_fix());

        let feedback = dispatch(
            &state,
            Intent::Login(LoginRequest::new("20241234", "wrong")),
        )
        .await;
        assert_eq!(feedback.level, FeedbackLevel::Error);
        assert_eq!(feedback.message, "Invalid RGA or password");

        let feedback = dispatch(
            &state,
            Intent::Login(LoginRequest::new("20241234", "123456")),
        )
        .await;
        assert_eq!(feedback.level, FeedbackLevel::Success);

        let feedback = dispatch(&state, Intent::SelectTab(Tab::Notifications)).await;
        assert_eq!(feedback.level, FeedbackLevel::Info);
        assert_eq!(state.snapshot().active_tab, Tab::Notifications);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_published_snapshots() {
        let state = test_state(ScriptedGeolocation::without_fix());
        let mut updates = state.subscribe();
        assert!(!updates.borrow_and_update().session.logged_in);

        auth::login(&state, DEFAULT_RGA, DEFAULT_PASSWORD).await.unwrap();

        assert!(updates.has_changed().unwrap());
        assert!(updates.borrow_and_update().session.logged_in);

        let json = state.snapshot().to_json().unwrap();
        assert!(json.contains("\"logged_in\":true"));
        assert!(json.contains("\"role\":\"student\""));
    }
}
