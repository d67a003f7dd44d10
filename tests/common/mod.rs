#![allow(dead_code)]

use std::sync::Arc;

use campus_guard::config::{DEFAULT_PASSWORD, DEFAULT_RGA};
use campus_guard::geolocation::ScriptedGeolocation;
use campus_guard::services::auth;
use campus_guard::{AppState, Config};

/// A logged-out store backed by `provider`.
pub fn test_state(provider: ScriptedGeolocation) -> AppState {
    AppState::new(Config::default(), Arc::new(provider))
}

/// A store with the default student signed in.
pub async fn signed_in(provider: ScriptedGeolocation) -> AppState {
    let state = test_state(provider);
    auth::login(&state, DEFAULT_RGA, DEFAULT_PASSWORD)
        .await
        .expect("default credentials should sign in");
    state
}

/// Opens and confirms the sign-out prompt.
pub async fn sign_out(state: &AppState) {
    auth::request_logout(state).await.expect("signed in");
    assert!(auth::confirm_logout(state).await);
}
