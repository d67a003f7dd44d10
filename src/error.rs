use thiserror::Error;

use crate::models::feedback::{Feedback, FeedbackLevel};

/// The application's error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    /// A credential field failed local validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The RGA/password pair did not match.
    #[error("Invalid RGA or password")]
    InvalidCredentials,

    /// A session is already active.
    #[error("Already signed in")]
    AlreadyLoggedIn,

    /// Another login attempt is still waiting on its delay.
    #[error("Login already in progress")]
    LoginInProgress,

    /// The intent needs an active session.
    #[error("Not signed in")]
    NotLoggedIn,

    /// The active role may not perform the intent.
    #[error("Action not permitted for the current role")]
    RoleNotPermitted,

    /// An emergency is already being handled.
    #[error("Emergency already in progress")]
    EmergencyInProgress,

    /// Location permission was refused.
    #[error("Location permission denied")]
    PermissionDenied,

    /// The device position could not be acquired.
    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    /// The session ended while the operation was in flight.
    #[error("Session ended before the operation completed")]
    SessionEnded,
}

/// A `Result` type that uses `AppError` as the error type.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Maps the error to the message shown to the user.
    ///
    /// Every variant is recoverable: the caller shows the feedback and the
    /// store is left in the state the failing operation defined.
    pub fn feedback(&self) -> Feedback {
        match self {
            AppError::Validation(msg) => {
                tracing::debug!("Validation error: {}", msg);
                Feedback::new(FeedbackLevel::Error, "Error", msg.clone())
            }

            AppError::InvalidCredentials => {
                tracing::warn!("Authentication failed: invalid credentials");
                Feedback::new(FeedbackLevel::Error, "Error", "Invalid RGA or password")
            }

            AppError::AlreadyLoggedIn => {
                tracing::debug!("Login rejected: session already active");
                Feedback::new(FeedbackLevel::Info, "Signed in", "You are already signed in")
            }

            AppError::LoginInProgress => {
                tracing::debug!("Login rejected: another attempt is pending");
                Feedback::new(FeedbackLevel::Info, "Please wait", "Signing in...")
            }

            AppError::NotLoggedIn => {
                tracing::warn!("Intent rejected: no active session");
                Feedback::new(FeedbackLevel::Error, "Error", "Please sign in first")
            }

            AppError::RoleNotPermitted => {
                tracing::warn!("Intent rejected: role not permitted");
                Feedback::new(
                    FeedbackLevel::Warning,
                    "Not available",
                    "Security staff cannot trigger emergencies. Switch to the student view to use the SOS button.",
                )
            }

            AppError::EmergencyInProgress => {
                tracing::debug!("Emergency re-entry ignored");
                Feedback::new(
                    FeedbackLevel::Info,
                    "Emergency in progress",
                    "Connecting with security...",
                )
            }

            AppError::PermissionDenied => {
                tracing::warn!("Location permission denied");
                Feedback::new(
                    FeedbackLevel::Error,
                    "Permission required",
                    "Location access is needed to send your position to campus security.",
                )
            }

            AppError::LocationUnavailable(reason) => {
                tracing::warn!("Location unavailable: {}", reason);
                Feedback::new(
                    FeedbackLevel::Warning,
                    "Approximate location",
                    "Could not get your exact position. An approximate campus location was sent instead.",
                )
            }

            AppError::SessionEnded => {
                tracing::debug!("Operation dropped: session ended");
                Feedback::new(FeedbackLevel::Info, "Signed out", "The session ended")
            }
        }
    }
}
