use crate::error::Result;
use crate::models::feedback::{Feedback, FeedbackLevel};
use crate::services::emergency as emergency_service;
use crate::state::AppState;

/// Handles a press on the SOS control.
///
/// The confirmation lists the coordinates that were sent; when the fallback
/// coordinate was used the warning is appended and the level drops to
/// `Warning`.
pub async fn trigger_emergency(state: &AppState) -> Result<Feedback> {
    let report = emergency_service::trigger_emergency(state).await?;
    let coordinates = report.alert.coordinates();

    let mut message = format!(
        "Campus security has been notified and is on the way.\nLocation: {}",
        coordinates
    );
    let level = match &report.warning {
        Some(warning) => {
            message.push('\n');
            message.push_str(warning);
            FeedbackLevel::Warning
        }
        None => FeedbackLevel::Success,
    };

    Ok(Feedback::new(level, "Emergency triggered!", message))
}
