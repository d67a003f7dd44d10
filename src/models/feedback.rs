use serde::Serialize;

/// Severity of a user-visible message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A dialog or toast the presentation layer shows after an intent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feedback {
    pub level: FeedbackLevel,
    pub title: String,
    pub message: String,
}

impl Feedback {
    pub fn new(level: FeedbackLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(FeedbackLevel::Info, title, message)
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(FeedbackLevel::Success, title, message)
    }
}
