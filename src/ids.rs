use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};

/// The length of the random suffix on alert ids.
const ALERT_SUFFIX_LEN: usize = 9;

/// Generates a new emergency alert id.
///
/// The id is the creation instant in nanoseconds followed by a random
/// alphanumeric suffix, so two alerts raised in the same tick still differ.
///
/// # Returns
///
/// An id such as `1729350000123456789-k3f9x0a2b`.
pub fn generate_alert_id() -> String {
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(ALERT_SUFFIX_LEN)
        .map(char::from)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    format!("{}-{}", nanos, suffix)
}

/// Hands out millisecond timestamps that never repeat or go backwards.
///
/// Two messages created in the same millisecond get consecutive ids.
#[derive(Debug, Clone, Default)]
pub struct TimeIds {
    last: i64,
}

impl TimeIds {
    pub fn next(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last = now.max(self.last + 1);
        self.last
    }
}
