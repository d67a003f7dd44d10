use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use zeroize::Zeroizing;

use crate::geolocation::Coordinates;

/// RGA accepted by the built-in credential check.
pub const DEFAULT_RGA: &str = "20241234";
/// Password accepted by the built-in credential check.
pub const DEFAULT_PASSWORD: &str = "123456";
/// Center of the UFR campus.
pub const CAMPUS_CENTER: Coordinates = Coordinates {
    latitude: -16.465762,
    longitude: -54.579379,
};

/// The application's configuration.
#[derive(Clone)]
pub struct Config {
    /// The RGA of the only account.
    pub rga: String,
    /// The password of the only account.
    pub password: Zeroizing<String>,
    /// Simulated authentication latency.
    pub login_delay: Duration,
    /// How long the emergency stays active after an alert is sent.
    pub emergency_cooldown: Duration,
    /// Delay before security's scripted chat reply.
    pub chat_reply_delay: Duration,
    /// Upper bound on a position request.
    pub location_timeout: Duration,
    /// Reference point for fallback coordinates and the risk map.
    pub campus_center: Coordinates,
    /// Maximum fallback offset per axis, in degrees.
    pub fallback_jitter_deg: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rga: DEFAULT_RGA.to_string(),
            password: Zeroizing::new(DEFAULT_PASSWORD.to_string()),
            login_delay: Duration::from_millis(2000),
            emergency_cooldown: Duration::from_millis(3000),
            chat_reply_delay: Duration::from_millis(1500),
            location_timeout: Duration::from_millis(15_000),
            campus_center: CAMPUS_CENTER,
            fallback_jitter_deg: 0.0015,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("rga", &self.rga)
            .field("password", &"<redacted>")
            .field("login_delay", &self.login_delay)
            .field("emergency_cooldown", &self.emergency_cooldown)
            .field("chat_reply_delay", &self.chat_reply_delay)
            .field("location_timeout", &self.location_timeout)
            .field("campus_center", &self.campus_center)
            .field("fallback_jitter_deg", &self.fallback_jitter_deg)
            .finish()
    }
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// Every key is optional and falls back to [`Config::default`].
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a `Config` from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let rga = lookup("CAMPUS_RGA").unwrap_or(defaults.rga);
        let password = match lookup("CAMPUS_PASSWORD") {
            Some(secret) => Zeroizing::new(secret),
            None => defaults.password,
        };

        let campus_center = Coordinates {
            latitude: parse_or(&lookup, "CAMPUS_LATITUDE", defaults.campus_center.latitude)?,
            longitude: parse_or(&lookup, "CAMPUS_LONGITUDE", defaults.campus_center.longitude)?,
        };

        let fallback_jitter_deg: f64 =
            parse_or(&lookup, "FALLBACK_JITTER_DEG", defaults.fallback_jitter_deg)?;
        if !(0.0..=1.0).contains(&fallback_jitter_deg) {
            anyhow::bail!("FALLBACK_JITTER_DEG must be between 0 and 1 degrees");
        }

        Ok(Self {
            rga,
            password,
            login_delay: millis_or(&lookup, "LOGIN_DELAY_MS", defaults.login_delay)?,
            emergency_cooldown: millis_or(
                &lookup,
                "EMERGENCY_COOLDOWN_MS",
                defaults.emergency_cooldown,
            )?,
            chat_reply_delay: millis_or(&lookup, "CHAT_REPLY_DELAY_MS", defaults.chat_reply_delay)?,
            location_timeout: millis_or(&lookup, "LOCATION_TIMEOUT_MS", defaults.location_timeout)?,
            campus_center,
            fallback_jitter_deg,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}", key)),
        None => Ok(default),
    }
}

fn millis_or<F>(lookup: &F, key: &str, default: Duration) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let default_millis = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
    let millis: u64 = parse_or(lookup, key, default_millis)?;
    Ok(Duration::from_millis(millis))
}
