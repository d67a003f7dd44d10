use std::time::Duration;

use futures::future::BoxFuture;
use serde::Serialize;
use thiserror::Error;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

impl std::str::FromStr for Coordinates {
    type Err = String;

    /// Parses `"lat,lon"`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| format!("expected 'lat,lon', got '{}'", s))?;
        let latitude = lat
            .trim()
            .parse()
            .map_err(|e| format!("invalid latitude '{}': {}", lat.trim(), e))?;
        let longitude = lon
            .trim()
            .parse()
            .map_err(|e| format!("invalid longitude '{}': {}", lon.trim(), e))?;
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accuracy {
    Balanced,
    High,
}

/// Errors reported by a geolocation provider.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocationError {
    #[error("no position fix available")]
    NoFix,

    #[error("position request timed out after {0:?}")]
    Timeout(Duration),

    #[error("provider error: {0}")]
    Provider(String),
}

/// The device location service consumed by the emergency flow.
pub trait GeolocationProvider: Send + Sync {
    /// Asks the user for foreground location access.
    fn request_permission(&self) -> BoxFuture<'_, PermissionStatus>;

    /// Reads the current position.
    fn current_position(
        &self,
        accuracy: Accuracy,
    ) -> BoxFuture<'_, std::result::Result<Coordinates, LocationError>>;
}

/// A provider with a fixed answer, used by the console binary and tests.
#[derive(Debug, Clone)]
pub struct ScriptedGeolocation {
    /// Answer to every permission request.
    pub permission: PermissionStatus,
    /// Position to report, or `None` to fail with `NoFix`.
    pub fix: Option<Coordinates>,
    /// Delay before `current_position` answers.
    pub latency: Duration,
}

impl ScriptedGeolocation {
    /// Permission granted, answers immediately with `fix`.
    pub fn granted(fix: Coordinates) -> Self {
        Self {
            permission: PermissionStatus::Granted,
            fix: Some(fix),
            latency: Duration::ZERO,
        }
    }

    /// Permission granted but no position can be read.
    pub fn without_fix() -> Self {
        Self {
            permission: PermissionStatus::Granted,
            fix: None,
            latency: Duration::ZERO,
        }
    }

    pub fn denied() -> Self {
        Self {
            permission: PermissionStatus::Denied,
            fix: None,
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl GeolocationProvider for ScriptedGeolocation {
    fn request_permission(&self) -> BoxFuture<'_, PermissionStatus> {
        Box::pin(async move { self.permission })
    }

    fn current_position(
        &self,
        accuracy: Accuracy,
    ) -> BoxFuture<'_, std::result::Result<Coordinates, LocationError>> {
        Box::pin(async move {
            tracing::debug!("📍 Position requested ({:?} accuracy)", accuracy);
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            self.fix.ok_or(LocationError::NoFix)
        })
    }
}
