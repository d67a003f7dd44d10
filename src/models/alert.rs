use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::geolocation::Coordinates;

/// Message attached to every alert raised from the SOS control.
pub const DEFAULT_ALERT_MESSAGE: &str = "SOS button pressed - immediate assistance requested";

/// Where the coordinates of an alert came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    /// A real reading from the device.
    Device,
    /// The jittered campus-center substitute.
    Fallback,
}

/// Represents an emergency raised by a student.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmergencyAlert {
    /// Unique, time-derived identifier.
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// The timestamp when the alert was created.
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
    pub message: String,
    pub source: LocationSource,
}

impl EmergencyAlert {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Phases of the emergency flow.
///
/// `Idle -> Activating -> (LocationResolved | LocationFallback) -> CoolingDown -> Idle`,
/// with a permission denial going straight from `Activating` back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyPhase {
    #[default]
    Idle,
    Activating,
    LocationResolved,
    LocationFallback,
    CoolingDown,
}

impl EmergencyPhase {
    /// The emergency-active flag: true everywhere except `Idle`.
    pub fn is_active(self) -> bool {
        self != EmergencyPhase::Idle
    }
}

/// Emergency state owned by the store.
#[derive(Debug, Clone, Default)]
pub struct EmergencyState {
    pub phase: EmergencyPhase,
    pub alerts: Vec<EmergencyAlert>,
}

impl EmergencyState {
    /// Back to idle with no alerts.
    pub fn reset(&mut self) {
        self.phase = EmergencyPhase::Idle;
        self.alerts.clear();
    }
}

/// The result of a successful trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct EmergencyReport {
    pub alert: EmergencyAlert,
    /// Set when the fallback coordinate was used.
    pub warning: Option<String>,
}
