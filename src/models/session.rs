use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The viewing mode of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Security,
}

impl Role {
    /// Returns the other role.
    pub fn toggled(self) -> Self {
        match self {
            Role::Student => Role::Security,
            Role::Security => Role::Student,
        }
    }

    /// Returns what the role is allowed to do.
    pub fn capabilities(self) -> Capabilities {
        match self {
            Role::Student => Capabilities {
                trigger_emergency: true,
                monitor_alerts: false,
            },
            Role::Security => Capabilities {
                trigger_emergency: false,
                monitor_alerts: true,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Security => "Security",
        }
    }
}

/// Feature switches derived from the active role.
///
/// The home tab renders the SOS control when `trigger_emergency` is set and
/// the alert monitor when `monitor_alerts` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub trigger_emergency: bool,
    pub monitor_alerts: bool,
}

/// Represents the single user session of the device.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Session {
    /// Whether a user is signed in.
    pub logged_in: bool,
    /// The active role.
    pub role: Role,
    /// The ID of the current session.
    pub session_id: Option<Uuid>,
    /// The RGA used to sign in.
    pub rga: Option<String>,
    /// The timestamp when the session was created.
    pub started_at: Option<DateTime<Utc>>,
}

impl Session {
    /// A fresh student session for the given RGA.
    pub fn student(rga: &str) -> Self {
        Self {
            logged_in: true,
            role: Role::Student,
            session_id: Some(Uuid::new_v4()),
            rga: Some(rga.to_string()),
            started_at: Some(Utc::now()),
        }
    }

    /// The identifier attached to alerts raised in this session.
    pub fn user_id(&self) -> String {
        match &self.rga {
            Some(rga) => format!("user_{}", rga),
            None => "user_anonymous".to_string(),
        }
    }
}

/// The bottom navigation tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Home,
    Map,
    Notifications,
    Profile,
}

impl std::str::FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "home" => Ok(Tab::Home),
            "map" => Ok(Tab::Map),
            "notifications" | "alerts" => Ok(Tab::Notifications),
            "profile" => Ok(Tab::Profile),
            other => Err(format!("unknown tab '{}'", other)),
        }
    }
}

/// A two-choice prompt waiting for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Prompt {
    ConfirmLogout,
}

/// Read-only profile card shown on the profile tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub display_name: String,
    pub role_label: String,
    pub rga: String,
    pub shift: String,
    pub status: String,
}

impl Profile {
    /// Builds the profile card for a signed-in session.
    pub fn from_session(session: &Session) -> Option<Self> {
        if !session.logged_in {
            return None;
        }
        Some(Self {
            display_name: "UFR User".to_string(),
            role_label: session.role.label().to_string(),
            rga: session.rga.clone().unwrap_or_default(),
            shift: "Evening".to_string(),
            status: "Active".to_string(),
        })
    }
}
