use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
}

/// A monitored campus area shown on the risk map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskArea {
    pub name: &'static str,
    pub risk: RiskLevel,
    pub incidents: u32,
    pub latitude: f64,
    pub longitude: f64,
}

impl RiskArea {
    /// "5 incidents reported", "1 incident reported".
    pub fn incidents_label(&self) -> String {
        if self.incidents == 1 {
            "1 incident reported".to_string()
        } else {
            format!("{} incidents reported", self.incidents)
        }
    }
}

/// Guard availability shown on the home tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CampusStatus {
    pub guards_on_duty: u32,
    pub response_time_minutes: (u32, u32),
}
