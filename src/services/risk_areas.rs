use crate::models::risk_area::{CampusStatus, RiskArea, RiskLevel};

const CAMPUS_AREAS: [RiskArea; 5] = [
    RiskArea {
        name: "Parking Lot",
        risk: RiskLevel::High,
        incidents: 5,
        latitude: -16.466410,
        longitude: -54.580120,
    },
    RiskArea {
        name: "Block A - Side Exit",
        risk: RiskLevel::High,
        incidents: 3,
        latitude: -16.465190,
        longitude: -54.578860,
    },
    RiskArea {
        name: "Student Center",
        risk: RiskLevel::Medium,
        incidents: 2,
        latitude: -16.465980,
        longitude: -54.578420,
    },
    RiskArea {
        name: "NEATI Area",
        risk: RiskLevel::Medium,
        incidents: 2,
        latitude: -16.464870,
        longitude: -54.579950,
    },
    RiskArea {
        name: "Blocks E and F",
        risk: RiskLevel::Medium,
        incidents: 1,
        latitude: -16.466750,
        longitude: -54.579010,
    },
];

/// The monitored areas, in display order.
pub fn campus_risk_areas() -> Vec<RiskArea> {
    CAMPUS_AREAS.to_vec()
}

/// Guard availability shown on the home tab.
pub fn campus_status() -> CampusStatus {
    CampusStatus {
        guards_on_duty: 4,
        response_time_minutes: (3, 5),
    }
}
