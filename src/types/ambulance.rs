//! Struct definitions and implementations for [`Ambulance`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Located, TextSearchable};
use super::location::Location;
use super::status::Status;

/// A vehicle in the ambulance fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ambulance {
    pub id: String,

    /// Registration plate or fleet number, e.g. `AMB-001`.
    pub vehicle_number: String,

    /// Last reported position.
    pub location: Location,

    pub status: Status,

    /// When `location` or `status` last changed.
    pub last_updated: DateTime<Utc>,

    #[serde(default)]
    pub crew: Vec<String>,
}

impl Ambulance {
    /// Creates an ambulance stamped with the current time.
    pub fn new(
        id: impl Into<String>,
        vehicle_number: impl Into<String>,
        location: Location,
        status: Status,
    ) -> Self {
        Ambulance {
            id: id.into(),
            vehicle_number: vehicle_number.into(),
            location,
            status,
            last_updated: Utc::now(),
            crew: Vec::new(),
        }
    }

    /// Moves the vehicle and refreshes `last_updated`.
    pub fn relocate(&mut self, location: Location) {
        self.location = location;
        self.last_updated = Utc::now();
    }

    /// Changes the operating status and refreshes `last_updated`.
    pub fn set_status(&mut self, status: Status) {
        self.status = status;
        self.last_updated = Utc::now();
    }
}

impl Located for Ambulance {
    fn uid(&self) -> &str {
        &self.id
    }

    fn location(&self) -> &Location {
        &self.location
    }
}

impl TextSearchable for Ambulance {
    fn text_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.vehicle_number.as_str()];
        fields.extend(self.crew.iter().map(String::as_str));
        fields
    }
}

#[cfg(test)]
mod ambulance_tests {
    use super::*;

    #[test]
    fn test_updates_touch_timestamp() {
        let mut ambulance = Ambulance::new(
            "1",
            "AMB-001",
            Location::new(40.7128, -74.006),
            Status::Available,
        );
        let created = ambulance.last_updated;

        ambulance.set_status(Status::Busy);
        assert_eq!(ambulance.status, Status::Busy);
        assert!(ambulance.last_updated >= created);

        let moved = Location::new(40.7328, -73.986);
        ambulance.relocate(moved);
        assert_eq!(ambulance.location, moved);
    }

    #[test]
    fn test_text_fields_include_crew() {
        let mut ambulance = Ambulance::new(
            "2",
            "AMB-002",
            Location::new(40.7328, -73.986),
            Status::Busy,
        );
        ambulance.crew = vec!["Lisa Chen".to_string()];
        assert_eq!(ambulance.text_fields(), vec!["AMB-002", "Lisa Chen"]);
    }

    #[test]
    fn test_camel_case_wire_format() {
        let ambulance = Ambulance::new("3", "AMB-003", Location::new(1.0, 2.0), Status::EnRoute);
        let json = serde_json::to_value(&ambulance).unwrap();
        assert_eq!(json["vehicleNumber"], "AMB-003");
        assert_eq!(json["status"], "en-route");
        assert!(json.get("lastUpdated").is_some());
    }
}
