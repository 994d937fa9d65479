//! Definition for the [`Status`] type, implemented by an enum.

use serde::{Deserialize, Serialize};

/// Represents the operating status of an
/// [`Ambulance`](super::ambulance::Ambulance).
#[derive(Debug, Copy, Clone, PartialEq, Hash, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Free to take a new emergency.
    Available,
    /// Serving a patient.
    Busy,
    /// Driving towards a pickup.
    EnRoute,
}

impl Status {
    /// Whether a dispatcher may assign this vehicle to a new request.
    pub fn is_dispatchable(&self) -> bool {
        matches!(self, Status::Available)
    }
}

#[cfg(test)]
mod status_tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&Status::EnRoute).unwrap(),
            "\"en-route\""
        );
        assert_eq!(
            serde_json::from_str::<Status>("\"available\"").unwrap(),
            Status::Available
        );
    }

    #[test]
    fn test_only_available_is_dispatchable() {
        assert!(Status::Available.is_dispatchable());
        assert!(!Status::Busy.is_dispatchable());
        assert!(!Status::EnRoute.is_dispatchable());
    }
}
