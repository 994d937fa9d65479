//! Definition of the [`WithDistance`] type.

use serde::Serialize;

use super::entity::Located;
use super::location::Location;
use crate::utils::haversine::DistanceUnit;

/// An entity paired with its distance from a query origin.
///
/// Values are created fresh for every query and only describe that
/// query. The entity's own fields are flattened when serialized, so a
/// hospital renders as the hospital object plus `distance` and `unit`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithDistance<T> {
    #[serde(flatten)]
    pub entity: T,

    /// Great-circle distance from the query origin.
    pub distance: f64,

    /// The unit `distance` is expressed in.
    pub unit: DistanceUnit,
}

impl<T> WithDistance<T> {
    /// Drops the annotation and gives back the entity.
    pub fn into_inner(self) -> T {
        self.entity
    }

    /// Renders the distance with one decimal and its unit, e.g. `1.4 km`.
    pub fn distance_label(&self) -> String {
        format!("{:.1} {}", self.distance, self.unit)
    }
}

impl<T: Located> Located for WithDistance<T> {
    fn uid(&self) -> &str {
        self.entity.uid()
    }

    fn location(&self) -> &Location {
        self.entity.location()
    }
}

#[cfg(test)]
mod annotated_tests {
    use super::*;
    use crate::types::hospital::Hospital;

    #[test]
    fn test_serializes_flat() {
        let annotated = WithDistance {
            entity: Hospital::new("hospital-1", "Sai Hospital", "Chembur", Location::new(1.0, 2.0)),
            distance: 1.26,
            unit: DistanceUnit::Kilometers,
        };
        let json = serde_json::to_value(&annotated).unwrap();
        assert_eq!(json["id"], "hospital-1");
        assert_eq!(json["distance"], 1.26);
        assert_eq!(json["unit"], "km");
        assert_eq!(annotated.distance_label(), "1.3 km");
        assert_eq!(annotated.uid(), "hospital-1");
    }
}
