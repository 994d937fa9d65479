//! Struct definitions and implementations for [`Location`].

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// A [`Location`] is an interface type that represents a geographic
/// location of an object. Typically, this type is used in tandem with
/// the [`Located`](`super::entity::Located`) trait.
///
/// Coordinates are decimal degrees. No range validation is done:
/// out-of-range values still produce a (meaningless) distance, and NaN
/// or infinite values propagate through every computation.
///
/// [`OrderedFloat`] is used so that a location can be compared and
/// hashed, e.g. to deduplicate markers on a map.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "lat")]
    pub latitude: OrderedFloat<f64>,
    #[serde(rename = "lng")]
    pub longitude: OrderedFloat<f64>,
}

impl Location {
    /// Creates a location from raw latitude and longitude degrees.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Location {
            latitude: OrderedFloat(latitude),
            longitude: OrderedFloat(longitude),
        }
    }

    /// Latitude in radians.
    pub fn latitude_radians(&self) -> f64 {
        self.latitude.into_inner().to_radians()
    }

    /// Longitude in radians.
    pub fn longitude_radians(&self) -> f64 {
        self.longitude.into_inner().to_radians()
    }
}

impl From<(f64, f64)> for Location {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Location::new(latitude, longitude)
    }
}
