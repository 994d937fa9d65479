//! Great-circle distance on a spherical Earth.

use serde::{Deserialize, Serialize};

use crate::types::location::Location;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// The unit a distance is expressed in.
///
/// A single unit should be used for a whole ranked result set. Every
/// [`WithDistance`](crate::types::annotated::WithDistance) carries the
/// unit it was computed with so it can be labelled correctly.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceUnit {
    #[default]
    #[serde(rename = "km")]
    Kilometers,
    #[serde(rename = "mi")]
    Miles,
}

impl DistanceUnit {
    /// Earth radius expressed in this unit.
    pub fn earth_radius(&self) -> f64 {
        match self {
            DistanceUnit::Kilometers => EARTH_RADIUS_KM,
            DistanceUnit::Miles => EARTH_RADIUS_MILES,
        }
    }

    /// Short label for display, `km` or `mi`.
    pub fn symbol(&self) -> &'static str {
        match self {
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Miles => "mi",
        }
    }

    /// Converts a distance in this unit to kilometers.
    pub fn to_kilometers(&self, distance: f64) -> f64 {
        match self {
            DistanceUnit::Kilometers => distance,
            DistanceUnit::Miles => distance / EARTH_RADIUS_MILES * EARTH_RADIUS_KM,
        }
    }
}

impl std::fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Returns the great-circle distance between two locations on a sphere
/// of radius `earth_radius`, using the haversine formula.
///
/// The result is in the same unit as `earth_radius`. `a` is clamped to
/// `[0, 1]` so rounding near antipodal points cannot push `1 - a` below
/// zero; NaN still passes through the clamp untouched.
///
/// # Arguments
/// * `origin` - The first location.
/// * `target` - The second location.
/// * `earth_radius` - Sphere radius, see [`EARTH_RADIUS_KM`] and
///   [`EARTH_RADIUS_MILES`].
pub fn distance(origin: &Location, target: &Location, earth_radius: f64) -> f64 {
    let lat1 = origin.latitude_radians();
    let lat2 = target.latitude_radians();
    let d_lat = lat2 - lat1;
    let d_lon = target.longitude_radians() - origin.longitude_radians();

    let a = ((d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    earth_radius * c
}

/// Shorthand for [`distance`] with the radius of `unit`.
pub fn distance_in(origin: &Location, target: &Location, unit: DistanceUnit) -> f64 {
    distance(origin, target, unit.earth_radius())
}
