//! Random fixtures for tests.

use rand::Rng;

use crate::types::hospital::Hospital;
use crate::types::location::Location;

/// Roughly how many kilometers one degree of latitude spans.
const KM_PER_DEGREE: f64 = 111.0;

/// Returns a random location within about `radius_km` of `center`.
pub fn random_location_near(center: &Location, radius_km: f64) -> Location {
    let mut rng = rand::thread_rng();
    let spread = radius_km / KM_PER_DEGREE;
    Location::new(
        center.latitude.into_inner() + rng.gen_range(-spread..=spread),
        center.longitude.into_inner() + rng.gen_range(-spread..=spread),
    )
}

/// Generates `capacity` hospitals scattered around `center`.
pub fn generate_hospitals_near(center: &Location, radius_km: f64, capacity: usize) -> Vec<Hospital> {
    (0..capacity)
        .map(|index| {
            Hospital::new(
                format!("hospital-{}", index),
                format!("Hospital {}", index),
                "Generated",
                random_location_near(center, radius_km),
            )
        })
        .collect()
}
