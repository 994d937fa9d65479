//! Distance ranking over a catalog of located entities.
//!
//! Every function here is pure: the catalog is only borrowed, and the
//! results are fresh [`WithDistance`] copies owned by the caller.

use ordered_float::OrderedFloat;

use crate::types::annotated::WithDistance;
use crate::types::entity::Located;
use crate::types::location::Location;
use crate::utils::haversine::{self, DistanceUnit};

/// Annotates every entity in `catalog` with its distance from `origin`.
///
/// Output order matches `catalog`.
pub fn annotate<T: Located + Clone>(
    origin: &Location,
    catalog: &[T],
    unit: DistanceUnit,
) -> Vec<WithDistance<T>> {
    catalog
        .iter()
        .map(|entity| WithDistance {
            distance: haversine::distance_in(origin, entity.location(), unit),
            entity: entity.clone(),
            unit,
        })
        .collect()
}

/// Finds the entities within `max_distance` of `origin`.
///
/// # Arguments
/// * `origin` - Where the query is made from.
/// * `catalog` - Entities to consider. Never mutated.
/// * `max_distance` - Inclusive radius, in `unit`.
/// * `unit` - Unit for both `max_distance` and the returned distances.
///
/// # Returns
/// The entities with `distance <= max_distance`, sorted ascending by
/// distance. Equal distances keep their catalog order. An empty vector
/// is returned when nothing is in range. Entities whose distance is NaN
/// never satisfy the radius and are left out.
pub fn find_nearby<T: Located + Clone>(
    origin: &Location,
    catalog: &[T],
    max_distance: f64,
    unit: DistanceUnit,
) -> Vec<WithDistance<T>> {
    debug!(
        "find_nearby origin: {:?}, max_distance: {} {}, catalog size: {}",
        origin,
        max_distance,
        unit,
        catalog.len()
    );
    let mut nearby: Vec<WithDistance<T>> = catalog
        .iter()
        .filter_map(|entity| {
            let distance = haversine::distance_in(origin, entity.location(), unit);
            (distance <= max_distance).then(|| WithDistance {
                entity: entity.clone(),
                distance,
                unit,
            })
        })
        .collect();

    // `sort_by_key` is stable, which keeps ties in catalog order.
    nearby.sort_by_key(|annotated| OrderedFloat(annotated.distance));
    debug!("find_nearby matched {} entities", nearby.len());
    nearby
}

/// Finds the single entity closest to `origin`.
///
/// Equivalent to the first result of [`find_nearby`] with an infinite
/// radius, without sorting the whole catalog.
///
/// # Returns
/// [`None`] when `catalog` is empty (or holds only entities with an
/// undefined distance).
pub fn find_nearest<T: Located + Clone>(
    origin: &Location,
    catalog: &[T],
    unit: DistanceUnit,
) -> Option<WithDistance<T>> {
    let mut nearest: Option<(&T, f64)> = None;
    for entity in catalog {
        let distance = haversine::distance_in(origin, entity.location(), unit);
        if distance.is_nan() {
            continue;
        }
        match nearest {
            Some((_, best)) if best <= distance => {}
            _ => nearest = Some((entity, distance)),
        }
    }

    let nearest = nearest.map(|(entity, distance)| WithDistance {
        entity: entity.clone(),
        distance,
        unit,
    });
    debug!(
        "find_nearest origin: {:?}, result: {:?}",
        origin,
        nearest.as_ref().map(|found| (found.uid(), found.distance))
    );
    nearest
}

#[cfg(test)]
mod proximity_tests {
    use super::*;
    use crate::types::hospital::Hospital;
    use crate::utils::generator::generate_hospitals_near;

    const CHEMBUR: Location = Location::new(19.0522, 72.8994);

    fn chembur_hospitals() -> Vec<Hospital> {
        vec![
            Hospital::new("hospital-1", "Sushrut Hospital and Research Center", "Chembur, Mumbai", Location::new(19.0522, 72.8994)),
            Hospital::new("hospital-2", "Das Multispeciality Hospital & ICCU", "Chembur, Mumbai", Location::new(19.0559, 72.8922)),
            Hospital::new("hospital-3", "Zen Multi Specialty Hospital", "Chembur, Mumbai", Location::new(19.0619, 72.8978)),
            Hospital::new("hospital-4", "Apollo Spectra Hospitals", "Chembur, Mumbai", Location::new(19.0447, 72.9097)),
            Hospital::new("hospital-5", "Kolekar Multispecialty Hospital & ICCU", "Chembur, Mumbai", Location::new(19.0534, 72.9012)),
            Hospital::new("hospital-6", "Sai Hospital", "Chembur, Mumbai", Location::new(19.0491, 72.8867)),
        ]
    }

    #[test]
    fn test_nearest_coincident_hospital() {
        let hospitals = chembur_hospitals();
        let nearest = find_nearest(&CHEMBUR, &hospitals, DistanceUnit::Kilometers).unwrap();
        assert_eq!(nearest.entity.id, "hospital-1");
        assert!(nearest.distance < 1e-6);
        assert_eq!(nearest.unit, DistanceUnit::Kilometers);
    }

    #[test]
    fn test_empty_catalog() {
        let hospitals: Vec<Hospital> = vec![];
        assert!(find_nearby(&CHEMBUR, &hospitals, 100.0, DistanceUnit::Kilometers).is_empty());
        assert!(find_nearest(&CHEMBUR, &hospitals, DistanceUnit::Kilometers).is_none());
    }

    #[test]
    fn test_nearby_filters_and_sorts() {
        let hospitals = chembur_hospitals();
        let nearby = find_nearby(&CHEMBUR, &hospitals, 1.0, DistanceUnit::Kilometers);

        assert!(!nearby.is_empty());
        assert!(nearby.len() < hospitals.len());
        assert_eq!(nearby[0].entity.id, "hospital-1");
        for pair in nearby.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
        for annotated in &nearby {
            assert!(annotated.distance <= 1.0);
        }
    }

    #[test]
    fn test_zero_radius_keeps_coincident_points_only() {
        let hospitals = chembur_hospitals();
        let nearby = find_nearby(&CHEMBUR, &hospitals, 0.0, DistanceUnit::Kilometers);
        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby[0].entity.id, "hospital-1");
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let spot = Location::new(19.06, 72.90);
        let hospitals = vec![
            Hospital::new("b", "B", "x", spot),
            Hospital::new("a", "A", "x", spot),
            Hospital::new("c", "C", "x", spot),
        ];
        let nearby = find_nearby(&CHEMBUR, &hospitals, f64::INFINITY, DistanceUnit::Miles);
        let ids: Vec<&str> = nearby.iter().map(|h| h.entity.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);

        let nearest = find_nearest(&CHEMBUR, &hospitals, DistanceUnit::Miles).unwrap();
        assert_eq!(nearest.entity.id, "b");
    }

    #[test]
    fn test_nearest_matches_first_nearby() {
        for _ in 0..20 {
            let hospitals = generate_hospitals_near(&CHEMBUR, 20.0, 50);
            let nearest = find_nearest(&CHEMBUR, &hospitals, DistanceUnit::Kilometers).unwrap();
            let nearby = find_nearby(&CHEMBUR, &hospitals, f64::INFINITY, DistanceUnit::Kilometers);
            assert_eq!(nearby.len(), hospitals.len());
            assert_eq!(nearest, nearby[0]);
        }
    }

    #[test]
    fn test_nan_locations_are_skipped() {
        let hospitals = vec![
            Hospital::new("bad", "Bad", "x", Location::new(f64::NAN, 72.9)),
            Hospital::new("good", "Good", "x", Location::new(19.06, 72.9)),
        ];
        let nearby = find_nearby(&CHEMBUR, &hospitals, f64::INFINITY, DistanceUnit::Kilometers);
        assert_eq!(nearby.len(), 1);
        assert_eq!(
            find_nearest(&CHEMBUR, &hospitals, DistanceUnit::Kilometers).unwrap().entity.id,
            "good"
        );
    }

    #[test]
    fn test_annotate_keeps_order_and_catalog() {
        let hospitals = chembur_hospitals();
        let before = hospitals.clone();
        let annotated = annotate(&CHEMBUR, &hospitals, DistanceUnit::Kilometers);
        assert_eq!(hospitals, before);
        let ids: Vec<&str> = annotated.iter().map(|h| h.entity.id.as_str()).collect();
        assert_eq!(ids, vec!["hospital-1", "hospital-2", "hospital-3", "hospital-4", "hospital-5", "hospital-6"]);
    }
}
