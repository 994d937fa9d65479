//! Emergency dispatch planning.
//!
//! Picks the ambulance to send to a caller and the hospital to take the
//! patient to, and estimates when the ambulance will arrive.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::config::ProximityConfig;
use super::haversine::DistanceUnit;
use crate::algorithms::proximity::find_nearest;
use crate::types::ambulance::Ambulance;
use crate::types::annotated::WithDistance;
use crate::types::hospital::Hospital;
use crate::types::location::Location;

/// Errors raised while planning a dispatch.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DispatchError {
    #[error("No ambulance available among {fleet_size} vehicles")]
    NoAmbulanceAvailable { fleet_size: usize },
    #[error("Cannot turn an arrival estimate of {eta_minutes} minutes into a time")]
    InvalidEstimate { eta_minutes: f64 },
}

/// The outcome of [`plan_dispatch`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchPlan {
    /// The closest available ambulance and its distance to the caller.
    pub ambulance: WithDistance<Ambulance>,

    /// The hospital closest to the caller, if the directory has any.
    pub hospital: Option<WithDistance<Hospital>>,

    pub eta_minutes: f64,
    pub estimated_arrival: DateTime<Utc>,
}

/// Estimates the driving time for `distance`, expressed in `unit`, at
/// an average speed of `average_speed_kmh`.
pub fn estimate_travel_time_minutes(distance: f64, unit: DistanceUnit, average_speed_kmh: f64) -> f64 {
    debug!("distance: {} {}", distance, unit);
    debug!("average_speed_kmh: {}", average_speed_kmh);
    unit.to_kilometers(distance) / average_speed_kmh * 60.0
}

/// Adds `eta_minutes` to `now`, or [`None`] when the estimate is
/// negative, not finite, or out of the representable time range.
fn arrival_after(now: DateTime<Utc>, eta_minutes: f64) -> Option<DateTime<Utc>> {
    if !eta_minutes.is_finite() || eta_minutes < 0.0 {
        return None;
    }
    let seconds = (eta_minutes * 60.0).round();
    if seconds >= i64::MAX as f64 {
        return None;
    }
    now.checked_add_signed(Duration::try_seconds(seconds as i64)?)
}

/// Plans the response to an emergency at `origin`.
///
/// # Arguments
/// * `origin` - Where the patient is.
/// * `ambulances` - The fleet. Only vehicles with an available status
///   are considered.
/// * `hospitals` - The hospital directory.
/// * `config` - Unit and average speed to use.
///
/// # Returns
/// A [`DispatchPlan`], or [`DispatchError::NoAmbulanceAvailable`] if no
/// vehicle in the fleet can be sent. An empty hospital directory is not
/// an error; the plan then carries no hospital. An estimate that is not
/// a finite, non-negative number of minutes, or that overflows the
/// calendar, is [`DispatchError::InvalidEstimate`].
pub fn plan_dispatch(
    origin: &Location,
    ambulances: &[Ambulance],
    hospitals: &[Hospital],
    config: &ProximityConfig,
) -> Result<DispatchPlan, DispatchError> {
    info!("Planning dispatch");
    debug!("origin: {:?}", origin);

    info!("[1/3]: Finding nearest available ambulance");
    let available: Vec<&Ambulance> = ambulances
        .iter()
        .filter(|ambulance| ambulance.status.is_dispatchable())
        .collect();
    let ambulance = find_nearest(origin, &available, config.unit)
        .map(|nearest| WithDistance {
            entity: nearest.entity.clone(),
            distance: nearest.distance,
            unit: nearest.unit,
        })
        .ok_or_else(|| {
            error!("No ambulance available");
            DispatchError::NoAmbulanceAvailable {
                fleet_size: ambulances.len(),
            }
        })?;
    debug!("ambulance: {} at {}", ambulance.entity.id, ambulance.distance_label());

    info!("[2/3]: Finding nearest hospital");
    let hospital = find_nearest(origin, hospitals, config.unit);
    if hospital.is_none() {
        warn!("Hospital directory is empty");
    }

    info!("[3/3]: Estimating arrival time");
    let eta_minutes =
        estimate_travel_time_minutes(ambulance.distance, config.unit, config.average_speed_kmh);
    debug!("eta_minutes: {}", eta_minutes);
    let estimated_arrival = arrival_after(Utc::now(), eta_minutes).ok_or_else(|| {
        error!("Invalid arrival estimate: {} minutes", eta_minutes);
        DispatchError::InvalidEstimate { eta_minutes }
    })?;

    info!("Finished planning dispatch");
    Ok(DispatchPlan {
        ambulance,
        hospital,
        eta_minutes,
        estimated_arrival,
    })
}
