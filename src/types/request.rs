//! Struct definitions and implementations for [`EmergencyRequest`].
//!
//! A request starts out [`Pending`](RequestStatus::Pending), becomes
//! [`Dispatched`](RequestStatus::Dispatched) once an ambulance is
//! assigned, then [`Arrived`](RequestStatus::Arrived), and ends either
//! [`Completed`](RequestStatus::Completed) or
//! [`Cancelled`](RequestStatus::Cancelled):
//!
//! ```text
//! Pending ──apply_dispatch──> Dispatched ──> Arrived ──> Completed
//!    │                            │
//!    └────────> Cancelled <───────┘
//! ```
//!
//! Dispatching is only possible through
//! [`EmergencyRequest::apply_dispatch`], which records the ambulance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::location::Location;
use crate::utils::dispatch::DispatchPlan;

/// Lifecycle of an emergency request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestStatus {
    Pending,
    Dispatched,
    Arrived,
    Completed,
    Cancelled,
}

impl RequestStatus {
    /// Completed and cancelled requests are final.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Completed | RequestStatus::Cancelled)
    }

    /// Whether a request may move from `self` to `next`.
    pub fn can_move_to(&self, next: RequestStatus) -> bool {
        use RequestStatus::*;
        matches!(
            (self, next),
            (Pending, Dispatched)
                | (Pending, Cancelled)
                | (Dispatched, Arrived)
                | (Dispatched, Cancelled)
                | (Arrived, Completed)
        )
    }
}

/// Errors raised by request state changes.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RequestError {
    #[error("Cannot move request {id} from {from:?} to {to:?}")]
    InvalidTransition {
        id: Uuid,
        from: RequestStatus,
        to: RequestStatus,
    },
    #[error("Request {0} must be dispatched with a plan")]
    DispatchWithoutPlan(Uuid),
    #[error("Request not found: {0}")]
    NotFound(Uuid),
    #[error("Request already exists: {0}")]
    DuplicateId(Uuid),
}

/// Contact and medical details supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub name: String,
    pub phone_number: String,
    pub blood_group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A call for an ambulance at a given location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyRequest {
    pub id: Uuid,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub location: Location,
    #[serde(flatten)]
    pub patient: Patient,
    pub status: RequestStatus,
    pub assigned_ambulance_id: Option<String>,

    /// Projected arrival while dispatched, actual arrival afterwards.
    pub estimated_arrival_time: Option<DateTime<Utc>>,

    /// Distance the ambulance has to cover, in the unit of the plan.
    pub distance_to_travel: Option<f64>,
    pub nearest_hospital: Option<String>,
}

impl EmergencyRequest {
    /// Opens a new pending request.
    pub fn new(user_id: impl Into<String>, location: Location, patient: Patient) -> Self {
        EmergencyRequest {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            timestamp: Utc::now(),
            location,
            patient,
            status: RequestStatus::Pending,
            assigned_ambulance_id: None,
            estimated_arrival_time: None,
            distance_to_travel: None,
            nearest_hospital: None,
        }
    }

    /// Whether the request still needs an ambulance on the road.
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            RequestStatus::Pending | RequestStatus::Dispatched
        )
    }

    /// Moves the request to `status`.
    ///
    /// Arriving overwrites the estimated arrival time with the actual
    /// one. Moving to [`Dispatched`](RequestStatus::Dispatched) is
    /// refused here; use [`apply_dispatch`](Self::apply_dispatch).
    pub fn set_status(&mut self, status: RequestStatus) -> Result<(), RequestError> {
        if status == RequestStatus::Dispatched {
            warn!("Request {} can only be dispatched with a plan", self.id);
            return Err(RequestError::DispatchWithoutPlan(self.id));
        }
        self.transition(status)?;
        if status == RequestStatus::Arrived {
            self.estimated_arrival_time = Some(Utc::now());
        }
        Ok(())
    }

    /// Cancels a pending or dispatched request.
    pub fn cancel(&mut self) -> Result<(), RequestError> {
        self.set_status(RequestStatus::Cancelled)
    }

    /// Records the outcome of dispatch planning and marks the request
    /// dispatched. Only pending requests can be dispatched.
    pub fn apply_dispatch(&mut self, plan: &DispatchPlan) -> Result<(), RequestError> {
        self.transition(RequestStatus::Dispatched)?;
        self.assigned_ambulance_id = Some(plan.ambulance.entity.id.clone());
        self.estimated_arrival_time = Some(plan.estimated_arrival);
        self.distance_to_travel = Some(plan.ambulance.distance);
        self.nearest_hospital = plan
            .hospital
            .as_ref()
            .map(|hospital| hospital.entity.name.clone());
        Ok(())
    }

    fn transition(&mut self, status: RequestStatus) -> Result<(), RequestError> {
        if !self.status.can_move_to(status) {
            warn!(
                "Request {} is {:?}, refusing move to {:?}",
                self.id, self.status, status
            );
            return Err(RequestError::InvalidTransition {
                id: self.id,
                from: self.status,
                to: status,
            });
        }
        debug!("Request {}: {:?} -> {:?}", self.id, self.status, status);
        self.status = status;
        Ok(())
    }
}
