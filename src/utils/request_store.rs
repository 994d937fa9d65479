//! In-memory store of emergency requests.
//!
//! Requests are keyed by their [`Uuid`] and kept in the order they were
//! filed. State changes go through the checks on
//! [`EmergencyRequest`], so the store never holds a request that took an
//! illegal transition.

use uuid::Uuid;

use super::dispatch::DispatchPlan;
use crate::types::location::Location;
use crate::types::request::{EmergencyRequest, Patient, RequestError, RequestStatus};

/// Every request filed in a session.
#[derive(Debug, Clone, Default)]
pub struct RequestStore {
    requests: Vec<EmergencyRequest>,
}

impl RequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files a new pending request and returns it.
    pub fn open(
        &mut self,
        user_id: impl Into<String>,
        location: Location,
        patient: Patient,
    ) -> Result<&EmergencyRequest, RequestError> {
        self.insert(EmergencyRequest::new(user_id, location, patient))
    }

    /// Adds an existing request, rejecting a repeated id.
    pub fn insert(&mut self, request: EmergencyRequest) -> Result<&EmergencyRequest, RequestError> {
        if self.get(&request.id).is_some() {
            warn!("Rejected duplicate request: {}", request.id);
            return Err(RequestError::DuplicateId(request.id));
        }
        info!("Filed request {} for user {}", request.id, request.user_id);
        self.requests.push(request);
        Ok(&self.requests[self.requests.len() - 1])
    }

    pub fn get(&self, id: &Uuid) -> Option<&EmergencyRequest> {
        self.requests.iter().find(|request| &request.id == id)
    }

    /// Every request, oldest first.
    pub fn all(&self) -> &[EmergencyRequest] {
        &self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Requests filed by `user_id`, oldest first.
    pub fn for_user(&self, user_id: &str) -> Vec<&EmergencyRequest> {
        self.requests
            .iter()
            .filter(|request| request.user_id == user_id)
            .collect()
    }

    /// Requests still pending or dispatched.
    pub fn active(&self) -> Vec<&EmergencyRequest> {
        self.requests
            .iter()
            .filter(|request| request.is_active())
            .collect()
    }

    /// See [`EmergencyRequest::set_status`].
    pub fn set_status(&mut self, id: &Uuid, status: RequestStatus) -> Result<&EmergencyRequest, RequestError> {
        let request = self.get_mut(id)?;
        request.set_status(status)?;
        Ok(request)
    }

    /// See [`EmergencyRequest::cancel`].
    pub fn cancel(&mut self, id: &Uuid) -> Result<&EmergencyRequest, RequestError> {
        let request = self.get_mut(id)?;
        request.cancel()?;
        Ok(request)
    }

    /// See [`EmergencyRequest::apply_dispatch`].
    pub fn apply_dispatch(&mut self, id: &Uuid, plan: &DispatchPlan) -> Result<&EmergencyRequest, RequestError> {
        let request = self.get_mut(id)?;
        request.apply_dispatch(plan)?;
        Ok(request)
    }

    fn get_mut(&mut self, id: &Uuid) -> Result<&mut EmergencyRequest, RequestError> {
        self.requests
            .iter_mut()
            .find(|request| &request.id == id)
            .ok_or_else(|| {
                warn!("Request not found: {}", id);
                RequestError::NotFound(*id)
            })
    }
}
