//! In-memory keyed store for located entities.
//!
//! A [`Catalog`] is what the proximity queries read from: a hospital
//! directory or an ambulance fleet. Entities keep their insertion order
//! so that ranking ties resolve the same way on every query. Pass
//! [`Catalog::all`] to the functions in
//! [`proximity`](crate::algorithms::proximity) and
//! [`search`](crate::algorithms::search).

use uuid::Uuid;

use crate::types::ambulance::Ambulance;
use crate::types::entity::Located;
use crate::types::hospital::Hospital;
use crate::types::location::Location;
use crate::types::status::Status;

/// Errors raised by catalog mutations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CatalogError {
    #[error("Entity already exists: {0}")]
    DuplicateId(String),
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Update tried to change id {from} to {to}")]
    IdChanged { from: String, to: String },
}

/// An ordered collection of entities with unique ids.
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    entities: Vec<T>,
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Catalog {
            entities: Vec::new(),
        }
    }
}

impl<T: Located + Clone> Catalog<T> {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a list, rejecting repeated ids.
    pub fn from_entities(entities: impl IntoIterator<Item = T>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for entity in entities {
            catalog.insert(entity)?;
        }
        Ok(catalog)
    }

    /// Every entity, in insertion order.
    pub fn all(&self) -> &[T] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Looks an entity up by id.
    pub fn get(&self, id: &str) -> Option<&T> {
        self.entities.iter().find(|entity| entity.uid() == id)
    }

    /// Appends an entity.
    pub fn insert(&mut self, entity: T) -> Result<&T, CatalogError> {
        if self.get(entity.uid()).is_some() {
            warn!("Rejected duplicate id: {}", entity.uid());
            return Err(CatalogError::DuplicateId(entity.uid().to_string()));
        }
        debug!("Inserting entity: {}", entity.uid());
        self.entities.push(entity);
        Ok(&self.entities[self.entities.len() - 1])
    }

    /// Applies `change` to the entity with the given id and returns a
    /// copy of the result.
    ///
    /// If `change` alters the id, the entity is restored to its previous
    /// state and [`CatalogError::IdChanged`] is returned.
    pub fn update<F>(&mut self, id: &str, change: F) -> Result<T, CatalogError>
    where
        F: FnOnce(&mut T),
    {
        let entity = self
            .entities
            .iter_mut()
            .find(|entity| entity.uid() == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        let original = entity.clone();
        change(entity);
        if entity.uid() != id {
            let to = entity.uid().to_string();
            warn!("Rejected id change on update: {} -> {}", id, to);
            *entity = original;
            return Err(CatalogError::IdChanged {
                from: id.to_string(),
                to,
            });
        }
        Ok(entity.clone())
    }

    /// Removes the entity with the given id. Returns whether anything
    /// was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entities.len();
        self.entities.retain(|entity| entity.uid() != id);
        let removed = self.entities.len() < before;
        debug!("Remove {}: {}", id, removed);
        removed
    }
}

impl Catalog<Hospital> {
    /// Adds a hospital under a freshly generated `hospital-<uuid>` id,
    /// overwriting whatever id it carried.
    pub fn insert_new(&mut self, mut hospital: Hospital) -> Result<&Hospital, CatalogError> {
        hospital.id = format!("hospital-{}", Uuid::new_v4());
        self.insert(hospital)
    }
}

impl Catalog<Ambulance> {
    /// Changes an ambulance's status.
    pub fn set_status(&mut self, id: &str, status: Status) -> Result<Ambulance, CatalogError> {
        self.update(id, |ambulance| ambulance.set_status(status))
    }

    /// Records a new position for an ambulance.
    pub fn set_location(&mut self, id: &str, location: Location) -> Result<Ambulance, CatalogError> {
        self.update(id, |ambulance| ambulance.relocate(location))
    }

    /// Ambulances free to take a new emergency, in fleet order.
    pub fn available(&self) -> Vec<Ambulance> {
        self.entities
            .iter()
            .filter(|ambulance| ambulance.status.is_dispatchable())
            .cloned()
            .collect()
    }
}
