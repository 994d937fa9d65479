//! Struct definitions and implementations for [`Hospital`].

use serde::{Deserialize, Serialize};

use super::entity::{Located, TextSearchable};
use super::location::Location;

/// A hospital listed in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: String,
    pub name: String,
    pub address: String,
    pub location: Location,

    /// Neighbourhood label as returned by places providers, e.g.
    /// `Chembur, Mumbai`.
    pub vicinity: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,

    /// Free-form category tags such as `emergency` or `trauma`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
}

impl Hospital {
    /// Creates a hospital with only the required fields set.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        location: Location,
    ) -> Self {
        let address = address.into();
        Hospital {
            id: id.into(),
            name: name.into(),
            vicinity: address.clone(),
            address,
            location,
            description: None,
            phone: None,
            website: None,
            rating: None,
            types: Vec::new(),
        }
    }
}

impl Located for Hospital {
    fn uid(&self) -> &str {
        &self.id
    }

    fn location(&self) -> &Location {
        &self.location
    }
}

impl TextSearchable for Hospital {
    fn text_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.address, &self.vicinity]
    }
}
