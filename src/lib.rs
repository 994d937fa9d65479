//! Geospatial Proximity Library.
//! Ranks hospitals and ambulances by great-circle distance from a
//! caller location and plans emergency dispatches on top of that.

#[macro_use]
extern crate log;

/// Data types shared across the library.
pub mod types {
    pub mod ambulance;
    pub mod annotated;
    pub mod entity;
    pub mod hospital;
    pub mod location;
    pub mod locator;
    pub mod request;
    pub mod status;
}

/// Query algorithms over entity catalogs.
pub mod algorithms {
    pub mod proximity;
    pub mod search;
}

/// Supporting utilities: distance math, storage, configuration and
/// dispatch planning.
pub mod utils {
    pub mod catalog;
    pub mod config;
    pub mod dispatch;
    #[cfg(test)]
    pub mod generator;
    pub mod haversine;
    pub mod request_store;
}

pub use algorithms::*;
pub use types::*;
pub use utils::*;
