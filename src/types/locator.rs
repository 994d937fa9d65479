//! The front door of the proximity library.
//!
//! The engine module bundles the distance, ranking and search functions
//! behind one configured value, so a session uses a single unit system
//! for everything it reports.

/// The proximity engine module.
pub mod engine {
    use crate::{
        algorithms::{proximity, search},
        types::{
            ambulance::Ambulance,
            annotated::WithDistance,
            entity::{Located, TextSearchable},
            hospital::Hospital,
            location::Location,
        },
        utils::{
            config::{self, ProximityConfig},
            dispatch::{self, DispatchError, DispatchPlan},
            haversine::{self, DistanceUnit},
        },
    };

    /// A `ProximityEngine` only holds configuration. Every query is a
    /// pure function of its arguments, so one engine can be shared
    /// between threads freely.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct ProximityEngine {
        config: ProximityConfig,
    }

    impl Default for ProximityEngine {
        /// Uses the process-wide configuration.
        fn default() -> Self {
            ProximityEngine::new(*config::config())
        }
    }

    impl ProximityEngine {
        /// Creates an engine with the given configuration.
        pub fn new(config: ProximityConfig) -> Self {
            debug!("Creating proximity engine: {:?}", config);
            ProximityEngine { config }
        }

        /// Creates an engine with default settings in `unit`.
        pub fn with_unit(unit: DistanceUnit) -> Self {
            ProximityEngine::new(ProximityConfig {
                unit,
                ..ProximityConfig::default()
            })
        }

        /// The unit all distances are reported in.
        pub fn unit(&self) -> DistanceUnit {
            self.config.unit
        }

        /// The settings this engine was built with: unit, default radius
        /// and the average speed used for arrival estimates.
        pub fn config(&self) -> &ProximityConfig {
            &self.config
        }

        /// Great-circle distance between two locations.
        pub fn distance_between(&self, origin: &Location, target: &Location) -> f64 {
            haversine::distance_in(origin, target, self.config.unit)
        }

        /// See [`proximity::find_nearby`].
        pub fn find_nearby<T: Located + Clone>(
            &self,
            origin: &Location,
            catalog: &[T],
            max_distance: f64,
        ) -> Vec<WithDistance<T>> {
            proximity::find_nearby(origin, catalog, max_distance, self.config.unit)
        }

        /// [`find_nearby`](Self::find_nearby) with the configured
        /// default radius.
        pub fn find_nearby_default<T: Located + Clone>(
            &self,
            origin: &Location,
            catalog: &[T],
        ) -> Vec<WithDistance<T>> {
            self.find_nearby(origin, catalog, self.config.default_radius)
        }

        /// See [`proximity::find_nearest`].
        pub fn find_nearest<T: Located + Clone>(
            &self,
            origin: &Location,
            catalog: &[T],
        ) -> Option<WithDistance<T>> {
            proximity::find_nearest(origin, catalog, self.config.unit)
        }

        /// See [`search::search_by_text`].
        pub fn search<T: TextSearchable + Clone>(&self, catalog: &[T], query: &str) -> Vec<T> {
            search::search_by_text(catalog, query)
        }

        /// See [`dispatch::plan_dispatch`].
        pub fn plan_dispatch(
            &self,
            origin: &Location,
            ambulances: &[Ambulance],
            hospitals: &[Hospital],
        ) -> Result<DispatchPlan, DispatchError> {
            dispatch::plan_dispatch(origin, ambulances, hospitals, &self.config)
        }
    }
}
