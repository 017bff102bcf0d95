//! Immutable tunables for the route planning pipeline.

use std::time::Duration;

use super::{FuelStationSearchSettings, RouteGeometry};

/// Pipeline configuration, built once at startup and passed to
/// [`crate::domain::RoutePlanner::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerConfig {
    /// Douglas–Peucker tolerance in degrees.
    pub simplification_tolerance: f64,
    /// Maximum points per fuel station query segment.
    pub points_per_segment: usize,
    /// Fan-out settings for fuel station queries.
    pub search: FuelStationSearchSettings,
    /// Which geometry the response carries.
    pub geometry: RouteGeometry,
    /// Whether stations lacking address fields are reverse geocoded.
    pub reverse_geocode: bool,
    /// Maximum reverse geocoding lookups in flight.
    pub reverse_geocode_concurrency: usize,
    /// Time from the start of planning after which station search and
    /// address enrichment stop and keep what they have.
    pub best_effort_budget: Duration,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            simplification_tolerance: 0.001,
            points_per_segment: 10,
            search: FuelStationSearchSettings {
                radius_metres: 1000,
                max_concurrent_queries: 10,
                query_timeout: Duration::from_secs(15),
            },
            geometry: RouteGeometry::Simplified,
            reverse_geocode: true,
            reverse_geocode_concurrency: 1,
            best_effort_budget: Duration::from_secs(54),
        }
    }
}
