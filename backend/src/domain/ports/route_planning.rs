//! Driving port for planning a route with fuel stops.
//!
//! Inbound adapters hand raw location strings to [`RoutePlanningService`] and
//! render the resulting [`RoutePlan`]; they never talk to providers directly.

use async_trait::async_trait;

use crate::domain::{Error, RoutePlan};

/// Raw request for one route plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePlanRequest {
    /// Start location, either a `lat,lon` literal or a place name.
    pub start: String,
    /// Destination location, either a `lat,lon` literal or a place name.
    pub destination: String,
}

impl RoutePlanRequest {
    /// Build a request from start and destination strings.
    pub fn new(start: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            destination: destination.into(),
        }
    }
}

/// Driving port producing a [`RoutePlan`] for a request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoutePlanningService: Send + Sync {
    /// Resolve both locations, pick the best route and annotate it with fuel
    /// stations.
    ///
    /// # Errors
    /// Returns a domain [`Error`] whose code identifies the failing stage.
    async fn plan(&self, request: &RoutePlanRequest) -> Result<RoutePlan, Error>;
}

/// Fixture service that always fails with `no_route_found`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureRoutePlanningService;

#[async_trait]
impl RoutePlanningService for FixtureRoutePlanningService {
    async fn plan(&self, request: &RoutePlanRequest) -> Result<RoutePlan, Error> {
        Err(Error::no_route_found(format!(
            "no route between '{}' and '{}'",
            request.start, request.destination
        )))
    }
}
