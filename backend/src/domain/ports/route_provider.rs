//! Driven port for fetching candidate driving routes.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::Coordinate;

/// One route proposed by the routing provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCandidate {
    /// Zero-based position in the provider's original response.
    pub provider_index: usize,
    /// Ordered path from start to destination.
    pub path: Vec<Coordinate>,
    /// Route length in metres.
    pub distance_metres: f64,
    /// Expected travel time in seconds.
    pub duration_seconds: f64,
}

define_port_error! {
    /// Errors surfaced while calling a routing provider.
    pub enum RouteProviderError for "router" {
        /// The provider found no route between the coordinates.
        NoRoute => "no route: {message}",
    }
}

/// Port returning route candidates, alternatives included, between two points.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Fetch every candidate route from `start` to `destination`.
    ///
    /// Each returned candidate carries its index in the provider response;
    /// the list may be empty.
    async fn fetch_routes(
        &self,
        start: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<RouteCandidate>, RouteProviderError>;
}

/// Fixture provider returning the straight line between the two points.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureRouteProvider;

#[async_trait]
impl RouteProvider for FixtureRouteProvider {
    async fn fetch_routes(
        &self,
        start: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<RouteCandidate>, RouteProviderError> {
        Ok(vec![RouteCandidate {
            provider_index: 0,
            path: vec![start, destination],
            distance_metres: 0.0,
            duration_seconds: 0.0,
        }])
    }
}
