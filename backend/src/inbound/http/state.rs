//! State injected into the route handler through `web::Data`.
//!
//! The handler sees the planner only as [`RoutePlanningService`], so tests can
//! swap in the fixture service or a planner wired to doubles.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::ports::RoutePlanningService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Route planning use-case.
    pub route_planning: Arc<dyn RoutePlanningService>,
    /// Upper bound on one planning call; elapsing answers 504.
    pub request_timeout: Duration,
}

impl HttpState {
    /// Construct state from the planning port and request timeout.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// use fuelroute::domain::ports::FixtureRoutePlanningService;
    /// use fuelroute::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureRoutePlanningService), Duration::from_secs(60));
    /// assert_eq!(state.request_timeout, Duration::from_secs(60));
    /// ```
    pub fn new(route_planning: Arc<dyn RoutePlanningService>, request_timeout: Duration) -> Self {
        Self {
            route_planning,
            request_timeout,
        }
    }
}
