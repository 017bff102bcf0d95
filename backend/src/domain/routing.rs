//! Route fetching and deterministic route selection.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{info, warn};

use super::ports::{RouteCandidate, RouteProvider, RouteProviderError};
use super::{Coordinate, Error};

/// The candidate chosen by [`select_route`], with its provider index.
///
/// ## Invariants
/// - `index` is the position of `candidate` in the provider's response.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedRoute {
    /// Position of the route in the provider's response.
    pub index: usize,
    /// The chosen candidate.
    pub candidate: RouteCandidate,
}

/// Fetches candidates from a [`RouteProvider`] and discards unusable ones.
#[derive(Clone)]
pub struct RouteFetcher {
    provider: Arc<dyn RouteProvider>,
}

impl RouteFetcher {
    /// Build a fetcher over the given provider port.
    pub fn new(provider: Arc<dyn RouteProvider>) -> Self {
        Self { provider }
    }

    /// Fetch the usable candidates between `start` and `destination`.
    ///
    /// # Errors
    /// - `no_route_found` when the provider reports no route, returns nothing,
    ///   or returns only malformed candidates.
    /// - `upstream_timeout` when the provider times out.
    /// - `upstream_unavailable` for any other provider failure.
    pub async fn fetch(
        &self,
        start: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<RouteCandidate>, Error> {
        let candidates = self
            .provider
            .fetch_routes(start, destination)
            .await
            .map_err(|err| map_provider_error(&err))?;
        let returned = candidates.len();

        let usable: Vec<RouteCandidate> = candidates
            .into_iter()
            .filter(|candidate| {
                let ok = is_usable(candidate);
                if !ok {
                    warn!(
                        route_index = candidate.provider_index,
                        points = candidate.path.len(),
                        "dropping malformed route candidate"
                    );
                }
                ok
            })
            .collect();

        if usable.is_empty() {
            return Err(Error::no_route_found(format!(
                "no route found between {start} and {destination}"
            )));
        }
        info!(returned, usable = usable.len(), "route candidates fetched");
        Ok(usable)
    }
}

fn is_usable(candidate: &RouteCandidate) -> bool {
    let metric_ok = |value: f64| value.is_finite() && value >= 0.0;
    candidate.path.len() >= 2
        && metric_ok(candidate.distance_metres)
        && metric_ok(candidate.duration_seconds)
}

fn map_provider_error(err: &RouteProviderError) -> Error {
    match err {
        RouteProviderError::NoRoute { message } => {
            info!(reason = %message, "router reported no route");
            Error::no_route_found("no route found between the requested locations")
        }
        other if other.is_timeout() => {
            warn!(error = %other, "routing timed out");
            Error::upstream_timeout("routing service timed out")
        }
        other => {
            warn!(error = %other, "routing failed");
            Error::upstream_unavailable("routing service unavailable")
        }
    }
}

/// Pick the fastest candidate.
///
/// Minimum duration wins, then minimum distance, then first occurrence. The
/// returned index is the candidate's provider index. Returns `None` only for
/// an empty slice.
///
/// # Examples
/// ```
/// use fuelroute::domain::{Coordinate, select_route};
/// use fuelroute::domain::ports::RouteCandidate;
///
/// let path = vec![Coordinate::new(0.0, 0.0)?, Coordinate::new(1.0, 1.0)?];
/// let candidate = |i: usize, duration: f64, distance: f64| RouteCandidate {
///     provider_index: i,
///     path: path.clone(),
///     distance_metres: distance,
///     duration_seconds: duration,
/// };
/// let routes = [candidate(0, 30.0, 5.0), candidate(1, 10.0, 8.0), candidate(2, 10.0, 3.0)];
/// assert_eq!(select_route(&routes).map(|s| s.index), Some(2));
/// # Ok::<(), fuelroute::domain::CoordinateError>(())
/// ```
pub fn select_route(candidates: &[RouteCandidate]) -> Option<SelectedRoute> {
    candidates
        .iter()
        .reduce(|best, next| match compare(next, best) {
            Ordering::Less => next,
            Ordering::Equal | Ordering::Greater => best,
        })
        .map(|best| SelectedRoute {
            index: best.provider_index,
            candidate: best.clone(),
        })
}

fn compare(a: &RouteCandidate, b: &RouteCandidate) -> Ordering {
    a.duration_seconds
        .total_cmp(&b.duration_seconds)
        .then_with(|| a.distance_metres.total_cmp(&b.distance_metres))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockRouteProvider;
    use rstest::{fixture, rstest};

    fn point(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).expect("valid coordinate")
    }

    fn candidate(index: usize, duration: f64, distance: f64) -> RouteCandidate {
        RouteCandidate {
            provider_index: index,
            path: vec![point(40.0, -74.0), point(40.1, -74.1)],
            distance_metres: distance,
            duration_seconds: duration,
        }
    }

    #[fixture]
    fn endpoints() -> (Coordinate, Coordinate) {
        (point(40.0, -74.0), point(40.1, -74.1))
    }

    #[test]
    fn duration_ties_fall_back_to_distance() {
        let routes = [
            candidate(0, 30.0, 5.0),
            candidate(1, 10.0, 8.0),
            candidate(2, 10.0, 3.0),
        ];
        let selected = select_route(&routes).expect("non-empty");
        assert_eq!(selected.index, 2);
    }

    #[test]
    fn full_ties_keep_first_occurrence() {
        let routes = [candidate(0, 10.0, 3.0), candidate(1, 10.0, 3.0)];
        assert_eq!(select_route(&routes).map(|s| s.index), Some(0));
    }

    #[test]
    fn single_candidate_is_selected() {
        let routes = [candidate(0, 99.0, 99.0)];
        assert_eq!(select_route(&routes).map(|s| s.index), Some(0));
    }

    #[test]
    fn empty_input_selects_nothing() {
        assert!(select_route(&[]).is_none());
    }

    #[test]
    fn selection_reports_provider_index() {
        let routes = [candidate(1, 20.0, 1.0), candidate(3, 15.0, 1.0)];
        assert_eq!(select_route(&routes).map(|s| s.index), Some(3));
    }

    #[rstest]
    #[tokio::test]
    async fn drops_malformed_candidates(endpoints: (Coordinate, Coordinate)) {
        let mut provider = MockRouteProvider::new();
        provider.expect_fetch_routes().times(1).returning(|_, _| {
            let mut short = candidate(0, 1.0, 1.0);
            short.path.truncate(1);
            Ok(vec![
                short,
                candidate(1, f64::NAN, 1.0),
                candidate(2, 5.0, -1.0),
                candidate(3, 5.0, 10.0),
            ])
        });
        let fetcher = RouteFetcher::new(Arc::new(provider));

        let usable = fetcher
            .fetch(endpoints.0, endpoints.1)
            .await
            .expect("one usable candidate");
        assert_eq!(usable.len(), 1);
        assert_eq!(usable[0].provider_index, 3);
    }

    #[rstest]
    #[case(Ok(Vec::new()), ErrorCode::NoRouteFound)]
    #[case(Err(RouteProviderError::no_route("NoSegment")), ErrorCode::NoRouteFound)]
    #[case(Err(RouteProviderError::timeout("15s")), ErrorCode::UpstreamTimeout)]
    #[case(Err(RouteProviderError::transport("503")), ErrorCode::UpstreamUnavailable)]
    #[case(Err(RouteProviderError::decode("eof")), ErrorCode::UpstreamUnavailable)]
    #[tokio::test]
    async fn maps_provider_outcomes(
        endpoints: (Coordinate, Coordinate),
        #[case] outcome: Result<Vec<RouteCandidate>, RouteProviderError>,
        #[case] expected: ErrorCode,
    ) {
        let mut provider = MockRouteProvider::new();
        provider
            .expect_fetch_routes()
            .times(1)
            .returning(move |_, _| outcome.clone());
        let fetcher = RouteFetcher::new(Arc::new(provider));

        let err = fetcher
            .fetch(endpoints.0, endpoints.1)
            .await
            .expect_err("fetch fails");
        assert_eq!(err.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn all_malformed_candidates_mean_no_route(endpoints: (Coordinate, Coordinate)) {
        let mut provider = MockRouteProvider::new();
        provider
            .expect_fetch_routes()
            .returning(|_, _| Ok(vec![candidate(0, -3.0, 1.0)]));
        let fetcher = RouteFetcher::new(Arc::new(provider));

        let err = fetcher
            .fetch(endpoints.0, endpoints.1)
            .await
            .expect_err("nothing usable");
        assert_eq!(err.code(), ErrorCode::NoRouteFound);
    }
}
