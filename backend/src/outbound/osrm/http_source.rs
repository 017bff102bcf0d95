//! Reqwest-backed OSRM route adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::RouteResponseDto;
use crate::domain::Coordinate;
use crate::domain::ports::{RouteCandidate, RouteProvider, RouteProviderError};
use crate::outbound::http::{
    AdapterBuildError, HttpIdentity, build_client, classify_status, classify_transport, endpoint,
    port_failure, status_message,
};

/// OSRM adapter requesting driving routes with alternatives.
pub struct OsrmHttpSource {
    client: Client,
    route_endpoint: Url,
    contact: String,
}

impl OsrmHttpSource {
    /// Build an adapter rooted at `base_url` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the client cannot be built or `base_url` cannot
    /// carry path segments.
    pub fn new(
        base_url: &Url,
        timeout: Duration,
        identity: HttpIdentity,
    ) -> Result<Self, AdapterBuildError> {
        Ok(Self {
            client: build_client(timeout, &identity)?,
            route_endpoint: endpoint(base_url, &["route", "v1", "driving"])?,
            contact: identity.contact,
        })
    }

    fn route_url(&self, start: Coordinate, destination: Coordinate) -> Result<Url, RouteProviderError> {
        let mut url = self.route_endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| RouteProviderError::invalid_request("router URL cannot carry a path"))?
            .push(&waypoints(start, destination));
        url.query_pairs_mut()
            .append_pair("overview", "full")
            .append_pair("geometries", "geojson")
            .append_pair("alternatives", "true")
            .append_pair("steps", "false");
        Ok(url)
    }
}

#[async_trait]
impl RouteProvider for OsrmHttpSource {
    async fn fetch_routes(
        &self,
        start: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<RouteCandidate>, RouteProviderError> {
        let response = self
            .client
            .get(self.route_url(start, destination)?)
            .header("Contact", self.contact.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        parse_routes(status, body.as_ref())
    }
}

/// OSRM expects `lon,lat` pairs separated by `;`.
fn waypoints(start: Coordinate, destination: Coordinate) -> String {
    format!(
        "{},{};{},{}",
        start.longitude(),
        start.latitude(),
        destination.longitude(),
        destination.latitude()
    )
}

fn parse_routes(status: StatusCode, body: &[u8]) -> Result<Vec<RouteCandidate>, RouteProviderError> {
    // OSRM reports NoRoute/NoSegment with a 400 status, so inspect the body
    // before the status.
    let decoded = serde_json::from_slice::<RouteResponseDto>(body);
    if let Some(dto) = decoded.as_ref().ok().filter(|dto| dto.is_no_route()) {
        return Err(RouteProviderError::no_route(dto.describe()));
    }
    if !status.is_success() {
        return Err(map_status_error(status, body));
    }

    let dto = decoded.map_err(|error| {
        RouteProviderError::decode(format!("invalid OSRM JSON payload: {error}"))
    })?;
    if !dto.is_ok() {
        return Err(RouteProviderError::invalid_request(dto.describe()));
    }
    Ok(dto.into_candidates())
}

fn map_transport_error(error: reqwest::Error) -> RouteProviderError {
    port_failure!(RouteProviderError, classify_transport(&error), error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RouteProviderError {
    port_failure!(RouteProviderError, classify_status(status), status_message(status, body))
}
