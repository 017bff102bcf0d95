//! Reqwest-backed Overpass fuel station adapter.
//!
//! This adapter owns transport details only: query construction, timeout and
//! HTTP error mapping, and JSON decoding into domain station records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::OverpassReply;
use crate::domain::ports::{
    FuelStationQuery, FuelStationSource, FuelStationSourceError, RawFuelStation,
};
use crate::outbound::http::{
    AdapterBuildError, HttpIdentity, build_client, classify_status, classify_transport,
    port_failure, status_message,
};

/// OSM selector for fuel stations.
const FUEL_SELECTOR: &str = "[\"amenity\"=\"fuel\"]";

/// Overpass source adapter that performs HTTP POST requests against one endpoint.
pub struct OverpassHttpSource {
    client: Client,
    endpoint: Url,
    contact: String,
    query_timeout_seconds: u64,
}

impl OverpassHttpSource {
    /// Build an adapter posting to `endpoint` with a per-request `timeout`.
    ///
    /// The same timeout, in whole seconds, is embedded in the query text so
    /// the server abandons work the client has stopped waiting for.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        timeout: Duration,
        identity: HttpIdentity,
    ) -> Result<Self, AdapterBuildError> {
        Ok(Self {
            client: build_client(timeout, &identity)?,
            endpoint,
            contact: identity.contact,
            query_timeout_seconds: timeout.as_secs().max(1),
        })
    }
}

#[async_trait]
impl FuelStationSource for OverpassHttpSource {
    async fn fetch_stations(
        &self,
        query: &FuelStationQuery,
    ) -> Result<Vec<RawFuelStation>, FuelStationSourceError> {
        let text = build_overpass_query(query, self.query_timeout_seconds)?;
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Contact", self.contact.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[("data", text)])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_stations(body.as_ref())
    }
}

fn parse_stations(body: &[u8]) -> Result<Vec<RawFuelStation>, FuelStationSourceError> {
    let decoded: OverpassReply = serde_json::from_slice(body).map_err(|error| {
        FuelStationSourceError::decode(format!("invalid Overpass JSON payload: {error}"))
    })?;
    if let Some(remark) = decoded.runtime_error() {
        return Err(if remark.contains("timed out") {
            FuelStationSourceError::timeout(remark.to_owned())
        } else {
            FuelStationSourceError::transport(remark.to_owned())
        });
    }
    Ok(decoded.into_stations())
}

/// Build an `around` query over the segment polyline for nodes, ways and
/// relations tagged `amenity=fuel`.
fn build_overpass_query(
    query: &FuelStationQuery,
    query_timeout_seconds: u64,
) -> Result<String, FuelStationSourceError> {
    if query.path.is_empty() {
        return Err(FuelStationSourceError::invalid_request(
            "segment path must contain at least one point",
        ));
    }
    if query.radius_metres == 0 {
        return Err(FuelStationSourceError::invalid_request(
            "search radius must be positive",
        ));
    }

    let polyline = query
        .path
        .iter()
        .map(|point| format!("{},{}", point.latitude(), point.longitude()))
        .collect::<Vec<_>>()
        .join(",");
    let around = format!("(around:{},{polyline})", query.radius_metres);

    let lines = ["node", "way", "relation"]
        .iter()
        .map(|element_type| format!("  {element_type}{FUEL_SELECTOR}{around};"))
        .collect::<Vec<_>>();

    Ok(format!(
        "[out:json][timeout:{query_timeout_seconds}];\n(\n{query_lines}\n);\nout center tags;",
        query_lines = lines.join("\n")
    ))
}

fn map_transport_error(error: reqwest::Error) -> FuelStationSourceError {
    port_failure!(
        FuelStationSourceError,
        classify_transport(&error),
        error.to_string()
    )
}

fn map_status_error(status: StatusCode, body: &[u8]) -> FuelStationSourceError {
    port_failure!(
        FuelStationSourceError,
        classify_status(status),
        status_message(status, body)
    )
}
