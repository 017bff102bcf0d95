//! Reqwest-backed Nominatim adapter.
//!
//! This adapter owns transport details only: query strings, identity headers,
//! timeout and HTTP error mapping, and JSON decoding into domain values.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{ReverseResultDto, SearchResultDto};
use crate::domain::Coordinate;
use crate::domain::ports::{AddressLookup, AddressParts, Geocoder, GeocoderError};
use crate::outbound::http::{
    AdapterBuildError, FailureKind, HttpIdentity, build_client, classify_status,
    classify_transport, endpoint, port_failure, status_message,
};

/// Nominatim adapter for forward and reverse geocoding.
pub struct NominatimHttpSource {
    client: Client,
    search_endpoint: Url,
    reverse_endpoint: Url,
    contact: String,
}

impl NominatimHttpSource {
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
            search_endpoint: endpoint(base_url, &["search"])?,
            reverse_endpoint: endpoint(base_url, &["reverse"])?,
            contact: identity.contact,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<T, GeocoderError> {
        let response = self
            .client
            .get(url)
            .header("Contact", self.contact.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        serde_json::from_slice(body.as_ref()).map_err(|error| {
            GeocoderError::decode(format!("invalid Nominatim JSON payload: {error}"))
        })
    }
}

#[async_trait]
impl Geocoder for NominatimHttpSource {
    async fn geocode(&self, query: &str) -> Result<Option<Coordinate>, GeocoderError> {
        let params = search_params(query)?;
        let results: Vec<SearchResultDto> =
            self.get_json(self.search_endpoint.clone(), &params).await?;
        results
            .into_iter()
            .next()
            .map(SearchResultDto::into_coordinate)
            .transpose()
            .map_err(GeocoderError::decode)
    }
}

#[async_trait]
impl AddressLookup for NominatimHttpSource {
    async fn reverse(&self, point: Coordinate) -> Result<AddressParts, GeocoderError> {
        let result: ReverseResultDto = self
            .get_json(self.reverse_endpoint.clone(), &reverse_params(point))
            .await?;
        if let Some(reason) = result.error.as_deref() {
            debug!(%point, reason, "no address near point");
        }
        Ok(result.into_address_parts())
    }
}

fn search_params(query: &str) -> Result<Vec<(&'static str, String)>, GeocoderError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(GeocoderError::invalid_request("query must not be blank"));
    }
    Ok(vec![
        ("q", trimmed.to_owned()),
        ("format", "jsonv2".to_owned()),
        ("limit", "1".to_owned()),
    ])
}

fn reverse_params(point: Coordinate) -> Vec<(&'static str, String)> {
    vec![
        ("lat", point.latitude().to_string()),
        ("lon", point.longitude().to_string()),
        ("format", "jsonv2".to_owned()),
        ("addressdetails", "1".to_owned()),
    ]
}

fn map_transport_error(error: reqwest::Error) -> GeocoderError {
    port_failure!(GeocoderError, classify_transport(&error), error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> GeocoderError {
    // Nominatim answers 403 when the usage policy blocks the caller.
    let kind = match status {
        StatusCode::FORBIDDEN => FailureKind::RateLimited,
        other => classify_status(other),
    };
    port_failure!(GeocoderError, kind, status_message(status, body))
}
