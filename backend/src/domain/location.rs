//! Location resolution: user input to [`Coordinate`].
//!
//! Inputs matching a strict `lat,lon` literal are parsed locally and never
//! reach the geocoder. Everything else is treated as a place name. The
//! literal pattern wins whenever both readings are possible.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use super::ports::{Geocoder, GeocoderError};
use super::{Coordinate, Error};

/// A raw location string classified as a literal or a place name.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    /// A validated `lat,lon` literal.
    Coordinate(Coordinate),
    /// Free text forwarded to the geocoder.
    PlaceName(String),
}

impl LocationQuery {
    /// Classify `raw`, validating coordinate literals.
    ///
    /// # Errors
    /// Returns [`crate::domain::ErrorCode::InvalidRequest`] for blank input
    /// or for a numeric literal outside WGS84 ranges.
    ///
    /// # Examples
    /// ```
    /// use fuelroute::domain::LocationQuery;
    ///
    /// let literal = LocationQuery::parse("40.0, -74.0")?;
    /// assert!(matches!(literal, LocationQuery::Coordinate(_)));
    /// let place = LocationQuery::parse("Paris, France")?;
    /// assert!(matches!(place, LocationQuery::PlaceName(_)));
    /// assert!(LocationQuery::parse("95,200").is_err());
    /// # Ok::<(), fuelroute::domain::Error>(())
    /// ```
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_request("location must not be blank"));
        }

        let Some((lat_raw, lon_raw)) = split_numeric_pair(trimmed) else {
            return Ok(Self::PlaceName(trimmed.to_owned()));
        };

        let parsed = lat_raw
            .parse::<f64>()
            .ok()
            .zip(lon_raw.parse::<f64>().ok());
        let Some((latitude, longitude)) = parsed else {
            return Err(invalid_literal(trimmed, "coordinate components must be numeric"));
        };

        Coordinate::new(latitude, longitude)
            .map(Self::Coordinate)
            .map_err(|err| invalid_literal(trimmed, &err.to_string()))
    }
}

fn invalid_literal(value: &str, reason: &str) -> Error {
    Error::invalid_request(format!("invalid coordinate '{value}': {reason}"))
        .with_details(json!({ "value": value, "code": "invalid_coordinate" }))
}

/// Split `lat,lon` when both halves look like plain decimal numbers.
fn split_numeric_pair(raw: &str) -> Option<(&str, &str)> {
    let (lat, lon) = raw.split_once(',')?;
    let (lat, lon) = (lat.trim(), lon.trim());
    (is_decimal_literal(lat) && is_decimal_literal(lon)).then_some((lat, lon))
}

/// `[+-]?digits[.digits]` or `[+-]?.digits`; no exponents, no `inf`/`NaN`.
fn is_decimal_literal(value: &str) -> bool {
    let unsigned = value
        .strip_prefix('+')
        .or_else(|| value.strip_prefix('-'))
        .unwrap_or(value);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
    match fraction {
        None => !whole.is_empty() && all_digits(whole),
        Some(fraction) => !fraction.is_empty() && all_digits(whole) && all_digits(fraction),
    }
}

/// Resolves [`LocationQuery`] values, delegating place names to a geocoder.
#[derive(Clone)]
pub struct LocationResolver {
    geocoder: Arc<dyn Geocoder>,
}

impl LocationResolver {
    /// Build a resolver over the given geocoder port.
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self { geocoder }
    }

    /// Parse and resolve a raw location string.
    ///
    /// # Errors
    /// - `invalid_request` for blank input or an out-of-range literal.
    /// - `location_not_found` when the geocoder has no match.
    /// - `upstream_timeout` / `upstream_unavailable` when the geocoder fails.
    pub async fn resolve(&self, raw: &str) -> Result<Coordinate, Error> {
        match LocationQuery::parse(raw)? {
            LocationQuery::Coordinate(point) => Ok(point),
            LocationQuery::PlaceName(name) => self.geocode(&name).await,
        }
    }

    async fn geocode(&self, name: &str) -> Result<Coordinate, Error> {
        let found = self
            .geocoder
            .geocode(name)
            .await
            .map_err(|err| map_geocoder_error(name, &err))?;
        match found {
            Some(point) => {
                debug!(place = name, %point, "place name geocoded");
                Ok(point)
            }
            None => Err(Error::location_not_found(format!(
                "location '{name}' not found"
            ))),
        }
    }
}

fn map_geocoder_error(name: &str, err: &GeocoderError) -> Error {
    tracing::warn!(place = name, error = %err, "geocoding failed");
    if err.is_timeout() {
        Error::upstream_timeout("geocoding service timed out")
    } else {
        Error::upstream_unavailable("geocoding service unavailable")
    }
}
