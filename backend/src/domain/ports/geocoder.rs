//! Driven ports for forward and reverse geocoding.
//!
//! The domain asks for a single best match per place name and, optionally,
//! address parts for a coordinate. Adapters own provider URLs, headers and
//! usage-policy concerns.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::Coordinate;

define_port_error! {
    /// Errors surfaced while calling a geocoding provider.
    pub enum GeocoderError for "geocoder" {}
}

/// Address fields recovered by reverse geocoding.
///
/// Every field is optional; providers frequently omit some of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressParts {
    /// Street-level address line.
    pub address: Option<String>,
    /// City, town or village.
    pub city: Option<String>,
    /// State or top-level region.
    pub state: Option<String>,
}

/// Port resolving free-text place names to coordinates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve `query` to its best match, or `None` when nothing matches.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use fuelroute::domain::ports::{FixtureGeocoder, Geocoder};
    ///
    /// let found = FixtureGeocoder.geocode("Atlantis").await?;
    /// assert!(found.is_none());
    /// # Ok::<(), fuelroute::domain::ports::GeocoderError>(())
    /// ```
    async fn geocode(&self, query: &str) -> Result<Option<Coordinate>, GeocoderError>;
}

/// Port resolving coordinates to address parts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressLookup: Send + Sync {
    /// Look up the address parts nearest to `point`.
    async fn reverse(&self, point: Coordinate) -> Result<AddressParts, GeocoderError>;
}

/// Fixture geocoder that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureGeocoder;

#[async_trait]
impl Geocoder for FixtureGeocoder {
    async fn geocode(&self, _query: &str) -> Result<Option<Coordinate>, GeocoderError> {
        Ok(None)
    }
}

/// Fixture address lookup returning empty address parts.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureAddressLookup;

#[async_trait]
impl AddressLookup for FixtureAddressLookup {
    async fn reverse(&self, _point: Coordinate) -> Result<AddressParts, GeocoderError> {
        Ok(AddressParts::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(GeocoderError::timeout("slow"), true)]
    #[case(GeocoderError::transport("reset"), false)]
    #[case(GeocoderError::rate_limited("403"), false)]
    #[case(GeocoderError::decode("eof"), false)]
    fn classifies_timeouts(#[case] err: GeocoderError, #[case] expected: bool) {
        assert_eq!(err.is_timeout(), expected);
    }

    #[tokio::test]
    async fn fixtures_return_empty_results() {
        assert!(FixtureGeocoder.geocode("anywhere").await.expect("ok").is_none());
        let point = Coordinate::new(1.0, 2.0).expect("valid");
        assert_eq!(
            FixtureAddressLookup.reverse(point).await.expect("ok"),
            AddressParts::default()
        );
    }
}
