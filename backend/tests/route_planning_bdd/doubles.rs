//! In-memory provider doubles for route planning behaviour tests.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use fuelroute::domain::Coordinate;
use fuelroute::domain::ports::{
    AddressLookup, AddressParts, FuelStationQuery, FuelStationSource, FuelStationSourceError,
    Geocoder, GeocoderError, RawFuelStation, RouteCandidate, RouteProvider, RouteProviderError,
};

pub(crate) fn point(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon).expect("valid coordinate")
}

/// Geocoder answering from a fixed gazetteer.
pub(crate) struct GazetteerGeocoder {
    places: BTreeMap<String, Coordinate>,
}

impl GazetteerGeocoder {
    pub(crate) fn new_jersey() -> Self {
        Self {
            places: BTreeMap::from([
                ("Newark".to_owned(), point(40.0, -74.0)),
                ("Jersey City".to_owned(), point(40.1, -74.1)),
            ]),
        }
    }
}

#[async_trait]
impl Geocoder for GazetteerGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<Coordinate>, GeocoderError> {
        Ok(self.places.get(query).copied())
    }
}

/// Reverse geocoder placing every coordinate in the same city.
pub(crate) struct SingleCityLookup;

#[async_trait]
impl AddressLookup for SingleCityLookup {
    async fn reverse(&self, _point: Coordinate) -> Result<AddressParts, GeocoderError> {
        Ok(AddressParts {
            address: None,
            city: Some("Newark".to_owned()),
            state: Some("New Jersey".to_owned()),
        })
    }
}

/// Reverse geocoder that takes far longer than any test budget to answer.
pub(crate) struct StalledLookup;

#[async_trait]
impl AddressLookup for StalledLookup {
    async fn reverse(&self, _point: Coordinate) -> Result<AddressParts, GeocoderError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Err(GeocoderError::timeout("reverse lookup stalled"))
    }
}

/// Routing provider replaying one scripted outcome and counting calls.
pub(crate) struct ScriptedRouter {
    outcome: Result<Vec<RouteCandidate>, RouteProviderError>,
    calls: AtomicUsize,
}

impl ScriptedRouter {
    pub(crate) fn new(outcome: Result<Vec<RouteCandidate>, RouteProviderError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn three_point_route() -> Self {
        Self::new(Ok(vec![RouteCandidate {
            provider_index: 0,
            path: vec![point(40.0, -74.0), point(40.05, -74.02), point(40.1, -74.1)],
            distance_metres: 14_000.0,
            duration_seconds: 900.0,
        }]))
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RouteProvider for ScriptedRouter {
    async fn fetch_routes(
        &self,
        _start: Coordinate,
        _destination: Coordinate,
    ) -> Result<Vec<RouteCandidate>, RouteProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// Station source answering every segment query with the same outcome.
pub(crate) struct ScriptedStations {
    outcome: Result<Vec<RawFuelStation>, FuelStationSourceError>,
    queries: Mutex<Vec<FuelStationQuery>>,
}

impl ScriptedStations {
    pub(crate) fn new(outcome: Result<Vec<RawFuelStation>, FuelStationSourceError>) -> Self {
        Self {
            outcome,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn two_stations_and_a_duplicate() -> Self {
        Self::new(Ok(vec![
            station("node", 1, point(40.07, -74.06), &[("brand", "BP"), ("addr:city", "Jersey City")]),
            station("node", 2, point(40.02, -74.01), &[("name", "Shell")]),
            station("way", 3, point(40.020_001, -74.010_001), &[("name", "Shell")]),
        ]))
    }

    pub(crate) fn segment_indices(&self) -> Vec<usize> {
        self.queries
            .lock()
            .expect("queries mutex")
            .iter()
            .map(|query| query.segment_index)
            .collect()
    }
}

fn station(
    element_type: &str,
    element_id: i64,
    location: Coordinate,
    tags: &[(&str, &str)],
) -> RawFuelStation {
    RawFuelStation {
        element_type: element_type.to_owned(),
        element_id,
        location,
        tags: tags
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect(),
    }
}

#[async_trait]
impl FuelStationSource for ScriptedStations {
    async fn fetch_stations(
        &self,
        query: &FuelStationQuery,
    ) -> Result<Vec<RawFuelStation>, FuelStationSourceError> {
        self.queries
            .lock()
            .expect("queries mutex")
            .push(query.clone());
        self.outcome.clone()
    }
}
