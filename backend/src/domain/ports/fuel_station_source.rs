//! Driven port for fetching fuel stations near a stretch of route.
//!
//! The domain owns the query shape and the raw station record so the locator
//! can stay adapter-agnostic. Tag interpretation happens in the domain.

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::Coordinate;

/// Domain-owned query for one route segment.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelStationQuery {
    /// Position of the segment along the route, for log correlation.
    pub segment_index: usize,
    /// Polyline of the segment; never empty.
    pub path: Vec<Coordinate>,
    /// Search radius around the polyline, in metres.
    pub radius_metres: u32,
}

/// One fuel station element as returned by the POI service.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFuelStation {
    /// OSM element type (`node`, `way`, or `relation`).
    pub element_type: String,
    /// Raw OSM element identifier.
    pub element_id: i64,
    /// Location of the element (centre for ways and relations).
    pub location: Coordinate,
    /// Raw OSM tags.
    pub tags: BTreeMap<String, String>,
}

define_port_error! {
    /// Errors surfaced while calling the POI service.
    pub enum FuelStationSourceError for "poi" {}
}

/// Port for querying fuel stations around a polyline.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FuelStationSource: Send + Sync {
    /// Fetch the fuel stations within `query.radius_metres` of `query.path`.
    async fn fetch_stations(
        &self,
        query: &FuelStationQuery,
    ) -> Result<Vec<RawFuelStation>, FuelStationSourceError>;
}

/// Fixture source that finds no stations.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureFuelStationSource;

#[async_trait]
impl FuelStationSource for FixtureFuelStationSource {
    async fn fetch_stations(
        &self,
        _query: &FuelStationQuery,
    ) -> Result<Vec<RawFuelStation>, FuelStationSourceError> {
        Ok(Vec::new())
    }
}
