//! Wire shapes of the Overpass `[out:json]` reply.
//!
//! Nodes carry `lat`/`lon` directly while ways and relations requested with
//! `out center` carry a `center` object; both decode into [`LatLon`].

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use crate::domain::Coordinate;
use crate::domain::ports::RawFuelStation;

#[derive(Debug, Deserialize)]
pub(super) struct OverpassReply {
    #[serde(default)]
    elements: Vec<OverpassElement>,
    #[serde(default)]
    remark: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(rename = "type")]
    kind: String,
    id: i64,
    #[serde(flatten)]
    point: Option<LatLon>,
    #[serde(default)]
    center: Option<LatLon>,
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct LatLon {
    lat: f64,
    lon: f64,
}

impl OverpassReply {
    /// Server-side failure reported in `remark`, such as a query timeout.
    ///
    /// Overpass answers these with status 200, so the body must be checked.
    pub(super) fn runtime_error(&self) -> Option<&str> {
        self.remark
            .as_deref()
            .filter(|remark| remark.contains("runtime error"))
    }

    pub(super) fn into_stations(self) -> Vec<RawFuelStation> {
        let mut stations = Vec::with_capacity(self.elements.len());
        for element in self.elements {
            let id = element.id;
            match element.into_station() {
                Some(station) => stations.push(station),
                None => debug!(element_id = id, "skipping Overpass element without location"),
            }
        }
        stations
    }
}

impl OverpassElement {
    fn into_station(self) -> Option<RawFuelStation> {
        let LatLon { lat, lon } = self.point.or(self.center)?;
        Some(RawFuelStation {
            element_type: self.kind,
            element_id: self.id,
            location: Coordinate::new(lat, lon).ok()?,
            tags: self.tags,
        })
    }
}
