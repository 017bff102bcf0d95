//! DTOs for decoding OSRM `route` service responses.

use serde::Deserialize;

use crate::domain::Coordinate;
use crate::domain::ports::RouteCandidate;

/// OSRM response codes meaning "nothing connects these points".
const NO_ROUTE_CODES: [&str; 2] = ["NoRoute", "NoSegment"];

#[derive(Debug, Deserialize)]
pub(super) struct RouteResponseDto {
    pub(super) code: String,
    #[serde(default)]
    pub(super) message: Option<String>,
    #[serde(default)]
    pub(super) routes: Vec<RouteDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RouteDto {
    pub(super) geometry: GeometryDto,
    pub(super) distance: f64,
    pub(super) duration: f64,
}

/// GeoJSON line string; positions are `[lon, lat]`.
#[derive(Debug, Deserialize)]
pub(super) struct GeometryDto {
    #[serde(default)]
    pub(super) coordinates: Vec<[f64; 2]>,
}

impl RouteResponseDto {
    pub(super) fn is_ok(&self) -> bool {
        self.code == "Ok"
    }

    pub(super) fn is_no_route(&self) -> bool {
        NO_ROUTE_CODES.contains(&self.code.as_str())
    }

    pub(super) fn describe(&self) -> String {
        match &self.message {
            Some(message) => format!("{}: {message}", self.code),
            None => self.code.clone(),
        }
    }

    /// Convert routes into candidates stamped with their response index.
    ///
    /// A route with any invalid position gets an empty path so the domain
    /// drops it as malformed while the remaining indices stay stable.
    pub(super) fn into_candidates(self) -> Vec<RouteCandidate> {
        self.routes
            .into_iter()
            .enumerate()
            .map(|(provider_index, route)| RouteCandidate {
                provider_index,
                path: route.geometry.into_path().unwrap_or_default(),
                distance_metres: route.distance,
                duration_seconds: route.duration,
            })
            .collect()
    }
}

impl GeometryDto {
    fn into_path(self) -> Option<Vec<Coordinate>> {
        self.coordinates
            .into_iter()
            .map(|[lon, lat]| Coordinate::new(lat, lon).ok())
            .collect()
    }
}
