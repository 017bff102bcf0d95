//! Fuel station discovery along a route.
//!
//! [`FuelStationLocator`] fans one query per route segment out to the
//! [`FuelStationSource`] port with bounded concurrency, tolerates per-query
//! failures, then merges, deduplicates and sorts the results. Merging happens
//! after the join; each query future owns its own result list.

mod dedup;
mod enrichment;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{StreamExt, stream};
use tokio::time::Instant;
use tracing::{debug, warn};

use super::Coordinate;
use super::ports::{FuelStationQuery, FuelStationSource, RawFuelStation};

pub use self::dedup::dedup_stations;
pub use self::enrichment::AddressEnricher;

/// A fuel station annotated on the route.
///
/// Text fields are optional; absence is serialised as `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct PetrolPump {
    /// Station or brand name.
    pub name: Option<String>,
    /// Station location.
    pub location: Coordinate,
    /// Street-level address.
    pub address: Option<String>,
    /// City, town or village.
    pub city: Option<String>,
    /// State or region.
    pub state: Option<String>,
}

impl PetrolPump {
    /// Interpret OSM tags of a raw station record.
    ///
    /// `name` falls back to `brand`; `addr:housenumber` prefixes
    /// `addr:street`. Blank tag values count as absent.
    pub fn from_raw(raw: &RawFuelStation) -> Self {
        let tag = |key: &str| non_blank(&raw.tags, key);
        let address = match (tag("addr:housenumber"), tag("addr:street")) {
            (Some(number), Some(street)) => Some(format!("{number} {street}")),
            (None, Some(street)) => Some(street),
            (_, None) => None,
        };
        Self {
            name: tag("name").or_else(|| tag("brand")),
            location: raw.location,
            address,
            city: tag("addr:city"),
            state: tag("addr:state"),
        }
    }

    /// Whether any of the address fields is missing.
    pub fn lacks_address(&self) -> bool {
        self.address.is_none() || self.city.is_none() || self.state.is_none()
    }
}

fn non_blank(tags: &BTreeMap<String, String>, key: &str) -> Option<String> {
    tags.get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// Tunables for [`FuelStationLocator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelStationSearchSettings {
    /// Search radius around each segment, in metres.
    pub radius_metres: u32,
    /// Maximum number of queries in flight at once; at least one.
    pub max_concurrent_queries: usize,
    /// Upper bound on a single query.
    pub query_timeout: Duration,
}

/// Result of one fan-out over the route segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FuelStationSearch {
    /// Deduplicated stations sorted by latitude then longitude.
    pub stations: Vec<PetrolPump>,
    /// Number of segment queries dispatched.
    pub dispatched: usize,
    /// Number of segment queries that failed or timed out.
    pub failed: usize,
}

impl FuelStationSearch {
    /// Whether at least one query contributed nothing because it failed.
    pub fn is_degraded(&self) -> bool {
        self.failed > 0
    }
}

/// Locates fuel stations near route segments through a [`FuelStationSource`].
#[derive(Clone)]
pub struct FuelStationLocator {
    source: Arc<dyn FuelStationSource>,
    settings: FuelStationSearchSettings,
}

impl FuelStationLocator {
    /// Build a locator over the given source port.
    pub fn new(source: Arc<dyn FuelStationSource>, settings: FuelStationSearchSettings) -> Self {
        Self { source, settings }
    }

    /// Query every segment and merge the results.
    ///
    /// Never fails: a failed or timed-out query contributes no stations and
    /// is counted in [`FuelStationSearch::failed`]. Duplicates are resolved
    /// in segment order so the first segment to report a station wins.
    pub async fn locate(&self, segments: &[Vec<Coordinate>]) -> FuelStationSearch {
        self.search(segments, None).await
    }

    /// Like [`Self::locate`], but no query runs past `deadline`.
    ///
    /// Queries still in flight at the deadline are abandoned and queries not
    /// yet started are skipped; both count as failed. Stations from queries
    /// that finished in time are kept.
    pub async fn locate_until(
        &self,
        segments: &[Vec<Coordinate>],
        deadline: Instant,
    ) -> FuelStationSearch {
        self.search(segments, Some(deadline)).await
    }

    async fn search(
        &self,
        segments: &[Vec<Coordinate>],
        deadline: Option<Instant>,
    ) -> FuelStationSearch {
        let queries: Vec<FuelStationQuery> = segments
            .iter()
            .enumerate()
            .filter(|(_, path)| !path.is_empty())
            .map(|(segment_index, path)| FuelStationQuery {
                segment_index,
                path: path.clone(),
                radius_metres: self.settings.radius_metres,
            })
            .collect();
        let dispatched = queries.len();

        let results: Vec<Option<Vec<RawFuelStation>>> = stream::iter(queries)
            .map(|query| self.run_query(query, deadline))
            .buffered(self.settings.max_concurrent_queries.max(1))
            .collect()
            .await;

        let failed = results.iter().filter(|result| result.is_none()).count();
        let raw = results.into_iter().flatten().flatten();
        let mut stations = dedup_stations(raw.map(|station| PetrolPump::from_raw(&station)));
        stations.sort_by(|a, b| {
            a.location
                .latitude()
                .total_cmp(&b.location.latitude())
                .then_with(|| a.location.longitude().total_cmp(&b.location.longitude()))
        });

        FuelStationSearch {
            stations,
            dispatched,
            failed,
        }
    }

    async fn run_query(
        &self,
        query: FuelStationQuery,
        deadline: Option<Instant>,
    ) -> Option<Vec<RawFuelStation>> {
        let segment_index = query.segment_index;
        let query_deadline = Instant::now() + self.settings.query_timeout;
        let limit = match deadline {
            Some(deadline) if deadline <= Instant::now() => {
                debug!(segment_index, "search deadline passed; segment skipped");
                return None;
            }
            Some(deadline) => deadline.min(query_deadline),
            None => query_deadline,
        };
        let outcome = tokio::time::timeout_at(limit, self.source.fetch_stations(&query)).await;
        match outcome {
            Ok(Ok(stations)) => {
                debug!(segment_index, found = stations.len(), "segment queried");
                Some(stations)
            }
            Ok(Err(err)) => {
                warn!(segment_index, error = %err, "fuel station query failed");
                None
            }
            Err(_) => {
                warn!(
                    segment_index,
                    timeout_ms = self.settings.query_timeout.as_millis(),
                    search_deadline_reached = limit < query_deadline,
                    "fuel station query timed out"
                );
                None
            }
        }
    }
}
