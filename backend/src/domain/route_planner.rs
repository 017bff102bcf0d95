//! Route planning pipeline.
//!
//! [`RoutePlanner`] implements the [`RoutePlanningService`] driving port:
//! resolve both locations, fetch and select a route, simplify it, look for
//! fuel stations along the simplified geometry, enrich their addresses and
//! assemble the plan. Only the fuel station search and the enrichment fan
//! out; every other stage runs sequentially.
//!
//! Station search and enrichment are best effort: both stop at
//! [`PlannerConfig::best_effort_budget`] after planning began, so a found
//! route is answered even when those providers are slow.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::ports::{
    AddressLookup, FuelStationSource, Geocoder, RouteProvider, RoutePlanRequest,
    RoutePlanningService,
};
use super::{
    AddressEnricher, Error, FuelStationLocator, LocationResolver, PlannerConfig, RouteFetcher,
    RoutePlan, segment_path, select_route, simplify_path,
};

/// Driven ports the planner depends on.
#[derive(Clone)]
pub struct RoutePlannerPorts {
    /// Forward geocoding for place names.
    pub geocoder: Arc<dyn Geocoder>,
    /// Reverse geocoding for station addresses.
    pub address_lookup: Arc<dyn AddressLookup>,
    /// Candidate route source.
    pub route_provider: Arc<dyn RouteProvider>,
    /// Fuel station source.
    pub fuel_station_source: Arc<dyn FuelStationSource>,
}

/// Default [`RoutePlanningService`] implementation.
#[derive(Clone)]
pub struct RoutePlanner {
    locations: LocationResolver,
    routes: RouteFetcher,
    stations: FuelStationLocator,
    enricher: Option<AddressEnricher>,
    config: PlannerConfig,
}

impl RoutePlanner {
    /// Wire the pipeline over `ports` with an immutable `config`.
    pub fn new(ports: RoutePlannerPorts, config: PlannerConfig) -> Self {
        let enricher = config.reverse_geocode.then(|| {
            AddressEnricher::new(ports.address_lookup, config.reverse_geocode_concurrency)
        });
        Self {
            locations: LocationResolver::new(ports.geocoder),
            routes: RouteFetcher::new(ports.route_provider),
            stations: FuelStationLocator::new(ports.fuel_station_source, config.search),
            enricher,
            config,
        }
    }
}

#[async_trait]
impl RoutePlanningService for RoutePlanner {
    async fn plan(&self, request: &RoutePlanRequest) -> Result<RoutePlan, Error> {
        let deadline = Instant::now() + self.config.best_effort_budget;
        let start = self.locations.resolve(&request.start).await?;
        let destination = self.locations.resolve(&request.destination).await?;
        debug!(%start, %destination, "locations resolved");

        let candidates = self.routes.fetch(start, destination).await?;
        let selected = select_route(&candidates)
            .ok_or_else(|| Error::no_route_found("no usable route candidates"))?;
        info!(
            candidates = candidates.len(),
            route_index = selected.index,
            duration_seconds = selected.candidate.duration_seconds,
            distance_metres = selected.candidate.distance_metres,
            "route selected"
        );

        let simplified =
            simplify_path(&selected.candidate.path, self.config.simplification_tolerance);
        let segments = segment_path(&simplified, self.config.points_per_segment);
        debug!(
            points = selected.candidate.path.len(),
            simplified = simplified.len(),
            segments = segments.len(),
            "route simplified"
        );

        let search = self.stations.locate_until(&segments, deadline).await;
        if search.is_degraded() {
            warn!(
                failed = search.failed,
                dispatched = search.dispatched,
                "fuel station search degraded"
            );
        }

        let pumps = match &self.enricher {
            Some(enricher) => enricher.enrich_until(search.stations, deadline).await,
            None => search.stations,
        };
        info!(petrol_pumps = pumps.len(), "route plan assembled");

        Ok(RoutePlan::assemble(
            &selected,
            simplified,
            pumps,
            self.config.geometry,
        ))
    }
}
