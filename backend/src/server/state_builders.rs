//! Builders wiring the provider adapters into the route planner.

use std::sync::Arc;

use actix_web::web;

use fuelroute::domain::ports::RoutePlanningService;
use fuelroute::domain::{RoutePlanner, RoutePlannerPorts};
use fuelroute::inbound::http::state::HttpState;
use fuelroute::outbound::http::AdapterBuildError;
use fuelroute::outbound::nominatim::NominatimHttpSource;
use fuelroute::outbound::osrm::OsrmHttpSource;
use fuelroute::outbound::overpass::OverpassHttpSource;
use fuelroute::settings::RuntimeSettings;

/// Build the route planner over the reqwest-backed provider adapters.
///
/// The Nominatim adapter serves both forward and reverse geocoding, so one
/// instance backs both ports.
///
/// # Errors
/// Returns [`AdapterBuildError`] when an HTTP client cannot be constructed or
/// a base URL cannot carry API paths.
pub fn build_route_planning(
    runtime: &RuntimeSettings,
) -> Result<Arc<dyn RoutePlanningService>, AdapterBuildError> {
    let providers = &runtime.providers;
    let nominatim = Arc::new(NominatimHttpSource::new(
        &providers.geocoder_url,
        providers.upstream_timeout,
        providers.identity.clone(),
    )?);
    let osrm = OsrmHttpSource::new(
        &providers.router_url,
        providers.upstream_timeout,
        providers.identity.clone(),
    )?;
    let overpass = OverpassHttpSource::new(
        providers.overpass_url.clone(),
        providers.upstream_timeout,
        providers.identity.clone(),
    )?;

    let ports = RoutePlannerPorts {
        geocoder: nominatim.clone(),
        address_lookup: nominatim,
        route_provider: Arc::new(osrm),
        fuel_station_source: Arc::new(overpass),
    };
    Ok(Arc::new(RoutePlanner::new(ports, runtime.planner)))
}

/// Build shared handler state from the planning service.
pub fn build_http_state(
    runtime: &RuntimeSettings,
    route_planning: Arc<dyn RoutePlanningService>,
) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(route_planning, runtime.request_timeout))
}
