//! Route planning handler.
//!
//! ```text
//! GET /route?start=<location>&destination=<location>
//! ```
//!
//! Each location is either a `lat,lon` literal or a free-text place name.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::RoutePlanRequest;
use crate::domain::{Error, PetrolPump, RoutePlan};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{LocationField, require_location};

/// Query parameters for `GET /route`.
///
/// Both are optional at the extractor level so a missing value yields a
/// structured `missing_field` error instead of a plain-text 400.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RouteQuery {
    /// Start location: `lat,lon` or a place name.
    #[param(example = "40.0,-74.0")]
    pub start: Option<String>,
    /// Destination location: `lat,lon` or a place name.
    #[param(example = "40.1,-74.1")]
    pub destination: Option<String>,
}

/// A fuel station on the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PetrolPumpBody {
    /// Station or brand name.
    pub name: Option<String>,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Street-level address.
    pub address: Option<String>,
    /// City, town or village.
    pub city: Option<String>,
    /// State or region.
    pub state: Option<String>,
}

impl From<PetrolPump> for PetrolPumpBody {
    fn from(pump: PetrolPump) -> Self {
        Self {
            name: pump.name,
            latitude: pump.location.latitude(),
            longitude: pump.location.longitude(),
            address: pump.address,
            city: pump.city,
            state: pump.state,
        }
    }
}

/// Successful route planning response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RouteResponseBody {
    /// Index of the chosen route in the routing provider's response.
    pub route_index: usize,
    /// Route geometry as `[lat, lon]` pairs.
    #[schema(value_type = Vec<Vec<f64>>, example = json!([[40.0, -74.0], [40.1, -74.1]]))]
    pub route: Vec<[f64; 2]>,
    /// Fuel stations near the route.
    pub petrol_pumps: Vec<PetrolPumpBody>,
}

impl From<RoutePlan> for RouteResponseBody {
    fn from(plan: RoutePlan) -> Self {
        Self {
            route_index: plan.route_index,
            route: plan.route.into_iter().map(|point| point.as_lat_lon()).collect(),
            petrol_pumps: plan
                .petrol_pumps
                .into_iter()
                .map(PetrolPumpBody::from)
                .collect(),
        }
    }
}

/// Plan the fastest route between two locations with fuel stops.
///
/// Fuel station lookups are best-effort: failures there still return the
/// route with fewer (or no) stations.
#[utoipa::path(
    get,
    path = "/route",
    params(RouteQuery),
    responses(
        (status = 200, description = "Route planned", body = RouteResponseBody),
        (status = 400, description = "Missing or invalid location", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "No route between the locations", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 422, description = "Location not found", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 502, description = "Upstream provider unavailable", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 504, description = "Upstream provider timed out", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["route"],
    operation_id = "planRoute"
)]
#[get("/route")]
pub async fn plan_route(
    state: web::Data<HttpState>,
    query: web::Query<RouteQuery>,
) -> ApiResult<web::Json<RouteResponseBody>> {
    let RouteQuery { start, destination } = query.into_inner();
    let request = RoutePlanRequest::new(
        require_location(start, LocationField::Start)?,
        require_location(destination, LocationField::Destination)?,
    );

    let plan = tokio::time::timeout(state.request_timeout, state.route_planning.plan(&request))
        .await
        .map_err(|_| {
            warn!(
                timeout_ms = state.request_timeout.as_millis(),
                "route planning exceeded request timeout"
            );
            Error::upstream_timeout("route planning timed out")
        })??;

    Ok(web::Json(RouteResponseBody::from(plan)))
}

#[cfg(test)]
#[path = "route_tests.rs"]
mod tests;
