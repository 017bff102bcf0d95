//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the route planning and health endpoints along with
//! the response schemas. Domain errors are described through the wrappers in
//! [`crate::inbound::http::schemas`] so domain types stay free of utoipa.
//!
//! The document is served by Swagger UI in debug builds and printed by the
//! `openapi-dump` binary.

use crate::inbound::http::route::{PetrolPumpBody, RouteResponseBody};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fuel route planner API",
        description = "Plans the fastest driving route between two locations and lists fuel stations along it."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::route::plan_route,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RouteResponseBody,
        PetrolPumpBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "route", description = "Route planning with fuel stops"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
