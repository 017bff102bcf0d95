//! OpenAPI mirrors of the domain error types.
//!
//! `crate::domain::Error` stays free of utoipa derives; these shadow types
//! register under the domain names through `#[schema(as = ...)]` so the
//! generated document still refers to `crate.domain.Error`.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed, for example a coordinate out of range.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The geocoder has no match for a place name.
    #[schema(rename = "location_not_found")]
    LocationNotFound,
    /// No drivable route connects the two locations.
    #[schema(rename = "no_route_found")]
    NoRouteFound,
    /// A geocoding or routing provider failed.
    #[schema(rename = "upstream_unavailable")]
    UpstreamUnavailable,
    /// A provider or the request as a whole timed out.
    #[schema(rename = "upstream_timeout")]
    UpstreamTimeout,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "location_not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "location 'Atlantis' not found")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}
