//! Domain-level error payload.
//!
//! Errors are transport agnostic. The HTTP adapter maps [`ErrorCode`] to a
//! status code and serialises [`Error`] as the response body.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed, for example a coordinate outside WGS84 range.
    InvalidRequest,
    /// The geocoder has no match for a place name.
    LocationNotFound,
    /// The router returned nothing usable between the two locations.
    NoRouteFound,
    /// A geocoding or routing provider failed or answered with an error.
    UpstreamUnavailable,
    /// A provider, or the request as a whole, ran out of time.
    UpstreamTimeout,
    /// An unexpected error occurred inside the service.
    InternalError,
}

impl ErrorCode {
    /// Wire name of the code, as serialised in error bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::LocationNotFound => "location_not_found",
            Self::NoRouteFound => "no_route_found",
            Self::UpstreamUnavailable => "upstream_unavailable",
            Self::UpstreamTimeout => "upstream_timeout",
            Self::InternalError => "internal_error",
        }
    }
}

/// Error payload shared by domain services and inbound adapters.
///
/// The current [`TraceId`] is captured at construction so responses and logs
/// can be correlated without threading the identifier through every call.
///
/// # Examples
/// ```
/// use fuelroute::domain::{Error, ErrorCode};
///
/// let err = Error::location_not_found("no match for 'Atlantis'");
/// assert_eq!(err.code(), ErrorCode::LocationNotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none", alias = "trace_id")]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create a new error, capturing the trace identifier in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to clients.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier, when one was in scope.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary structured details.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach a trace identifier to the error.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use fuelroute::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad").with_details(json!({ "field": "start" }));
    /// assert!(err.details().is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::LocationNotFound`].
    pub fn location_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::LocationNotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::NoRouteFound`].
    pub fn no_route_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NoRouteFound, message)
    }

    /// Convenience constructor for [`ErrorCode::UpstreamUnavailable`].
    pub fn upstream_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::UpstreamTimeout`].
    pub fn upstream_timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamTimeout, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for Error {}
