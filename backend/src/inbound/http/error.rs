//! Actix rendering of domain [`Error`]s.
//!
//! The status follows the error code. Server-side failures are logged with
//! their full message; internal errors reach the client with a fixed message
//! and no details.

use std::borrow::Cow;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::warn;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

/// HTTP status answered for each error code.
#[must_use]
pub const fn http_status(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::LocationNotFound => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::NoRouteFound => StatusCode::NOT_FOUND,
        ErrorCode::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
        ErrorCode::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// The error as the client should see it.
fn client_view(error: &Error) -> Cow<'_, Error> {
    if error.code() != ErrorCode::InternalError {
        return Cow::Borrowed(error);
    }
    let redacted = Error::internal(REDACTED_MESSAGE);
    Cow::Owned(match error.trace_id() {
        Some(id) => redacted.with_trace_id(id),
        None => redacted,
    })
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        http_status(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            warn!(
                code = self.code().as_str(),
                trace_id = self.trace_id().unwrap_or("-"),
                message = self.message(),
                "route request failed"
            );
        }

        let mut response = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id));
        }
        response.json(client_view(self))
    }
}
