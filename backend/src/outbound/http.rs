//! Shared reqwest plumbing for the provider adapters.
//!
//! Every adapter classifies failures the same way: reqwest timeouts and
//! 408/504 are timeouts, 429 is throttling, other 4xx are rejected requests
//! and everything else is a transport failure. Upstream bodies are only ever
//! logged through [`status_message`], never returned to clients.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

/// Outbound identity sent with every provider request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpIdentity {
    /// HTTP user-agent header value.
    pub user_agent: String,
    /// Contact header value, as requested by the OSM usage policies.
    pub contact: String,
}

impl Default for HttpIdentity {
    fn default() -> Self {
        Self {
            user_agent: "fuelroute/0.1".to_owned(),
            contact: "ops@fuelroute.invalid".to_owned(),
        }
    }
}

/// Failures raised while constructing an adapter.
#[derive(Debug, thiserror::Error)]
pub enum AdapterBuildError {
    /// The reqwest client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// The configured base URL cannot carry path segments.
    #[error("base URL '{url}' cannot be used as an API root")]
    BaseUrl {
        /// Offending URL.
        url: String,
    },
}

/// Provider-agnostic failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailureKind {
    Transport,
    Timeout,
    RateLimited,
    InvalidRequest,
}

pub(crate) fn build_client(
    timeout: Duration,
    identity: &HttpIdentity,
) -> Result<Client, AdapterBuildError> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(identity.user_agent.as_str())
        .build()?)
}

/// Append `segments` to the path of `base`.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, AdapterBuildError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| AdapterBuildError::BaseUrl {
            url: base.to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

pub(crate) fn classify_transport(error: &reqwest::Error) -> FailureKind {
    if error.is_timeout() {
        FailureKind::Timeout
    } else {
        FailureKind::Transport
    }
}

pub(crate) fn classify_status(status: StatusCode) -> FailureKind {
    match status {
        StatusCode::TOO_MANY_REQUESTS => FailureKind::RateLimited,
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => FailureKind::Timeout,
        _ if status.is_client_error() => FailureKind::InvalidRequest,
        _ => FailureKind::Transport,
    }
}

pub(crate) fn status_message(status: StatusCode, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

/// Map a [`FailureKind`] onto a port error enum generated by
/// `define_port_error!` with the standard five variants.
macro_rules! port_failure {
    ($error:ty, $kind:expr, $message:expr) => {{
        let message = $message;
        match $kind {
            $crate::outbound::http::FailureKind::Transport => <$error>::transport(message),
            $crate::outbound::http::FailureKind::Timeout => <$error>::timeout(message),
            $crate::outbound::http::FailureKind::RateLimited => <$error>::rate_limited(message),
            $crate::outbound::http::FailureKind::InvalidRequest => {
                <$error>::invalid_request(message)
            }
        }
    }};
}

pub(crate) use port_failure;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::rate_limited(StatusCode::TOO_MANY_REQUESTS, FailureKind::RateLimited)]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT, FailureKind::Timeout)]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT, FailureKind::Timeout)]
    #[case::bad_request(StatusCode::BAD_REQUEST, FailureKind::InvalidRequest)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, FailureKind::Transport)]
    #[case::bad_gateway(StatusCode::BAD_GATEWAY, FailureKind::Transport)]
    fn classifies_statuses(#[case] status: StatusCode, #[case] expected: FailureKind) {
        assert_eq!(classify_status(status), expected);
    }

    #[test]
    fn status_message_compacts_and_truncates_body() {
        let body = format!("  error:\n\n{}", "x".repeat(300));
        let message = status_message(StatusCode::BAD_GATEWAY, body.as_bytes());
        assert!(message.starts_with("status 502: error: xxx"));
        assert!(message.ends_with("..."));
    }

    #[test]
    fn status_message_omits_empty_body() {
        assert_eq!(status_message(StatusCode::BAD_GATEWAY, b" \n"), "status 502");
    }

    #[rstest]
    #[case("https://router.example/", &["route", "v1", "driving"], "https://router.example/route/v1/driving")]
    #[case("https://nominatim.example/api", &["search"], "https://nominatim.example/api/search")]
    #[case("https://nominatim.example/api/", &["reverse"], "https://nominatim.example/api/reverse")]
    fn endpoints_extend_base_path(
        #[case] base: &str,
        #[case] segments: &[&str],
        #[case] expected: &str,
    ) {
        let base = Url::parse(base).expect("valid url");
        let url = endpoint(&base, segments).expect("endpoint builds");
        assert_eq!(url.as_str(), expected);
    }

    #[test]
    fn rejects_cannot_be_a_base_urls() {
        let base = Url::parse("mailto:ops@example.com").expect("valid url");
        assert!(matches!(
            endpoint(&base, &["search"]),
            Err(AdapterBuildError::BaseUrl { .. })
        ));
    }
}
