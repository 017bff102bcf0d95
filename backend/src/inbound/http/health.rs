//! Liveness and readiness endpoints.
//!
//! The service moves through three phases: `starting` until the listener is
//! bound, `serving` while it accepts route requests, and `draining` once a
//! shutdown signal arrives. Readiness holds only while serving; liveness
//! fails only while draining.

use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;

const STARTING: u8 = 0;
const SERVING: u8 = 1;
const DRAINING: u8 = 2;

/// Lifecycle phase shared between the server and the probe handlers.
#[derive(Debug, Default)]
pub struct HealthState {
    phase: AtomicU8,
}

#[derive(Serialize)]
struct ProbeBody {
    status: &'static str,
}

impl HealthState {
    /// A service that has not bound its listener yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `serving`. Has no effect once draining.
    pub fn mark_ready(&self) {
        // A failed exchange means shutdown already began.
        let _ = self
            .phase
            .compare_exchange(STARTING, SERVING, Ordering::AcqRel, Ordering::Acquire);
    }

    /// Enter `draining`; both probes answer 503 from now on.
    pub fn begin_draining(&self) {
        self.phase.store(DRAINING, Ordering::Release);
    }

    /// Whether route requests should be sent to this instance.
    pub fn is_ready(&self) -> bool {
        self.phase.load(Ordering::Acquire) == SERVING
    }

    /// Whether the process should be left running.
    pub fn is_alive(&self) -> bool {
        self.phase.load(Ordering::Acquire) != DRAINING
    }

    fn status(&self) -> &'static str {
        match self.phase.load(Ordering::Acquire) {
            STARTING => "starting",
            SERVING => "serving",
            _ => "draining",
        }
    }

    fn answer(&self, healthy: bool) -> HttpResponse {
        let mut response = if healthy {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };
        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .json(ProbeBody {
                status: self.status(),
            })
    }
}

/// Readiness probe: 200 while serving, 503 while starting or draining.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Accepting route requests"),
        (status = 503, description = "Starting up or draining")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    state.answer(state.is_ready())
}

/// Liveness probe: 503 only once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Process is running"),
        (status = 503, description = "Draining after a shutdown signal")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    state.answer(state.is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    #[derive(Clone, Copy, Debug)]
    enum Phase {
        Starting,
        Serving,
        Draining,
    }

    fn state_in(phase: Phase) -> HealthState {
        let state = HealthState::new();
        match phase {
            Phase::Starting => {}
            Phase::Serving => state.mark_ready(),
            Phase::Draining => {
                state.mark_ready();
                state.begin_draining();
            }
        }
        state
    }

    #[rstest]
    #[case(Phase::Starting, "/health/ready", StatusCode::SERVICE_UNAVAILABLE, "starting")]
    #[case(Phase::Starting, "/health/live", StatusCode::OK, "starting")]
    #[case(Phase::Serving, "/health/ready", StatusCode::OK, "serving")]
    #[case(Phase::Serving, "/health/live", StatusCode::OK, "serving")]
    #[case(Phase::Draining, "/health/ready", StatusCode::SERVICE_UNAVAILABLE, "draining")]
    #[case(Phase::Draining, "/health/live", StatusCode::SERVICE_UNAVAILABLE, "draining")]
    #[actix_web::test]
    async fn probes_follow_the_lifecycle(
        #[case] phase: Phase,
        #[case] uri: &str,
        #[case] expected: StatusCode,
        #[case] status: &str,
    ) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_in(phase)))
                .service(ready)
                .service(live),
        )
        .await;

        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        assert_eq!(response.status(), expected);
        assert_eq!(
            response
                .headers()
                .get(header::CACHE_CONTROL)
                .and_then(|value| value.to_str().ok()),
            Some("no-store")
        );
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body, json!({ "status": status }));
    }

    #[test]
    fn draining_is_not_undone_by_a_late_bind() {
        let state = HealthState::new();
        state.begin_draining();
        state.mark_ready();
        assert!(!state.is_ready());
        assert!(!state.is_alive());
    }
}
