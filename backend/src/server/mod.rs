//! HTTP server assembly: planner adapters, app routes and the Trace wrapper.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::build_route_planning;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use fuelroute::Trace;
#[cfg(debug_assertions)]
use fuelroute::doc::ApiDoc;
use fuelroute::domain::ports::RoutePlanningService;
use fuelroute::inbound::http::health::{HealthState, live, ready};
use fuelroute::inbound::http::route::plan_route;
use fuelroute::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use std::future::Future;
use std::sync::Arc;

use tracing::{error, info};

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(plan_route)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server around the planning service.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the socket is bound.
/// - `config`: validated settings carrying the bind address and request timeout.
/// - `route_planning`: the planning use-case served at `GET /route`.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
    route_planning: Arc<dyn RoutePlanningService>,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config.runtime, route_planning);
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Resolve on SIGINT or SIGTERM.
#[cfg(unix)]
pub async fn shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

/// Resolve on Ctrl-C.
#[cfg(not(unix))]
pub async fn shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

/// Once `signal` resolves, fail both health probes and stop the server,
/// letting in-flight route requests finish.
///
/// Signal handling is disabled on the server itself, so this is what stops
/// it. If the signal listener cannot be installed the server keeps running.
pub async fn drain_on<F>(signal: F, server: ServerHandle, health_state: web::Data<HealthState>)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(error) = signal.await {
        error!(%error, "failed to listen for shutdown signals");
        return;
    }
    health_state.begin_draining();
    info!("shutdown requested; draining in-flight requests");
    server.stop(true).await;
}

#[cfg(test)]
mod tests {
    //! Wiring checks for the assembled application.

    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use fuelroute::domain::TRACE_ID_HEADER;
    use fuelroute::domain::ports::FixtureRoutePlanningService;
    use rstest::rstest;
    use std::time::Duration;

    fn deps() -> AppDependencies {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        AppDependencies {
            health_state,
            http_state: web::Data::new(HttpState::new(
                Arc::new(FixtureRoutePlanningService),
                Duration::from_secs(5),
            )),
        }
    }

    #[rstest]
    #[case("/health/ready", StatusCode::OK)]
    #[case("/health/live", StatusCode::OK)]
    #[case("/route?start=40.0,-74.0&destination=40.1,-74.1", StatusCode::NOT_FOUND)]
    #[case("/route?start=40.0,-74.0", StatusCode::BAD_REQUEST)]
    #[actix_web::test]
    async fn routes_are_mounted_behind_trace(#[case] uri: &str, #[case] expected: StatusCode) {
        let app = actix_test::init_service(build_app(deps())).await;
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;

        assert_eq!(response.status(), expected);
        assert!(response.headers().contains_key(TRACE_ID_HEADER));
    }

    #[actix_web::test]
    async fn shutdown_drains_health_and_stops_the_server() {
        let settings: fuelroute::settings::AppSettings = serde_json::from_value(
            serde_json::json!({ "bind_host": "127.0.0.1", "bind_port": 0 }),
        )
        .expect("settings decode");
        let runtime = settings.validate().expect("valid settings");
        let health_state = web::Data::new(HealthState::new());
        let server = create_server(
            health_state.clone(),
            ServerConfig::new(runtime),
            Arc::new(FixtureRoutePlanningService),
        )
        .expect("server binds");
        assert!(health_state.is_ready());

        let handle = server.handle();
        let running = actix_web::rt::spawn(server);
        drain_on(async { Ok(()) }, handle, health_state.clone()).await;

        running
            .await
            .expect("server task joins")
            .expect("server stops cleanly");
        assert!(!health_state.is_ready());
        assert!(!health_state.is_alive());
    }
}
