//! Backend entry-point: loads settings, wires the provider adapters and serves
//! the route planning API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use fuelroute::inbound::http::health::HealthState;
use fuelroute::settings::AppSettings;
use server::{ServerConfig, build_route_planning, create_server, drain_on, shutdown_signal};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let runtime = settings
        .validate()
        .map_err(|e| std::io::Error::other(format!("invalid settings: {e}")))?;
    let route_planning = build_route_planning(&runtime)
        .map_err(|e| std::io::Error::other(format!("failed to build provider adapters: {e}")))?;

    let config = ServerConfig::new(runtime);
    info!(bind_addr = %config.bind_addr(), "starting fuel route planner");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config, route_planning)?;
    actix_web::rt::spawn(drain_on(shutdown_signal(), server.handle(), health_state));
    server.await
}
