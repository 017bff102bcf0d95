//! Domain primitives, services and ports.
//!
//! Purpose: model the route planning pipeline independently of HTTP and of
//! the concrete geocoding, routing and POI providers. Adapters live under
//! `inbound` and `outbound` and talk to the domain only through [`ports`].
//!
//! Public surface:
//! - [`Coordinate`] and [`LocationQuery`]: validated WGS84 input.
//! - [`RoutePlanner`]: the pipeline behind [`ports::RoutePlanningService`].
//! - [`RoutePlan`] and [`PetrolPump`]: the planning result.
//! - [`Error`] and [`ErrorCode`]: transport-agnostic failures.

pub mod config;
pub mod coordinate;
pub mod error;
pub mod fuel_stations;
pub mod geometry;
pub mod location;
pub mod ports;
pub mod route_plan;
pub mod route_planner;
pub mod routing;
pub mod trace_id;

pub use self::config::PlannerConfig;
pub use self::coordinate::{Coordinate, CoordinateError};
pub use self::error::{Error, ErrorCode};
pub use self::fuel_stations::{
    AddressEnricher, FuelStationLocator, FuelStationSearch, FuelStationSearchSettings,
    PetrolPump, dedup_stations,
};
pub use self::geometry::{segment_path, simplify_path};
pub use self::location::{LocationQuery, LocationResolver};
pub use self::route_plan::{RouteGeometry, RoutePlan};
pub use self::route_planner::{RoutePlanner, RoutePlannerPorts};
pub use self::routing::{RouteFetcher, SelectedRoute, select_route};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
