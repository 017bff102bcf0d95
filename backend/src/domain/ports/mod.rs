//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`Geocoder`, `AddressLookup`, `RouteProvider`,
//! `FuelStationSource`) are implemented by the reqwest adapters under
//! `outbound`. The driving port (`RoutePlanningService`) is implemented by
//! [`crate::domain::RoutePlanner`] and consumed by `inbound::http`.

mod macros;
pub(crate) use macros::define_port_error;

mod fuel_station_source;
mod geocoder;
mod route_planning;
mod route_provider;

#[cfg(test)]
pub use fuel_station_source::MockFuelStationSource;
pub use fuel_station_source::{
    FixtureFuelStationSource, FuelStationQuery, FuelStationSource, FuelStationSourceError,
    RawFuelStation,
};
#[cfg(test)]
pub use geocoder::{MockAddressLookup, MockGeocoder};
pub use geocoder::{
    AddressLookup, AddressParts, FixtureAddressLookup, FixtureGeocoder, Geocoder, GeocoderError,
};
#[cfg(test)]
pub use route_planning::MockRoutePlanningService;
pub use route_planning::{FixtureRoutePlanningService, RoutePlanRequest, RoutePlanningService};
#[cfg(test)]
pub use route_provider::MockRouteProvider;
pub use route_provider::{
    FixtureRouteProvider, RouteCandidate, RouteProvider, RouteProviderError,
};
