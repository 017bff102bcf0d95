//! Outbound adapters implementing domain ports for external providers.
//!
//! - **nominatim**: geocoding and reverse geocoding (`Geocoder`,
//!   `AddressLookup`)
//! - **osrm**: driving routes with alternatives (`RouteProvider`)
//! - **overpass**: fuel stations around route segments (`FuelStationSource`)
//!
//! Adapters are thin translators between provider wire formats and domain
//! types. They contain no business logic.

pub mod http;
pub mod nominatim;
pub mod osrm;
pub mod overpass;
