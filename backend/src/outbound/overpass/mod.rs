//! Overpass outbound adapter.
//!
//! This module provides a thin HTTP implementation of the
//! `FuelStationSource` port using `around` filters over segment polylines.

mod dto;
mod http_source;

pub use http_source::OverpassHttpSource;
