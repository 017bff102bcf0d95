//! Nominatim outbound adapter.
//!
//! Implements the `Geocoder` and `AddressLookup` ports over the Nominatim
//! `/search` and `/reverse` endpoints.

mod dto;
mod http_source;

pub use http_source::NominatimHttpSource;
