//! OSRM outbound adapter implementing the `RouteProvider` port.

mod dto;
mod http_source;

pub use http_source::OsrmHttpSource;
