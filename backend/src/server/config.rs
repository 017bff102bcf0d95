//! HTTP server configuration object.

use std::net::SocketAddr;

use fuelroute::settings::RuntimeSettings;

/// Validated settings needed to build and bind the HTTP server.
pub struct ServerConfig {
    pub(crate) runtime: RuntimeSettings,
}

impl ServerConfig {
    /// Construct a server configuration from validated settings.
    #[must_use]
    pub fn new(runtime: RuntimeSettings) -> Self {
        Self { runtime }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.runtime.bind_addr
    }
}
