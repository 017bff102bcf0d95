//! Service configuration loaded via OrthoConfig.
//!
//! Values layer from defaults, an optional configuration file, `FUELROUTE_*`
//! environment variables and command-line flags. [`AppSettings::validate`]
//! turns them into the immutable runtime configuration handed to the
//! adapters and the planner at startup; nothing reads the environment after
//! that.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::{FuelStationSearchSettings, PlannerConfig, RouteGeometry};
use crate::outbound::http::HttpIdentity;

const DEFAULT_BIND_HOST: &str = "0.0.0.0";
const DEFAULT_BIND_PORT: u16 = 8080;
const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_ROUTER_URL: &str = "https://router.project-osrm.org";
const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
const DEFAULT_USER_AGENT: &str = "fuelroute/0.1";
const DEFAULT_CONTACT: &str = "ops@fuelroute.invalid";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 15;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_CONCURRENT_QUERIES: usize = 10;
const DEFAULT_POINTS_PER_SEGMENT: usize = 10;
const DEFAULT_SIMPLIFICATION_TOLERANCE: f64 = 0.001;
const DEFAULT_SEARCH_RADIUS_METRES: u32 = 1000;
const DEFAULT_REVERSE_GEOCODE_CONCURRENCY: usize = 1;

/// Raw configuration values. Every field is optional; accessors apply the
/// documented defaults.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FUELROUTE")]
pub struct AppSettings {
    /// Interface the HTTP server binds to.
    pub bind_host: Option<String>,
    /// Port the HTTP server binds to.
    pub bind_port: Option<u16>,
    /// Nominatim base URL.
    pub geocoder_url: Option<String>,
    /// OSRM base URL.
    pub router_url: Option<String>,
    /// Overpass interpreter endpoint.
    pub overpass_url: Option<String>,
    /// User-Agent sent to every provider.
    pub user_agent: Option<String>,
    /// Contact sent to every provider.
    pub contact: Option<String>,
    /// Per-call timeout for provider requests, in seconds.
    pub upstream_timeout_secs: Option<u64>,
    /// Upper bound on a whole `/route` request, in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Fuel station queries allowed in flight at once.
    pub max_concurrent_queries: Option<usize>,
    /// Maximum points per fuel station query segment.
    pub points_per_segment: Option<usize>,
    /// Douglas–Peucker tolerance in degrees.
    pub simplification_tolerance: Option<f64>,
    /// Fuel station search radius around each segment, in metres.
    pub search_radius_metres: Option<u32>,
    /// Respond with the simplified route instead of the full geometry.
    pub respond_with_simplified_route: Option<bool>,
    /// Reverse geocode stations that lack address fields.
    pub reverse_geocode: Option<bool>,
    /// Reverse geocoding lookups allowed in flight at once.
    pub reverse_geocode_concurrency: Option<usize>,
}

/// Reasons the configuration cannot start the service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    /// The bind host is not an IP address.
    #[error("bind host '{value}' is not an IP address")]
    BindHost {
        /// Rejected value.
        value: String,
    },
    /// A provider URL does not parse.
    #[error("{field} '{value}' is not a valid URL: {message}")]
    Url {
        /// Setting name.
        field: &'static str,
        /// Rejected value.
        value: String,
        /// Parser message.
        message: String,
    },
    /// A numeric setting must be strictly positive.
    #[error("{field} must be greater than zero")]
    NotPositive {
        /// Setting name.
        field: &'static str,
    },
    /// A text setting must not be blank.
    #[error("{field} must not be blank")]
    Blank {
        /// Setting name.
        field: &'static str,
    },
}

/// Provider endpoints and shared outbound HTTP settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    /// Nominatim base URL.
    pub geocoder_url: Url,
    /// OSRM base URL.
    pub router_url: Url,
    /// Overpass interpreter endpoint.
    pub overpass_url: Url,
    /// Per-call provider timeout.
    pub upstream_timeout: Duration,
    /// Identity headers sent with every call.
    pub identity: HttpIdentity,
}

/// Validated configuration used to wire the running service.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeSettings {
    /// Socket the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Upper bound on a whole planning request.
    pub request_timeout: Duration,
    /// Provider adapter settings.
    pub providers: ProviderSettings,
    /// Planner tunables.
    pub planner: PlannerConfig,
}

impl AppSettings {
    /// Return the configured bind host, falling back to all interfaces.
    pub fn bind_host(&self) -> &str {
        self.bind_host.as_deref().unwrap_or(DEFAULT_BIND_HOST)
    }

    /// Return the configured bind port.
    pub fn bind_port(&self) -> u16 {
        self.bind_port.unwrap_or(DEFAULT_BIND_PORT)
    }

    /// Return the Nominatim base URL.
    pub fn geocoder_url(&self) -> &str {
        self.geocoder_url.as_deref().unwrap_or(DEFAULT_GEOCODER_URL)
    }

    /// Return the OSRM base URL.
    pub fn router_url(&self) -> &str {
        self.router_url.as_deref().unwrap_or(DEFAULT_ROUTER_URL)
    }

    /// Return the Overpass endpoint.
    pub fn overpass_url(&self) -> &str {
        self.overpass_url.as_deref().unwrap_or(DEFAULT_OVERPASS_URL)
    }

    /// Return the outbound User-Agent.
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    /// Return the outbound contact.
    pub fn contact(&self) -> &str {
        self.contact.as_deref().unwrap_or(DEFAULT_CONTACT)
    }

    /// Return the per-call provider timeout in seconds.
    pub fn upstream_timeout_secs(&self) -> u64 {
        self.upstream_timeout_secs.unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS)
    }

    /// Return the whole-request timeout in seconds.
    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    /// Return the cap on fuel station queries in flight.
    pub fn max_concurrent_queries(&self) -> usize {
        self.max_concurrent_queries.unwrap_or(DEFAULT_MAX_CONCURRENT_QUERIES)
    }

    /// Return the maximum points per query segment.
    pub fn points_per_segment(&self) -> usize {
        self.points_per_segment.unwrap_or(DEFAULT_POINTS_PER_SEGMENT)
    }

    /// Return the Douglas–Peucker tolerance in degrees.
    pub fn simplification_tolerance(&self) -> f64 {
        self.simplification_tolerance.unwrap_or(DEFAULT_SIMPLIFICATION_TOLERANCE)
    }

    /// Return the station search radius in metres.
    pub fn search_radius_metres(&self) -> u32 {
        self.search_radius_metres.unwrap_or(DEFAULT_SEARCH_RADIUS_METRES)
    }

    /// Return whether responses carry the simplified route.
    pub fn respond_with_simplified_route(&self) -> bool {
        self.respond_with_simplified_route.unwrap_or(true)
    }

    /// Return whether stations lacking an address are reverse geocoded.
    pub fn reverse_geocode(&self) -> bool {
        self.reverse_geocode.unwrap_or(true)
    }

    /// Return the cap on reverse geocoding lookups in flight.
    pub fn reverse_geocode_concurrency(&self) -> usize {
        self.reverse_geocode_concurrency.unwrap_or(DEFAULT_REVERSE_GEOCODE_CONCURRENCY)
    }

    /// Validate the settings into the runtime configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] naming the first invalid setting.
    pub fn validate(&self) -> Result<RuntimeSettings, SettingsError> {
        let host: IpAddr = self
            .bind_host()
            .parse()
            .map_err(|_| SettingsError::BindHost {
                value: self.bind_host().to_owned(),
            })?;

        let upstream_timeout_secs = positive("upstream_timeout_secs", self.upstream_timeout_secs())?;
        let request_timeout_secs = positive("request_timeout_secs", self.request_timeout_secs())?;
        let max_concurrent_queries =
            positive("max_concurrent_queries", self.max_concurrent_queries())?;
        let points_per_segment = positive("points_per_segment", self.points_per_segment())?;
        let search_radius_metres = positive("search_radius_metres", self.search_radius_metres())?;
        let reverse_geocode_concurrency = positive(
            "reverse_geocode_concurrency",
            self.reverse_geocode_concurrency(),
        )?;
        let simplification_tolerance = self.simplification_tolerance();
        if !(simplification_tolerance.is_finite() && simplification_tolerance > 0.0) {
            return Err(SettingsError::NotPositive {
                field: "simplification_tolerance",
            });
        }

        let upstream_timeout = Duration::from_secs(upstream_timeout_secs);
        let providers = ProviderSettings {
            geocoder_url: parse_url("geocoder_url", self.geocoder_url())?,
            router_url: parse_url("router_url", self.router_url())?,
            overpass_url: parse_url("overpass_url", self.overpass_url())?,
            upstream_timeout,
            identity: HttpIdentity {
                user_agent: non_blank("user_agent", self.user_agent())?,
                contact: non_blank("contact", self.contact())?,
            },
        };

        let request_timeout = Duration::from_secs(request_timeout_secs);
        let planner = PlannerConfig {
            simplification_tolerance,
            points_per_segment,
            search: FuelStationSearchSettings {
                radius_metres: search_radius_metres,
                max_concurrent_queries,
                query_timeout: upstream_timeout,
            },
            geometry: if self.respond_with_simplified_route() {
                RouteGeometry::Simplified
            } else {
                RouteGeometry::Full
            },
            reverse_geocode: self.reverse_geocode(),
            reverse_geocode_concurrency,
            best_effort_budget: best_effort_budget(request_timeout),
        };

        Ok(RuntimeSettings {
            bind_addr: SocketAddr::new(host, self.bind_port()),
            request_timeout,
            providers,
            planner,
        })
    }
}

/// Time after which station search and enrichment stop, measured from the
/// start of planning. A tenth of the request timeout is left for assembling
/// the response.
fn best_effort_budget(request_timeout: Duration) -> Duration {
    request_timeout - request_timeout / 10
}

fn positive<T>(field: &'static str, value: T) -> Result<T, SettingsError>
where
    T: PartialOrd + Default,
{
    if value > T::default() {
        Ok(value)
    } else {
        Err(SettingsError::NotPositive { field })
    }
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, SettingsError> {
    Url::parse(value).map_err(|error| SettingsError::Url {
        field,
        value: value.to_owned(),
        message: error.to_string(),
    })
}

fn non_blank(field: &'static str, value: &str) -> Result<String, SettingsError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SettingsError::Blank { field });
    }
    Ok(trimmed.to_owned())
}
