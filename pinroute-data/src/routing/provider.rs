//! HTTP `DistanceOracle` using OSRM's Route API.

use std::time::Duration;

use async_trait::async_trait;
use geo::Coord;
use log::debug;
use pinroute_core::{DistanceOracle, LegMetrics, OracleError, check_coordinate};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

use super::osrm::{RouteResponse, RouteSummary};

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = "pinroute/0.1";

/// Default OSRM routing profile.
pub const DEFAULT_PROFILE: &str = "driving";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Longest error body echoed back in [`OracleError::Http`].
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Errors raised while building an [`HttpDistanceOracle`].
#[derive(Debug, Error)]
pub enum OracleBuildError {
    /// The base URL could not be parsed or is not HTTP(S).
    #[error("invalid OSRM base URL `{url}`: {message}")]
    InvalidBaseUrl {
        /// URL as supplied.
        url: String,
        /// Why it was rejected.
        message: String,
    },
    /// The routing profile is empty or contains a path separator.
    #[error("invalid OSRM profile `{0}`")]
    InvalidProfile(String),
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration for [`HttpDistanceOracle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpDistanceOracleConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// OSRM profile segment, such as `driving` or `foot`.
    pub profile: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpDistanceOracleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_owned(),
            profile: DEFAULT_PROFILE.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpDistanceOracleConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Distance oracle backed by an OSRM server.
///
/// Each [`lookup`](DistanceOracle::lookup) is one HTTP request; nothing is
/// cached or retried. The oracle holds a [`Client`], so clones of it share a
/// connection pool.
#[derive(Debug, Clone)]
pub struct HttpDistanceOracle {
    client: Client,
    base_url: String,
    config: HttpDistanceOracleConfig,
}

impl HttpDistanceOracle {
    /// Create a new oracle with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, OracleBuildError> {
        Self::with_config(HttpDistanceOracleConfig::new(base_url))
    }

    /// Create a new oracle with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or profile is invalid or the HTTP
    /// client fails to build.
    pub fn with_config(config: HttpDistanceOracleConfig) -> Result<Self, OracleBuildError> {
        let base_url = normalise_base_url(&config.base_url)?;
        if config.profile.is_empty() || config.profile.contains('/') {
            return Err(OracleBuildError::InvalidProfile(config.profile));
        }
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpDistanceOracleConfig {
        &self.config
    }

    /// Build the OSRM Route API URL for one leg.
    ///
    /// The URL format is:
    /// `{base_url}/route/v1/{profile}/{lon},{lat};{lon},{lat}?overview=false&alternatives=false`.
    fn build_route_url(&self, origin: Coord<f64>, destination: Coord<f64>) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=false&alternatives=false",
            self.base_url,
            self.config.profile,
            origin.x,
            origin.y,
            destination.x,
            destination.y,
        )
    }

    /// Convert a reqwest error to an `OracleError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> OracleError {
        if error.is_timeout() {
            return OracleError::Timeout {
                url: url.to_owned(),
                timeout: self.config.timeout,
            };
        }

        if let Some(status) = error.status() {
            return OracleError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        OracleError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

#[async_trait]
impl DistanceOracle for HttpDistanceOracle {
    async fn lookup(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
    ) -> Result<LegMetrics, OracleError> {
        check_coordinate(origin)?;
        check_coordinate(destination)?;
        let url = self.build_route_url(origin, destination);
        debug!("requesting OSRM route {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        interpret_body(&url, status, &body)
    }
}

/// Parse and validate an OSRM base URL, returning it without a trailing
/// slash.
fn normalise_base_url(raw: &str) -> Result<String, OracleBuildError> {
    let invalid = |message: String| OracleBuildError::InvalidBaseUrl {
        url: raw.to_owned(),
        message,
    };
    let parsed = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme `{}`", parsed.scheme())));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("query strings and fragments are not allowed".to_owned()));
    }
    Ok(parsed.as_str().trim_end_matches('/').to_owned())
}

/// Turn an HTTP status and body into leg metrics.
///
/// OSRM reports routing failures such as `NoRoute` with a 4xx status and a
/// JSON body, so the body is decoded before the status is considered.
fn interpret_body(url: &str, status: StatusCode, body: &str) -> Result<LegMetrics, OracleError> {
    match serde_json::from_str::<RouteResponse>(body) {
        Ok(response) => convert_response(response),
        Err(_) if !status.is_success() => Err(OracleError::Http {
            url: url.to_owned(),
            status: status.as_u16(),
            message: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        }),
        Err(err) => Err(OracleError::Parse {
            message: err.to_string(),
        }),
    }
}

/// Convert an OSRM response to the metrics of its first route.
fn convert_response(response: RouteResponse) -> Result<LegMetrics, OracleError> {
    if !response.is_ok() {
        return Err(OracleError::NoRoute {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }
    let Some(&RouteSummary { distance, duration }) = response.routes.first() else {
        return Err(OracleError::NoRoute {
            code: response.code,
            message: "OSRM response contained no routes".to_owned(),
        });
    };
    if !(distance.is_finite() && distance >= 0.0) {
        return Err(OracleError::InvalidMetrics {
            message: format!("distance {distance} is not a non-negative number"),
        });
    }
    let duration = Duration::try_from_secs_f64(duration).map_err(|err| {
        OracleError::InvalidMetrics {
            message: format!("duration {duration}: {err}"),
        }
    })?;
    Ok(LegMetrics::new(distance, duration))
}
