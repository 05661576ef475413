use std::time::Duration;

use thiserror::Error;

/// Errors from [`crate::oracle::DistanceOracle::lookup`].
///
/// Every variant means the leg could not be measured; searches treat them
/// alike and only the message differs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OracleError {
    /// The routing service found no route between the two points.
    #[error("no route found ({code}): {message}")]
    NoRoute {
        /// Status code reported by the service.
        code: String,
        /// Human-readable explanation, possibly empty.
        message: String,
    },
    /// A coordinate lies outside WGS84 bounds or is not finite.
    #[error("invalid coordinate (lat {latitude}, lon {longitude})")]
    InvalidCoordinate {
        /// Latitude in degrees.
        latitude: f64,
        /// Longitude in degrees.
        longitude: f64,
    },
    /// The service answered with negative or non-finite metrics.
    #[error("routing service returned invalid metrics: {message}")]
    InvalidMetrics {
        /// Description of the rejected values.
        message: String,
    },
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout.
        timeout: Duration,
    },
    /// The service returned an HTTP error status.
    #[error("request to {url} failed with status {status}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error text from the transport.
        message: String,
    },
    /// The request failed before a response arrived.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Error text from the transport.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse routing response: {message}")]
    Parse {
        /// Decoder error text.
        message: String,
    },
}
