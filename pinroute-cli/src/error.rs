//! Error types emitted by the pinroute CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use pinroute_core::{ItineraryError, SearchError, SearchRequestValidationError};
use pinroute_data::routing::OracleBuildError;
use thiserror::Error;

/// Errors emitted by the pinroute CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Option name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option name.
        field: &'static str,
        /// Path as configured.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option name.
        field: &'static str,
        /// Path as configured.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option name.
        field: &'static str,
        /// Path as configured.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening the search request file failed.
    #[error("failed to open search request at {path:?}: {source}")]
    OpenSearchRequest {
        /// Request file path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The search request file is not valid JSON.
    #[error("failed to parse search request at {path:?}: {source}")]
    ParseSearchRequest {
        /// Request file path.
        path: Utf8PathBuf,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// The search request failed validation.
    #[error("invalid search request at {path:?}: {source}")]
    InvalidSearchRequest {
        /// Request file path.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: SearchRequestValidationError,
    },
    /// Building the HTTP distance oracle failed.
    #[error("failed to build distance oracle for {base_url}: {source}")]
    BuildDistanceOracle {
        /// Base URL that was configured.
        base_url: String,
        /// Construction failure.
        #[source]
        source: OracleBuildError,
    },
    /// Starting the async runtime failed.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Installing the logger failed.
    #[error("failed to initialise logging: {0}")]
    Logging(#[source] std::io::Error),
    /// The search itself failed.
    #[error("search failed: {source}")]
    Search {
        /// Search failure.
        #[source]
        source: SearchError,
    },
    /// The best order could not be mapped back onto the request.
    #[error("failed to apply the optimised order: {0}")]
    ApplyOrder(#[from] ItineraryError),
    /// Serialising the report failed.
    #[error("failed to serialise optimisation report: {0}")]
    SerialiseReport(#[source] serde_json::Error),
    /// Writing the report to stdout failed.
    #[error("failed to write optimisation report: {0}")]
    WriteReport(#[source] std::io::Error),
}
