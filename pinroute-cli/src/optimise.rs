//! Optimise command implementation for the pinroute CLI.

use std::io::{BufReader, Write};
use std::num::NonZeroUsize;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use pinroute_core::{
    Criterion, Diagnostics, Itinerary, LegPolicy, RouteOptimiser, SearchRequest, SearchResponse,
    VisitOrder,
};
use pinroute_data::routing::{HttpDistanceOracle, HttpDistanceOracleConfig};
use pinroute_solver::{ExhaustiveSolver, ExhaustiveSolverConfig, FailurePolicy};
use serde::{Deserialize, Serialize};

use crate::fs::{file_is_file, open_utf8_file};
use crate::logging::{LogLevel, init_logger};
use crate::{
    ARG_OPTIMISE_CANDIDATES_IN_FLIGHT, ARG_OPTIMISE_CRITERION, ARG_OPTIMISE_LEGS,
    ARG_OPTIMISE_LOG_LEVEL, ARG_OPTIMISE_MAX_FLEXIBLE, ARG_OPTIMISE_ON_FAILURE,
    ARG_OPTIMISE_OSRM_BASE_URL, ARG_OPTIMISE_PROFILE, ARG_OPTIMISE_REQUEST,
    ARG_OPTIMISE_TIMEOUT_SECS, CliError, ENV_OPTIMISE_REQUEST,
};

/// Leg dispatch accepted by `--legs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum LegsArg {
    /// One leg lookup at a time.
    Sequential,
    /// All legs of a candidate at once.
    Concurrent,
}

impl From<LegsArg> for LegPolicy {
    fn from(value: LegsArg) -> Self {
        match value {
            LegsArg::Sequential => Self::Sequential,
            LegsArg::Concurrent => Self::Concurrent,
        }
    }
}

/// Failure handling accepted by `--on-failure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OnFailureArg {
    /// Stop at the first failing leg.
    Abort,
    /// Drop candidates with a failing leg.
    Skip,
}

impl From<OnFailureArg> for FailurePolicy {
    fn from(value: OnFailureArg) -> Self {
        match value {
            OnFailureArg::Abort => Self::Abort,
            OnFailureArg::Skip => Self::SkipInfeasible,
        }
    }
}

/// CLI arguments for the `optimise` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load a JSON-encoded SearchRequest, query an OSRM instance \
                 for every leg of every candidate order and print the \
                 cheapest order that keeps pinned destinations in place.",
    about = "Optimise the visiting order of a destination list"
)]
#[ortho_config(prefix = "PINROUTE")]
pub(crate) struct OptimiseArgs {
    /// Path to a JSON file containing a SearchRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Base URL for the OSRM server (e.g. "http://localhost:5000").
    #[arg(long = ARG_OPTIMISE_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// OSRM routing profile, such as `driving` or `foot`.
    #[arg(long = ARG_OPTIMISE_PROFILE, value_name = "profile")]
    #[serde(default)]
    pub(crate) profile: Option<String>,
    /// Per-request timeout for leg lookups, in seconds.
    #[arg(long = ARG_OPTIMISE_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Override the criterion stored in the request file.
    #[arg(long = ARG_OPTIMISE_CRITERION, value_name = "distance|duration")]
    #[serde(default)]
    pub(crate) criterion: Option<Criterion>,
    /// How the legs of one candidate are looked up.
    #[arg(long = ARG_OPTIMISE_LEGS, value_enum)]
    #[serde(default)]
    pub(crate) legs: Option<LegsArg>,
    /// Candidate orders scored concurrently.
    #[arg(long = ARG_OPTIMISE_CANDIDATES_IN_FLIGHT, value_name = "count")]
    #[serde(default)]
    pub(crate) candidates_in_flight: Option<NonZeroUsize>,
    /// Reaction to a leg the routing service cannot serve.
    #[arg(long = ARG_OPTIMISE_ON_FAILURE, value_enum)]
    #[serde(default)]
    pub(crate) on_failure: Option<OnFailureArg>,
    /// Largest number of unpinned destinations to enumerate.
    #[arg(long = ARG_OPTIMISE_MAX_FLEXIBLE, value_name = "count")]
    #[serde(default)]
    pub(crate) max_flexible: Option<usize>,
    /// Logging verbosity on stderr.
    #[arg(long = ARG_OPTIMISE_LOG_LEVEL, value_enum)]
    #[serde(default)]
    pub(crate) log_level: Option<LogLevel>,
}

impl OptimiseArgs {
    pub(crate) fn into_config(self) -> Result<OptimiseConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        OptimiseConfig::try_from(merged)
    }
}

/// Resolved `optimise` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptimiseConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// HTTP oracle settings.
    pub(crate) oracle: HttpDistanceOracleConfig,
    /// Criterion override; `None` keeps the request's own criterion.
    pub(crate) criterion: Option<Criterion>,
    /// Exhaustive search settings.
    pub(crate) solver: ExhaustiveSolverConfig,
    /// Logging verbosity.
    pub(crate) log_level: LogLevel,
}

impl OptimiseConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        let path = &self.request_path;
        let field = ARG_OPTIMISE_REQUEST;
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.clone(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.clone(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.clone(),
                source,
            }),
        }
    }
}

impl TryFrom<OptimiseArgs> for OptimiseConfig {
    type Error = CliError;

    fn try_from(args: OptimiseArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_OPTIMISE_REQUEST,
            env: ENV_OPTIMISE_REQUEST,
        })?;

        let mut oracle = HttpDistanceOracleConfig::default();
        if let Some(base_url) = args.osrm_base_url {
            oracle.base_url = base_url;
        }
        if let Some(profile) = args.profile {
            oracle = oracle.with_profile(profile);
        }
        if let Some(secs) = args.timeout_secs {
            oracle = oracle.with_timeout(Duration::from_secs(secs));
        }

        let defaults = ExhaustiveSolverConfig::default();
        let solver = defaults
            .with_leg_policy(args.legs.map_or(defaults.leg_policy, LegPolicy::from))
            .with_candidates_in_flight(
                args.candidates_in_flight
                    .unwrap_or(defaults.candidates_in_flight),
            )
            .with_failure_policy(
                args.on_failure
                    .map_or(defaults.failure_policy, FailurePolicy::from),
            )
            .with_max_flexible(args.max_flexible.unwrap_or(defaults.max_flexible));

        Ok(Self {
            request_path,
            oracle,
            criterion: args.criterion,
            solver,
            log_level: args.log_level.unwrap_or_default(),
        })
    }
}

/// One destination of the optimised order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ReportStop {
    /// Position of the destination in the request.
    pub(crate) index: usize,
    /// Display label from the request.
    pub(crate) label: String,
    /// Whether the destination was pinned.
    pub(crate) fixed: bool,
    /// Longitude in degrees.
    pub(crate) longitude: f64,
    /// Latitude in degrees.
    pub(crate) latitude: f64,
}

/// JSON document printed by `pinroute optimise`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct OptimiseReport {
    /// Quantity that was minimised.
    pub(crate) criterion: Criterion,
    /// Summed metric of the best order.
    pub(crate) metric: f64,
    /// Unit of `metric`.
    pub(crate) unit: String,
    /// Best order as request indices.
    pub(crate) order: VisitOrder,
    /// Destinations in visiting order.
    pub(crate) stops: Vec<ReportStop>,
    /// Search statistics.
    pub(crate) diagnostics: Diagnostics,
}

impl OptimiseReport {
    pub(crate) fn new(request: &SearchRequest, response: SearchResponse) -> Result<Self, CliError> {
        let mut itinerary = Itinerary::from_request(request)?;
        itinerary.apply_order(&response.order)?;
        let stops = response
            .order
            .as_slice()
            .iter()
            .zip(itinerary.entries())
            .map(|(&index, (destination, fixed))| ReportStop {
                index,
                label: destination.label.clone(),
                fixed,
                longitude: destination.longitude(),
                latitude: destination.latitude(),
            })
            .collect();
        Ok(Self {
            criterion: request.criterion,
            metric: response.metric,
            unit: request.criterion.unit().to_owned(),
            order: response.order,
            stops,
            diagnostics: response.diagnostics,
        })
    }
}

/// Builds the optimiser for the current invocation.
pub(crate) trait OptimiserBuilder {
    fn build(&self, config: &OptimiseConfig) -> Result<Box<dyn RouteOptimiser>, CliError>;
}

pub(crate) struct DefaultOptimiserBuilder;

impl OptimiserBuilder for DefaultOptimiserBuilder {
    fn build(&self, config: &OptimiseConfig) -> Result<Box<dyn RouteOptimiser>, CliError> {
        let oracle = HttpDistanceOracle::with_config(config.oracle.clone()).map_err(|source| {
            CliError::BuildDistanceOracle {
                base_url: config.oracle.base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(ExhaustiveSolver::with_config(
            oracle,
            config.solver,
        )))
    }
}

pub(crate) fn run_optimise(args: OptimiseArgs) -> Result<(), CliError> {
    let config = resolve_optimise_config(args)?;
    init_logger(config.log_level).map_err(CliError::Logging)?;
    let mut stdout = std::io::stdout().lock();
    optimise_with(&config, &DefaultOptimiserBuilder, &mut stdout)
}

pub(crate) fn run_optimise_with(
    args: OptimiseArgs,
    builder: &dyn OptimiserBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_optimise_config(args)?;
    optimise_with(&config, builder, writer)
}

fn optimise_with(
    config: &OptimiseConfig,
    builder: &dyn OptimiserBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let report = execute_optimise(config, builder)?;
    write_report(writer, &report)
}

fn execute_optimise(
    config: &OptimiseConfig,
    builder: &dyn OptimiserBuilder,
) -> Result<OptimiseReport, CliError> {
    let mut request = load_search_request(&config.request_path)?;
    if let Some(criterion) = config.criterion {
        request.criterion = criterion;
    }
    request
        .validate()
        .map_err(|source| CliError::InvalidSearchRequest {
            path: config.request_path.clone(),
            source,
        })?;
    let optimiser = builder.build(config)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let response = runtime
        .block_on(optimiser.optimise(&request))
        .map_err(|source| CliError::Search { source })?;
    info!(
        "optimised {} destinations: {} {}",
        request.len(),
        response.metric,
        request.criterion.unit()
    );
    OptimiseReport::new(&request, response)
}

fn resolve_optimise_config(args: OptimiseArgs) -> Result<OptimiseConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`SearchRequest`] from disk.
pub(crate) fn load_search_request(path: &Utf8Path) -> Result<SearchRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenSearchRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseSearchRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_report(writer: &mut dyn Write, report: &OptimiseReport) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerialiseReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteReport)?;
    writer.write_all(b"\n").map_err(CliError::WriteReport)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<OptimiseConfig, CliError> {
    let merged = OptimiseArgs::merge_from_layers(layers).map_err(CliError::from)?;
    OptimiseConfig::try_from(merged)
}
