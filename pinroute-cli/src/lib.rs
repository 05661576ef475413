//! Command-line interface for the pinroute optimiser.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod logging;
mod optimise;

pub use error::CliError;
pub use logging::LogLevel;

use optimise::{OptimiseArgs, run_optimise};

const ARG_OPTIMISE_REQUEST: &str = "request-path";
const ARG_OPTIMISE_OSRM_BASE_URL: &str = "osrm-base-url";
const ARG_OPTIMISE_PROFILE: &str = "profile";
const ARG_OPTIMISE_TIMEOUT_SECS: &str = "timeout-secs";
const ARG_OPTIMISE_CRITERION: &str = "criterion";
const ARG_OPTIMISE_LEGS: &str = "legs";
const ARG_OPTIMISE_CANDIDATES_IN_FLIGHT: &str = "candidates-in-flight";
const ARG_OPTIMISE_ON_FAILURE: &str = "on-failure";
const ARG_OPTIMISE_MAX_FLEXIBLE: &str = "max-flexible";
const ARG_OPTIMISE_LOG_LEVEL: &str = "log-level";
const ENV_OPTIMISE_REQUEST: &str = "PINROUTE_CMDS_OPTIMISE_REQUEST_PATH";

/// Run the pinroute CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when argument parsing, configuration loading, the
/// request file or the search itself fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Optimise(args) => run_optimise(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "pinroute",
    about = "Order a list of destinations by road distance or travel time",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Find the cheapest visiting order for a JSON search request.
    Optimise(OptimiseArgs),
}

#[cfg(test)]
mod tests;
