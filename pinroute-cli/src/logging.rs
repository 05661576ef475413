//! Logger installation for the CLI.
//!
//! Library crates only emit through the `log` facade; the binary decides
//! where records go. Everything is written to stderr so stdout stays a clean
//! JSON report.

use std::io::{self, Write};

use clap::ValueEnum;
use env_logger::{Builder, Target, fmt::Formatter};
use log::{Level, LevelFilter};
use serde::{Deserialize, Serialize};

/// Verbosity accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Silence all output.
    Off,
    /// Only errors.
    Error,
    /// Errors and warnings, such as skipped candidates.
    #[default]
    #[value(alias = "warning")]
    Warn,
    /// Informational messages.
    Info,
    /// Search start and finish summaries.
    Debug,
    /// Every scored candidate and leg lookup.
    Trace,
}

impl LogLevel {
    /// Filter passed to the logger backend.
    #[must_use]
    pub const fn to_filter(self) -> LevelFilter {
        match self {
            Self::Off => LevelFilter::Off,
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

/// Install the process-wide logger.
pub(crate) fn init_logger(level: LogLevel) -> io::Result<()> {
    let mut builder = Builder::new();
    builder
        .filter_level(level.to_filter())
        .write_style(env_logger::WriteStyle::Never)
        .target(Target::Stderr)
        .format(|buf: &mut Formatter, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                level_tag(record.level()),
                record.target(),
                record.args()
            )
        });

    builder.try_init().map_err(io::Error::other)
}

const fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
