//! HTTP distance oracles backed by a routing service.
//!
//! This module provides [`HttpDistanceOracle`], an implementation of
//! [`pinroute_core::DistanceOracle`] that asks an OSRM server for the single
//! best route between two coordinates.
//!
//! # Architecture
//!
//! Each lookup issues one request to the OSRM Route API with alternatives
//! disabled and reads the distance and duration of the first route. Lookups
//! are async and share one connection pool, so concurrent leg policies reuse
//! connections.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use geo::Coord;
//! use pinroute_core::DistanceOracle;
//! use pinroute_data::routing::{HttpDistanceOracle, HttpDistanceOracleConfig};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpDistanceOracleConfig::new("http://localhost:5000")
//!     .with_profile("driving")
//!     .with_timeout(Duration::from_secs(10));
//! let oracle = HttpDistanceOracle::with_config(config)?;
//!
//! let leg = oracle
//!     .lookup(Coord { x: -0.12, y: 51.50 }, Coord { x: -0.08, y: 51.52 })
//!     .await?;
//! println!("{} m in {:?}", leg.distance_metres, leg.duration);
//! # Ok(())
//! # }
//! ```

mod osrm;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use provider::{
    DEFAULT_PROFILE, DEFAULT_USER_AGENT, HttpDistanceOracle, HttpDistanceOracleConfig,
    OracleBuildError,
};
