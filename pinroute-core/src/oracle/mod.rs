//! Look up the distance and travel time of a single leg.
//!
//! The [`DistanceOracle`] trait abstracts an external routing service. Callers
//! supply an origin and a destination coordinate and receive the
//! [`LegMetrics`](crate::LegMetrics) of the one route the service picks.
//!
//! Lookups are asynchronous, attempted once, and never cached: querying the
//! same pair twice issues two independent calls.

mod error;
mod lookup;

pub use error::OracleError;
pub use lookup::{DistanceOracle, check_coordinate};
