//! Facade crate for the pinroute optimiser.
//!
//! This crate re-exports the core domain types and the exhaustive solver, and
//! exposes the HTTP distance oracle behind a feature flag.

#![forbid(unsafe_code)]

pub use pinroute_core::{
    Criterion, Destination, Diagnostics, DistanceOracle, EvaluationError, Itinerary,
    ItineraryError, LegMetrics, LegPolicy, OracleError, RouteEvaluator, RouteOptimiser,
    SearchError, SearchRequest, SearchRequestValidationError, SearchResponse, VisitOrder,
    VisitOrderError,
};
pub use pinroute_solver::{ExhaustiveSolver, ExhaustiveSolverConfig, FailurePolicy};

#[cfg(feature = "http-oracle")]
pub use pinroute_data::routing::{HttpDistanceOracle, HttpDistanceOracleConfig};
