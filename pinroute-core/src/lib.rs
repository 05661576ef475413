//! Core domain types for the pinroute optimiser.
//!
//! A search takes an ordered list of [`Destination`]s, a set of positions the
//! user pinned, and a [`Criterion`] to minimise. Leg costs come from a
//! [`DistanceOracle`]; a [`RouteEvaluator`] sums them along a candidate order
//! and a [`RouteOptimiser`] picks the cheapest constrained order.
//!
//! Requests are validated up front so malformed input never reaches the
//! oracle.

#![forbid(unsafe_code)]

mod criterion;
mod destination;
mod evaluator;
mod itinerary;
pub mod oracle;
mod optimiser;
mod request;
mod route;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use criterion::{Criterion, LegMetrics, ParseCriterionError};
pub use destination::Destination;
pub use evaluator::{EvaluationError, LegPolicy, RouteEvaluator};
pub use itinerary::{Itinerary, ItineraryError};
pub use optimiser::{Diagnostics, RouteOptimiser, SearchError, SearchResponse};
pub use oracle::{DistanceOracle, OracleError, check_coordinate};
pub use request::{
    MIN_DESTINATIONS, SearchRequest, SearchRequestValidationError, validate_inputs,
};
pub use route::{VisitOrder, VisitOrderError};
