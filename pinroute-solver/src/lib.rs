//! Exact constrained route search for pinroute.
//!
//! This crate provides [`ExhaustiveSolver`], an implementation of
//! [`RouteOptimiser`](pinroute_core::RouteOptimiser) that scores every
//! visiting order compatible with the pinned destinations and keeps the
//! cheapest. Candidate orders come from [`SwapPermutations`], a lazy
//! generator that is independent of how candidates are scored.
//!
//! The search is factorial in the number of flexible destinations, so
//! [`ExhaustiveSolverConfig::max_flexible`] rejects oversized requests up
//! front.

#![forbid(unsafe_code)]

mod layout;
mod permutations;
mod solver;

pub use permutations::{SwapPermutations, permutation_count};
pub use solver::{DEFAULT_MAX_FLEXIBLE, ExhaustiveSolver, ExhaustiveSolverConfig, FailurePolicy};
