use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::{
    EvaluationError, OracleError, SearchRequest, SearchRequestValidationError, VisitOrder,
    VisitOrderError,
};

/// Counters describing how a search went.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Wall-clock time spent searching.
    pub solve_time: Duration,
    /// Candidate orders scored successfully.
    pub candidates_evaluated: u64,
    /// Candidate orders dropped because a leg lookup failed.
    pub candidates_skipped: u64,
}

/// Result of a successful search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResponse {
    /// Best visiting order found.
    pub order: VisitOrder,
    /// Summed metric of `order` under the requested criterion.
    pub metric: f64,
    /// Search statistics.
    pub diagnostics: Diagnostics,
}

/// Errors returned by [`RouteOptimiser::optimise`].
///
/// No partial route accompanies any of them: a failed search must be retried
/// as a whole.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// The request was rejected before any lookup.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] SearchRequestValidationError),
    /// A leg lookup failed and the search was aborted.
    #[error("route optimisation failed: {source}")]
    Oracle {
        /// Failure reported by the oracle.
        #[source]
        source: OracleError,
    },
    /// Every candidate contained a failing leg.
    #[error("no feasible route among {skipped} candidates; last failure: {source}")]
    NoFeasibleRoute {
        /// Number of candidates dropped.
        skipped: u64,
        /// Most recent oracle failure.
        #[source]
        source: OracleError,
    },
    /// A candidate referred to a destination that does not exist.
    #[error("candidate refers to unknown destination {index}")]
    UnknownDestination {
        /// Offending index.
        index: usize,
    },
    /// The best candidate was not a permutation of the destinations.
    #[error("search produced an invalid order: {0}")]
    InvalidOrder(#[from] VisitOrderError),
}

impl SearchError {
    /// Whether the error stems from caller input rather than the oracle.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }
}

impl From<EvaluationError> for SearchError {
    fn from(error: EvaluationError) -> Self {
        match error {
            EvaluationError::Oracle(source) => Self::Oracle { source },
            EvaluationError::UnknownDestination { index } => Self::UnknownDestination { index },
        }
    }
}

/// Find the visiting order that minimises the requested criterion.
///
/// Implementations must honour the fixed set and return
/// [`SearchError::InvalidRequest`] for malformed input rather than panicking.
#[async_trait]
pub trait RouteOptimiser: Send + Sync {
    /// Optimise `request`, producing the best order or an error.
    async fn optimise(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError>;
}
