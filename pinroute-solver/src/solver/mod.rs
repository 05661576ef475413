//! `ExhaustiveSolver` implementation.
//!
//! Candidates are generated lazily and scored through a buffered stream so
//! the number of routes in flight is a configuration choice. Results are
//! consumed in enumeration order, keeping the best-so-far update single
//! writer.

use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::pin::pin;
use std::time::Instant;

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use geo::Coord;
use log::{debug, trace, warn};
use pinroute_core::{
    Criterion, Diagnostics, DistanceOracle, EvaluationError, LegPolicy, OracleError,
    RouteEvaluator, RouteOptimiser, SearchError, SearchRequest, SearchRequestValidationError,
    SearchResponse, VisitOrder, validate_inputs,
};

use crate::layout::SlotLayout;
use crate::permutations::{SwapPermutations, permutation_count};

/// Largest number of flexible destinations accepted by default.
///
/// Nine flexible destinations already mean 362 880 candidate routes.
pub const DEFAULT_MAX_FLEXIBLE: usize = 9;

/// What to do when scoring a candidate hits an oracle failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the search and report the failure.
    #[default]
    Abort,
    /// Treat the candidate as infeasible and keep searching.
    SkipInfeasible,
}

/// Configuration for [`ExhaustiveSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExhaustiveSolverConfig {
    /// How the legs of one candidate are dispatched.
    pub leg_policy: LegPolicy,
    /// Candidate routes scored concurrently.
    pub candidates_in_flight: NonZeroUsize,
    /// Reaction to a failing leg.
    pub failure_policy: FailurePolicy,
    /// Upper bound on flexible destinations.
    pub max_flexible: usize,
}

impl Default for ExhaustiveSolverConfig {
    fn default() -> Self {
        Self {
            leg_policy: LegPolicy::default(),
            candidates_in_flight: NonZeroUsize::MIN,
            failure_policy: FailurePolicy::default(),
            max_flexible: DEFAULT_MAX_FLEXIBLE,
        }
    }
}

impl ExhaustiveSolverConfig {
    /// Set the leg dispatch policy.
    #[must_use]
    pub const fn with_leg_policy(mut self, leg_policy: LegPolicy) -> Self {
        self.leg_policy = leg_policy;
        self
    }

    /// Set how many candidates are scored at once.
    #[must_use]
    pub const fn with_candidates_in_flight(mut self, candidates: NonZeroUsize) -> Self {
        self.candidates_in_flight = candidates;
        self
    }

    /// Set the reaction to failing legs.
    #[must_use]
    pub const fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// Set the flexible destination limit.
    #[must_use]
    pub const fn with_max_flexible(mut self, max_flexible: usize) -> Self {
        self.max_flexible = max_flexible;
        self
    }
}

/// Exact solver that scores every constrained visiting order.
///
/// Pinned destinations keep their slot; the others are permuted through the
/// remaining slots. The cheapest candidate wins, and among equally cheap
/// candidates the first one enumerated is kept.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use std::time::Duration;
/// use async_trait::async_trait;
/// use geo::Coord;
/// use pinroute_core::{Criterion, DistanceOracle, LegMetrics, OracleError};
/// use pinroute_solver::ExhaustiveSolver;
///
/// /// Charges one metre per degree of longitude travelled.
/// struct Ruler;
///
/// #[async_trait]
/// impl DistanceOracle for Ruler {
///     async fn lookup(&self, a: Coord<f64>, b: Coord<f64>) -> Result<LegMetrics, OracleError> {
///         Ok(LegMetrics::new((a.x - b.x).abs(), Duration::ZERO))
///     }
/// }
///
/// let coords = [
///     Coord { x: 0.0, y: 0.0 },
///     Coord { x: 3.0, y: 0.0 },
///     Coord { x: 1.0, y: 0.0 },
///     Coord { x: 2.0, y: 0.0 },
/// ];
/// let solver = ExhaustiveSolver::new(Ruler);
/// let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let order = runtime.block_on(solver.search(&coords, &BTreeSet::from([0]), Criterion::Distance))?;
/// assert_eq!(order.as_slice(), [0, 2, 3, 1]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct ExhaustiveSolver<O> {
    oracle: O,
    config: ExhaustiveSolverConfig,
}

impl<O> ExhaustiveSolver<O>
where
    O: DistanceOracle,
{
    /// Construct a solver using default configuration.
    pub fn new(oracle: O) -> Self {
        Self::with_config(oracle, ExhaustiveSolverConfig::default())
    }

    /// Construct a solver with explicit configuration.
    pub const fn with_config(oracle: O, config: ExhaustiveSolverConfig) -> Self {
        Self { oracle, config }
    }

    /// Active configuration.
    pub const fn config(&self) -> &ExhaustiveSolverConfig {
        &self.config
    }

    /// Oracle used for leg lookups.
    pub const fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Find the cheapest visiting order of `coords` that keeps every index in
    /// `fixed` at its own position.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRequest`] before any lookup when fewer
    /// than two coordinates are given, a fixed index is out of range, or too
    /// many destinations are flexible. Oracle failures abort the search unless
    /// the configuration skips infeasible candidates.
    pub async fn search(
        &self,
        coords: &[Coord<f64>],
        fixed: &BTreeSet<usize>,
        criterion: Criterion,
    ) -> Result<VisitOrder, SearchError> {
        self.run(coords, fixed, criterion)
            .await
            .map(|response| response.order)
    }

    async fn run(
        &self,
        coords: &[Coord<f64>],
        fixed: &BTreeSet<usize>,
        criterion: Criterion,
    ) -> Result<SearchResponse, SearchError> {
        let started_at = Instant::now();
        validate_inputs(coords.len(), fixed)?;
        let layout = SlotLayout::new(coords.len(), fixed);
        let flexible = layout.flexible().len();
        if flexible > self.config.max_flexible {
            return Err(SearchRequestValidationError::TooManyFlexible {
                count: flexible,
                limit: self.config.max_flexible,
            }
            .into());
        }
        debug!(
            "searching {} destinations by {criterion}: {} pinned, {} candidates",
            coords.len(),
            fixed.len(),
            permutation_count(flexible).unwrap_or(usize::MAX),
        );

        let evaluator = RouteEvaluator::new(&self.oracle, coords, self.config.leg_policy);
        let candidates = SwapPermutations::new(layout.flexible().to_vec())
            .map(|permutation| layout.assemble(&permutation));
        let mut scored = pin!(
            stream::iter(candidates)
                .map(|route| {
                    let evaluator = &evaluator;
                    async move {
                        let outcome = evaluator.evaluate(&route, criterion).await;
                        (route, outcome)
                    }
                })
                .buffered(self.config.candidates_in_flight.get())
        );

        let mut tally = Tally::default();
        while let Some((route, outcome)) = scored.next().await {
            match outcome {
                Ok(metric) => tally.record(route, metric),
                Err(EvaluationError::Oracle(source))
                    if self.config.failure_policy == FailurePolicy::SkipInfeasible =>
                {
                    warn!("skipping infeasible candidate {route:?}: {source}");
                    tally.skip(source);
                }
                Err(error) => return Err(error.into()),
            }
        }

        let (route, metric) = tally.best.ok_or_else(|| SearchError::NoFeasibleRoute {
            skipped: tally.skipped,
            source: tally.last_failure.unwrap_or_else(no_candidates),
        })?;
        let order = VisitOrder::new(route, layout.len())?;
        let diagnostics = Diagnostics {
            solve_time: started_at.elapsed(),
            candidates_evaluated: tally.evaluated,
            candidates_skipped: tally.skipped,
        };
        debug!(
            "best order {:?} costs {metric} {} ({} evaluated, {} skipped, {:?})",
            order.as_slice(),
            criterion.unit(),
            diagnostics.candidates_evaluated,
            diagnostics.candidates_skipped,
            diagnostics.solve_time,
        );
        Ok(SearchResponse {
            order,
            metric,
            diagnostics,
        })
    }
}

#[async_trait]
impl<O> RouteOptimiser for ExhaustiveSolver<O>
where
    O: DistanceOracle,
{
    async fn optimise(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let coords = request.coords();
        self.run(&coords, &request.fixed, request.criterion).await
    }
}

/// Running totals for one search.
#[derive(Debug, Default)]
struct Tally {
    best: Option<(Vec<usize>, f64)>,
    evaluated: u64,
    skipped: u64,
    last_failure: Option<OracleError>,
}

impl Tally {
    fn record(&mut self, route: Vec<usize>, metric: f64) {
        trace!("candidate {route:?} scored {metric}");
        self.evaluated = self.evaluated.saturating_add(1);
        if self.best.as_ref().is_none_or(|(_, best)| metric < *best) {
            self.best = Some((route, metric));
        }
    }

    fn skip(&mut self, failure: OracleError) {
        self.skipped = self.skipped.saturating_add(1);
        self.last_failure = Some(failure);
    }
}

fn no_candidates() -> OracleError {
    OracleError::NoRoute {
        code: "NoCandidates".to_owned(),
        message: "no candidate route was scored".to_owned(),
    }
}
