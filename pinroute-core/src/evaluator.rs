//! Score a visiting order by summing oracle lookups along its legs.

use futures_util::future::try_join_all;
use geo::Coord;
use log::trace;
use thiserror::Error;

use crate::{Criterion, DistanceOracle, LegMetrics, OracleError};

/// How the legs of one route are dispatched to the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegPolicy {
    /// Await each leg before issuing the next.
    #[default]
    Sequential,
    /// Issue every leg at once and join them; the first failure drops the
    /// remaining lookups.
    Concurrent,
}

/// Errors returned by [`RouteEvaluator::evaluate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    /// A leg lookup failed.
    #[error(transparent)]
    Oracle(#[from] OracleError),
    /// The route names a destination that does not exist.
    #[error("route refers to unknown destination {index}")]
    UnknownDestination {
        /// Offending index.
        index: usize,
    },
}

/// Sums per-leg oracle metrics over a route.
///
/// The evaluator borrows the coordinate list and never mutates it.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use async_trait::async_trait;
/// use geo::Coord;
/// use pinroute_core::{Criterion, DistanceOracle, LegMetrics, LegPolicy, OracleError, RouteEvaluator};
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
/// let coords = [Coord { x: 0.0, y: 0.0 }, Coord { x: 4.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 }];
/// let evaluator = RouteEvaluator::new(&Ruler, &coords, LegPolicy::Sequential);
/// let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let metric = runtime.block_on(evaluator.evaluate(&[0, 2, 1], Criterion::Distance))?;
/// assert_eq!(metric, 4.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct RouteEvaluator<'a, O: ?Sized> {
    oracle: &'a O,
    coords: &'a [Coord<f64>],
    policy: LegPolicy,
}

impl<'a, O> RouteEvaluator<'a, O>
where
    O: DistanceOracle + ?Sized,
{
    /// Build an evaluator over `coords`, resolving legs through `oracle`.
    pub const fn new(oracle: &'a O, coords: &'a [Coord<f64>], policy: LegPolicy) -> Self {
        Self {
            oracle,
            coords,
            policy,
        }
    }

    /// Leg dispatch policy in use.
    pub const fn policy(&self) -> LegPolicy {
        self.policy
    }

    /// Sum the `criterion` value of every leg of `route`.
    ///
    /// Routes with fewer than two stops cost nothing and make no lookups. The
    /// first failing leg aborts the evaluation, and a leg whose distance is
    /// NaN, infinite or negative fails with [`OracleError::InvalidMetrics`].
    pub async fn evaluate(
        &self,
        route: &[usize],
        criterion: Criterion,
    ) -> Result<f64, EvaluationError> {
        let stops = self.resolve(route)?;
        if stops.len() < 2 {
            return Ok(0.0);
        }
        let legs = match self.policy {
            LegPolicy::Sequential => self.lookup_sequential(&stops).await?,
            LegPolicy::Concurrent => self.lookup_concurrent(&stops).await?,
        };
        let total: f64 = legs.iter().map(|leg| criterion.leg_value(leg)).sum();
        trace!("route {route:?} costs {total} {}", criterion.unit());
        Ok(total)
    }

    fn resolve(&self, route: &[usize]) -> Result<Vec<Coord<f64>>, EvaluationError> {
        route
            .iter()
            .map(|&index| {
                self.coords
                    .get(index)
                    .copied()
                    .ok_or(EvaluationError::UnknownDestination { index })
            })
            .collect()
    }

    async fn lookup_sequential(
        &self,
        stops: &[Coord<f64>],
    ) -> Result<Vec<LegMetrics>, OracleError> {
        let mut legs = Vec::with_capacity(stops.len().saturating_sub(1));
        for pair in stops.windows(2) {
            if let &[origin, destination] = pair {
                let leg = self.oracle.lookup(origin, destination).await?;
                legs.push(check_leg(leg)?);
            }
        }
        Ok(legs)
    }

    async fn lookup_concurrent(
        &self,
        stops: &[Coord<f64>],
    ) -> Result<Vec<LegMetrics>, OracleError> {
        let lookups = stops.windows(2).filter_map(|pair| match pair {
            &[origin, destination] => Some(async move {
                check_leg(self.oracle.lookup(origin, destination).await?)
            }),
            _ => None,
        });
        try_join_all(lookups).await
    }
}

/// Reject legs whose distance is negative or not finite, so every route
/// metric the search compares is a real number.
fn check_leg(leg: LegMetrics) -> Result<LegMetrics, OracleError> {
    if leg.distance_metres.is_finite() && leg.distance_metres >= 0.0 {
        Ok(leg)
    } else {
        Err(OracleError::InvalidMetrics {
            message: format!(
                "leg distance {} m is not finite and non-negative",
                leg.distance_metres
            ),
        })
    }
}
