//! Deterministic `DistanceOracle` doubles used by unit, behaviour and
//! property tests across the workspace.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use geo::Coord;

use crate::{DistanceOracle, LegMetrics, OracleError};

/// Drive a future to completion on a fresh current-thread runtime.
///
/// # Panics
///
/// Panics if the Tokio runtime cannot be created.
pub fn block_on_for_tests<F: Future>(future: F) -> F::Output {
    #[expect(
        clippy::expect_used,
        reason = "test helper has no caller able to handle runtime failures"
    )]
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("test runtime should build");
    runtime.block_on(future)
}

/// Oracle answering from a fixed, possibly asymmetric, leg matrix.
///
/// Lookups are resolved by matching the exact coordinates supplied at
/// construction, so the coordinates must be distinct. Unknown coordinates
/// produce [`OracleError::NoRoute`]. Every call is counted.
#[derive(Debug, Default)]
pub struct MatrixOracle {
    coords: Vec<Coord<f64>>,
    legs: Vec<Vec<LegMetrics>>,
    calls: AtomicUsize,
}

impl MatrixOracle {
    /// Build an oracle from `(distance_metres, duration_secs)` rows where
    /// `rows[i][j]` measures the leg from `coords[i]` to `coords[j]`.
    pub fn from_legs<R>(coords: &[Coord<f64>], rows: &[R]) -> Self
    where
        R: AsRef<[(f64, u64)]>,
    {
        let legs = rows
            .iter()
            .map(|row| {
                row.as_ref()
                    .iter()
                    .map(|&(metres, secs)| LegMetrics::new(metres, Duration::from_secs(secs)))
                    .collect()
            })
            .collect();
        Self {
            coords: coords.to_vec(),
            legs,
            calls: AtomicUsize::new(0),
        }
    }

    /// Build an oracle whose durations in seconds equal its distances in
    /// metres, handy when a scenario only cares about one criterion.
    pub fn from_distances<R>(coords: &[Coord<f64>], rows: &[R]) -> Self
    where
        R: AsRef<[f64]>,
    {
        let legs = rows
            .iter()
            .map(|row| {
                row.as_ref()
                    .iter()
                    .map(|&value| LegMetrics::new(value, Duration::from_secs_f64(value)))
                    .collect()
            })
            .collect();
        Self {
            coords: coords.to_vec(),
            legs,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of lookups issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn index_of(&self, coord: Coord<f64>) -> Option<usize> {
        self.coords.iter().position(|candidate| *candidate == coord)
    }

    fn leg(&self, from: usize, to: usize) -> Option<LegMetrics> {
        self.legs.get(from).and_then(|row| row.get(to)).copied()
    }
}

#[async_trait]
impl DistanceOracle for MatrixOracle {
    async fn lookup(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
    ) -> Result<LegMetrics, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.index_of(origin)
            .zip(self.index_of(destination))
            .and_then(|(from, to)| self.leg(from, to))
            .ok_or_else(|| OracleError::NoRoute {
                code: "NoRoute".to_owned(),
                message: format!("no fixture leg from {origin:?} to {destination:?}"),
            })
    }
}

/// Oracle that fails selected legs and delegates the rest to a
/// [`MatrixOracle`].
#[derive(Debug, Default)]
pub struct FailingLegOracle {
    inner: MatrixOracle,
    coords: Vec<Coord<f64>>,
    failing: Vec<(usize, usize)>,
    fail_all: bool,
    calls: AtomicUsize,
}

impl FailingLegOracle {
    /// Wrap `inner`; `coords` maps coordinates back to destination indices.
    pub fn new(inner: MatrixOracle, coords: Vec<Coord<f64>>) -> Self {
        Self {
            inner,
            coords,
            ..Self::default()
        }
    }

    /// An oracle for which every lookup fails.
    pub fn always() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// Fail the directed leg from destination `from` to destination `to`.
    #[must_use]
    pub fn failing_leg(mut self, from: usize, to: usize) -> Self {
        self.failing.push((from, to));
        self
    }

    /// Number of lookups issued so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn is_failing(&self, origin: Coord<f64>, destination: Coord<f64>) -> bool {
        if self.fail_all {
            return true;
        }
        let from = self.coords.iter().position(|coord| *coord == origin);
        let to = self.coords.iter().position(|coord| *coord == destination);
        from.zip(to).is_some_and(|leg| self.failing.contains(&leg))
    }
}

#[async_trait]
impl DistanceOracle for FailingLegOracle {
    async fn lookup(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
    ) -> Result<LegMetrics, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.is_failing(origin, destination) {
            return Err(OracleError::NoRoute {
                code: "NoRoute".to_owned(),
                message: format!("leg {origin:?} -> {destination:?} is unreachable"),
            });
        }
        self.inner.lookup(origin, destination).await
    }
}

/// Coordinates `0.0..n` degrees east along the equator, one per destination.
///
/// Distinct coordinates let [`MatrixOracle`] map lookups back to indices.
pub fn equator_coords(count: usize) -> Vec<Coord<f64>> {
    (0..count)
        .map(|index| Coord {
            x: u32::try_from(index).map_or(0.0, f64::from),
            y: 0.0,
        })
        .collect()
}

/// Three destinations with asymmetric leg distances.
///
/// Visiting `[0, 2, 1]` costs 8 metres; every other order costs at least 10.
pub fn asymmetric_triangle() -> (Vec<Coord<f64>>, MatrixOracle) {
    let coords = equator_coords(3);
    let oracle = MatrixOracle::from_distances(
        &coords,
        &[[0.0, 10.0, 5.0], [7.0, 0.0, 10.0], [5.0, 3.0, 0.0]],
    );
    (coords, oracle)
}

/// Four destinations where only durations discriminate between orders.
///
/// With destination 1 pinned to slot 1 the fastest order is `[2, 1, 3, 0]`
/// at 6 seconds. Every off-diagonal leg is 100 metres long.
pub fn pinned_square() -> (Vec<Coord<f64>>, MatrixOracle) {
    let coords = equator_coords(4);
    let oracle = MatrixOracle::from_legs(
        &coords,
        &[
            [(0.0, 0), (100.0, 9), (100.0, 9), (100.0, 7)],
            [(100.0, 6), (0.0, 0), (100.0, 2), (100.0, 1)],
            [(100.0, 5), (100.0, 3), (0.0, 0), (100.0, 1)],
            [(100.0, 2), (100.0, 6), (100.0, 4), (0.0, 0)],
        ],
    );
    (coords, oracle)
}

/// Deterministic pseudo-random distance matrix for `count` destinations.
///
/// Legs are asymmetric and cost between 1 and 97 metres.
pub fn scrambled_matrix(count: usize) -> (Vec<Coord<f64>>, MatrixOracle) {
    let coords = equator_coords(count);
    let rows: Vec<Vec<f64>> = (0..count)
        .map(|from| {
            (0..count)
                .map(|to| {
                    if from == to {
                        return 0.0;
                    }
                    let mixed = from
                        .wrapping_mul(31)
                        .wrapping_add(to.wrapping_mul(17))
                        .wrapping_add(from.wrapping_mul(to))
                        .checked_rem(97)
                        .unwrap_or(0);
                    u32::try_from(mixed).map_or(1.0, |value| f64::from(value.saturating_add(1)))
                })
                .collect()
        })
        .collect();
    let oracle = MatrixOracle::from_distances(&coords, &rows);
    (coords, oracle)
}
