//! Test utilities for routing oracles.
//!
//! This module provides [`StubDistanceOracle`], a deterministic test double
//! for [`DistanceOracle`] that returns pre-configured responses without
//! making HTTP requests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use geo::Coord;
use pinroute_core::{DistanceOracle, LegMetrics, OracleError, check_coordinate};

/// Stub `DistanceOracle` for testing.
///
/// Every lookup between valid coordinates returns the same configured
/// outcome. Coordinates outside WGS84 bounds are rejected exactly as the HTTP
/// oracle rejects them.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use pinroute_core::{DistanceOracle, LegMetrics};
/// use pinroute_data::routing::test_support::StubDistanceOracle;
///
/// let oracle = StubDistanceOracle::with_leg(LegMetrics::new(500.0, Duration::from_secs(60)));
/// let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let leg = runtime.block_on(oracle.lookup(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }))?;
/// assert_eq!(leg.distance_metres, 500.0);
/// assert_eq!(oracle.calls(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct StubDistanceOracle {
    response: Result<LegMetrics, OracleError>,
    calls: AtomicUsize,
}

impl StubDistanceOracle {
    /// Create an oracle that answers every lookup with `leg`.
    #[must_use]
    pub const fn with_leg(leg: LegMetrics) -> Self {
        Self {
            response: Ok(leg),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create an oracle that fails every lookup with `error`.
    #[must_use]
    pub const fn with_error(error: OracleError) -> Self {
        Self {
            response: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create an oracle reporting one kilometre and one minute per leg.
    #[must_use]
    pub const fn with_unit_leg() -> Self {
        Self::with_leg(LegMetrics::new(1_000.0, Duration::from_secs(60)))
    }

    /// Number of lookups issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DistanceOracle for StubDistanceOracle {
    async fn lookup(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
    ) -> Result<LegMetrics, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        check_coordinate(origin)?;
        check_coordinate(destination)?;
        self.response.clone()
    }
}
