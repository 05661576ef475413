//! Test helpers for writing request files and building fixture optimisers.

use std::collections::BTreeSet;

use camino::{Utf8Path, Utf8PathBuf};
use pinroute_core::test_support::{FailingLegOracle, pinned_square};
use pinroute_core::{Criterion, Destination, RouteOptimiser, SearchRequest};
use pinroute_solver::ExhaustiveSolver;
use tempfile::TempDir;

use crate::CliError;
use crate::optimise::{OptimiseConfig, OptimiserBuilder};

pub(super) const LABELS: [&str; 4] = ["Depot", "Bakery", "Market", "Library"];

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture file");
}

pub(super) fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Four labelled destinations over the pinned-square fixture, destination 1
/// pinned, criterion left at distance.
pub(super) fn square_request() -> SearchRequest {
    let (coords, _) = pinned_square();
    SearchRequest {
        destinations: LABELS
            .iter()
            .zip(coords)
            .map(|(label, coord)| Destination::new(*label, coord))
            .collect(),
        fixed: BTreeSet::from([1]),
        criterion: Criterion::Distance,
    }
}

pub(super) fn write_request(path: &Utf8Path, request: &SearchRequest) {
    let payload = serde_json::to_string_pretty(request).expect("serialise request");
    write_utf8(path, payload.as_bytes());
}

/// Builds exhaustive solvers over the pinned-square fixture instead of OSRM.
#[derive(Debug, Default)]
pub(super) struct FixtureOptimiserBuilder {
    pub(super) failing_legs: Vec<(usize, usize)>,
}

impl OptimiserBuilder for FixtureOptimiserBuilder {
    fn build(&self, config: &OptimiseConfig) -> Result<Box<dyn RouteOptimiser>, CliError> {
        let (coords, matrix) = pinned_square();
        let oracle = self
            .failing_legs
            .iter()
            .fold(FailingLegOracle::new(matrix, coords), |oracle, &(from, to)| {
                oracle.failing_leg(from, to)
            });
        Ok(Box::new(ExhaustiveSolver::with_config(oracle, config.solver)))
    }
}
