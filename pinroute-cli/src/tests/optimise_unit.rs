//! Focused unit tests covering optimise CLI configuration and request parsing.

use super::helpers::{
    FixtureOptimiserBuilder, LABELS, square_request, workspace, write_request, write_utf8,
};
use super::*;
use crate::optimise::{
    LegsArg, OnFailureArg, OptimiseArgs, OptimiseConfig, OptimiseReport,
    config_from_layers_for_test, load_search_request, run_optimise_with,
};
use std::num::NonZeroUsize;
use std::time::Duration;

use pinroute_core::{
    Criterion, Diagnostics, LegPolicy, SearchError, SearchRequestValidationError, SearchResponse,
    VisitOrder,
};
use pinroute_data::routing::HttpDistanceOracleConfig;
use pinroute_solver::{ExhaustiveSolverConfig, FailurePolicy};
use rstest::rstest;

fn args_for(request_path: &camino::Utf8Path) -> OptimiseArgs {
    OptimiseArgs {
        request_path: Some(request_path.to_path_buf()),
        ..OptimiseArgs::default()
    }
}

#[rstest]
fn converting_optimise_without_request_errors() {
    let err = OptimiseConfig::try_from(OptimiseArgs::default())
        .expect_err("missing request should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_OPTIMISE_REQUEST);
            assert_eq!(env, ENV_OPTIMISE_REQUEST);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn optimise_config_applies_defaults() {
    let (_tmp, root) = workspace();
    let request_path = root.join("request.json");

    let config = OptimiseConfig::try_from(args_for(&request_path)).expect("config should build");

    assert_eq!(config.request_path, request_path);
    assert_eq!(config.oracle, HttpDistanceOracleConfig::default());
    assert_eq!(config.criterion, None);
    assert_eq!(config.solver, ExhaustiveSolverConfig::default());
    assert_eq!(config.log_level, LogLevel::Warn);
}

#[rstest]
fn optimise_config_maps_every_override() {
    let (_tmp, root) = workspace();
    let args = OptimiseArgs {
        request_path: Some(root.join("request.json")),
        osrm_base_url: Some("http://osrm.internal:5000".to_owned()),
        profile: Some("foot".to_owned()),
        timeout_secs: Some(5),
        criterion: Some(Criterion::Duration),
        legs: Some(LegsArg::Concurrent),
        candidates_in_flight: NonZeroUsize::new(8),
        on_failure: Some(OnFailureArg::Skip),
        max_flexible: Some(6),
        log_level: Some(LogLevel::Debug),
    };

    let config = OptimiseConfig::try_from(args).expect("config should build");

    assert_eq!(config.oracle.base_url, "http://osrm.internal:5000");
    assert_eq!(config.oracle.profile, "foot");
    assert_eq!(config.oracle.timeout, Duration::from_secs(5));
    assert_eq!(config.criterion, Some(Criterion::Duration));
    assert_eq!(config.solver.leg_policy, LegPolicy::Concurrent);
    assert_eq!(config.solver.candidates_in_flight.get(), 8);
    assert_eq!(config.solver.failure_policy, FailurePolicy::SkipInfeasible);
    assert_eq!(config.solver.max_flexible, 6);
    assert_eq!(config.log_level, LogLevel::Debug);
}

#[rstest]
fn validate_sources_reports_missing_request() {
    let (_tmp, root) = workspace();
    let config = OptimiseConfig::try_from(args_for(&root.join("absent.json")))
        .expect("config should build");

    let err = config.validate_sources().expect_err("expected failure");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_OPTIMISE_REQUEST),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_reports_not_file() {
    let (_tmp, root) = workspace();
    let request_path = root.join("request.json");
    std::fs::create_dir(&request_path).expect("request directory");
    let config = OptimiseConfig::try_from(args_for(&request_path)).expect("config should build");

    let err = config
        .validate_sources()
        .expect_err("expected directory path to fail validation");
    match err {
        CliError::SourcePathNotFile { field, path } => {
            assert_eq!(field, ARG_OPTIMISE_REQUEST);
            assert_eq!(path, request_path);
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn load_search_request_decodes_json() {
    let (_tmp, root) = workspace();
    let request_path = root.join("request.json");
    let request = square_request();
    write_request(&request_path, &request);

    let decoded = load_search_request(&request_path).expect("request should decode");
    assert_eq!(decoded, request);
}

#[rstest]
fn load_search_request_accepts_minimal_documents() {
    let (_tmp, root) = workspace();
    let request_path = root.join("request.json");
    write_utf8(
        &request_path,
        br#"{"destinations": [
            {"label": "A", "location": {"x": 0.0, "y": 0.0}},
            {"label": "B", "location": {"x": 1.0, "y": 0.0}}
        ]}"#,
    );

    let decoded = load_search_request(&request_path).expect("request should decode");
    assert_eq!(decoded.len(), 2);
    assert!(decoded.fixed.is_empty());
    assert_eq!(decoded.criterion, Criterion::Distance);
}

#[rstest]
fn load_search_request_rejects_invalid_json() {
    let (_tmp, root) = workspace();
    let request_path = root.join("request.json");
    write_utf8(&request_path, b"{ not valid json");

    let err = load_search_request(&request_path).expect_err("invalid json should error");
    match err {
        CliError::ParseSearchRequest { path, .. } => assert_eq!(path, request_path),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn load_search_request_io_error_returns_open_error() {
    let (_tmp, root) = workspace();
    let request_path = root.join("request.json");

    let err = load_search_request(&request_path).expect_err("missing request should error");
    match err {
        CliError::OpenSearchRequest { path, .. } => assert_eq!(path, request_path),
        other => panic!("expected OpenSearchRequest, found {other:?}"),
    }
}

#[rstest]
fn report_lists_stops_in_visiting_order() {
    let request = square_request();
    let response = SearchResponse {
        order: VisitOrder::new(vec![2, 1, 3, 0], 4).expect("valid order"),
        metric: 6.0,
        diagnostics: Diagnostics::default(),
    };

    let report = OptimiseReport::new(&request, response).expect("report should build");

    let indices: Vec<usize> = report.stops.iter().map(|stop| stop.index).collect();
    let labels: Vec<&str> = report.stops.iter().map(|stop| stop.label.as_str()).collect();
    let pins: Vec<bool> = report.stops.iter().map(|stop| stop.fixed).collect();
    assert_eq!(indices, [2, 1, 3, 0]);
    assert_eq!(labels, ["Market", "Bakery", "Library", "Depot"]);
    assert_eq!(pins, [false, true, false, false]);
    assert_eq!(report.unit, "m");
}

#[rstest]
fn criterion_flag_overrides_request_file() {
    let (_tmp, root) = workspace();
    let request_path = root.join("request.json");
    write_request(&request_path, &square_request());
    let args = OptimiseArgs {
        criterion: Some(Criterion::Duration),
        ..args_for(&request_path)
    };
    let mut stdout = Vec::new();

    run_optimise_with(args, &FixtureOptimiserBuilder::default(), &mut stdout)
        .expect("optimise should succeed");

    let report: OptimiseReport = serde_json::from_slice(&stdout).expect("JSON report");
    assert_eq!(report.criterion, Criterion::Duration);
    assert_eq!(report.order.as_slice(), [2, 1, 3, 0]);
    assert_eq!(report.unit, "s");
    assert_eq!(report.diagnostics.candidates_evaluated, 6);
    let first = report.stops.first().expect("four stops");
    assert_eq!(first.label, LABELS[2]);
}

#[rstest]
fn too_many_flexible_destinations_fail_the_search() {
    let (_tmp, root) = workspace();
    let request_path = root.join("request.json");
    write_request(&request_path, &square_request());
    let args = OptimiseArgs {
        max_flexible: Some(2),
        ..args_for(&request_path)
    };
    let mut stdout = Vec::new();

    let err = run_optimise_with(args, &FixtureOptimiserBuilder::default(), &mut stdout)
        .expect_err("three flexible destinations exceed the limit");

    match err {
        CliError::Search {
            source: SearchError::InvalidRequest(source),
        } => assert_eq!(
            source,
            SearchRequestValidationError::TooManyFlexible { count: 3, limit: 2 }
        ),
        other => panic!("expected Search error, found {other:?}"),
    }
    assert!(stdout.is_empty());
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "request_path": 42 }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let (_tmp, root) = workspace();
    let env_request = root.join("from-env-request.json");
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "osrm_base_url": "http://from-file:5000",
            "profile": "bike",
            "legs": "concurrent",
        }),
        None,
    );
    composer.push_environment(json!({
        "request_path": env_request.as_str(),
        "profile": "foot",
        "on_failure": "skip",
    }));
    composer.push_cli(json!({
        "criterion": "duration",
        "legs": "sequential",
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.request_path, env_request);
    assert_eq!(config.oracle.base_url, "http://from-file:5000");
    assert_eq!(config.oracle.profile, "foot");
    assert_eq!(config.criterion, Some(Criterion::Duration));
    assert_eq!(config.solver.leg_policy, LegPolicy::Sequential);
    assert_eq!(config.solver.failure_policy, FailurePolicy::SkipInfeasible);
}
