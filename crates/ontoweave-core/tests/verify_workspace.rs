// SPDX-License-Identifier: Apache-2.0

mod support;

use std::fs;

use ontoweave_adapters::RealFs;
use ontoweave_core::{
    run_chain_checks, run_reference_check, run_verify, PipelineError, WorkspaceConfig,
};
use ontoweave_model::CheckStatus;

#[test]
fn consistent_workspace_passes_every_check() {
    let ws = support::process_workspace();
    let report = run_verify(&RealFs, ws.path(), &WorkspaceConfig::default()).expect("verify");
    let ids: Vec<&str> = report.checks.iter().map(|c| c.check_id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["chain_continuity", "stage_alignment", "reference_integrity"]
    );
    assert!(report.passed(), "{report:#?}");
    let order = &report.checks[0].violations[0];
    assert_eq!(order.code, "chain_order");
    assert_eq!(order.message, "P1 → P2 → P3");
}

#[test]
fn broken_back_link_fails_chain_and_skips_alignment() {
    let ws = support::process_workspace();
    let graph = support::PROCESS_GRAPH.replace(r#""follows": {"@id": "P1"}"#, r#""follows": "P2""#);
    support::write(ws.path(), "structured_data.jsonld", &graph);

    let checks = run_chain_checks(&RealFs, ws.path(), &WorkspaceConfig::default()).expect("run");
    assert_eq!(checks[0].status, CheckStatus::Fail);
    let violation = checks[0].errors().next().expect("violation");
    assert_eq!(violation.code, "broken_link");
    assert!(violation.message.contains("P1"), "{violation}");
    assert!(violation.message.contains("P2"), "{violation}");
    assert_eq!(checks[1].status, CheckStatus::Skip);
}

#[test]
fn operator_outside_the_declared_action_fails_alignment() {
    let ws = support::process_workspace();
    let graph = support::PROCESS_GRAPH.replace("operators.yaml#diff", "operators.yaml#merge");
    support::write(ws.path(), "structured_data.jsonld", &graph);

    let checks = run_chain_checks(&RealFs, ws.path(), &WorkspaceConfig::default()).expect("run");
    assert!(checks[0].passed());
    assert_eq!(checks[1].status, CheckStatus::Fail);
    assert_eq!(checks[1].errors().next().expect("violation").code, "operator_mismatch");
}

#[test]
fn missing_operator_file_is_reported_by_path() {
    let ws = support::process_workspace();
    fs::remove_file(ws.path().join("CORE/operators.yaml")).expect("rm");

    let report =
        run_reference_check(&RealFs, ws.path(), &WorkspaceConfig::default()).expect("run");
    assert_eq!(report.status, CheckStatus::Fail);
    let subjects: Vec<_> = report
        .errors()
        .filter_map(|v| v.subject.as_deref())
        .collect();
    assert!(subjects.iter().all(|s| *s == "CORE/operators.yaml"), "{subjects:?}");
    // graph operators, stage list and api document all reference it
    assert_eq!(subjects.len(), 3);
}

#[test]
fn missing_auxiliary_document_is_a_violation() {
    let ws = support::process_workspace();
    fs::remove_file(ws.path().join("API_SPECIFICATION.yaml")).expect("rm");
    let report =
        run_reference_check(&RealFs, ws.path(), &WorkspaceConfig::default()).expect("run");
    let codes: Vec<_> = report.errors().map(|v| v.code.as_str()).collect();
    assert_eq!(codes, vec!["document_missing"]);
}

#[test]
fn missing_process_graph_is_fatal_for_chain_checks() {
    let ws = support::process_workspace();
    fs::remove_file(ws.path().join("structured_data.jsonld")).expect("rm");
    let err = run_chain_checks(&RealFs, ws.path(), &WorkspaceConfig::default()).expect_err("fatal");
    assert!(matches!(err, PipelineError::DocumentMissing { .. }));
}

#[test]
fn unparseable_process_graph_is_fatal() {
    let ws = support::process_workspace();
    support::write(ws.path(), "structured_data.jsonld", "{\"@graph\": [");
    let err = run_verify(&RealFs, ws.path(), &WorkspaceConfig::default()).expect_err("fatal");
    assert!(matches!(err, PipelineError::DocumentInvalid { .. }));
}
