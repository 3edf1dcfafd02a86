// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use ontoweave_adapters::Fs;
use ontoweave_model::{CheckId, CheckReport, ProcessNode, VerifyReport, Violation};
use serde_json::Value;
use tracing::info;

use crate::alignment::{parse_stage_declarations, validate_alignment};
use crate::chain::{parse_process_graph, validate_chain};
use crate::config::{workspace_config_path, WorkspaceConfig};
use crate::error::{PipelineError, Result};
use crate::references::{check_graph_references, check_text_references, path_pattern};

pub const CHECK_CHAIN: &str = "chain_continuity";
pub const CHECK_ALIGNMENT: &str = "stage_alignment";
pub const CHECK_REFERENCES: &str = "reference_integrity";

fn check_id(raw: &'static str) -> CheckId {
    match CheckId::parse(raw) {
        Ok(id) => id,
        Err(err) => unreachable!("built-in check id `{raw}` is invalid: {err}"),
    }
}

fn read_required(fs: &dyn Fs, root: &Path, path: &Path) -> Result<String> {
    if !fs.exists(root, path) {
        return Err(PipelineError::DocumentMissing {
            path: path.to_path_buf(),
        });
    }
    fs.read_text(root, path).map_err(|err| PipelineError::DocumentInvalid {
        path: path.to_path_buf(),
        detail: err.to_string(),
    })
}

/// Chain continuity followed by stage alignment. Alignment needs the
/// visitation order, so it is skipped when the chain is broken.
pub fn run_chain_checks(
    fs: &dyn Fs,
    root: &Path,
    config: &WorkspaceConfig,
) -> Result<Vec<CheckReport>> {
    let layout = &config.layout;
    let graph_raw = read_required(fs, root, &layout.process_graph)?;
    let nodes = parse_process_graph(&graph_raw).map_err(|detail| PipelineError::DocumentInvalid {
        path: layout.process_graph.clone(),
        detail,
    })?;
    let stage_raw = read_required(fs, root, &layout.stage_document)?;
    let stages = parse_stage_declarations(&stage_raw, &layout.stage_path).map_err(|detail| {
        PipelineError::DocumentInvalid {
            path: layout.stage_document.clone(),
            detail,
        }
    })?;
    info!(processes = nodes.len(), stages = stages.len(), "loaded process graph and stages");

    let order: Vec<ProcessNode> = match validate_chain(&nodes) {
        Ok(order) => order,
        Err(err) => {
            return Ok(vec![
                CheckReport::from_violations(check_id(CHECK_CHAIN), vec![err.to_violation()]),
                CheckReport::skipped(check_id(CHECK_ALIGNMENT), "process chain is not continuous"),
            ]);
        }
    };
    let chain_note = Violation::info(
        "chain_order",
        order
            .iter()
            .map(|n| n.id.as_str())
            .collect::<Vec<_>>()
            .join(" → "),
    );
    let chain = CheckReport::from_violations(check_id(CHECK_CHAIN), vec![chain_note]);

    let alignment_violations = match validate_alignment(
        &order,
        &stages,
        &config.alignment,
        &config.references.fragment_separator,
    ) {
        Ok(notes) => notes,
        Err(err) => vec![err.to_violation()],
    };
    let alignment = CheckReport::from_violations(check_id(CHECK_ALIGNMENT), alignment_violations);
    Ok(vec![chain, alignment])
}

/// Reference integrity over the process graph and every auxiliary document.
/// A missing document is a violation, not an error, so one pass reports
/// everything that is missing.
pub fn run_reference_check(
    fs: &dyn Fs,
    root: &Path,
    config: &WorkspaceConfig,
) -> Result<CheckReport> {
    let layout = &config.layout;
    let policy = &config.references;
    let pattern = path_pattern(policy).map_err(|err| PipelineError::Config {
        path: workspace_config_path(root),
        detail: format!("references policy does not form a valid path pattern: {err}"),
    })?;
    let mut violations = Vec::new();

    let graph_path = &layout.process_graph;
    if fs.exists(root, graph_path) {
        let raw = read_required(fs, root, graph_path)?;
        let doc: Value = serde_json::from_str(&raw).map_err(|e| PipelineError::DocumentInvalid {
            path: graph_path.clone(),
            detail: e.to_string(),
        })?;
        violations.extend(check_graph_references(fs, root, &doc, policy));
    } else {
        violations.push(document_missing(graph_path));
    }

    for document in &layout.auxiliary_documents {
        if !fs.exists(root, document) {
            violations.push(document_missing(document));
            continue;
        }
        let text = read_required(fs, root, document)?;
        let label = document.display().to_string();
        violations.extend(check_text_references(fs, root, &label, &text, &pattern));
    }

    Ok(CheckReport::from_violations(check_id(CHECK_REFERENCES), violations))
}

fn document_missing(path: &Path) -> Violation {
    Violation::error(
        "document_missing",
        format!("document to scan for references not found: {}", path.display()),
    )
    .with_subject(path.display().to_string())
}

pub fn run_verify(fs: &dyn Fs, root: &Path, config: &WorkspaceConfig) -> Result<VerifyReport> {
    let mut checks = run_chain_checks(fs, root, config)?;
    checks.push(run_reference_check(fs, root, config)?);
    let report = VerifyReport { checks };
    info!(passed = report.passed(), "verification finished");
    Ok(report)
}
