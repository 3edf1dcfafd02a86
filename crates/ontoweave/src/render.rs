// SPDX-License-Identifier: Apache-2.0

use std::fmt::Write as _;
use std::path::PathBuf;

use ontoweave_core::{BuildOutcome, BuildSummary};
use ontoweave_model::{CheckReport, CheckStatus};
use serde::Serialize;

pub fn render_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

pub fn render_build_text(outcome: &BuildOutcome) -> String {
    match outcome {
        BuildOutcome::NothingToDo { .. } => {
            "build: no relations found; nothing to do\n".to_string()
        }
        BuildOutcome::Built(summary) => render_summary_text(summary),
    }
}

fn render_summary_text(summary: &BuildSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "build: wrote {} ({} nodes) and {} ({} rows)",
        summary.graph_path.display(),
        summary.nodes,
        summary.table_path.display(),
        summary.rows
    );
    let _ = writeln!(
        out,
        "documents: {} scanned, {} skipped",
        summary.documents_scanned, summary.documents_skipped
    );
    let _ = writeln!(
        out,
        "assertions: {} extracted, {} valid, {} rejected",
        summary.extracted, summary.valid, summary.rejected
    );
    for diagnostic in &summary.diagnostics {
        let _ = writeln!(out, "  {diagnostic}");
    }
    out
}

pub fn render_checks_text(checks: &[CheckReport]) -> String {
    let mut out = String::new();
    let (mut passed, mut failed, mut skipped) = (0, 0, 0);
    for check in checks {
        match check.status {
            CheckStatus::Pass => passed += 1,
            CheckStatus::Fail => failed += 1,
            CheckStatus::Skip => skipped += 1,
        }
        let _ = writeln!(out, "{}: {}", check.check_id, check.status.as_str());
        for violation in &check.violations {
            let _ = writeln!(out, "  {} {violation}", violation.severity.as_str());
        }
    }
    let _ = writeln!(
        out,
        "summary: {passed} passed, {failed} failed, {skipped} skipped"
    );
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoctorEntry {
    pub role: &'static str,
    pub path: PathBuf,
    pub exists: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoctorReport {
    pub root: PathBuf,
    /// `None` when the built-in defaults are in effect.
    pub config: Option<PathBuf>,
    pub entries: Vec<DoctorEntry>,
}

pub fn render_doctor_text(report: &DoctorReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "root: {}", report.root.display());
    match &report.config {
        Some(path) => {
            let _ = writeln!(out, "config: {}", path.display());
        }
        None => out.push_str("config: built-in defaults\n"),
    }
    for entry in &report.entries {
        let state = if entry.exists { "ok" } else { "missing" };
        let _ = writeln!(out, "{:<18} {:<8} {}", entry.role, state, entry.path.display());
    }
    out
}
