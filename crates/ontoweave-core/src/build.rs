// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use ontoweave_adapters::{Fs, FsWrite};
use ontoweave_model::Diagnostic;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::WorkspaceConfig;
use crate::emit::{
    context_preamble, cross_reference_rows, linked_data_graph, render_graph_json,
    render_table_csv,
};
use crate::error::{PipelineError, Result};
use crate::extract::{extract_assertions, ExtractionEventKind, ExtractionLog};
use crate::validate::validate_assertions;
use crate::vocabulary::load_vocabulary;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSummary {
    pub documents_scanned: usize,
    pub documents_skipped: usize,
    pub extracted: usize,
    pub valid: usize,
    pub rejected: usize,
    pub nodes: usize,
    pub rows: usize,
    pub graph_path: PathBuf,
    pub table_path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
    pub log: ExtractionLog,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BuildOutcome {
    /// No relations were found; nothing was written.
    NothingToDo { log: ExtractionLog },
    Built(BuildSummary),
}

/// Vocabulary → extraction → validation → emission.
///
/// Fails only on fatal preconditions: missing or unreadable vocabulary, or a
/// run where every extracted assertion was rejected.
pub fn run_build<F: Fs + FsWrite>(
    fs: &F,
    root: &Path,
    config: &WorkspaceConfig,
) -> Result<BuildOutcome> {
    let layout = &config.layout;
    let vocabulary = load_vocabulary(fs, root, &layout.vocabulary, &layout.vocabulary_key)?;

    let extraction = extract_assertions(fs, root, layout)?;
    if extraction.assertions.is_empty() {
        info!("no relations found to process");
        return Ok(BuildOutcome::NothingToDo {
            log: extraction.log,
        });
    }
    let extracted = extraction.assertions.len();

    let validation = validate_assertions(extraction.assertions, &vocabulary);
    if validation.is_fatal() {
        return Err(PipelineError::NoValidAssertions {
            diagnostics: validation.errors,
        });
    }

    let graph = linked_data_graph(
        &validation.valid,
        context_preamble(&config.context, &vocabulary),
    );
    let rows = cross_reference_rows(&validation.valid);
    let graph_text = render_graph_json(&graph).map_err(|e| PipelineError::Emit {
        detail: e.to_string(),
    })?;
    let table_text = render_table_csv(&rows);

    let graph_path = layout.graph_path();
    let table_path = layout.table_path();
    fs.write_text(root, &layout.output_dir, &graph_path, &graph_text)?;
    info!(path = %graph_path.display(), nodes = graph.nodes.len(), "wrote linked-data graph");
    fs.write_text(root, &layout.output_dir, &table_path, &table_text)?;
    info!(path = %table_path.display(), rows = rows.len(), "wrote cross-reference table");

    let log = extraction.log;
    Ok(BuildOutcome::Built(BuildSummary {
        documents_scanned: extraction.documents_scanned,
        documents_skipped: log.count(ExtractionEventKind::ParseFailed)
            + log.count(ExtractionEventKind::NoRelations),
        extracted,
        valid: validation.valid.len(),
        rejected: validation.errors.len(),
        nodes: graph.nodes.len(),
        rows: rows.len(),
        graph_path,
        table_path,
        diagnostics: validation.errors,
        log,
    }))
}
