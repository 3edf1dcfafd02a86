// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use ontoweave_adapters::Fs;
use ontoweave_model::RawAssertion;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::{debug, info, warn};

use crate::config::Layout;
use crate::error::Result;

const RELATIONS_KEY: &str = "semantic_relations";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionEventKind {
    DirectoryMissing,
    TemplateSkipped,
    NoRelations,
    ParseFailed,
    Extracted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractionEvent {
    pub document: String,
    pub kind: ExtractionEventKind,
    pub detail: String,
}

/// Per-document record of what extraction did, in visiting order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionLog {
    events: Vec<ExtractionEvent>,
}

impl ExtractionLog {
    pub fn emit(&mut self, document: &str, kind: ExtractionEventKind, detail: impl Into<String>) {
        self.events.push(ExtractionEvent {
            document: document.to_string(),
            kind,
            detail: detail.into(),
        });
    }

    #[must_use]
    pub fn events(&self) -> &[ExtractionEvent] {
        &self.events
    }

    #[must_use]
    pub fn count(&self, kind: ExtractionEventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub assertions: Vec<RawAssertion>,
    pub documents_scanned: usize,
    pub log: ExtractionLog,
}

/// Scalar field text; numbers and booleans are rendered, null and composite
/// values count as absent.
pub(crate) fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parses one source document. `Ok(None)` means the document carries no
/// relations; `Err` means the document is unusable and must be skipped whole.
pub fn parse_article(
    raw: &str,
    provenance: &str,
) -> std::result::Result<Option<Vec<RawAssertion>>, String> {
    let doc: Value = serde_yaml::from_str(raw).map_err(|e| format!("yaml parse failed: {e}"))?;
    if !doc.is_mapping() {
        return Err("document root must be a mapping".to_string());
    }
    let entries = match doc.get(RELATIONS_KEY) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Sequence(entries)) if entries.is_empty() => return Ok(None),
        Some(Value::Sequence(entries)) => entries,
        Some(_) => return Err(format!("`{RELATIONS_KEY}` must be a sequence")),
    };
    let mut out = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        if !entry.is_mapping() {
            return Err(format!("`{RELATIONS_KEY}[{idx}]` must be a mapping"));
        }
        out.push(RawAssertion {
            subject: scalar_text(entry.get("subject")),
            relation: scalar_text(entry.get("relation")),
            object: scalar_text(entry.get("object")),
            provenance: provenance.to_string(),
        });
    }
    Ok(Some(out))
}

/// Scans the articles directory in file-name order. Unreadable or malformed
/// documents are logged and skipped; only a failure to list the directory
/// itself is an error.
pub fn extract_assertions(fs: &dyn Fs, root: &Path, layout: &Layout) -> Result<Extraction> {
    let mut extraction = Extraction::default();
    let dir = layout.articles_dir.as_path();
    let dir_label = dir.display().to_string();
    if !fs.exists(root, dir) {
        warn!(dir = %dir_label, "articles directory does not exist");
        extraction.log.emit(
            &dir_label,
            ExtractionEventKind::DirectoryMissing,
            "articles directory does not exist",
        );
        return Ok(extraction);
    }

    let files = fs.list_files(root, dir, &layout.article_extension)?;
    for file in files {
        let document = file.display().to_string();
        if file.file_name().and_then(|n| n.to_str()) == Some(layout.template_name.as_str()) {
            debug!(document = %document, "skipping template document");
            extraction
                .log
                .emit(&document, ExtractionEventKind::TemplateSkipped, "template");
            continue;
        }
        extraction.documents_scanned += 1;

        let parsed = fs
            .read_text(root, &file)
            .map_err(|err| err.to_string())
            .and_then(|raw| parse_article(&raw, &document));
        match parsed {
            Ok(Some(entries)) => {
                info!(document = %document, count = entries.len(), "extracted relations");
                extraction.log.emit(
                    &document,
                    ExtractionEventKind::Extracted,
                    format!("{} relations", entries.len()),
                );
                extraction.assertions.extend(entries);
            }
            Ok(None) => {
                warn!(document = %document, "no {RELATIONS_KEY} found");
                extraction.log.emit(
                    &document,
                    ExtractionEventKind::NoRelations,
                    format!("no {RELATIONS_KEY} found"),
                );
            }
            Err(detail) => {
                warn!(document = %document, error = %detail, "skipping unparseable document");
                extraction
                    .log
                    .emit(&document, ExtractionEventKind::ParseFailed, detail);
            }
        }
    }

    info!(
        documents = extraction.documents_scanned,
        relations = extraction.assertions.len(),
        "extraction finished"
    );
    Ok(extraction)
}
