// SPDX-License-Identifier: Apache-2.0

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use ontoweave_adapters::Fs;
use ontoweave_model::{Reference, Violation};
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ReferencePolicy;

/// Where in the graph a reference was found, e.g. `P2.operator`.
pub type Origin = String;

/// Local file references from every `@graph` node's operator and output
/// annotations, keyed by path. URLs are dropped.
#[must_use]
pub fn graph_references(doc: &Value, policy: &ReferencePolicy) -> BTreeMap<String, Vec<Origin>> {
    let syntax = policy.syntax();
    let mut found = BTreeMap::<String, Vec<Origin>>::new();
    let Some(items) = doc.get("@graph").and_then(Value::as_array) else {
        return found;
    };
    for (idx, item) in items.iter().enumerate() {
        let node = item
            .get("@id")
            .and_then(Value::as_str)
            .map_or_else(|| format!("@graph[{idx}]"), str::to_string);
        let candidates = [
            (
                policy.operator_field.as_str(),
                item.get(&policy.operator_field)
                    .and_then(Value::as_str)
                    .and_then(|raw| syntax.parse_operator(raw)),
            ),
            (
                policy.output_field.as_str(),
                item.get(&policy.output_field)
                    .and_then(Value::as_str)
                    .and_then(|raw| syntax.parse_output(raw)),
            ),
        ];
        for (field, reference) in candidates {
            let Some(reference) = reference else {
                continue;
            };
            if !reference.is_local() {
                debug!(node = %node, url = %reference, "skipping url reference");
                continue;
            }
            found
                .entry(reference.path)
                .or_default()
                .push(format!("{node}.{field}"));
        }
    }
    found
}

/// Matches `<prefix><path chars>.<extension>` for every configured prefix.
pub fn path_pattern(policy: &ReferencePolicy) -> Result<Regex, regex::Error> {
    let prefixes = policy
        .path_prefixes
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r"(?:{prefixes})[a-zA-Z0-9_\-\./]+\.{}",
        regex::escape(&policy.path_extension)
    ))
}

/// De-duplicated path-like substrings of a raw text document.
#[must_use]
pub fn text_references(text: &str, pattern: &Regex) -> BTreeSet<Reference> {
    pattern
        .find_iter(text)
        .map(|m| Reference::local(m.as_str()))
        .collect()
}

fn missing(path: &str, referenced_by: &str) -> Violation {
    Violation::error(
        "missing_reference",
        format!("referenced file does not exist: {path} (referenced by {referenced_by})"),
    )
    .with_subject(path)
}

/// Resolves every local reference of the graph document against the
/// repository root. Runs all checks; never stops at the first miss.
pub fn check_graph_references(
    fs: &dyn Fs,
    root: &Path,
    doc: &Value,
    policy: &ReferencePolicy,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (path, origins) in graph_references(doc, policy) {
        if fs.exists(root, Path::new(&path)) {
            continue;
        }
        warn!(path = %path, "missing referenced file");
        violations.push(missing(&path, &origins.join(", ")));
    }
    violations
}

/// Same as [`check_graph_references`] for a raw declared document.
pub fn check_text_references(
    fs: &dyn Fs,
    root: &Path,
    document: &str,
    text: &str,
    pattern: &Regex,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    for reference in text_references(text, pattern) {
        if fs.exists(root, Path::new(&reference.path)) {
            continue;
        }
        warn!(path = %reference.path, document, "missing referenced file");
        violations.push(missing(&reference.path, document));
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontoweave_adapters::RealFs;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn operator_and_output_annotations_yield_local_paths() {
        let doc = json!({
            "@graph": [
                {"@id": "P1", "operator": "CORE/operators.yaml#diff"},
                {"@id": "P2", "operator": "CORE/operators.yaml#diss"},
                {"@id": "P3", "operator": "https://example.org/ops.yaml#x"},
                {"@id": "P4", "operator": "propagate"},
                {"@id": "G", "output": "graph → KNOWLEDGE_GRAPH/global_relations.jsonld"}
            ]
        });
        let refs = graph_references(&doc, &ReferencePolicy::default());
        assert_eq!(
            refs.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["CORE/operators.yaml", "KNOWLEDGE_GRAPH/global_relations.jsonld"]
        );
        assert_eq!(refs["CORE/operators.yaml"], vec!["P1.operator", "P2.operator"]);
    }

    #[test]
    fn text_scan_matches_prefix_convention_and_deduplicates() {
        let pattern = path_pattern(&ReferencePolicy::default()).expect("regex");
        let text = "see CORE/relations.yaml and CORE/operators.yaml, again CORE/relations.yaml; not DOCS/x.yaml";
        let refs = text_references(text, &pattern)
            .into_iter()
            .map(|r| r.path)
            .collect::<Vec<_>>();
        assert_eq!(refs, vec!["CORE/operators.yaml", "CORE/relations.yaml"]);
    }

    #[test]
    fn missing_operator_file_is_reported_by_exact_path() {
        let repo = tempdir().expect("tmp");
        let doc = json!({"@graph": [{"@id": "P1", "operator": "CORE/operators.yaml#diff"}]});
        let violations =
            check_graph_references(&RealFs, repo.path(), &doc, &ReferencePolicy::default());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].subject.as_deref(), Some("CORE/operators.yaml"));

        std::fs::create_dir_all(repo.path().join("CORE")).expect("mkdir");
        std::fs::write(repo.path().join("CORE/operators.yaml"), "ops: {}\n").expect("write");
        assert!(
            check_graph_references(&RealFs, repo.path(), &doc, &ReferencePolicy::default())
                .is_empty()
        );
    }
}
