// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

pub const VOCABULARY: &str = "relations:\n  defines:\n    description: introduces a term\n  derives_from:\n    description: builds on\n";

pub const PROCESS_GRAPH: &str = r#"{
  "@context": {"@vocab": "https://metamonism.org/process/"},
  "@graph": [
    {"@id": "P1", "@type": "Process", "name": "Origin", "precedes": "P2",
     "operator": "CORE/operators.yaml#ban_of_absolute_identity",
     "output": "identity → CORE/outputs.yaml"},
    {"@id": "P2", "@type": ["Process", "Stage"], "name": "Split",
     "follows": {"@id": "P1"}, "precedes": "P3",
     "operator": "CORE/operators.yaml#diff"},
    {"@id": "P3", "@type": "Process", "name": "Spread", "follows": "P2",
     "operator": "CORE/operators.yaml#propagate",
     "output": "https://metamonism.org/outputs/final"},
    {"@id": "T1", "@type": "Term", "name": "not a process"}
  ]
}
"#;

pub const QUICK_START: &str = "ritual:\n  stages:\n    - {stage: begin, action: initiate, operator: 'CORE/operators.yaml#ban_of_absolute_identity'}\n    - {stage: split, action: transform, operator: 'CORE/operators.yaml#diff'}\n    - {stage: spread, action: propagate, operator: 'CORE/operators.yaml#propagate'}\n";

pub const API_SPEC: &str = "endpoints:\n  relations: CORE/relations.yaml\n  operators: CORE/operators.yaml\n";

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, content).expect("write fixture");
}

/// A workspace with a vocabulary, two articles and a template.
pub fn article_workspace() -> TempDir {
    let dir = tempfile::tempdir().expect("tmp");
    let root = dir.path();
    write(root, "CORE/relations.yaml", VOCABULARY);
    write(
        root,
        "ARTICLES/M/b.yaml",
        "title: B\nsemantic_relations:\n  - {subject: B, relation: derives_from, object: A}\n  - {subject: A, relation: defines, object: C}\n",
    );
    write(
        root,
        "ARTICLES/M/a.yaml",
        "title: A\nsemantic_relations:\n  - {subject: A, relation: defines, object: B}\n  - {subject: A, relation: implies, object: Z}\n",
    );
    write(
        root,
        "ARTICLES/M/TEMPLATE.yaml",
        "semantic_relations:\n  - {subject: S, relation: defines, object: O}\n",
    );
    dir
}

/// A workspace whose process graph, stages and references are all consistent.
pub fn process_workspace() -> TempDir {
    let dir = tempfile::tempdir().expect("tmp");
    let root = dir.path();
    write(root, "structured_data.jsonld", PROCESS_GRAPH);
    write(root, "QUICK_START_FOR_AI.yaml", QUICK_START);
    write(root, "API_SPECIFICATION.yaml", API_SPEC);
    write(root, "CORE/relations.yaml", VOCABULARY);
    write(root, "CORE/operators.yaml", "operators: {}\n");
    write(root, "CORE/outputs.yaml", "outputs: {}\n");
    dir
}
