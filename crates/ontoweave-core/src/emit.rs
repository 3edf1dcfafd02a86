// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use ontoweave_model::{
    Assertion, ContextPreamble, CrossReferenceRow, GraphNode, LinkedDataGraph, RelationVocabulary,
};

use crate::config::ContextPolicy;

#[must_use]
pub fn context_preamble(
    policy: &ContextPolicy,
    vocabulary: &RelationVocabulary,
) -> ContextPreamble {
    ContextPreamble {
        vocab_base: policy.vocab_base.clone(),
        relations: vocabulary.sorted_names(),
    }
}

/// Groups assertions by subject, then by relation. Subjects and relations
/// appear in first-seen order; objects in assertion order.
#[must_use]
pub fn linked_data_graph(assertions: &[Assertion], context: ContextPreamble) -> LinkedDataGraph {
    let mut nodes: Vec<GraphNode> = Vec::new();
    let mut index = std::collections::HashMap::<&str, usize>::new();
    for assertion in assertions {
        let slot = *index.entry(assertion.subject.as_str()).or_insert_with(|| {
            nodes.push(GraphNode::new(&assertion.subject));
            nodes.len() - 1
        });
        nodes[slot].push(&assertion.relation, &assertion.object);
    }
    LinkedDataGraph { context, nodes }
}

fn display_source(provenance: &str) -> String {
    Path::new(provenance)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(provenance)
        .to_string()
}

#[must_use]
pub fn cross_reference_rows(assertions: &[Assertion]) -> Vec<CrossReferenceRow> {
    assertions
        .iter()
        .map(|a| CrossReferenceRow {
            subject: a.subject.clone(),
            relation: a.relation.clone(),
            object: a.object.clone(),
            source_file: display_source(&a.provenance),
        })
        .collect()
}

/// Pretty JSON with two-space indentation and a trailing newline.
pub fn render_graph_json(graph: &LinkedDataGraph) -> Result<String, serde_json::Error> {
    let mut text = serde_json::to_string_pretty(graph)?;
    text.push('\n');
    Ok(text)
}

fn csv_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\n', '\r']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

fn csv_record(out: &mut String, fields: &[&str]) {
    for (idx, field) in fields.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        csv_field(out, field);
    }
    out.push('\n');
}

#[must_use]
pub fn render_table_csv(rows: &[CrossReferenceRow]) -> String {
    let mut out = String::new();
    csv_record(&mut out, &CrossReferenceRow::HEADER);
    for row in rows {
        csv_record(&mut out, &row.fields());
    }
    out
}
