// SPDX-License-Identifier: Apache-2.0

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One subject of the linked-data graph.
///
/// Relations keep first-seen order and objects keep assertion order, so the
/// serialized form is a deterministic function of the input sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
    pub relations: Vec<(String, Vec<String>)>,
}

impl GraphNode {
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            relations: Vec::new(),
        }
    }

    pub fn push(&mut self, relation: &str, object: &str) {
        match self.relations.iter_mut().find(|(name, _)| name == relation) {
            Some((_, objects)) => objects.push(object.to_string()),
            None => self
                .relations
                .push((relation.to_string(), vec![object.to_string()])),
        }
    }

    #[must_use]
    pub fn objects(&self, relation: &str) -> Option<&[String]> {
        self.relations
            .iter()
            .find(|(name, _)| name == relation)
            .map(|(_, objects)| objects.as_slice())
    }
}

impl Serialize for GraphNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.relations.len() + 1))?;
        map.serialize_entry("@id", &self.id)?;
        for (relation, objects) in &self.relations {
            map.serialize_entry(relation, objects)?;
        }
        map.end()
    }
}

/// The `@context` block: a default vocabulary plus one IRI per relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextPreamble {
    pub vocab_base: String,
    pub relations: Vec<String>,
}

impl ContextPreamble {
    #[must_use]
    pub fn iri(&self, relation: &str) -> String {
        format!("{}{relation}", self.vocab_base)
    }
}

impl Serialize for ContextPreamble {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.relations.len() + 1))?;
        map.serialize_entry("@vocab", &self.vocab_base)?;
        for relation in &self.relations {
            map.serialize_entry(relation, &self.iri(relation))?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedDataGraph {
    pub context: ContextPreamble,
    pub nodes: Vec<GraphNode>,
}

impl Serialize for LinkedDataGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("@context", &self.context)?;
        map.serialize_entry("@graph", &self.nodes)?;
        map.end()
    }
}

/// One row of the flat cross-reference table.
///
/// `source_file` is a display form of the provenance and cannot be used to
/// recover it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossReferenceRow {
    pub subject: String,
    pub relation: String,
    pub object: String,
    pub source_file: String,
}

impl CrossReferenceRow {
    pub const HEADER: [&'static str; 4] = ["subject", "relation", "object", "source_file"];

    #[must_use]
    pub fn fields(&self) -> [&str; 4] {
        [
            &self.subject,
            &self.relation,
            &self.object,
            &self.source_file,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn node_serializes_id_first_then_relations_in_insertion_order() {
        let mut node = GraphNode::new("A");
        node.push("refines", "C");
        node.push("defines", "B");
        node.push("refines", "D");
        let text = serde_json::to_string(&node).expect("encode");
        assert_eq!(text, r#"{"@id":"A","refines":["C","D"],"defines":["B"]}"#);
        assert_eq!(node.objects("refines"), Some(&["C".to_string(), "D".to_string()][..]));
    }

    #[test]
    fn context_declares_vocab_and_one_iri_per_relation() {
        let context = ContextPreamble {
            vocab_base: "https://example.org/rel/".to_string(),
            relations: vec!["defines".to_string()],
        };
        let value = serde_json::to_value(&context).expect("encode");
        assert_eq!(
            value,
            json!({
                "@vocab": "https://example.org/rel/",
                "defines": "https://example.org/rel/defines"
            })
        );
    }
}
