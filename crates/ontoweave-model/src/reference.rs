// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    LocalPath,
    Url,
}

/// A file reference embedded in a graph or declared document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Reference {
    pub kind: ReferenceKind,
    pub path: String,
}

impl Reference {
    #[must_use]
    pub fn local(path: &str) -> Self {
        Self {
            kind: ReferenceKind::LocalPath,
            path: path.to_string(),
        }
    }

    #[must_use]
    pub fn is_local(&self) -> bool {
        self.kind == ReferenceKind::LocalPath
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Separators used to pull references out of annotation strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSyntax {
    pub fragment_separator: String,
    pub url_prefixes: Vec<String>,
    pub arrows: Vec<String>,
}

impl Default for ReferenceSyntax {
    fn default() -> Self {
        Self {
            fragment_separator: "#".to_string(),
            url_prefixes: vec!["http://".to_string(), "https://".to_string()],
            arrows: vec!["→".to_string(), "->".to_string()],
        }
    }
}

impl ReferenceSyntax {
    fn classify(&self, path: &str) -> Reference {
        let kind = if self
            .url_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
        {
            ReferenceKind::Url
        } else {
            ReferenceKind::LocalPath
        };
        Reference {
            kind,
            path: path.to_string(),
        }
    }

    /// `path#fragment` annotations. Values without a separator, or with an
    /// empty path part, carry no file reference.
    #[must_use]
    pub fn parse_operator(&self, raw: &str) -> Option<Reference> {
        let (path, _) = raw.split_once(self.fragment_separator.as_str())?;
        let path = path.trim();
        if path.is_empty() {
            return None;
        }
        Some(self.classify(path))
    }

    /// `produced → path` annotations; the right-hand side of the last arrow.
    #[must_use]
    pub fn parse_output(&self, raw: &str) -> Option<Reference> {
        let (_, path) = self
            .arrows
            .iter()
            .filter_map(|arrow| raw.rsplit_once(arrow.as_str()))
            .min_by_key(|(_, rhs)| rhs.len())?;
        let path = path.trim();
        if path.is_empty() {
            return None;
        }
        Some(self.classify(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_path_is_the_part_before_the_first_separator() {
        let syntax = ReferenceSyntax::default();
        assert_eq!(
            syntax.parse_operator("CORE/operators.yaml#diff"),
            Some(Reference::local("CORE/operators.yaml"))
        );
        assert_eq!(syntax.parse_operator("diff"), None);
        assert_eq!(syntax.parse_operator("#diff"), None);
        let url = syntax
            .parse_operator("https://example.org/ops#diff")
            .expect("url");
        assert_eq!(url.kind, ReferenceKind::Url);
    }

    #[test]
    fn output_path_is_the_right_hand_side_of_the_arrow() {
        let syntax = ReferenceSyntax::default();
        assert_eq!(
            syntax.parse_output("relations → KNOWLEDGE_GRAPH/global_relations.jsonld"),
            Some(Reference::local("KNOWLEDGE_GRAPH/global_relations.jsonld"))
        );
        assert_eq!(
            syntax.parse_output("table -> KNOWLEDGE_GRAPH/cross_reference.csv"),
            Some(Reference::local("KNOWLEDGE_GRAPH/cross_reference.csv"))
        );
        assert_eq!(syntax.parse_output("just prose"), None);
    }
}
