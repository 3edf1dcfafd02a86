// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Subject,
    Relation,
    Object,
}

impl RequiredField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::Relation => "relation",
            Self::Object => "object",
        }
    }
}

/// A relation entry as read from a source document, before validation.
///
/// Any of the three core fields may be missing; `provenance` is always set by
/// the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAssertion {
    pub subject: Option<String>,
    pub relation: Option<String>,
    pub object: Option<String>,
    pub provenance: String,
}

impl RawAssertion {
    /// Fields that are absent or empty, in subject/relation/object order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();
        for (field, value) in [
            (RequiredField::Subject, &self.subject),
            (RequiredField::Relation, &self.relation),
            (RequiredField::Object, &self.object),
        ] {
            if value.as_deref().map_or(true, str::is_empty) {
                missing.push(field);
            }
        }
        missing
    }

    /// Promotes to a complete assertion when all three fields are non-empty.
    pub fn into_complete(self) -> Result<Assertion, Vec<RequiredField>> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(missing);
        }
        match (self.subject, self.relation, self.object) {
            (Some(subject), Some(relation), Some(object)) => Ok(Assertion {
                subject,
                relation,
                object,
                provenance: self.provenance,
            }),
            _ => Err(missing),
        }
    }
}

/// A complete subject/relation/object triple with its source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assertion {
    pub subject: String,
    pub relation: String,
    pub object: String,
    pub provenance: String,
}

impl Assertion {
    #[must_use]
    pub fn new(subject: &str, relation: &str, object: &str, provenance: &str) -> Self {
        Self {
            subject: subject.to_string(),
            relation: relation.to_string(),
            object: object.to_string(),
            provenance: provenance.to_string(),
        }
    }
}

impl From<Assertion> for RawAssertion {
    fn from(value: Assertion) -> Self {
        Self {
            subject: Some(value.subject),
            relation: Some(value.relation),
            object: Some(value.object),
            provenance: value.provenance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    MissingFields {
        missing: Vec<RequiredField>,
    },
    UnknownRelation {
        relation: String,
        admissible: Vec<String>,
    },
}

/// Why one extracted assertion was rejected.
///
/// `position` is 1-based over the whole extracted sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub position: usize,
    pub provenance: String,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::MissingFields { missing } => {
                let names = missing
                    .iter()
                    .map(|field| field.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(
                    f,
                    "relation #{} in {}: missing required fields ({names})",
                    self.position, self.provenance
                )
            }
            DiagnosticKind::UnknownRelation {
                relation,
                admissible,
            } => write!(
                f,
                "relation #{} in {}: unknown relation `{relation}`; must be one of: {}",
                self.position,
                self.provenance,
                admissible.join(", ")
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: Vec<Assertion>,
    pub errors: Vec<Diagnostic>,
}

impl ValidationResult {
    /// Nothing survived and something was rejected: the run must not emit.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.valid.is_empty() && !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(subject: Option<&str>, relation: Option<&str>, object: Option<&str>) -> RawAssertion {
        RawAssertion {
            subject: subject.map(str::to_string),
            relation: relation.map(str::to_string),
            object: object.map(str::to_string),
            provenance: "ARTICLES/M/a.yaml".to_string(),
        }
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let entry = raw(Some(""), Some("defines"), None);
        assert_eq!(
            entry.missing_fields(),
            vec![RequiredField::Subject, RequiredField::Object]
        );
        assert!(entry.into_complete().is_err());
    }

    #[test]
    fn complete_entry_keeps_provenance() {
        let entry = raw(Some("A"), Some("defines"), Some("B"));
        let done = entry.into_complete().expect("complete");
        assert_eq!(done, Assertion::new("A", "defines", "B", "ARTICLES/M/a.yaml"));
    }

    #[test]
    fn unknown_relation_message_lists_alternatives() {
        let diag = Diagnostic {
            position: 2,
            provenance: "ARTICLES/M/b.yaml".to_string(),
            kind: DiagnosticKind::UnknownRelation {
                relation: "implies".to_string(),
                admissible: vec!["defines".to_string(), "derives_from".to_string()],
            },
        };
        assert_eq!(
            diag.to_string(),
            "relation #2 in ARTICLES/M/b.yaml: unknown relation `implies`; must be one of: defines, derives_from"
        );
    }

    #[test]
    fn fatal_only_when_nothing_valid_and_errors_exist() {
        let mut result = ValidationResult::default();
        assert!(!result.is_fatal());
        result.errors.push(Diagnostic {
            position: 1,
            provenance: "x".to_string(),
            kind: DiagnosticKind::MissingFields {
                missing: vec![RequiredField::Object],
            },
        });
        assert!(result.is_fatal());
        result.valid.push(Assertion::new("A", "defines", "B", "x"));
        assert!(!result.is_fatal());
    }
}
