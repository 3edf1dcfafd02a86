// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use ontoweave_model::{ProcessNode, StageDeclaration, Violation};
use serde_yaml::Value;

use crate::config::{ActionExpectation, AlignmentTable};
use crate::extract::scalar_text;

/// Reads the ordered stage list found by following `path` from the document
/// root. A missing path yields no stages.
pub fn parse_stage_declarations(
    raw: &str,
    path: &[String],
) -> Result<Vec<StageDeclaration>, String> {
    let doc: Value =
        serde_yaml::from_str(raw).map_err(|e| format!("parse stage document failed: {e}"))?;
    let mut cur = &doc;
    for key in path {
        match cur.get(key.as_str()) {
            Some(next) => cur = next,
            None => return Ok(Vec::new()),
        }
    }
    let entries = cur
        .as_sequence()
        .ok_or_else(|| format!("`{}` must be a sequence", path.join(".")))?;
    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            if !entry.is_mapping() {
                return Err(format!("`{}[{idx}]` must be a mapping", path.join(".")));
            }
            let field = |name: &str| scalar_text(entry.get(name)).unwrap_or_default();
            Ok(StageDeclaration {
                stage: field("stage"),
                action: field("action"),
                operator: field("operator"),
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlignmentError {
    CountMismatch {
        processes: usize,
        stages: usize,
    },
    OperatorMismatch {
        position: usize,
        process: String,
        action: String,
        expected: String,
        operator: String,
    },
}

impl AlignmentError {
    #[must_use]
    pub fn to_violation(&self) -> Violation {
        match self {
            Self::CountMismatch { .. } => Violation::error("count_mismatch", self.to_string()),
            Self::OperatorMismatch {
                position, process, ..
            } => Violation::error("operator_mismatch", self.to_string())
                .with_subject(format!("stage {position} / {process}")),
        }
    }
}

impl fmt::Display for AlignmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CountMismatch { processes, stages } => write!(
                f,
                "process count mismatch: {processes} processes, {stages} declared stages"
            ),
            Self::OperatorMismatch {
                position,
                action,
                expected,
                operator,
                ..
            } => write!(
                f,
                "stage {position} mismatch: declared action `{action}` expects operator containing `{expected}`, process operator is `{operator}`"
            ),
        }
    }
}

impl std::error::Error for AlignmentError {}

/// Checks the chain against the declared stages position by position.
///
/// Stops at the first mismatch. On success returns informational notes for
/// declared actions that the table does not know about.
pub fn validate_alignment(
    chain: &[ProcessNode],
    stages: &[StageDeclaration],
    table: &AlignmentTable,
    fragment_separator: &str,
) -> Result<Vec<Violation>, AlignmentError> {
    if chain.len() != stages.len() {
        return Err(AlignmentError::CountMismatch {
            processes: chain.len(),
            stages: stages.len(),
        });
    }
    let mut notes = Vec::new();
    for (idx, (process, stage)) in chain.iter().zip(stages).enumerate() {
        let position = idx + 1;
        match table.expectation(&stage.action) {
            ActionExpectation::Requires(expected) => {
                if !process.operator.contains(expected) {
                    return Err(AlignmentError::OperatorMismatch {
                        position,
                        process: process.id.clone(),
                        action: stage.action.clone(),
                        expected: expected.to_string(),
                        operator: process.operator.clone(),
                    });
                }
            }
            ActionExpectation::Unconstrained => {}
            ActionExpectation::NotInTable => notes.push(
                Violation::info(
                    "unconstrained_action",
                    format!(
                        "action `{}` has no alignment rule; process action tag `{}` accepted",
                        stage.action,
                        process.action_tag(fragment_separator)
                    ),
                )
                .with_subject(format!("stage {position} / {}", process.id)),
            ),
        }
    }
    Ok(notes)
}
