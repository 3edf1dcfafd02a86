// SPDX-License-Identifier: Apache-2.0

use ontoweave_model::{
    Diagnostic, DiagnosticKind, RawAssertion, RelationVocabulary, ValidationResult,
};
use tracing::{debug, info, warn};

/// Partitions extracted assertions into accepted and rejected, preserving
/// input order on both sides. An assertion is accepted iff subject, relation
/// and object are non-empty and the relation belongs to `vocabulary`.
#[must_use]
pub fn validate_assertions(
    assertions: Vec<RawAssertion>,
    vocabulary: &RelationVocabulary,
) -> ValidationResult {
    let mut result = ValidationResult::default();
    let total = assertions.len();
    for (idx, raw) in assertions.into_iter().enumerate() {
        let position = idx + 1;
        let provenance = raw.provenance.clone();
        let assertion = match raw.into_complete() {
            Ok(assertion) => assertion,
            Err(missing) => {
                result.errors.push(Diagnostic {
                    position,
                    provenance,
                    kind: DiagnosticKind::MissingFields { missing },
                });
                continue;
            }
        };
        if !vocabulary.contains(&assertion.relation) {
            result.errors.push(Diagnostic {
                position,
                provenance,
                kind: DiagnosticKind::UnknownRelation {
                    relation: assertion.relation,
                    admissible: vocabulary.sorted_names(),
                },
            });
            continue;
        }
        debug!(
            subject = %assertion.subject,
            relation = %assertion.relation,
            object = %assertion.object,
            "accepted relation"
        );
        result.valid.push(assertion);
    }

    for diagnostic in &result.errors {
        warn!("{diagnostic}");
    }
    info!(valid = result.valid.len(), total, "validated relations");
    result
}
