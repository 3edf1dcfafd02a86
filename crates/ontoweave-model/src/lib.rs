// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Ontoweave model SSOT.
//!
//! Pure data: assertions and their vocabulary, the emitted graph views, the
//! process chain view, reference descriptors and check reports. Nothing in
//! this crate touches the filesystem.

mod assertion;
mod graph;
mod process;
mod reference;
mod report;
mod vocabulary;

pub use assertion::{
    Assertion, Diagnostic, DiagnosticKind, RawAssertion, RequiredField, ValidationResult,
};
pub use graph::{ContextPreamble, CrossReferenceRow, GraphNode, LinkedDataGraph};
pub use process::{ProcessNode, StageDeclaration};
pub use reference::{Reference, ReferenceKind, ReferenceSyntax};
pub use report::{CheckId, CheckReport, CheckStatus, Severity, VerifyReport, Violation};
pub use vocabulary::RelationVocabulary;
