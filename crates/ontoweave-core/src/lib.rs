// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! Knowledge-graph compilation and consistency checks.
//!
//! `build` turns article documents into a linked-data graph and a
//! cross-reference table. `verify` checks a process graph for chain
//! continuity, stage alignment and reference integrity.

pub mod alignment;
pub mod build;
pub mod chain;
pub mod config;
pub mod emit;
pub mod error;
pub mod extract;
pub mod references;
pub mod validate;
pub mod verify;
pub mod vocabulary;

pub use build::{run_build, BuildOutcome, BuildSummary};
pub use config::{config_source, load_workspace_config, workspace_config_path, WorkspaceConfig};
pub use error::{ExitCode, PipelineError, Result};
pub use extract::{ExtractionEvent, ExtractionEventKind, ExtractionLog};
pub use verify::{run_chain_checks, run_reference_check, run_verify};
