// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::path::PathBuf;

use ontoweave_adapters::AdapterError;
use ontoweave_model::Diagnostic;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExitCode {
    Success = 0,
    Usage = 2,
    ConsistencyFailure = 3,
    FatalPrecondition = 4,
    Internal = 10,
}

impl ExitCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Usage => "usage",
            Self::ConsistencyFailure => "consistency_failure",
            Self::FatalPrecondition => "fatal_precondition",
            Self::Internal => "internal",
        }
    }

    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Conditions that stop the pipeline outright.
///
/// Per-document parse failures, assertion rejections and consistency
/// findings are not errors; they travel in the returned reports.
#[derive(Debug)]
#[non_exhaustive]
pub enum PipelineError {
    Config {
        path: PathBuf,
        detail: String,
    },
    VocabularyMissing {
        path: PathBuf,
    },
    VocabularyInvalid {
        path: PathBuf,
        detail: String,
    },
    DocumentMissing {
        path: PathBuf,
    },
    DocumentInvalid {
        path: PathBuf,
        detail: String,
    },
    NoValidAssertions {
        diagnostics: Vec<Diagnostic>,
    },
    Emit {
        detail: String,
    },
    Adapter(AdapterError),
}

impl PipelineError {
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Emit { .. } | Self::Adapter(_) => ExitCode::Internal,
            _ => ExitCode::FatalPrecondition,
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { path, detail } => {
                write!(f, "invalid configuration {}: {detail}", path.display())
            }
            Self::VocabularyMissing { path } => {
                write!(f, "relation vocabulary not found: {}", path.display())
            }
            Self::VocabularyInvalid { path, detail } => {
                write!(f, "relation vocabulary {} is invalid: {detail}", path.display())
            }
            Self::DocumentMissing { path } => {
                write!(f, "required document not found: {}", path.display())
            }
            Self::DocumentInvalid { path, detail } => {
                write!(f, "document {} is invalid: {detail}", path.display())
            }
            Self::NoValidAssertions { diagnostics } => write!(
                f,
                "no valid relations found ({} rejected); refusing to emit an empty graph",
                diagnostics.len()
            ),
            Self::Emit { detail } => write!(f, "graph emission failed: {detail}"),
            Self::Adapter(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Adapter(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AdapterError> for PipelineError {
    fn from(value: AdapterError) -> Self {
        Self::Adapter(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_preconditions_map_to_their_exit_code() {
        let err = PipelineError::VocabularyMissing {
            path: PathBuf::from("CORE/relations.yaml"),
        };
        assert_eq!(err.exit_code(), ExitCode::FatalPrecondition);
        assert_eq!(err.exit_code().code(), 4);
        assert_eq!(
            err.to_string(),
            "relation vocabulary not found: CORE/relations.yaml"
        );
        let emit = PipelineError::Emit {
            detail: "boom".to_string(),
        };
        assert_eq!(emit.exit_code(), ExitCode::Internal);
    }
}
