// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use serde::{Deserialize, Serialize};

fn is_lower_snake(input: &str) -> bool {
    !input.is_empty()
        && input
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckId(String);

impl CheckId {
    pub fn parse(value: &str) -> Result<Self, String> {
        let raw = value.trim();
        if raw.is_empty() {
            return Err("check id cannot be empty".to_string());
        }
        if !is_lower_snake(raw) {
            return Err(format!(
                "invalid check id `{raw}`: expected lowercase snake_case"
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Error,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

/// A located consistency finding. `subject` names the node id, chain
/// position or file path the finding is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub code: String,
    pub message: String,
    pub subject: Option<String>,
    pub severity: Severity,
}

impl Violation {
    #[must_use]
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            subject: None,
            severity: Severity::Error,
        }
    }

    #[must_use]
    pub fn info(code: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            ..Self::error(code, message)
        }
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subject {
            Some(subject) => write!(f, "[{}] {} ({subject})", self.code, self.message),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Fail,
    Skip,
}

impl CheckStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Skip => "skip",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub check_id: CheckId,
    pub status: CheckStatus,
    pub violations: Vec<Violation>,
}

impl CheckReport {
    /// Status is derived: any error-severity violation fails the check.
    #[must_use]
    pub fn from_violations(check_id: CheckId, violations: Vec<Violation>) -> Self {
        let status = if violations.iter().any(|v| v.severity == Severity::Error) {
            CheckStatus::Fail
        } else {
            CheckStatus::Pass
        };
        Self {
            check_id,
            status,
            violations,
        }
    }

    #[must_use]
    pub fn skipped(check_id: CheckId, reason: &str) -> Self {
        Self {
            check_id,
            status: CheckStatus::Skip,
            violations: vec![Violation::info("skipped", reason)],
        }
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == CheckStatus::Pass
    }

    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyReport {
    pub checks: Vec<CheckReport>,
}

impl VerifyReport {
    /// A skipped check counts as failed: it could not vouch for the graph.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.checks.iter().all(CheckReport::passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_id_rejects_non_snake_case() {
        assert!(CheckId::parse("chain_continuity").is_ok());
        assert!(CheckId::parse("Chain-Continuity").is_err());
        assert!(CheckId::parse("  ").is_err());
    }

    #[test]
    fn info_only_report_passes() {
        let id = CheckId::parse("stage_alignment").expect("id");
        let report = CheckReport::from_violations(
            id.clone(),
            vec![Violation::info("unconstrained_action", "no rule")],
        );
        assert!(report.passed());
        let failing = CheckReport::from_violations(id, vec![Violation::error("x", "broken")]);
        assert_eq!(failing.status, CheckStatus::Fail);
        assert_eq!(failing.errors().count(), 1);
    }

    #[test]
    fn skipped_check_fails_the_aggregate() {
        let report = VerifyReport {
            checks: vec![CheckReport::skipped(
                CheckId::parse("stage_alignment").expect("id"),
                "chain invalid",
            )],
        };
        assert!(!report.passed());
    }
}
