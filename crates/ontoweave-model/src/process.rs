// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// A process-typed node of the process graph document.
///
/// Rebuilt from the document on every validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub follows: Option<String>,
    #[serde(default)]
    pub precedes: Option<String>,
    #[serde(default)]
    pub operator: String,
}

impl ProcessNode {
    #[must_use]
    pub fn new(id: &str, follows: Option<&str>, precedes: Option<&str>, operator: &str) -> Self {
        Self {
            id: id.to_string(),
            name: String::new(),
            follows: follows.map(str::to_string),
            precedes: precedes.map(str::to_string),
            operator: operator.to_string(),
        }
    }

    /// Suffix of `operator` after the last `separator`, or the whole operator
    /// when there is none.
    #[must_use]
    pub fn action_tag(&self, separator: &str) -> &str {
        match self.operator.rsplit_once(separator) {
            Some((_, tag)) => tag,
            None => &self.operator,
        }
    }
}

/// One externally declared stage; the chain must match these positionally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDeclaration {
    #[serde(default)]
    pub stage: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub operator: String,
}

impl StageDeclaration {
    #[must_use]
    pub fn new(stage: &str, action: &str, operator: &str) -> Self {
        Self {
            stage: stage.to_string(),
            action: action.to_string(),
            operator: operator.to_string(),
        }
    }
}
