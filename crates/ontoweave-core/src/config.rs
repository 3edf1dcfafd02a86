// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use ontoweave_adapters::Fs;
use ontoweave_model::ReferenceSyntax;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

const WORKSPACE_CONFIG_PATH: &str = "configs/ontoweave/workspace.json";

#[must_use]
pub fn workspace_config_path(root: &Path) -> PathBuf {
    root.join(WORKSPACE_CONFIG_PATH)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ConfigSchemaVersion {
    #[default]
    #[serde(rename = "1")]
    V1,
}

impl ConfigSchemaVersion {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "1",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkspaceConfig {
    pub schema_version: ConfigSchemaVersion,
    pub layout: Layout,
    pub context: ContextPolicy,
    pub alignment: AlignmentTable,
    pub references: ReferencePolicy,
}

/// Where inputs live and where outputs go, relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Layout {
    pub vocabulary: PathBuf,
    pub vocabulary_key: String,
    pub articles_dir: PathBuf,
    pub template_name: String,
    pub article_extension: String,
    pub output_dir: PathBuf,
    pub graph_file: String,
    pub table_file: String,
    pub process_graph: PathBuf,
    pub stage_document: PathBuf,
    pub stage_path: Vec<String>,
    pub auxiliary_documents: Vec<PathBuf>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            vocabulary: PathBuf::from("CORE/relations.yaml"),
            vocabulary_key: "relations".to_string(),
            articles_dir: PathBuf::from("ARTICLES/M"),
            template_name: "TEMPLATE.yaml".to_string(),
            article_extension: "yaml".to_string(),
            output_dir: PathBuf::from("KNOWLEDGE_GRAPH"),
            graph_file: "global_relations.jsonld".to_string(),
            table_file: "cross_reference.csv".to_string(),
            process_graph: PathBuf::from("structured_data.jsonld"),
            stage_document: PathBuf::from("QUICK_START_FOR_AI.yaml"),
            stage_path: vec!["ritual".to_string(), "stages".to_string()],
            auxiliary_documents: vec![
                PathBuf::from("QUICK_START_FOR_AI.yaml"),
                PathBuf::from("API_SPECIFICATION.yaml"),
            ],
        }
    }
}

impl Layout {
    #[must_use]
    pub fn graph_path(&self) -> PathBuf {
        self.output_dir.join(&self.graph_file)
    }

    #[must_use]
    pub fn table_path(&self) -> PathBuf {
        self.output_dir.join(&self.table_file)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContextPolicy {
    pub vocab_base: String,
}

impl Default for ContextPolicy {
    fn default() -> Self {
        Self {
            vocab_base: "https://metamonism.org/relations/".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionRule {
    pub action: String,
    /// `None` means any operator is accepted for this action.
    #[serde(default)]
    pub expected_operator: Option<String>,
}

impl ActionRule {
    fn new(action: &str, expected_operator: Option<&str>) -> Self {
        Self {
            action: action.to_string(),
            expected_operator: expected_operator.map(str::to_string),
        }
    }
}

/// Expected operator substring for a declared action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionExpectation<'a> {
    Requires(&'a str),
    Unconstrained,
    NotInTable,
}

/// Versioned action → operator-substring table used by stage alignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlignmentTable {
    pub schema_version: ConfigSchemaVersion,
    pub rules: Vec<ActionRule>,
}

impl Default for AlignmentTable {
    fn default() -> Self {
        Self {
            schema_version: ConfigSchemaVersion::V1,
            rules: vec![
                ActionRule::new("initiate", Some("ban_of_absolute_identity")),
                ActionRule::new("experience", None),
                ActionRule::new("transform", Some("diff")),
                ActionRule::new("constrain", Some("diss")),
                ActionRule::new("propagate", Some("propagate")),
            ],
        }
    }
}

impl AlignmentTable {
    #[must_use]
    pub fn expectation(&self, action: &str) -> ActionExpectation<'_> {
        match self.rules.iter().find(|rule| rule.action == action) {
            Some(ActionRule {
                expected_operator: Some(expected),
                ..
            }) if !expected.is_empty() => ActionExpectation::Requires(expected),
            Some(_) => ActionExpectation::Unconstrained,
            None => ActionExpectation::NotInTable,
        }
    }

    fn validate(&self) -> std::result::Result<(), String> {
        let mut seen = std::collections::BTreeSet::new();
        for rule in &self.rules {
            if rule.action.trim().is_empty() {
                return Err("alignment.rules[].action must be non-empty".to_string());
            }
            if !seen.insert(rule.action.as_str()) {
                return Err(format!("alignment.rules action duplicated: {}", rule.action));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReferencePolicy {
    pub operator_field: String,
    pub output_field: String,
    pub fragment_separator: String,
    pub url_prefixes: Vec<String>,
    pub arrows: Vec<String>,
    pub path_prefixes: Vec<String>,
    pub path_extension: String,
}

impl Default for ReferencePolicy {
    fn default() -> Self {
        let syntax = ReferenceSyntax::default();
        Self {
            operator_field: "operator".to_string(),
            output_field: "output".to_string(),
            fragment_separator: syntax.fragment_separator,
            url_prefixes: syntax.url_prefixes,
            arrows: syntax.arrows,
            path_prefixes: vec!["CORE/".to_string()],
            path_extension: "yaml".to_string(),
        }
    }
}

impl ReferencePolicy {
    #[must_use]
    pub fn syntax(&self) -> ReferenceSyntax {
        ReferenceSyntax {
            fragment_separator: self.fragment_separator.clone(),
            url_prefixes: self.url_prefixes.clone(),
            arrows: self.arrows.clone(),
        }
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.fragment_separator.is_empty() {
            return Err("references.fragment_separator must be non-empty".to_string());
        }
        if self.url_prefixes.iter().any(|p| p.trim().is_empty()) {
            return Err("references.url_prefixes entries must be non-empty".to_string());
        }
        if self.arrows.iter().any(String::is_empty) {
            return Err("references.arrows entries must be non-empty".to_string());
        }
        if self.path_prefixes.iter().any(|p| p.trim().is_empty()) {
            return Err("references.path_prefixes entries must be non-empty".to_string());
        }
        Ok(())
    }
}

pub fn parse_workspace_config(raw: &str) -> std::result::Result<WorkspaceConfig, String> {
    let cfg: WorkspaceConfig =
        serde_json::from_str(raw).map_err(|e| format!("parse workspace config failed: {e}"))?;
    validate_workspace_config(&cfg)?;
    Ok(cfg)
}

pub fn validate_workspace_config(cfg: &WorkspaceConfig) -> std::result::Result<(), String> {
    if cfg.layout.vocabulary_key.trim().is_empty() {
        return Err("layout.vocabulary_key must be non-empty".to_string());
    }
    if cfg.layout.output_dir.as_os_str().is_empty() {
        return Err("layout.output_dir must be non-empty".to_string());
    }
    if cfg.layout.graph_file.trim().is_empty() || cfg.layout.table_file.trim().is_empty() {
        return Err("layout.graph_file/table_file must be non-empty".to_string());
    }
    if cfg.context.vocab_base.trim().is_empty() {
        return Err("context.vocab_base must be non-empty".to_string());
    }
    cfg.alignment.validate()?;
    cfg.references.validate()
}

/// The config document [`load_workspace_config`] reads, relative to `root`
/// unless absolute. `None` means the built-in defaults apply.
pub fn config_source(fs: &dyn Fs, root: &Path, explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default_path = PathBuf::from(WORKSPACE_CONFIG_PATH);
            fs.exists(root, &default_path).then_some(default_path)
        }
    }
}

/// Loads the workspace config. Without an explicit path a missing default
/// file yields the built-in defaults; an explicit path must exist.
pub fn load_workspace_config(
    fs: &dyn Fs,
    root: &Path,
    explicit: Option<&Path>,
) -> Result<WorkspaceConfig> {
    let Some(path) = config_source(fs, root, explicit) else {
        return Ok(WorkspaceConfig::default());
    };
    let raw = fs.read_text(root, &path).map_err(|err| PipelineError::Config {
        path: path.clone(),
        detail: err.to_string(),
    })?;
    parse_workspace_config(&raw).map_err(|detail| PipelineError::Config { path, detail })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = parse_workspace_config("{}").expect("parse");
        assert_eq!(cfg, WorkspaceConfig::default());
        assert_eq!(
            cfg.layout.graph_path(),
            PathBuf::from("KNOWLEDGE_GRAPH/global_relations.jsonld")
        );
    }

    #[test]
    fn unknown_fields_and_versions_are_rejected() {
        assert!(parse_workspace_config(r#"{"layuot": {}}"#).is_err());
        assert!(parse_workspace_config(r#"{"schema_version": "2"}"#).is_err());
    }

    #[test]
    fn duplicated_alignment_actions_are_rejected() {
        let err = parse_workspace_config(
            r#"{"alignment": {"rules": [
                {"action": "transform", "expected_operator": "diff"},
                {"action": "transform"}
            ]}}"#,
        )
        .expect_err("duplicate");
        assert!(err.contains("duplicated: transform"), "{err}");
    }

    #[test]
    fn expectation_distinguishes_unconstrained_from_unknown() {
        let table = AlignmentTable::default();
        assert_eq!(table.expectation("transform"), ActionExpectation::Requires("diff"));
        assert_eq!(table.expectation("experience"), ActionExpectation::Unconstrained);
        assert_eq!(table.expectation("meditate"), ActionExpectation::NotInTable);
    }

    #[test]
    fn empty_url_prefix_is_rejected() {
        let err = parse_workspace_config(r#"{"references": {"url_prefixes": ["https://", ""]}}"#)
            .expect_err("empty prefix");
        assert!(err.contains("url_prefixes"), "{err}");
    }
}
