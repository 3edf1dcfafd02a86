// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use ontoweave_adapters::Fs;
use ontoweave_model::RelationVocabulary;
use serde_yaml::Value;
use tracing::{info, warn};

use crate::error::{PipelineError, Result};

/// Reads the relation names from `doc[key]`, which must be a mapping.
/// Descriptions stored as the mapping values are ignored.
pub fn parse_vocabulary(raw: &str, key: &str) -> std::result::Result<RelationVocabulary, String> {
    let doc: Value =
        serde_yaml::from_str(raw).map_err(|e| format!("parse vocabulary failed: {e}"))?;
    let section = doc
        .get(key)
        .ok_or_else(|| format!("top-level `{key}` section is required"))?;
    let entries = section
        .as_mapping()
        .ok_or_else(|| format!("`{key}` must be a mapping of relation names"))?;
    let mut names = Vec::with_capacity(entries.len());
    for name in entries.keys() {
        let name = name
            .as_str()
            .ok_or_else(|| format!("`{key}` keys must be strings, found {name:?}"))?;
        if name.trim().is_empty() {
            return Err(format!("`{key}` contains an empty relation name"));
        }
        names.push(name.to_string());
    }
    Ok(names.into_iter().collect())
}

pub fn load_vocabulary(
    fs: &dyn Fs,
    root: &Path,
    path: &Path,
    key: &str,
) -> Result<RelationVocabulary> {
    if !fs.exists(root, path) {
        return Err(PipelineError::VocabularyMissing {
            path: path.to_path_buf(),
        });
    }
    let raw = fs
        .read_text(root, path)
        .map_err(|err| PipelineError::VocabularyInvalid {
            path: path.to_path_buf(),
            detail: err.to_string(),
        })?;
    let vocabulary = parse_vocabulary(&raw, key).map_err(|detail| PipelineError::VocabularyInvalid {
        path: path.to_path_buf(),
        detail,
    })?;
    if vocabulary.is_empty() {
        warn!(
            path = %path.display(),
            "relation vocabulary is empty; every assertion will be rejected"
        );
    }
    info!(
        path = %path.display(),
        count = vocabulary.len(),
        relations = %vocabulary.sorted_names().join(","),
        "loaded canonical relations"
    );
    Ok(vocabulary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontoweave_adapters::RealFs;
    use tempfile::tempdir;

    #[test]
    fn keys_of_the_relations_mapping_form_the_vocabulary() {
        let vocab = parse_vocabulary(
            "relations:\n  defines:\n    description: x\n  derives_from: {}\n",
            "relations",
        )
        .expect("parse");
        assert_eq!(vocab.sorted_names(), vec!["defines", "derives_from"]);
    }

    #[test]
    fn missing_section_or_wrong_shape_is_invalid() {
        assert!(parse_vocabulary("other: {}\n", "relations").is_err());
        assert!(parse_vocabulary("relations: [defines]\n", "relations").is_err());
        assert!(parse_vocabulary("relations: {defines: x\n", "relations").is_err());
    }

    #[test]
    fn absent_vocabulary_is_a_fatal_precondition() {
        let repo = tempdir().expect("tmp");
        let err = load_vocabulary(
            &RealFs,
            repo.path(),
            Path::new("CORE/relations.yaml"),
            "relations",
        )
        .expect_err("missing");
        assert!(matches!(err, PipelineError::VocabularyMissing { .. }));
    }
}
