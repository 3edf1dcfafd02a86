// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    PathViolation {
        path: PathBuf,
        detail: String,
    },
    Io {
        op: &'static str,
        path: PathBuf,
        detail: String,
    },
}

impl AdapterError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PathViolation { path, .. } | Self::Io { path, .. } => path,
        }
    }
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathViolation { path, detail } => {
                write!(f, "path violation: {} ({detail})", path.display())
            }
            Self::Io { op, path, detail } => {
                write!(f, "io error: {op} {} ({detail})", path.display())
            }
        }
    }
}

impl std::error::Error for AdapterError {}

fn resolve(repo_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        repo_root.join(path)
    }
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Resolves `target` against the repository root and rejects anything that
/// would land outside `output_root`.
pub fn ensure_write_path_under(
    repo_root: &Path,
    output_root: &Path,
    target: &Path,
) -> Result<PathBuf, AdapterError> {
    let normalized_root = normalize_path(&resolve(repo_root, output_root));
    let absolute_target = resolve(repo_root, target);
    let normalized_target = normalize_path(&absolute_target);

    if !normalized_target.starts_with(&normalized_root) || normalized_target == normalized_root {
        return Err(AdapterError::PathViolation {
            path: absolute_target,
            detail: format!("writes allowed only under {}", normalized_root.display()),
        });
    }
    Ok(normalized_target)
}

/// Read side. Every call opens, reads fully and releases; no handle outlives
/// the call.
pub trait Fs {
    fn read_text(&self, repo_root: &Path, path: &Path) -> Result<String, AdapterError>;
    fn exists(&self, repo_root: &Path, path: &Path) -> bool;
    /// Regular files directly under `dir` with the given extension, sorted by
    /// file name.
    fn list_files(
        &self,
        repo_root: &Path,
        dir: &Path,
        extension: &str,
    ) -> Result<Vec<PathBuf>, AdapterError>;
}

pub trait FsWrite {
    fn write_text(
        &self,
        repo_root: &Path,
        output_root: &Path,
        path: &Path,
        content: &str,
    ) -> Result<PathBuf, AdapterError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl Fs for RealFs {
    fn read_text(&self, repo_root: &Path, path: &Path) -> Result<String, AdapterError> {
        let target = resolve(repo_root, path);
        fs::read_to_string(&target).map_err(|err| AdapterError::Io {
            op: "read_to_string",
            path: target,
            detail: err.to_string(),
        })
    }

    fn exists(&self, repo_root: &Path, path: &Path) -> bool {
        resolve(repo_root, path).exists()
    }

    fn list_files(
        &self,
        repo_root: &Path,
        dir: &Path,
        extension: &str,
    ) -> Result<Vec<PathBuf>, AdapterError> {
        let target = resolve(repo_root, dir);
        let entries = fs::read_dir(&target).map_err(|err| AdapterError::Io {
            op: "read_dir",
            path: target.clone(),
            detail: err.to_string(),
        })?;
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| AdapterError::Io {
                op: "read_dir_entry",
                path: target.clone(),
                detail: err.to_string(),
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(extension) {
                continue;
            }
            files.push(dir.join(entry.file_name()));
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }
}

impl FsWrite for RealFs {
    fn write_text(
        &self,
        repo_root: &Path,
        output_root: &Path,
        path: &Path,
        content: &str,
    ) -> Result<PathBuf, AdapterError> {
        let target = ensure_write_path_under(repo_root, output_root, path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|err| AdapterError::Io {
                op: "create_dir_all",
                path: parent.to_path_buf(),
                detail: err.to_string(),
            })?;
        }
        fs::write(&target, content).map_err(|err| AdapterError::Io {
            op: "write",
            path: target.clone(),
            detail: err.to_string(),
        })?;
        Ok(target)
    }
}
