// SPDX-License-Identifier: Apache-2.0

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use ontoweave_model::{ProcessNode, Violation};
use serde_json::Value;

const PROCESS_TYPE: &str = "Process";

fn is_process(item: &Value) -> bool {
    match item.get("@type") {
        Some(Value::String(kind)) => kind == PROCESS_TYPE,
        Some(Value::Array(kinds)) => kinds.iter().any(|k| k.as_str() == Some(PROCESS_TYPE)),
        _ => false,
    }
}

/// Accepts a bare id or an `{"@id": ...}` reference; empty means absent.
fn link(item: &Value, field: &str) -> Option<String> {
    let raw = match item.get(field)? {
        Value::String(id) => id.as_str(),
        Value::Object(obj) => obj.get("@id")?.as_str()?,
        _ => return None,
    };
    (!raw.is_empty()).then(|| raw.to_string())
}

fn text(item: &Value, field: &str) -> String {
    item.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Reads the process-typed nodes of a linked-data document, in document
/// order. Non-process nodes are ignored.
pub fn parse_process_graph(raw: &str) -> Result<Vec<ProcessNode>, String> {
    let doc: Value =
        serde_json::from_str(raw).map_err(|e| format!("parse process graph failed: {e}"))?;
    let items = match doc.get("@graph") {
        None => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => return Err("`@graph` must be an array".to_string()),
    };
    let mut nodes = Vec::new();
    for (idx, item) in items.iter().enumerate() {
        if !is_process(item) {
            continue;
        }
        let id = item
            .get("@id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| format!("`@graph[{idx}]` is a Process without an `@id`"))?;
        nodes.push(ProcessNode {
            id: id.to_string(),
            name: text(item, "name"),
            follows: link(item, "follows"),
            precedes: link(item, "precedes"),
            operator: text(item, "operator"),
        });
    }
    Ok(nodes)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    DuplicateId {
        id: String,
    },
    StartCount {
        count: usize,
        starts: Vec<String>,
    },
    DanglingSuccessor {
        from: String,
        to: String,
    },
    BrokenLink {
        from: String,
        to: String,
        follows: Option<String>,
    },
    Disconnected {
        unvisited: Vec<String>,
    },
}

impl ChainError {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::DuplicateId { .. } => "duplicate_process_id",
            Self::StartCount { .. } => "start_count",
            Self::DanglingSuccessor { .. } => "dangling_successor",
            Self::BrokenLink { .. } => "broken_link",
            Self::Disconnected { .. } => "disconnected_processes",
        }
    }

    #[must_use]
    pub fn subject(&self) -> String {
        match self {
            Self::DuplicateId { id } => id.clone(),
            Self::StartCount { starts, .. } => starts.join(", "),
            Self::DanglingSuccessor { from, to } | Self::BrokenLink { from, to, .. } => {
                format!("{from} -> {to}")
            }
            Self::Disconnected { unvisited } => unvisited.join(", "),
        }
    }

    #[must_use]
    pub fn to_violation(&self) -> Violation {
        Violation::error(self.code(), self.to_string()).with_subject(self.subject())
    }
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId { id } => write!(f, "process id `{id}` is declared more than once"),
            Self::StartCount { count, .. } => write!(
                f,
                "graph must have exactly 1 start process (no `follows`); found {count}"
            ),
            Self::DanglingSuccessor { from, to } => {
                write!(f, "`{from}` precedes `{to}`, which is not a process node")
            }
            Self::BrokenLink { from, to, follows } => write!(
                f,
                "broken link: `{from}` precedes `{to}` but `{to}` follows {}",
                follows
                    .as_deref()
                    .map_or_else(|| "nothing".to_string(), |id| format!("`{id}`"))
            ),
            Self::Disconnected { unvisited } => write!(
                f,
                "processes not reachable from the start: {}",
                unvisited.join(", ")
            ),
        }
    }
}

impl std::error::Error for ChainError {}

/// Walks `precedes` from the unique start, checking every hop is mirrored by
/// the target's `follows`, and requires the walk to cover every node.
/// Returns the nodes in visitation order.
pub fn validate_chain(nodes: &[ProcessNode]) -> Result<Vec<ProcessNode>, ChainError> {
    let mut by_id = BTreeMap::<&str, &ProcessNode>::new();
    for node in nodes {
        if by_id.insert(node.id.as_str(), node).is_some() {
            return Err(ChainError::DuplicateId {
                id: node.id.clone(),
            });
        }
    }

    let starts = nodes
        .iter()
        .filter(|node| node.follows.is_none())
        .map(|node| node.id.clone())
        .collect::<Vec<_>>();
    if starts.len() != 1 {
        return Err(ChainError::StartCount {
            count: starts.len(),
            starts,
        });
    }

    let mut visited = Vec::with_capacity(nodes.len());
    let mut seen = BTreeSet::<&str>::new();
    let mut current = by_id[starts[0].as_str()];
    loop {
        seen.insert(current.id.as_str());
        visited.push(current.clone());
        let Some(next_id) = current.precedes.as_deref() else {
            break;
        };
        let Some(next) = by_id.get(next_id).copied() else {
            return Err(ChainError::DanglingSuccessor {
                from: current.id.clone(),
                to: next_id.to_string(),
            });
        };
        // Ids are unique, so a mirrored link can only be followed once and
        // the walk cannot revisit a node.
        if next.follows.as_deref() != Some(current.id.as_str()) {
            return Err(ChainError::BrokenLink {
                from: current.id.clone(),
                to: next.id.clone(),
                follows: next.follows.clone(),
            });
        }
        current = next;
    }

    let unvisited = nodes
        .iter()
        .filter(|node| !seen.contains(node.id.as_str()))
        .map(|node| node.id.clone())
        .collect::<Vec<_>>();
    if !unvisited.is_empty() {
        return Err(ChainError::Disconnected { unvisited });
    }
    Ok(visited)
}
