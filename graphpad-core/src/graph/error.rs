use std::fmt;

use serde::Serialize;

/// Everything that can reject a graph mutation or an import.
///
/// None of these are fatal: the operation that produced one was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GraphError {
    /// Empty or whitespace-only node label.
    InvalidLabel,
    DuplicateNode { label: String },
    DuplicateEdge { source: String, target: String },
    /// An edge names a label that is not a node of the graph.
    UnresolvedEndpoint {
        source: String,
        target: String,
        missing: String,
    },
    NodeNotFound { label: String },
    EdgeNotFound { source: String, target: String },
    /// Import input could not be parsed. `line`/`col` are 1-based.
    MalformedFile { line: usize, col: usize, msg: String },
}

impl GraphError {
    /// Message shown to the user of the interactive editor.
    pub fn user_message(&self) -> String {
        match self {
            GraphError::InvalidLabel => "Label must not be empty!".to_string(),
            GraphError::DuplicateNode { .. } => "Node with same label already exists!".to_string(),
            GraphError::DuplicateEdge { .. } => "Edge already exists!".to_string(),
            GraphError::UnresolvedEndpoint { .. } => "One or both nodes do not exist!".to_string(),
            GraphError::NodeNotFound { .. } => "Node with this label does not exist!".to_string(),
            GraphError::EdgeNotFound { .. } => "Edge does not exist!".to_string(),
            GraphError::MalformedFile { .. } => format!("Could not load file: {}", self),
        }
    }

    /// Line number for errors that carry one.
    pub fn line(&self) -> Option<usize> {
        match self {
            GraphError::MalformedFile { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::InvalidLabel => write!(f, "node label must not be empty"),
            GraphError::DuplicateNode { label } => write!(f, "duplicate node label: {}", label),
            GraphError::DuplicateEdge { source, target } => {
                write!(f, "duplicate edge: {} -> {}", source, target)
            }
            GraphError::UnresolvedEndpoint { source, target, missing } => write!(
                f,
                "edge {} -> {} references unknown node: {}",
                source, target, missing
            ),
            GraphError::NodeNotFound { label } => write!(f, "no node labeled {}", label),
            GraphError::EdgeNotFound { source, target } => {
                write!(f, "no edge {} -> {}", source, target)
            }
            GraphError::MalformedFile { line, col, msg } => {
                write!(f, "malformed file at {}:{}: {}", line, col, msg)
            }
        }
    }
}

impl std::error::Error for GraphError {}

impl From<serde_json::Error> for GraphError {
    fn from(e: serde_json::Error) -> Self {
        GraphError::MalformedFile {
            line: e.line().max(1),
            col: e.column().max(1),
            msg: e.to_string(),
        }
    }
}
