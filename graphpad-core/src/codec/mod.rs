//! Whole-graph export/import in the two supported file formats.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::graph::{Graph, GraphError};
use crate::parser;

pub mod json;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphFormat {
    Json,
    Dot,
}

impl GraphFormat {
    /// File name offered when saving.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            GraphFormat::Json => "graph.json",
            GraphFormat::Dot => "graph.gv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            GraphFormat::Json => "application/json",
            GraphFormat::Dot => "text/plain",
        }
    }

    /// Guess the format from a file name or bare extension.
    pub fn from_extension(name: &str) -> Option<Self> {
        let ext = name.rsplit('.').next().unwrap_or(name).to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(GraphFormat::Json),
            "gv" | "dot" => Some(GraphFormat::Dot),
            _ => None,
        }
    }
}

impl FromStr for GraphFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(GraphFormat::Json),
            "dot" | "gv" | "graphviz" => Ok(GraphFormat::Dot),
            other => Err(format!("unknown graph format: {}", other)),
        }
    }
}

impl fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphFormat::Json => write!(f, "json"),
            GraphFormat::Dot => write!(f, "dot"),
        }
    }
}

pub fn export(graph: &Graph, format: GraphFormat) -> String {
    match format {
        GraphFormat::Json => json::export(graph),
        GraphFormat::Dot => parser::emit_file(graph),
    }
}

/// Parse `input` into a brand new graph. Nothing is shared with any existing graph.
pub fn import(input: &str, format: GraphFormat) -> Result<Graph, GraphError> {
    match format {
        GraphFormat::Json => json::import(input),
        GraphFormat::Dot => parser::import(input),
    }
}
