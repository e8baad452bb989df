//! Output types for frontend consumption.
//!
//! These structs are serialized to JSON and sent to the canvas renderer,
//! which draws them as-is.

use std::f64::consts::PI;

use serde::Serialize;

use crate::codec::GraphFormat;
use crate::graph::{Edge, Graph, GraphError, Node, Point};

/// Length of each arrow-head arm.
pub const ARROW_HEAD_LEN: f64 = 10.0;

/// A node ready to draw as a filled circle with its label.
#[derive(Debug, Clone, Serialize)]
pub struct NodeOutput {
    pub label: String,
    pub color: String,
    pub radius: f64,
    pub position: Point,
    /// Where the label text starts so it sits roughly centered
    pub label_anchor: Point,
}

impl NodeOutput {
    pub fn from_node(node: &Node) -> Self {
        let p = node.position;
        let len = node.label().chars().count();
        let dx = if len > 1 { len as f64 * 5.0 } else { 7.0 };
        Self {
            label: node.label().to_string(),
            color: node.color().to_string(),
            radius: node.radius(),
            position: p,
            label_anchor: Point::new(p.x - dx, p.y + 7.0),
        }
    }
}

/// A directed edge clipped to the node circles, plus its arrow head.
#[derive(Debug, Clone, Serialize)]
pub struct EdgeOutput {
    pub source: String,
    pub target: String,
    pub start: Point,
    pub end: Point,
    /// The two outer corners of the arrow head; the tip is `end`
    pub head: [Point; 2],
}

impl EdgeOutput {
    pub fn between(edge: &Edge, source: &Node, target: &Node) -> Self {
        let (s, t) = (source.position, target.position);
        let angle = (t.y - s.y).atan2(t.x - s.x);
        let (cos, sin) = (angle.cos(), angle.sin());

        let start = Point::new(s.x + source.radius() * cos, s.y + source.radius() * sin);
        let end = Point::new(t.x - target.radius() * cos, t.y - target.radius() * sin);
        let arm = |a: f64| Point::new(end.x - ARROW_HEAD_LEN * a.cos(), end.y - ARROW_HEAD_LEN * a.sin());

        Self {
            source: edge.source.clone(),
            target: edge.target.clone(),
            start,
            end,
            head: [arm(angle - PI / 6.0), arm(angle + PI / 6.0)],
        }
    }
}

/// Everything the renderer needs for one frame.
/// Edges are drawn first, then nodes on top.
#[derive(Debug, Clone, Serialize)]
pub struct SceneOutput {
    pub width: f64,
    pub height: f64,
    pub edges: Vec<EdgeOutput>,
    pub nodes: Vec<NodeOutput>,
}

impl SceneOutput {
    pub fn from_graph(graph: &Graph, width: f64, height: f64) -> Self {
        let edges = graph
            .edges()
            .filter_map(|e| {
                let source = graph.node(&e.source)?;
                let target = graph.node(&e.target)?;
                Some(EdgeOutput::between(e, source, target))
            })
            .collect();
        let nodes = graph.nodes().map(NodeOutput::from_node).collect();
        Self { width, height, edges, nodes }
    }
}

/// Hover card for the node under the pointer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeCard {
    pub label: String,
    pub color: String,
    pub in_degree: usize,
    pub out_degree: usize,
    pub degree: usize,
    /// Out-neighbor labels, in edge order
    pub neighbors: Vec<String>,
}

impl NodeCard {
    pub fn for_node(graph: &Graph, node: &Node) -> Self {
        let label = node.label();
        Self {
            label: label.to_string(),
            color: node.color().to_string(),
            in_degree: graph.in_degree(label),
            out_degree: graph.out_degree(label),
            degree: graph.degree(label),
            neighbors: graph
                .neighbors(label)
                .into_iter()
                .map(|n| n.label().to_string())
                .collect(),
        }
    }

    /// Text lines as shown on the card.
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Indegree: {}", self.in_degree),
            format!("Outdegree: {}", self.out_degree),
            format!("Degree: {}", self.degree),
            format!("Color: {}", self.color),
            format!("Neighbors: {}", self.neighbors.join(", ")),
        ]
    }
}

/// Error information for the frontend
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    /// Message meant for the user
    pub message: String,
    /// Technical detail
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl From<&GraphError> for ErrorInfo {
    fn from(e: &GraphError) -> Self {
        Self {
            message: e.user_message(),
            detail: e.to_string(),
            line: e.line(),
        }
    }
}

/// Result of one editor command
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutput {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl CommandOutput {
    pub fn from_result<T>(result: &Result<T, GraphError>) -> Self {
        match result {
            Ok(_) => Self { ok: true, error: None },
            Err(e) => Self {
                ok: false,
                error: Some(e.into()),
            },
        }
    }
}

/// Result of a save: file contents plus what the download needs
#[derive(Debug, Clone, Serialize)]
pub struct SaveOutput {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl SaveOutput {
    pub fn from_result(result: &Result<(GraphFormat, String), GraphError>) -> Self {
        match result {
            Ok((format, contents)) => Self {
                ok: true,
                contents: Some(contents.clone()),
                file_name: Some(format.default_file_name().to_string()),
                mime_type: Some(format.mime_type().to_string()),
                error: None,
            },
            Err(e) => Self {
                ok: false,
                contents: None,
                file_name: None,
                mime_type: None,
                error: Some(e.into()),
            },
        }
    }
}
