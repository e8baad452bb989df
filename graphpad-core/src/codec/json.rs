//! JSON export/import.
//!
//! Nodes carry only label and color, edges refer to nodes by label:
//!
//! ```json
//! { "nodes": [{ "label": "A", "color": "#ff0000" }],
//!   "edges": [{ "source": "A", "target": "A" }] }
//! ```

use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::graph::{Edge, Graph, GraphError, Node};
use crate::parser::DEFAULT_COLOR;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub label: String,
    #[serde(default = "default_color")]
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl GraphDocument {
    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            nodes: graph
                .nodes()
                .map(|n| NodeRecord {
                    label: n.label().to_string(),
                    color: n.color().to_string(),
                })
                .collect(),
            edges: graph
                .edges()
                .map(|e| EdgeRecord {
                    source: e.source.clone(),
                    target: e.target.clone(),
                })
                .collect(),
        }
    }

    /// Build a graph: all nodes first, then edges resolved against them.
    pub fn into_graph(self) -> Result<Graph, GraphError> {
        let mut graph = Graph::new();
        for record in self.nodes {
            let node = Node::new(&record.label, record.color)?;
            graph.add_node(node);
        }
        for (i, record) in self.edges.into_iter().enumerate() {
            // Labels were trimmed when the nodes were created
            let edge = Edge::from_labels(record.source.trim(), record.target.trim());
            match graph.add_edge(edge) {
                Ok(true) => {}
                Ok(false) => debug!("dropping repeated edge at index {}", i),
                Err(e) => {
                    error!("edges[{}]: {}", i, e);
                    return Err(e);
                }
            }
        }
        Ok(graph)
    }
}

pub fn export(graph: &Graph) -> String {
    // Plain strings and vectors; serialization cannot fail
    serde_json::to_string(&GraphDocument::from_graph(graph)).unwrap_or_else(|_| "{}".to_string())
}

pub fn import(input: &str) -> Result<Graph, GraphError> {
    let doc: GraphDocument = serde_json::from_str(input)?;
    doc.into_graph()
}
