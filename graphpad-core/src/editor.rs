//! Interactive editing session.
//!
//! Owns the single [`Graph`] being edited together with the viewport, the form
//! inputs and the drag state. Every command runs to completion and leaves the
//! graph valid; a rejected command changes nothing except the form inputs,
//! which are reset whatever the outcome.

use log::info;
use rand::Rng;

use crate::codec::{self, GraphFormat};
use crate::graph::{Edge, Graph, GraphError, Node, Point};
use crate::layout::Viewport;
use crate::output::{NodeCard, SceneOutput};

/// Color the node form starts with and returns to after each submit.
pub const DEFAULT_FORM_COLOR: &str = "#ffffff";

#[derive(Debug, Clone, PartialEq)]
pub struct NodeForm {
    pub label: String,
    pub color: String,
}

impl Default for NodeForm {
    fn default() -> Self {
        Self {
            label: String::new(),
            color: DEFAULT_FORM_COLOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeForm {
    pub source: String,
    pub target: String,
}

/// Text inputs of the side menu.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forms {
    pub add_node: NodeForm,
    pub add_edge: EdgeForm,
    pub remove_node: String,
    pub remove_edge: EdgeForm,
}

#[derive(Debug, Clone, Default)]
pub struct Editor {
    graph: Graph,
    viewport: Viewport,
    pub forms: Forms,
    /// Label of the node being dragged
    dragging: Option<String>,
}

impl Editor {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);
    }

    pub fn dragging(&self) -> Option<&str> {
        self.dragging.as_deref()
    }

    /// Add the node described by the add-node form.
    pub fn submit_add_node(&mut self) -> Result<(), GraphError> {
        let form = std::mem::take(&mut self.forms.add_node);
        self.add_node(&form.label, &form.color)
    }

    pub fn add_node(&mut self, label: &str, color: &str) -> Result<(), GraphError> {
        let label = label.trim();
        if self.graph.contains_node(label) {
            return Err(GraphError::DuplicateNode { label: label.to_string() });
        }
        let node = Node::new(label, color)?;
        self.graph.add_node(node);
        Ok(())
    }

    /// Add the edge described by the add-edge form.
    pub fn submit_add_edge(&mut self) -> Result<(), GraphError> {
        let form = std::mem::take(&mut self.forms.add_edge);
        self.add_edge(&form.source, &form.target)
    }

    pub fn add_edge(&mut self, source: &str, target: &str) -> Result<(), GraphError> {
        let (source, target) = (source.trim(), target.trim());
        if self.graph.contains_edge(source, target) {
            return Err(GraphError::DuplicateEdge {
                source: source.to_string(),
                target: target.to_string(),
            });
        }
        self.graph.add_edge(Edge::from_labels(source, target))?;
        Ok(())
    }

    pub fn submit_remove_node(&mut self) -> Result<(), GraphError> {
        let label = std::mem::take(&mut self.forms.remove_node);
        self.remove_node(&label)
    }

    pub fn remove_node(&mut self, label: &str) -> Result<(), GraphError> {
        let label = label.trim();
        if self.dragging.as_deref() == Some(label) {
            self.dragging = None;
        }
        match self.graph.remove_node(label) {
            Some(_) => Ok(()),
            None => Err(GraphError::NodeNotFound { label: label.to_string() }),
        }
    }

    pub fn submit_remove_edge(&mut self) -> Result<(), GraphError> {
        let form = std::mem::take(&mut self.forms.remove_edge);
        self.remove_edge(&form.source, &form.target)
    }

    pub fn remove_edge(&mut self, source: &str, target: &str) -> Result<(), GraphError> {
        let (source, target) = (source.trim(), target.trim());
        match self.graph.remove_edge(source, target) {
            Some(_) => Ok(()),
            None => Err(GraphError::EdgeNotFound {
                source: source.to_string(),
                target: target.to_string(),
            }),
        }
    }

    pub fn clear(&mut self) {
        info!("clearing graph");
        self.graph.clear();
        self.dragging = None;
    }

    /// Card for the node under the pointer, if any.
    pub fn hover(&self, x: f64, y: f64) -> Option<NodeCard> {
        let node = self.graph.hit_test(x, y)?;
        Some(NodeCard::for_node(&self.graph, node))
    }

    /// Start dragging the node under the pointer. Returns its label.
    pub fn begin_drag(&mut self, x: f64, y: f64) -> Option<&str> {
        self.dragging = self.graph.hit_test(x, y).map(|n| n.label().to_string());
        self.dragging.as_deref()
    }

    /// Move the dragged node to (x, y). Returns false when nothing is being dragged.
    pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
        let Some(label) = self.dragging.as_deref() else {
            return false;
        };
        self.graph.set_position(label, Point::new(x, y))
    }

    pub fn end_drag(&mut self) {
        self.dragging = None;
    }

    /// Replace the graph with the contents of `input`.
    /// The current graph stays in place if parsing or validation fails.
    pub fn load(&mut self, input: &str, format: GraphFormat) -> Result<(), GraphError> {
        let graph = codec::import(input, format)?;
        info!(
            "loaded {} graph with {} nodes and {} edges",
            format,
            graph.node_count(),
            graph.edge_count()
        );
        self.graph = graph;
        self.dragging = None;
        Ok(())
    }

    pub fn save(&self, format: GraphFormat) -> String {
        codec::export(&self.graph, format)
    }

    /// Place new nodes and snapshot the frame to draw.
    pub fn redraw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SceneOutput {
        self.graph.layout_unplaced_nodes(&self.viewport, rng);
        SceneOutput::from_graph(&self.graph, self.viewport.width, self.viewport.height)
    }
}
