use serde::Serialize;

use crate::graph::GraphError;

/// Radius of a single-character node.
pub const BASE_RADIUS: f64 = 20.0;

/// Extra radius for every label character past the first.
pub const RADIUS_PER_CHAR: f64 = 5.0;

#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The "not yet placed" sentinel.
    pub const UNSET: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_unset(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// A labeled, colored vertex.
///
/// The label is the node's identity inside a [`Graph`](crate::graph::Graph).
/// The radius is derived from it and cannot be set on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    label: String,
    color: String,
    radius: f64,
    /// Canvas position, freely mutated by dragging.
    pub position: Point,
}

impl Node {
    /// Create a node, trimming the label.
    /// Fails with `InvalidLabel` if nothing is left after trimming.
    pub fn new(label: &str, color: impl Into<String>) -> Result<Self, GraphError> {
        let label = validate_label(label)?;
        Ok(Self {
            radius: radius_for(&label),
            label,
            color: color.into(),
            position: Point::UNSET,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Relabel a node that is not (yet) owned by a graph. Recomputes the radius.
    pub fn set_label(&mut self, label: &str) -> Result<(), GraphError> {
        let label = validate_label(label)?;
        self.radius = radius_for(&label);
        self.label = label;
        Ok(())
    }

    pub fn contains(&self, p: Point) -> bool {
        self.position.distance_to(p) <= self.radius
    }
}

fn validate_label(label: &str) -> Result<String, GraphError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(GraphError::InvalidLabel);
    }
    Ok(trimmed.to_string())
}

fn radius_for(label: &str) -> f64 {
    let len = label.chars().count();
    BASE_RADIUS + len.saturating_sub(1) as f64 * RADIUS_PER_CHAR
}

/// A directed edge, referring to its endpoints by label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: &Node, target: &Node) -> Self {
        Self::from_labels(source.label(), target.label())
    }

    pub fn from_labels(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Ordered (source, target) key used for uniqueness.
    pub fn key(&self) -> (String, String) {
        (self.source.clone(), self.target.clone())
    }

    pub fn touches(&self, label: &str) -> bool {
        self.source == label || self.target == label
    }
}
