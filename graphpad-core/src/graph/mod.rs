// Graph model: owns nodes and edges, enforces uniqueness.
//
// - Nodes are keyed by label, edges by the ordered (source, target) label pair
// - Both maps preserve insertion order; serialization and hit-testing rely on it
// - Every edge endpoint is a member of `nodes` at all times
// - Removing a node removes every edge touching it

use indexmap::IndexMap;
use log::debug;
use rand::Rng;

mod error;
mod types;

pub use error::GraphError;
pub use types::{BASE_RADIUS, Edge, Node, Point, RADIUS_PER_CHAR};

use crate::layout::{self, Viewport};

#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: IndexMap<String, Node>,
    edges: IndexMap<(String, String), Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn node(&self, label: &str) -> Option<&Node> {
        self.nodes.get(label)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn contains_node(&self, label: &str) -> bool {
        self.nodes.contains_key(label)
    }

    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        self.edges
            .contains_key(&(source.to_string(), target.to_string()))
    }

    /// Add a node. A node whose label is already taken is ignored.
    /// Returns true if the node was inserted.
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.nodes.contains_key(node.label()) {
            debug!("ignoring duplicate node {}", node.label());
            return false;
        }
        self.nodes.insert(node.label().to_string(), node);
        true
    }

    /// Add an edge. An edge with the same ordered label pair is ignored.
    /// Returns true if the edge was inserted.
    ///
    /// Both endpoints must already be nodes of this graph.
    pub fn add_edge(&mut self, edge: Edge) -> Result<bool, GraphError> {
        for label in [&edge.source, &edge.target] {
            if !self.nodes.contains_key(label.as_str()) {
                return Err(GraphError::UnresolvedEndpoint {
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                    missing: label.clone(),
                });
            }
        }

        let key = edge.key();
        if self.edges.contains_key(&key) {
            debug!("ignoring duplicate edge {} -> {}", edge.source, edge.target);
            return Ok(false);
        }
        self.edges.insert(key, edge);
        Ok(true)
    }

    /// Remove a node and every edge incident to it.
    /// Returns the removed node, or None if no node has this label.
    pub fn remove_node(&mut self, label: &str) -> Option<Node> {
        let node = self.nodes.shift_remove(label)?;
        self.edges.retain(|_, e| !e.touches(label));
        Some(node)
    }

    pub fn remove_edge(&mut self, source: &str, target: &str) -> Option<Edge> {
        self.edges
            .shift_remove(&(source.to_string(), target.to_string()))
    }

    /// Number of edges whose target is `label`.
    pub fn in_degree(&self, label: &str) -> usize {
        self.edges.values().filter(|e| e.target == label).count()
    }

    /// Number of edges whose source is `label`.
    pub fn out_degree(&self, label: &str) -> usize {
        self.edges.values().filter(|e| e.source == label).count()
    }

    pub fn degree(&self, label: &str) -> usize {
        self.in_degree(label) + self.out_degree(label)
    }

    /// Out-neighbors of `label`, in edge insertion order.
    /// Nodes that only point *to* `label` are not included.
    pub fn neighbors(&self, label: &str) -> Vec<&Node> {
        self.edges
            .values()
            .filter(|e| e.source == label)
            .filter_map(|e| self.nodes.get(e.target.as_str()))
            .collect()
    }

    /// First node (in insertion order) whose circle contains (x, y).
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&Node> {
        let p = Point::new(x, y);
        self.nodes.values().find(|n| n.contains(p))
    }

    /// Mutable access to a node's position. Label and radius stay frozen.
    pub fn position_mut(&mut self, label: &str) -> Option<&mut Point> {
        self.nodes.get_mut(label).map(|n| &mut n.position)
    }

    /// Move a node. Returns false if there is no such node.
    pub fn set_position(&mut self, label: &str, position: Point) -> bool {
        match self.position_mut(label) {
            Some(p) => {
                *p = position;
                true
            }
            None => false,
        }
    }

    /// Place every node still at the unset sentinel on the viewport's layout circle.
    /// Returns how many nodes were placed.
    pub fn layout_unplaced_nodes<R: Rng + ?Sized>(&mut self, viewport: &Viewport, rng: &mut R) -> usize {
        layout::place_on_circle(self.nodes.values_mut(), viewport, rng)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn node(label: &str) -> Node {
        Node::new(label, "#ffffff").unwrap()
    }

    fn graph_with(labels: &[&str], edges: &[(&str, &str)]) -> Graph {
        let mut g = Graph::new();
        for l in labels {
            g.add_node(node(l));
        }
        for (s, t) in edges {
            g.add_edge(Edge::from_labels(*s, *t)).unwrap();
        }
        g
    }

    fn labels<'a>(nodes: impl Iterator<Item = &'a Node>) -> Vec<&'a str> {
        nodes.map(|n| n.label()).collect()
    }

    #[test]
    fn test_degree_and_neighbors_single_edge() {
        let mut g = Graph::new();
        g.add_node(Node::new("A", "#ff0000").unwrap());
        g.add_node(Node::new("B", "#00ff00").unwrap());
        let (a, b) = (g.node("A").unwrap().clone(), g.node("B").unwrap().clone());
        assert!(g.add_edge(Edge::new(&a, &b)).unwrap());

        assert_eq!(g.degree("A"), 1);
        assert_eq!(g.out_degree("A"), 1);
        assert_eq!(g.in_degree("A"), 0);
        assert_eq!(labels(g.neighbors("A").into_iter()), vec!["B"]);
        assert!(g.neighbors("B").is_empty());
    }

    #[test]
    fn test_duplicate_edge_ignored() {
        let mut g = graph_with(&["A", "B"], &[("A", "B")]);
        assert!(!g.add_edge(Edge::from_labels("A", "B")).unwrap());
        assert_eq!(g.edge_count(), 1);

        // Reverse direction is a different edge
        assert!(g.add_edge(Edge::from_labels("B", "A")).unwrap());
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_duplicate_node_ignored() {
        let mut g = Graph::new();
        assert!(g.add_node(Node::new("A", "red").unwrap()));
        assert!(!g.add_node(Node::new("A", "blue").unwrap()));
        assert!(g.add_node(Node::new("B", "red").unwrap()));
        assert!(!g.add_node(Node::new(" A ", "green").unwrap()));

        assert_eq!(labels(g.nodes()), vec!["A", "B"]);
        // First one wins
        assert_eq!(g.node("A").unwrap().color(), "red");
    }

    #[test]
    fn test_remove_node_cascades() {
        let mut g = graph_with(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        let removed = g.remove_node("B").unwrap();
        assert_eq!(removed.label(), "B");
        assert_eq!(labels(g.nodes()), vec!["A", "C"]);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_remove_node_keeps_unrelated_edges_in_order() {
        let mut g = graph_with(
            &["A", "B", "C", "D"],
            &[("A", "C"), ("B", "D"), ("D", "B"), ("C", "A"), ("A", "D")],
        );
        g.remove_node("B");
        let pairs: Vec<_> = g.edges().map(|e| e.key()).collect();
        assert_eq!(
            pairs,
            vec![
                ("A".to_string(), "C".to_string()),
                ("C".to_string(), "A".to_string()),
                ("A".to_string(), "D".to_string()),
            ]
        );
        assert!(g.edges().all(|e| !e.touches("B")));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut g = graph_with(&["A", "B"], &[("A", "B")]);
        assert!(g.remove_node("Z").is_none());
        assert!(g.remove_edge("B", "A").is_none());
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_remove_edge_exact_pair() {
        let mut g = graph_with(&["A", "B"], &[("A", "B"), ("B", "A")]);
        let e = g.remove_edge("A", "B").unwrap();
        assert_eq!(e.source, "A");
        assert!(!g.contains_edge("A", "B"));
        assert!(g.contains_edge("B", "A"));
    }

    #[test]
    fn test_add_edge_rejects_unknown_endpoint() {
        let mut g = graph_with(&["A"], &[]);
        let err = g.add_edge(Edge::from_labels("A", "Z")).unwrap_err();
        assert_eq!(
            err,
            GraphError::UnresolvedEndpoint {
                source: "A".into(),
                target: "Z".into(),
                missing: "Z".into(),
            }
        );
        assert_eq!(g.edge_count(), 0);

        // A node that was created but never added does not count
        let stray = node("Q");
        let a = g.node("A").unwrap().clone();
        assert!(g.add_edge(Edge::new(&stray, &a)).is_err());
    }

    #[test]
    fn test_self_loop_counts_both_ways() {
        let g = graph_with(&["A"], &[("A", "A")]);
        assert_eq!(g.in_degree("A"), 1);
        assert_eq!(g.out_degree("A"), 1);
        assert_eq!(g.degree("A"), 2);
        assert_eq!(labels(g.neighbors("A").into_iter()), vec!["A"]);
    }

    #[test]
    fn test_degree_sum_holds_for_every_node() {
        let g = graph_with(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("A", "C"), ("B", "C"), ("C", "A"), ("D", "D")],
        );
        for n in g.nodes() {
            let l = n.label();
            assert_eq!(g.degree(l), g.in_degree(l) + g.out_degree(l));
        }
        assert_eq!(g.degree("C"), 3);
        assert_eq!(g.degree("Missing"), 0);
    }

    #[test]
    fn test_neighbors_in_edge_order_out_only() {
        let g = graph_with(
            &["A", "B", "C", "D"],
            &[("A", "D"), ("B", "A"), ("A", "B"), ("C", "A"), ("A", "C")],
        );
        assert_eq!(labels(g.neighbors("A").into_iter()), vec!["D", "B", "C"]);
        assert_eq!(labels(g.neighbors("C").into_iter()), vec!["A"]);
    }

    #[test]
    fn test_hit_test_first_inserted_wins() {
        let mut g = graph_with(&["A", "B"], &[]);
        g.set_position("A", Point::new(100.0, 100.0));
        g.set_position("B", Point::new(110.0, 100.0));

        // Inside both circles, and closer to B
        assert_eq!(g.hit_test(108.0, 100.0).unwrap().label(), "A");
        // Only inside B
        assert_eq!(g.hit_test(128.0, 100.0).unwrap().label(), "B");
        assert!(g.hit_test(500.0, 500.0).is_none());
    }

    #[test]
    fn test_position_mut_moves_node() {
        let mut g = graph_with(&["A"], &[]);
        *g.position_mut("A").unwrap() = Point::new(3.0, 4.0);
        assert_eq!(g.node("A").unwrap().position, Point::new(3.0, 4.0));
        assert!(g.position_mut("Z").is_none());
        assert!(!g.set_position("Z", Point::new(1.0, 1.0)));
    }

    #[test]
    fn test_layout_unplaced_nodes_only_touches_unset() {
        let mut g = graph_with(&["A", "B"], &[]);
        g.set_position("A", Point::new(42.0, 24.0));
        let mut rng = StdRng::seed_from_u64(7);
        let placed = g.layout_unplaced_nodes(&Viewport::new(800.0, 600.0), &mut rng);
        assert_eq!(placed, 1);
        assert_eq!(g.node("A").unwrap().position, Point::new(42.0, 24.0));
        assert!(!g.node("B").unwrap().position.is_unset());
    }

    #[test]
    fn test_clear() {
        let mut g = graph_with(&["A", "B"], &[("A", "B")]);
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
    }
}
