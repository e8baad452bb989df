//! Emit a graph as DOT-subset text.
//!
//! Formatting rules:
//! - `digraph G {` header and closing `}` on their own lines
//! - 4 spaces for indentation
//! - all node lines first, then all edge lines, in insertion order
//! - every statement ends with `;`

use crate::graph::{Edge, Graph, Node};
use crate::parser::types::{ARROW, DEFAULT_GRAPH_NAME};

const INDENT: &str = "    "; // 4 spaces

/// Emit the whole graph
pub fn emit_file(graph: &Graph) -> String {
    let mut out = String::new();
    out.push_str(&format!("digraph {} {{\n", DEFAULT_GRAPH_NAME));
    for node in graph.nodes() {
        emit_node(node, &mut out);
    }
    for edge in graph.edges() {
        emit_edge(edge, &mut out);
    }
    out.push_str("}\n");
    out
}

fn emit_node(node: &Node, out: &mut String) {
    out.push_str(&format!(
        "{}{} [color=\"{}\"];\n",
        INDENT,
        node.label(),
        node.color()
    ));
}

fn emit_edge(edge: &Edge, out: &mut String) {
    out.push_str(&format!("{}{} {} {};\n", INDENT, edge.source, ARROW, edge.target));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{compile, parse_file};

    fn sample() -> Graph {
        let mut g = Graph::new();
        g.add_node(Node::new("A", "red").unwrap());
        g.add_node(Node::new("B", "blue").unwrap());
        g.add_edge(Edge::from_labels("A", "B")).unwrap();
        g
    }

    #[test]
    fn test_emit_layout() {
        let out = emit_file(&sample());
        assert_eq!(
            out,
            "digraph G {\n    A [color=\"red\"];\n    B [color=\"blue\"];\n    A -> B;\n}\n"
        );
    }

    #[test]
    fn test_emit_empty_graph() {
        assert_eq!(emit_file(&Graph::new()), "digraph G {\n}\n");
    }

    #[test]
    fn test_roundtrip_colors_with_commas_and_brackets() {
        let mut g = Graph::new();
        g.add_node(Node::new("A", "rgb(255, 0, 0)").unwrap());
        g.add_node(Node::new("B", "hsl(120, 100%, 50%)]").unwrap());
        g.add_node(Node::new("C", "[x]").unwrap());
        g.add_edge(Edge::from_labels("A", "B")).unwrap();

        let text = emit_file(&g);
        assert!(text.contains("    A [color=\"rgb(255, 0, 0)\"];\n"));

        let back = compile(&parse_file(&text).unwrap()).unwrap();
        let colors: Vec<(&str, &str)> = back.nodes().map(|n| (n.label(), n.color())).collect();
        assert_eq!(
            colors,
            vec![("A", "rgb(255, 0, 0)"), ("B", "hsl(120, 100%, 50%)]"), ("C", "[x]")]
        );
        assert!(back.contains_edge("A", "B"));
    }

    #[test]
    fn test_roundtrip_two_nodes_one_edge() {
        let text = emit_file(&sample());
        let g = compile(&parse_file(&text).unwrap()).unwrap();

        let nodes: Vec<(&str, &str)> = g.nodes().map(|n| (n.label(), n.color())).collect();
        assert_eq!(nodes, vec![("A", "red"), ("B", "blue")]);
        let edges: Vec<_> = g.edges().map(|e| e.key()).collect();
        assert_eq!(edges, vec![("A".to_string(), "B".to_string())]);
    }

    #[test]
    fn test_roundtrip_hex_colors_and_labels_with_spaces() {
        let mut g = Graph::new();
        g.add_node(Node::new("New York", "#ff0000").unwrap());
        g.add_node(Node::new("Boston", "#00ff00").unwrap());
        g.add_edge(Edge::from_labels("New York", "Boston")).unwrap();
        g.add_edge(Edge::from_labels("Boston", "Boston")).unwrap();

        let back = compile(&parse_file(&emit_file(&g)).unwrap()).unwrap();
        assert_eq!(back.node("New York").unwrap().color(), "#ff0000");
        assert!(back.contains_edge("New York", "Boston"));
        assert!(back.contains_edge("Boston", "Boston"));
        assert_eq!(back.edge_count(), 2);
    }
}
