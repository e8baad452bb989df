//
// Compile step: DotFile (parsed statements) -> Graph
//
// What this does:
// - Registers every node statement first, in file order
// - Drops repeated node labels silently (first declaration wins)
// - Resolves edge statements against the registered nodes afterwards, so
//   edges may appear before the nodes they mention
// - Rejects edges naming an undeclared label instead of inventing nodes
// - Drops repeated edges silently
//
// The result is a fresh Graph; callers swap it in only on success.

use log::{debug, error};

use crate::graph::{Edge, Graph, GraphError, Node};
use crate::parser::{DotFile, EdgeStmt, Stmt};

pub fn compile(file: &DotFile) -> Result<Graph, GraphError> {
    let mut ctx = CompileCtx::new();

    for stmt in &file.items {
        match stmt {
            Stmt::Node(n) => ctx.add_node(&n.label, n.color_or_default())?,
            Stmt::Edge(e) => ctx.collect_edge(e),
        }
    }

    // Resolve edges after all nodes exist
    ctx.resolve_edges()?;

    Ok(ctx.finish())
}

struct CompileCtx<'a> {
    graph: Graph,
    pending_edges: Vec<&'a EdgeStmt>,
}

impl<'a> CompileCtx<'a> {
    fn new() -> Self {
        Self {
            graph: Graph::new(),
            pending_edges: Vec::new(),
        }
    }

    fn finish(self) -> Graph {
        self.graph
    }

    fn add_node(&mut self, label: &str, color: &str) -> Result<(), GraphError> {
        let node = Node::new(label, color)?;
        self.graph.add_node(node);
        Ok(())
    }

    fn collect_edge(&mut self, e: &'a EdgeStmt) {
        self.pending_edges.push(e);
    }

    fn resolve_edges(&mut self) -> Result<(), GraphError> {
        for pe in self.pending_edges.drain(..) {
            let edge = Edge::from_labels(pe.source.as_str(), pe.target.as_str());
            match self.graph.add_edge(edge) {
                Ok(true) => {}
                Ok(false) => debug!("dropping repeated edge {} -> {}", pe.source, pe.target),
                Err(e) => {
                    let line = pe.span.map(|s| s.start_line).unwrap_or(1);
                    error!("line {}: {}", line, e);
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}
