use serde::Serialize;

/// Color given to nodes declared without a `color` attribute.
pub const DEFAULT_COLOR: &str = "black";

/// Graph name used on export.
pub const DEFAULT_GRAPH_NAME: &str = "G";

/// Edge operator
pub const ARROW: &str = "->";

/// Source location span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start_line: usize,
    pub end_line: usize,
}

impl Span {
    pub fn line(line: usize) -> Self {
        Self { start_line: line, end_line: line }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DotFile {
    /// Name from the `digraph NAME {` header, if there was one
    pub name: Option<String>,
    pub items: Vec<Stmt>,
}

#[derive(Debug, Clone, Serialize)]
pub enum Stmt {
    Node(NodeStmt),
    Edge(EdgeStmt),
}

/// `label [color="..."]` or a bare `label`
#[derive(Debug, Clone, Serialize)]
pub struct NodeStmt {
    pub label: String,
    /// None => bare label or attribute list without a color
    pub color: Option<String>,
    pub span: Option<Span>,
}

impl NodeStmt {
    pub fn color_or_default(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_COLOR)
    }
}

/// `source -> target`
#[derive(Debug, Clone, Serialize)]
pub struct EdgeStmt {
    pub source: String,
    pub target: String,
    pub span: Option<Span>,
}
