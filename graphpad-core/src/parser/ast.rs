// DOT-subset parser.
//
// Line based, one statement per line:
// - label [color="#ff0000"]     node with a color
// - label                       bare node (color "black")
// - source -> target            directed edge
//
// Also accepted, so exported files load back:
// - `digraph NAME {` header, a lone `{` and the closing `}`
// - a trailing `;` on any statement
// - blank lines
//
// Notes / limitations (intentional):
// - classification is by substring: `->` first, then `[`, else bare label
// - attribute values may be double-quoted; `,` and `]` inside quotes are kept
// - no escaping; labels cannot contain `->`, `[`, `]`, values cannot contain `"`
// - no comments, no edge chains (A -> B -> C), no attributes on edges

use std::fmt;

use log::warn;

use crate::parser::types::*;

#[derive(Debug, Clone)]
pub struct ParseError {
    pub line: usize, // 1-based
    pub col: usize,  // 1-based best-effort
    pub msg: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error at {}:{}: {}", self.line, self.col, self.msg)
    }
}
impl std::error::Error for ParseError {}

pub fn parse_file(input: &str) -> Result<DotFile, ParseError> {
    let mut p = Parser::new(input);
    p.parse_all()
}

struct Parser<'a> {
    lines: Vec<&'a str>,
    i: usize,
    name: Option<String>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        let lines = input
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .collect::<Vec<_>>();
        Self { lines, i: 0, name: None }
    }

    fn eof(&self) -> bool {
        self.i >= self.lines.len()
    }

    fn line_no(&self) -> usize {
        self.i + 1
    }

    fn advance(&mut self) {
        self.i += 1;
    }

    fn err<T>(&self, col: usize, msg: impl Into<String>) -> Result<T, ParseError> {
        Err(ParseError {
            line: self.line_no(),
            col: col.max(1),
            msg: msg.into(),
        })
    }

    /// Column (1-based) of `needle` in the current raw line.
    fn col_of(&self, needle: &str) -> usize {
        self.lines[self.i].find(needle).map(|c| c + 1).unwrap_or(1)
    }

    fn parse_all(&mut self) -> Result<DotFile, ParseError> {
        let mut items = Vec::new();
        while !self.eof() {
            if let Some(stmt) = self.parse_stmt_or_none()? {
                items.push(stmt);
            }
            self.advance();
        }
        Ok(DotFile {
            name: self.name.take(),
            items,
        })
    }

    fn parse_stmt_or_none(&mut self) -> Result<Option<Stmt>, ParseError> {
        let t = self.lines[self.i].trim();

        if t.is_empty() || t == "{" || t == "}" {
            return Ok(None);
        }

        if let Some(name) = parse_header(t) {
            if !name.is_empty() {
                self.name = Some(name.to_string());
            }
            return Ok(None);
        }

        let t = t.strip_suffix(';').unwrap_or(t).trim_end();
        if t.is_empty() {
            return Ok(None);
        }

        let span = Some(Span::line(self.line_no()));

        if t.contains(ARROW) {
            let (source, target) = self.parse_edge(t)?;
            return Ok(Some(Stmt::Edge(EdgeStmt { source, target, span })));
        }

        if t.contains('[') {
            let (label, color) = self.parse_node_with_attrs(t)?;
            return Ok(Some(Stmt::Node(NodeStmt { label, color, span })));
        }

        if t.contains(']') {
            return self.err(self.col_of("]"), "unexpected ']' without '['");
        }

        Ok(Some(Stmt::Node(NodeStmt {
            label: t.to_string(),
            color: None,
            span,
        })))
    }

    fn parse_edge(&self, t: &str) -> Result<(String, String), ParseError> {
        let col = self.col_of(ARROW);
        let Some((source, rest)) = t.split_once(ARROW) else {
            return self.err(col, "expected '->'");
        };
        if rest.contains(ARROW) {
            return self.err(col, "edge chains are not supported; use one edge per line");
        }
        let (source, target) = (source.trim(), rest.trim());
        if source.is_empty() {
            return self.err(col, "missing edge source before '->'");
        }
        if target.is_empty() {
            return self.err(col, "missing edge target after '->'");
        }
        if target.contains('[') {
            return self.err(self.col_of("["), "attributes on edges are not supported");
        }
        Ok((source.to_string(), target.to_string()))
    }

    fn parse_node_with_attrs(&self, t: &str) -> Result<(String, Option<String>), ParseError> {
        let open = self.col_of("[");
        let Some((label, rest)) = t.split_once('[') else {
            return self.err(open, "expected '['");
        };
        let label = label.trim();
        if label.is_empty() {
            return self.err(open, "missing node label before '['");
        }
        let (attrs, close) = split_attr_list(rest).map_err(|msg| ParseError {
            line: self.line_no(),
            col: open,
            msg,
        })?;
        if !rest[close + 1..].trim().is_empty() {
            return self.err(open + close + 2, "unexpected tokens after ']'");
        }

        let mut color = None;
        for attr in attrs.into_iter().map(str::trim).filter(|a| !a.is_empty()) {
            let Some((key, value)) = attr.split_once('=') else {
                return self.err(open, format!("expected key=value in attribute list, got '{}'", attr));
            };
            let value = unquote(value.trim()).map_err(|msg| ParseError {
                line: self.line_no(),
                col: open,
                msg,
            })?;
            match key.trim() {
                "color" => color = Some(value.to_string()),
                other => warn!("line {}: ignoring unsupported attribute '{}'", self.line_no(), other),
            }
        }

        Ok((label.to_string(), color))
    }
}

// ---------- helpers ----------

/// `digraph NAME {` => Some("NAME"), `digraph {` => Some("")
fn parse_header(t: &str) -> Option<&str> {
    let rest = t.strip_prefix("digraph")?;
    if !(rest.is_empty() || rest.starts_with(' ') || rest.starts_with('{')) {
        return None;
    }
    let name = rest.trim().strip_suffix('{')?;
    Some(name.trim())
}

/// Split the text after `[` into its comma-separated attributes.
/// Commas and `]` inside double quotes belong to the value.
/// Returns the attributes and the byte offset of the closing `]`.
fn split_attr_list(rest: &str) -> Result<(Vec<&str>, usize), String> {
    let mut attrs = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    for (i, c) in rest.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                attrs.push(&rest[start..i]);
                start = i + 1;
            }
            ']' if !in_quotes => {
                attrs.push(&rest[start..i]);
                return Ok((attrs, i));
            }
            _ => {}
        }
    }
    if in_quotes {
        Err("unterminated string literal".into())
    } else {
        Err("unterminated attribute list; missing ']'".into())
    }
}

fn unquote(value: &str) -> Result<&str, String> {
    match (value.starts_with('"'), value.len() >= 2 && value.ends_with('"')) {
        (true, true) => Ok(&value[1..value.len() - 1]),
        (true, false) => Err("unterminated string literal".into()),
        _ => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(f: &DotFile) -> Vec<(&str, Option<&str>)> {
        f.items
            .iter()
            .filter_map(|s| match s {
                Stmt::Node(n) => Some((n.label.as_str(), n.color.as_deref())),
                _ => None,
            })
            .collect()
    }

    fn edges(f: &DotFile) -> Vec<(&str, &str)> {
        f.items
            .iter()
            .filter_map(|s| match s {
                Stmt::Edge(e) => Some((e.source.as_str(), e.target.as_str())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_parse_three_shapes() {
        let f = parse_file("A [color=\"red\"]\nB\nA -> B\n").unwrap();
        assert_eq!(nodes(&f), vec![("A", Some("red")), ("B", None)]);
        assert_eq!(edges(&f), vec![("A", "B")]);
    }

    #[test]
    fn test_parse_exported_wrapper() {
        let input = "digraph G {\n    A [color=\"#ff0000\"];\n    B [color=\"blue\"];\n    A -> B;\n}\n";
        let f = parse_file(input).unwrap();
        assert_eq!(f.name.as_deref(), Some("G"));
        assert_eq!(nodes(&f), vec![("A", Some("#ff0000")), ("B", Some("blue"))]);
        assert_eq!(edges(&f), vec![("A", "B")]);
    }

    #[test]
    fn test_parse_crlf_and_compact_edges() {
        let f = parse_file("A\r\nB\r\nA->B\r\n").unwrap();
        assert_eq!(nodes(&f), vec![("A", None), ("B", None)]);
        assert_eq!(edges(&f), vec![("A", "B")]);
    }

    #[test]
    fn test_unquoted_color_and_extra_attrs() {
        let f = parse_file("A [shape=box, color = green]").unwrap();
        assert_eq!(nodes(&f), vec![("A", Some("green"))]);
    }

    #[test]
    fn test_quoted_color_keeps_commas_and_brackets() {
        let f = parse_file("A [color=\"rgb(255, 0, 0)\"];\nB [shape=box, color=\"x]y\"]").unwrap();
        assert_eq!(nodes(&f), vec![("A", Some("rgb(255, 0, 0)")), ("B", Some("x]y"))]);
    }

    #[test]
    fn test_error_tokens_after_attr_list() {
        let err = parse_file("A [color=\"red\"] extra").unwrap_err();
        assert_eq!(err.col, 16);
        assert!(err.msg.contains("after ']'"));
    }

    #[test]
    fn test_split_attr_list() {
        assert_eq!(split_attr_list("a=1, b=\"2,3\"] x"), Ok((vec!["a=1", " b=\"2,3\""], 12)));
        assert_eq!(split_attr_list("]"), Ok((vec![""], 0)));
        assert!(split_attr_list("a=\"1]").unwrap_err().contains("unterminated string"));
        assert!(split_attr_list("a=1").unwrap_err().contains("missing ']'"));
    }

    #[test]
    fn test_attr_list_without_color() {
        let f = parse_file("A []").unwrap();
        assert_eq!(nodes(&f), vec![("A", None)]);
    }

    #[test]
    fn test_spans_are_line_numbers() {
        let f = parse_file("\nA\n\nA -> A").unwrap();
        let lines: Vec<usize> = f
            .items
            .iter()
            .map(|s| match s {
                Stmt::Node(n) => n.span.unwrap().start_line,
                Stmt::Edge(e) => e.span.unwrap().start_line,
            })
            .collect();
        assert_eq!(lines, vec![2, 4]);
    }

    #[test]
    fn test_error_missing_close_bracket() {
        let err = parse_file("A\nB [color=\"red\"\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.msg.contains("missing ']'"));
    }

    #[test]
    fn test_error_edge_without_target() {
        let err = parse_file("A ->").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.col, 3);
    }

    #[test]
    fn test_error_edge_chain() {
        assert!(parse_file("A -> B -> C").is_err());
    }

    #[test]
    fn test_error_attribute_without_value() {
        let err = parse_file("A [color]").unwrap_err();
        assert!(err.msg.contains("key=value"));
    }

    #[test]
    fn test_error_unterminated_quote() {
        assert!(parse_file("A [color=\"red]").is_err());
    }

    #[test]
    fn test_error_stray_close_bracket() {
        let err = parse_file("A]").unwrap_err();
        assert_eq!(err.col, 2);
    }

    #[test]
    fn test_header_variants() {
        assert_eq!(parse_header("digraph G {"), Some("G"));
        assert_eq!(parse_header("digraph {"), Some(""));
        assert_eq!(parse_header("digraph G"), None);
        assert_eq!(parse_header("digraphs {"), None);
    }
}
