mod ast;
pub mod compile;
mod codegen;
mod types;

pub use ast::{ParseError, parse_file};
pub use compile::compile;
pub use codegen::emit_file;
pub use types::*;

use crate::graph::{Graph, GraphError};

impl From<ParseError> for GraphError {
    fn from(e: ParseError) -> Self {
        GraphError::MalformedFile {
            line: e.line,
            col: e.col,
            msg: e.msg,
        }
    }
}

/// Parse and compile DOT-subset text into a new graph.
pub fn import(input: &str) -> Result<Graph, GraphError> {
    let file = parse_file(input)?;
    compile(&file)
}
