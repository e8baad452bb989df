//! Core of an interactive directed-graph editor.
//!
//! The graph model, its JSON and DOT-subset codecs, node placement and the
//! editing session live here; the page only draws what it is given and
//! forwards pointer and form events through the bindings in `wasm`.

pub mod codec;
pub mod editor;
pub mod graph;
pub mod layout;
pub mod output;
pub mod parser;
mod wasm;

pub use codec::GraphFormat;
pub use editor::Editor;
pub use graph::{Edge, Graph, GraphError, Node, Point};
pub use layout::Viewport;
pub use wasm::{GraphEditor, init_logging};
