//! WASM bindings for the graphpad-core library.
//!
//! The page owns one [`GraphEditor`] and forwards DOM events to it. Commands
//! return JSON strings: `CommandOutput` for mutations, `SceneOutput` for
//! redraws, `NodeCard` (or `null`) for hover.

use log::{Level, error, info};
use serde::Serialize;
use serde_json::to_string;
use wasm_bindgen::prelude::*;

use crate::codec::GraphFormat;
use crate::editor::{EdgeForm, Editor, NodeForm};
use crate::graph::GraphError;
use crate::layout::Viewport;
use crate::output::{CommandOutput, SaveOutput};

/// Route `log` records to the browser console. Safe to call more than once.
#[wasm_bindgen]
pub fn init_logging() {
    if console_log::init_with_level(Level::Debug).is_ok() {
        info!("Logging initialized");
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    to_string(value).unwrap_or_else(|e| {
        error!("Error serializing output: {:?}", e);
        "{\"ok\": false}".to_string()
    })
}

fn command_json(action: &str, result: Result<(), GraphError>) -> String {
    if let Err(e) = &result {
        error!("{} failed: {}", action, e);
    }
    to_json(&CommandOutput::from_result(&result))
}

fn parse_format(format: &str) -> Result<GraphFormat, GraphError> {
    format.parse::<GraphFormat>().map_err(|msg| GraphError::MalformedFile {
        line: 1,
        col: 1,
        msg,
    })
}

fn window_size() -> Option<(f64, f64)> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width, height))
}

#[wasm_bindgen]
pub struct GraphEditor {
    editor: Editor,
}

#[wasm_bindgen]
impl GraphEditor {
    /// Editor sized to the browser window (falls back to 800x600).
    #[wasm_bindgen(constructor)]
    pub fn new() -> GraphEditor {
        let viewport = window_size()
            .map(|(w, h)| Viewport::new(w, h))
            .unwrap_or_default();
        GraphEditor {
            editor: Editor::new(viewport),
        }
    }

    pub fn with_size(width: f64, height: f64) -> GraphEditor {
        GraphEditor {
            editor: Editor::new(Viewport::new(width, height)),
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.editor.resize(width, height);
    }

    /// Add a node from the add-node inputs. The inputs are reset afterwards
    /// whether or not the node was added.
    pub fn add_node(&mut self, label: &str, color: &str) -> String {
        self.editor.forms.add_node = NodeForm {
            label: label.to_string(),
            color: color.to_string(),
        };
        let result = self.editor.submit_add_node();
        command_json("add node", result)
    }

    pub fn add_edge(&mut self, source: &str, target: &str) -> String {
        self.editor.forms.add_edge = EdgeForm {
            source: source.to_string(),
            target: target.to_string(),
        };
        let result = self.editor.submit_add_edge();
        command_json("add edge", result)
    }

    pub fn remove_node(&mut self, label: &str) -> String {
        self.editor.forms.remove_node = label.to_string();
        let result = self.editor.submit_remove_node();
        command_json("remove node", result)
    }

    pub fn remove_edge(&mut self, source: &str, target: &str) -> String {
        self.editor.forms.remove_edge = EdgeForm {
            source: source.to_string(),
            target: target.to_string(),
        };
        let result = self.editor.submit_remove_edge();
        command_json("remove edge", result)
    }

    pub fn clear(&mut self) {
        self.editor.clear();
    }

    /// Color the add-node input goes back to after each command.
    pub fn node_form_color(&self) -> String {
        self.editor.forms.add_node.color.clone()
    }

    /// Place unplaced nodes and return the frame to draw.
    pub fn redraw(&mut self) -> String {
        let scene = self.editor.redraw(&mut rand::thread_rng());
        to_json(&scene)
    }

    /// Node card for the node under the pointer, or `null`.
    pub fn hover(&self, x: f64, y: f64) -> String {
        to_json(&self.editor.hover(x, y))
    }

    /// Returns the grabbed node's label, if any.
    pub fn begin_drag(&mut self, x: f64, y: f64) -> Option<String> {
        self.editor.begin_drag(x, y).map(str::to_string)
    }

    /// Returns true when a node moved and the canvas needs a redraw.
    pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
        self.editor.drag_to(x, y)
    }

    pub fn end_drag(&mut self) {
        self.editor.end_drag();
    }

    /// Serialize the graph; `format` is "json" or "dot".
    /// Returns a `SaveOutput` with the contents, file name and MIME type,
    /// or an error payload for an unknown format.
    pub fn save(&self, format: &str) -> String {
        let result = parse_format(format).map(|f| (f, self.editor.save(f)));
        if let Err(e) = &result {
            error!("save failed: {}", e);
        }
        to_json(&SaveOutput::from_result(&result))
    }

    /// Replace the graph with file contents. On failure the graph is unchanged.
    pub fn load(&mut self, contents: &str, format: &str) -> String {
        let result = parse_format(format).and_then(|f| self.editor.load(contents, f));
        command_json("load", result)
    }

    /// Like `load`, picking the format from the file name.
    pub fn load_file(&mut self, file_name: &str, contents: &str) -> String {
        let result = GraphFormat::from_extension(file_name)
            .ok_or_else(|| GraphError::MalformedFile {
                line: 1,
                col: 1,
                msg: format!("unrecognized file type: {}", file_name),
            })
            .and_then(|f| self.editor.load(contents, f));
        command_json("load", result)
    }
}

impl Default for GraphEditor {
    fn default() -> Self {
        Self::new()
    }
}
