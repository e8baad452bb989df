// Initial placement for nodes that have no position yet.
//
// - Nodes at the unset sentinel (0, 0) go on a circle around the viewport center
// - Each node gets its own uniformly random angle
// - Anything already placed (including dragged nodes) is left alone
//
// Runs on every redraw, so a node is placed once unless it is reset to (0, 0).

use std::f64::consts::TAU;

use log::debug;
use rand::Rng;
use serde::Serialize;

use crate::graph::{Node, Point};

/// Distance kept between the layout circle and the nearest viewport edge.
pub const LAYOUT_MARGIN: f64 = 100.0;

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Radius of the placement circle. Never negative, even for tiny viewports.
    pub fn layout_radius(&self) -> f64 {
        (self.width.min(self.height) / 2.0 - LAYOUT_MARGIN).max(0.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Point on the layout circle at `angle` radians.
pub fn circle_point(viewport: &Viewport, angle: f64) -> Point {
    let c = viewport.center();
    let r = viewport.layout_radius();
    Point::new(c.x + r * angle.cos(), c.y + r * angle.sin())
}

/// Place every unplaced node on the layout circle. Returns the number placed.
pub fn place_on_circle<'a, R: Rng + ?Sized>(
    nodes: impl Iterator<Item = &'a mut Node>,
    viewport: &Viewport,
    rng: &mut R,
) -> usize {
    let mut placed = 0;
    for node in nodes {
        if !node.position.is_unset() {
            continue;
        }
        let angle = rng.gen_range(0.0..TAU);
        node.position = circle_point(viewport, angle);
        debug!("placed {} at ({:.1}, {:.1})", node.label(), node.position.x, node.position.y);
        placed += 1;
    }
    placed
}
