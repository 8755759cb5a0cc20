//! Path building operations for RasterSurface.

use super::RasterSurface;
use crate::geometry::{CircleParams, RectParams};

impl RasterSurface {
    /// Begin a new path.
    pub fn begin_path(&mut self) {
        log::debug!(target: "canvas", "beginPath");
        self.path_builder = tiny_skia::PathBuilder::new();
        self.has_current_point = false;
    }

    /// Move to a point without drawing.
    pub fn move_to(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "moveTo {} {}", x, y);
        self.path_builder.move_to(x, y);
        self.has_current_point = true;
    }

    /// Draw a line to a point.
    ///
    /// Without a current point this behaves like `move_to`.
    pub fn line_to(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "lineTo {} {}", x, y);
        if !self.has_current_point {
            self.move_to(x, y);
            return;
        }
        self.path_builder.line_to(x, y);
    }

    /// Close the current subpath.
    pub fn close_path(&mut self) {
        log::debug!(target: "canvas", "closePath");
        self.path_builder.close();
    }

    /// Add a rectangle to the path.
    pub fn rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "rect {} {} {} {}", params.x, params.y, params.width, params.height);
        let (x0, y0) = (params.x, params.y);
        let (x1, y1) = (params.x + params.width, params.y + params.height);

        self.path_builder.move_to(x0, y0);
        self.path_builder.line_to(x1, y0);
        self.path_builder.line_to(x1, y1);
        self.path_builder.line_to(x0, y1);
        self.path_builder.close();
        self.has_current_point = true;
    }

    /// Add a full circle as a closed subpath.
    ///
    /// Non-finite or non-positive radii add nothing.
    pub fn circle(&mut self, params: &CircleParams) {
        log::debug!(target: "canvas", "circle {} {} r={}", params.x, params.y, params.radius);
        let CircleParams { x, y, radius } = *params;
        if !(x.is_finite() && y.is_finite() && radius.is_finite()) || radius <= 0.0 {
            return;
        }
        self.path_builder.push_circle(x, y, radius);
        self.has_current_point = true;
    }
}
