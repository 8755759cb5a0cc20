//! Drawing state that can be saved and restored.

use crate::style::{LineCap, LineJoin};

/// Drawing state that can be saved and restored.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingState {
    /// Current fill color.
    pub fill_style: tiny_skia::Color,
    /// Current stroke color.
    pub stroke_style: tiny_skia::Color,
    /// Current line width.
    pub line_width: f32,
    /// Current line cap style.
    pub line_cap: LineCap,
    /// Current line join style.
    pub line_join: LineJoin,
    /// Current miter limit.
    pub miter_limit: f32,
    /// Current line dash pattern.
    pub line_dash: Vec<f32>,
    /// Current line dash offset.
    pub line_dash_offset: f32,
    /// Current global alpha.
    pub global_alpha: f32,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            fill_style: tiny_skia::Color::BLACK,
            stroke_style: tiny_skia::Color::BLACK,
            line_width: 1.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            miter_limit: 10.0,
            line_dash: Vec::new(),
            line_dash_offset: 0.0,
            global_alpha: 1.0,
        }
    }
}

impl DrawingState {
    /// Build the tiny-skia stroke description for the current line state.
    pub(crate) fn stroke(&self) -> tiny_skia::Stroke {
        tiny_skia::Stroke {
            width: self.line_width,
            line_cap: self.line_cap.into(),
            line_join: self.line_join.into(),
            miter_limit: self.miter_limit,
            dash: if self.line_dash.is_empty() {
                None
            } else {
                tiny_skia::StrokeDash::new(self.line_dash.clone(), self.line_dash_offset)
            },
        }
    }
}
