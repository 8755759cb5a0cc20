//! Raster surface and its drawing context.

mod drawing;
mod guard;
mod image_ops;
mod path_ops;

pub use guard::StateGuard;

use crate::drawing_state::DrawingState;
use crate::error::{SurfaceError, SurfaceResult};
use crate::geometry::CanvasColor;
use crate::style::{LineCap, LineJoin};
use tiny_skia::Pixmap;

/// Maximum surface dimension (same as Chrome's canvas limit).
pub const MAX_DIMENSION: u32 = 32767;

/// An owned RGBA raster with Canvas 2D style drawing state.
pub struct RasterSurface {
    /// Width of the surface in pixels.
    pub(crate) width: u32,
    /// Height of the surface in pixels.
    pub(crate) height: u32,
    /// Pixel buffer (premultiplied alpha).
    pub(crate) pixmap: Pixmap,
    /// Current drawing state.
    pub(crate) state: DrawingState,
    /// Stack of saved drawing states.
    state_stack: Vec<DrawingState>,
    /// Current path builder.
    pub(crate) path_builder: tiny_skia::PathBuilder,
    /// Whether the path has a current point.
    pub(crate) has_current_point: bool,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("state", &self.state)
            .finish()
    }
}

impl RasterSurface {
    /// Create a new, fully transparent surface with the given dimensions.
    pub fn new(width: u32, height: u32) -> SurfaceResult<Self> {
        let pixmap = Self::allocate(width, height)?;
        Ok(Self {
            width,
            height,
            pixmap,
            state: DrawingState::default(),
            state_stack: Vec::new(),
            path_builder: tiny_skia::PathBuilder::new(),
            has_current_point: false,
        })
    }

    fn allocate(width: u32, height: u32) -> SurfaceResult<Pixmap> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(SurfaceError::InvalidDimensions { width, height });
        }
        Pixmap::new(width, height).ok_or(SurfaceError::InvalidDimensions { width, height })
    }

    /// Get surface width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get surface height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reallocate the surface at a new size.
    ///
    /// Like assigning `canvas.width`, this clears every pixel and resets the
    /// drawing state, even when the size is unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> SurfaceResult<()> {
        log::debug!(target: "canvas", "resize {}x{} -> {}x{}", self.width, self.height, width, height);
        self.pixmap = Self::allocate(width, height)?;
        self.width = width;
        self.height = height;
        self.reset();
        Ok(())
    }

    /// Save the current drawing state.
    pub fn save(&mut self) {
        log::debug!(target: "canvas", "save");
        self.state_stack.push(self.state.clone());
    }

    /// Restore the previously saved drawing state.
    pub fn restore(&mut self) {
        log::debug!(target: "canvas", "restore");
        if let Some(state) = self.state_stack.pop() {
            self.state = state;
        }
    }

    /// Snapshot the drawing state and restore it when the returned guard drops.
    ///
    /// The guard dereferences to the surface, so drawing continues through it.
    /// Restoration also happens while unwinding from a panic.
    pub fn scoped(&mut self) -> StateGuard<'_> {
        StateGuard::new(self)
    }

    /// Reset the drawing context to its default state.
    ///
    /// This clears the surface to transparent, resets all drawing state
    /// and empties the state stack.
    pub fn reset(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
        self.state = DrawingState::default();
        self.state_stack.clear();
        self.path_builder = tiny_skia::PathBuilder::new();
        self.has_current_point = false;
    }

    // --- Style setters ---

    /// Set the fill style from a CSS color string.
    pub fn set_fill_style(&mut self, style: &str) -> SurfaceResult<()> {
        let color = CanvasColor::parse(style)?;
        self.state.fill_style = color.into();
        Ok(())
    }

    /// Set the fill style from a CanvasColor.
    pub fn set_fill_style_color(&mut self, color: CanvasColor) {
        self.state.fill_style = color.into();
    }

    /// Current fill color.
    pub fn fill_style(&self) -> CanvasColor {
        self.state.fill_style.into()
    }

    /// Set the stroke style from a CSS color string.
    pub fn set_stroke_style(&mut self, style: &str) -> SurfaceResult<()> {
        let color = CanvasColor::parse(style)?;
        self.state.stroke_style = color.into();
        Ok(())
    }

    /// Set the stroke style from a CanvasColor.
    pub fn set_stroke_style_color(&mut self, color: CanvasColor) {
        self.state.stroke_style = color.into();
    }

    /// Current stroke color.
    pub fn stroke_style(&self) -> CanvasColor {
        self.state.stroke_style.into()
    }

    /// Set the line width.
    /// Non-finite values and values <= 0 are ignored.
    pub fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    /// Current line width.
    pub fn line_width(&self) -> f32 {
        self.state.line_width
    }

    /// Set the line cap style.
    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }

    /// Set the line join style.
    pub fn set_line_join(&mut self, join: LineJoin) {
        self.state.line_join = join;
    }

    /// Set the miter limit.
    /// Non-finite values and values <= 0 are ignored.
    pub fn set_miter_limit(&mut self, limit: f32) {
        if limit.is_finite() && limit > 0.0 {
            self.state.miter_limit = limit;
        }
    }

    /// Set the global alpha (opacity).
    /// Non-finite values and values outside [0.0, 1.0] are ignored.
    pub fn set_global_alpha(&mut self, alpha: f32) {
        if alpha.is_finite() && (0.0..=1.0).contains(&alpha) {
            self.state.global_alpha = alpha;
        }
    }

    /// Set the line dash pattern.
    /// Ignored if any value is non-finite or negative.
    /// Odd-length arrays are duplicated to make them even.
    pub fn set_line_dash(&mut self, mut segments: Vec<f32>) {
        if segments.iter().any(|&v| !v.is_finite() || v < 0.0) {
            return;
        }
        if segments.len() % 2 != 0 {
            let copy = segments.clone();
            segments.extend(copy);
        }
        self.state.line_dash = segments;
    }

    /// Get the current line dash pattern.
    pub fn get_line_dash(&self) -> &[f32] {
        &self.state.line_dash
    }

    /// Set the line dash offset.
    /// Non-finite values are ignored.
    pub fn set_line_dash_offset(&mut self, offset: f32) {
        if offset.is_finite() {
            self.state.line_dash_offset = offset;
        }
    }

    pub(crate) fn set_state(&mut self, state: DrawingState) {
        self.state = state;
    }
}
