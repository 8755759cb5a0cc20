//! Raster drawing surface with a Canvas 2D style context.
//!
//! A [`RasterSurface`] owns an RGBA pixel buffer together with the drawing
//! state a browser canvas context would carry (fill/stroke color, line width,
//! dash pattern, ...). It uses `tiny-skia` for anti-aliased rasterization and
//! exposes straight-alpha pixel access for filters that work on raw bytes.
//!
//! # Example
//!
//! ```rust
//! use scribble_canvas2d::{RasterSurface, RectParams};
//!
//! let mut surface = RasterSurface::new(64, 64)?;
//! surface.set_fill_style("#ff0000")?;
//! surface.fill_rect(&RectParams { x: 8.0, y: 8.0, width: 16.0, height: 16.0 });
//! let png_data = surface.to_png(None)?;
//! assert!(!png_data.is_empty());
//! # Ok::<(), scribble_canvas2d::SurfaceError>(())
//! ```

mod context;
mod drawing_state;
mod error;
mod geometry;
mod style;

// Re-export public API
pub use context::{RasterSurface, StateGuard, MAX_DIMENSION};
pub use error::{SurfaceError, SurfaceResult};
pub use geometry::{CanvasColor, CircleParams, RectParams};
pub use style::{LineCap, LineJoin};
