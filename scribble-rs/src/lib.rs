//! Pixel-processing core for a raster annotation tool.
//!
//! Everything here operates on a caller-owned [`RasterSurface`]:
//!
//! - [`primitives`] draws lines, points, cursor highlights, hatched circles
//!   and dashed crosshairs, restoring the surface's drawing state afterwards.
//! - [`bounds::image_size`] finds the tightest rectangle of non-transparent pixels.
//! - [`area::cut_out_area`] / [`area::save_area`] crop a surface to an [`Area`].
//! - [`recolor`] remaps near-black/gray line art to a target hue.
//! - [`grayscale`] converts to luminance-weighted grayscale.
//! - [`export`] serializes to PNG, SVG (embedded raster) or single-frame GIF
//!   and hands the bytes to a [`DownloadSink`].
//!
//! ```rust
//! use scribble_rs::{area, bounds, primitives, Marker, Point, RasterSurface};
//!
//! let mut surface = RasterSurface::new(100, 100)?;
//! primitives::draw_point(&mut surface, Some(Point::new(50.0, 50.0)), &Marker::with_width(40.0));
//!
//! let bounds = bounds::image_size(&surface).expect("something was drawn");
//! let trimmed = area::cut_out_area(&surface, bounds)?;
//! assert_eq!(trimmed.width(), bounds.width);
//! # Ok::<(), scribble_rs::RasterError>(())
//! ```

pub mod area;
pub mod bounds;
pub mod config;
pub mod error;
pub mod export;
pub mod grayscale;
pub mod primitives;
pub mod recolor;

pub use area::Area;
pub use config::ExportOptions;
pub use error::{RasterError, RasterResult};
pub use export::{
    DirectorySink, Download, DownloadSink, ExportFormat, Exporter, GifExport, MemorySink,
};
pub use primitives::{CursorStyle, Marker, Point};

pub use scribble_canvas2d::{CanvasColor, RasterSurface};
pub use tokio_util::sync::CancellationToken;
