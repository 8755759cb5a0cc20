//! Selective color replacement for near-achromatic line art.
//!
//! Pixels that look black or gray are remapped to a target hue, keeping
//! their relative shading. Colored and light pixels pass through unchanged.

use crate::error::{RasterError, RasterResult};
use scribble_canvas2d::{CanvasColor, RasterSurface};

/// Pixels at or above this mean channel value are considered too light.
pub const GRAY_THRESHOLD: f32 = 196.0;

/// Pixels whose channel spread reaches this value are considered colored.
pub const SPREAD_THRESHOLD: u8 = 15;

/// Recolor gray/black pixels of `surface` towards a CSS color.
///
/// Fails with [`RasterError::Color`] when `target` is not a valid color.
pub fn recolor(surface: &RasterSurface, target: &str) -> RasterResult<RasterSurface> {
    let color = CanvasColor::parse(target).map_err(|_| RasterError::Color(target.to_string()))?;
    recolor_rgb(surface, color)
}

/// Recolor gray/black pixels of `surface` towards `target`, ignoring its alpha.
///
/// Returns a new surface of the same size; the source is not modified.
pub fn recolor_rgb(surface: &RasterSurface, target: CanvasColor) -> RasterResult<RasterSurface> {
    let (width, height) = (surface.width(), surface.height());
    let mut data = surface.get_image_data(0, 0, width, height);
    let target = target.rgb();

    let mut replaced = 0usize;
    for pixel in data.chunks_exact_mut(4) {
        if let Some(rgb) = replacement(pixel[0], pixel[1], pixel[2], target) {
            pixel[..3].copy_from_slice(&rgb);
            replaced += 1;
        }
    }
    log::debug!("recolor: {replaced} of {} pixels replaced", width * height);

    let mut output = RasterSurface::new(width, height)?;
    output.put_image_data(&data, width, height, 0, 0);
    Ok(output)
}

/// Replacement channels for a pixel, or `None` when it is left alone.
pub fn replacement(r: u8, g: u8, b: u8, target: [u8; 3]) -> Option<[u8; 3]> {
    let gray = (r as f32 + g as f32 + b as f32) / 3.0;
    let spread = r.max(g).max(b) - r.min(g).min(b);
    if gray >= GRAY_THRESHOLD || spread >= SPREAD_THRESHOLD {
        return None;
    }

    let brightness = 1.0 + gray / 255.0;
    Some(target.map(|t| (t as f32 * brightness).round().min(255.0) as u8))
}
