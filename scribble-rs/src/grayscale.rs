//! Luminance-weighted grayscale conversion.

use crate::error::RasterResult;
use scribble_canvas2d::RasterSurface;

/// Perceptual luminance `0.3R + 0.59G + 0.11B`, rounded half up.
///
/// Browser canvases round exact halves to even when storing pixels, so a
/// tie such as `(0, 0, 150)` gives 17 here where a canvas stores 16.
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    // Integer weights in hundredths keep exact halves exact.
    let y = (30 * r as u32 + 59 * g as u32 + 11 * b as u32 + 50) / 100;
    y.min(255) as u8
}

fn grayscale_pixels(surface: &RasterSurface) -> Vec<u8> {
    let mut data = surface.get_image_data(0, 0, surface.width(), surface.height());
    for pixel in data.chunks_exact_mut(4) {
        let y = luminance(pixel[0], pixel[1], pixel[2]);
        pixel[..3].fill(y);
    }
    data
}

/// Convert `surface` to grayscale, writing into `destination` when given.
///
/// With a destination, the destination is resized to the source's size and
/// the source is left untouched. Alpha is preserved in both cases.
pub fn to_grayscale(
    surface: &mut RasterSurface,
    destination: Option<&mut RasterSurface>,
) -> RasterResult<()> {
    match destination {
        Some(destination) => to_grayscale_into(surface, destination),
        None => {
            to_grayscale_in_place(surface);
            Ok(())
        }
    }
}

pub fn to_grayscale_in_place(surface: &mut RasterSurface) {
    let data = grayscale_pixels(surface);
    let (width, height) = (surface.width(), surface.height());
    surface.put_image_data(&data, width, height, 0, 0);
    log::debug!("to_grayscale: {width}x{height} in place");
}

/// Write the grayscale version of `source` into `destination`.
///
/// Resizing clears the destination and resets its drawing state.
pub fn to_grayscale_into(
    source: &RasterSurface,
    destination: &mut RasterSurface,
) -> RasterResult<()> {
    let data = grayscale_pixels(source);
    let (width, height) = (source.width(), source.height());
    destination.resize(width, height)?;
    destination.put_image_data(&data, width, height, 0, 0);
    log::debug!("to_grayscale: {width}x{height} into destination");
    Ok(())
}
