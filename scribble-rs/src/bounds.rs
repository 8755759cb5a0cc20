//! Bounding-box scanner.

use crate::area::Area;
use scribble_canvas2d::RasterSurface;

/// Tightest rectangle enclosing every pixel with non-zero alpha.
///
/// Returns `None` for a fully transparent surface. Callers must treat that
/// as "nothing to save" rather than as an empty area.
pub fn image_size(surface: &RasterSurface) -> Option<Area> {
    let width = surface.width() as usize;
    let height = surface.height() as usize;
    if width == 0 || height == 0 {
        return None;
    }

    let alpha = surface.alpha_channel();
    let rows: Vec<&[u8]> = alpha.chunks_exact(width).collect();
    let row_filled = |y: usize| rows[y].iter().any(|&a| a > 0);

    let top = (0..height).find(|&y| row_filled(y))?;
    let bottom = (top..height).rev().find(|&y| row_filled(y))?;

    // Only rows in [top, bottom] can hold opaque pixels.
    let column_filled = |x: usize| rows[top..=bottom].iter().any(|row| row[x] > 0);
    let left = (0..width).find(|&x| column_filled(x))?;
    let right = (left..width).rev().find(|&x| column_filled(x))?;

    let area = Area {
        x: left as u32,
        y: top as u32,
        width: (right - left + 1) as u32,
        height: (bottom - top + 1) as u32,
    };
    log::debug!("image_size: {area:?}");
    Some(area)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribble_canvas2d::RectParams;

    #[test]
    fn test_empty_surface_has_no_bounds() {
        let surface = RasterSurface::new(32, 16).unwrap();
        assert_eq!(image_size(&surface), None);
    }

    #[test]
    fn test_single_pixel_bounds() {
        let mut surface = RasterSurface::new(20, 20).unwrap();
        surface.put_image_data(&[10, 20, 30, 1], 1, 1, 7, 13);
        assert_eq!(
            image_size(&surface),
            Some(Area {
                x: 7,
                y: 13,
                width: 1,
                height: 1
            })
        );
    }

    #[test]
    fn test_bounds_span_disjoint_shapes() {
        let mut surface = RasterSurface::new(100, 60).unwrap();
        surface.fill_rect(&RectParams {
            x: 5.0,
            y: 40.0,
            width: 10.0,
            height: 10.0,
        });
        surface.fill_rect(&RectParams {
            x: 70.0,
            y: 2.0,
            width: 20.0,
            height: 5.0,
        });
        assert_eq!(
            image_size(&surface),
            Some(Area {
                x: 5,
                y: 2,
                width: 85,
                height: 48
            })
        );
    }

    #[test]
    fn test_full_surface_bounds() {
        let mut surface = RasterSurface::new(9, 4).unwrap();
        surface.fill_rect(&RectParams {
            x: 0.0,
            y: 0.0,
            width: 9.0,
            height: 4.0,
        });
        assert_eq!(image_size(&surface), Some(Area::new(0, 0, 9, 4)));
    }
}
