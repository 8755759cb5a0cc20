//! Primitive rasterizer: lines, points, cursor highlights, hatched circles
//! and dashed crosshairs.
//!
//! Every function is stateless. Style changes go through
//! [`RasterSurface::scoped`], so the surface's drawing state is the same
//! after the call as before it, whichever way the call exits.

use scribble_canvas2d::{CanvasColor, CircleParams, LineCap, RasterSurface};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Crosshairs never span less than this many pixels.
pub const MIN_CROSS_WIDTH: f32 = 16.0;

/// Hatched circles at or below this radius are drawn as plain points.
pub const MIN_HATCH_RADIUS: f32 = 5.0;

/// Above this radius hatch spokes are spaced π/8 apart instead of π/6.
const FINE_HATCH_RADIUS: f32 = 12.0;

/// Above this radius each spoke gets a perpendicular companion line.
const CROSS_HATCH_RADIUS: f32 = 10.0;

const HATCH_DASH: [f32; 2] = [2.0, 2.0];
const CROSS_DASH: [f32; 2] = [4.0, 2.0];
const OUTLINE_WIDTH: f32 = 1.0;

/// A position in surface pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Appearance of a point-like mark.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Marker {
    /// Fill color. `None` keeps the surface's current fill style.
    pub color: Option<CanvasColor>,
    /// Outline color. `None` draws no outline.
    pub border_color: Option<CanvasColor>,
    /// Diameter in pixels. Non-positive means the surface's current line width.
    pub width: f32,
}

impl Marker {
    pub fn with_width(width: f32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    pub fn color(mut self, color: CanvasColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn border(mut self, color: CanvasColor) -> Self {
        self.border_color = Some(color);
        self
    }
}

/// Appearance of the transient cursor indicator.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorStyle {
    /// Filled disk when true, 1 px ring otherwise.
    pub filled: bool,
    /// Indicator color. `None` keeps the surface's current fill/stroke style.
    pub color: Option<CanvasColor>,
    /// Diameter in pixels. Non-positive means the surface's current line width.
    pub width: f32,
}

fn resolve_width(surface: &RasterSurface, width: f32) -> f32 {
    if width.is_finite() && width > 0.0 {
        width
    } else {
        surface.line_width()
    }
}

fn circle_path(surface: &mut RasterSurface, center: Point, radius: f32) {
    surface.begin_path();
    surface.circle(&CircleParams {
        x: center.x,
        y: center.y,
        radius,
    });
}

/// Stroke a straight segment with the surface's current stroke style.
///
/// Does nothing unless both endpoints are present.
pub fn draw_line(surface: &mut RasterSurface, start: Option<Point>, end: Option<Point>) {
    let (Some(start), Some(end)) = (start, end) else {
        return;
    };
    log::debug!(
        "draw_line ({}, {}) -> ({}, {})",
        start.x,
        start.y,
        end.x,
        end.y
    );
    surface.begin_path();
    surface.move_to(start.x, start.y);
    surface.line_to(end.x, end.y);
    surface.stroke();
}

/// Fill a disk of diameter `marker.width` centred on `coord`, optionally
/// outlined in `marker.border_color`.
pub fn draw_point(surface: &mut RasterSurface, coord: Option<Point>, marker: &Marker) {
    let Some(center) = coord else {
        return;
    };
    let width = resolve_width(surface, marker.width);
    log::debug!("draw_point ({}, {}) width={}", center.x, center.y, width);

    let mut scoped = surface.scoped();
    if let Some(color) = marker.color {
        scoped.set_fill_style_color(color);
    }
    circle_path(&mut scoped, center, width / 2.0);
    scoped.fill();

    if let Some(border) = marker.border_color {
        scoped.set_stroke_style_color(border);
        scoped.set_line_width(OUTLINE_WIDTH);
        scoped.stroke();
    }
}

/// Draw the cursor indicator at `coord`.
///
/// The indicator is painted like any other pixels; the caller clears it by
/// redrawing.
pub fn highlight_cursor(surface: &mut RasterSurface, coord: Option<Point>, style: &CursorStyle) {
    let Some(center) = coord else {
        return;
    };
    let width = resolve_width(surface, style.width);

    let mut scoped = surface.scoped();
    circle_path(&mut scoped, center, width / 2.0);
    if style.filled {
        if let Some(color) = style.color {
            scoped.set_fill_style_color(color);
        }
        scoped.fill();
    } else {
        if let Some(color) = style.color {
            scoped.set_stroke_style_color(color);
        }
        scoped.set_line_width(OUTLINE_WIDTH);
        scoped.stroke();
    }
}

/// Draw a filled circle decorated with dashed radial hatching.
///
/// Circles with a radius of at most [`MIN_HATCH_RADIUS`] are too small for
/// hatching to show and are drawn exactly as [`draw_point`] would draw them.
pub fn hatched_circle(surface: &mut RasterSurface, coord: Option<Point>, marker: &Marker) {
    let Some(center) = coord else {
        return;
    };
    let radius = resolve_width(surface, marker.width) / 2.0;
    if radius <= MIN_HATCH_RADIUS {
        draw_point(surface, coord, marker);
        return;
    }
    log::debug!("hatched_circle ({}, {}) r={}", center.x, center.y, radius);

    let mut scoped = surface.scoped();
    scoped.set_line_dash(HATCH_DASH.to_vec());
    scoped.set_line_dash_offset(0.0);
    scoped.set_line_width(OUTLINE_WIDTH);
    if let Some(color) = marker.color {
        scoped.set_fill_style_color(color);
    }
    if let Some(border) = marker.border_color {
        scoped.set_stroke_style_color(border);
    }

    circle_path(&mut scoped, center, radius);
    scoped.fill();
    scoped.stroke();

    let step = if radius > FINE_HATCH_RADIUS {
        PI / 8.0
    } else {
        PI / 6.0
    };
    let steps = (2.0 * PI / step).round() as usize;
    let cross_hatch = radius > CROSS_HATCH_RADIUS;
    // Perpendicular lines cross each spoke at its midpoint and end on the rim.
    let chord_half = radius * 3f32.sqrt() / 2.0;

    scoped.begin_path();
    for i in 0..steps {
        let (sin, cos) = (i as f32 * step).sin_cos();
        let rim = center.offset(radius * cos, radius * sin);
        scoped.move_to(center.x, center.y);
        scoped.line_to(rim.x, rim.y);

        if cross_hatch {
            let mid = center.offset(radius / 2.0 * cos, radius / 2.0 * sin);
            let from = mid.offset(-chord_half * sin, chord_half * cos);
            let to = mid.offset(chord_half * sin, -chord_half * cos);
            scoped.move_to(from.x, from.y);
            scoped.line_to(to.x, to.y);
        }
    }
    scoped.stroke();
}

/// Draw a dashed black crosshair spanning `width` pixels centred on `center`.
///
/// The span is floored to [`MIN_CROSS_WIDTH`]. The surface's ambient stroke
/// style is ignored: the cross is always a 1 px black dashed line.
pub fn cross_line(surface: &mut RasterSurface, center: Option<Point>, width: f32) {
    let Some(center) = center else {
        return;
    };
    let width = if width.is_finite() {
        width.max(MIN_CROSS_WIDTH)
    } else {
        MIN_CROSS_WIDTH
    };
    let half = width / 2.0;
    log::debug!("cross_line ({}, {}) width={}", center.x, center.y, width);

    let mut scoped = surface.scoped();
    scoped.set_stroke_style_color(CanvasColor::BLACK);
    scoped.set_line_width(1.0);
    scoped.set_line_cap(LineCap::Butt);
    scoped.set_global_alpha(1.0);
    scoped.set_line_dash(CROSS_DASH.to_vec());
    scoped.set_line_dash_offset(0.0);

    scoped.begin_path();
    scoped.move_to(center.x - half, center.y);
    scoped.line_to(center.x + half, center.y);
    scoped.move_to(center.x, center.y - half);
    scoped.line_to(center.x, center.y + half);
    scoped.stroke();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::image_size;

    fn surface() -> RasterSurface {
        RasterSurface::new(100, 100).unwrap()
    }

    fn pixels(surface: &RasterSurface) -> Vec<u8> {
        surface.get_image_data(0, 0, surface.width(), surface.height())
    }

    #[test]
    fn test_draw_line_requires_both_endpoints() {
        let mut s = surface();
        draw_line(&mut s, None, Some(Point::new(10.0, 10.0)));
        draw_line(&mut s, Some(Point::new(10.0, 10.0)), None);
        assert!(image_size(&s).is_none());

        draw_line(
            &mut s,
            Some(Point::new(10.0, 50.0)),
            Some(Point::new(90.0, 50.0)),
        );
        let area = image_size(&s).unwrap();
        assert!((9..=10).contains(&area.x), "{area:?}");
        assert!((80..=82).contains(&area.width), "{area:?}");
    }

    #[test]
    fn test_draw_point_absent_coord_is_noop() {
        let mut s = surface();
        draw_point(&mut s, None, &Marker::with_width(10.0));
        assert!(image_size(&s).is_none());
    }

    #[test]
    fn test_draw_point_uses_line_width_when_width_not_positive() {
        let mut s = surface();
        s.set_line_width(10.0);
        draw_point(&mut s, Some(Point::new(50.0, 50.0)), &Marker::with_width(0.0));
        let area = image_size(&s).unwrap();
        assert!((44..=45).contains(&area.x), "{area:?}");
        assert!((10..=12).contains(&area.width), "{area:?}");
        assert_eq!(s.line_width(), 10.0);
    }

    #[test]
    fn test_draw_point_restores_state() {
        let mut s = surface();
        s.set_line_width(6.0);
        s.set_fill_style("#123456").unwrap();
        let marker = Marker::with_width(20.0)
            .color(CanvasColor::from_rgb8(255, 0, 0))
            .border(CanvasColor::from_rgb8(0, 0, 255));
        draw_point(&mut s, Some(Point::new(50.0, 50.0)), &marker);

        assert_eq!(s.line_width(), 6.0);
        assert_eq!(s.fill_style(), CanvasColor::from_rgb8(0x12, 0x34, 0x56));
        assert_eq!(s.stroke_style(), CanvasColor::BLACK);

        let data = s.get_image_data(50, 50, 1, 1);
        assert_eq!(&data[..], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_highlight_cursor_filled_and_ring() {
        let mut filled = surface();
        highlight_cursor(
            &mut filled,
            Some(Point::new(50.0, 50.0)),
            &CursorStyle {
                filled: true,
                color: Some(CanvasColor::from_rgb8(0, 255, 0)),
                width: 20.0,
            },
        );
        assert_eq!(filled.get_image_data(50, 50, 1, 1), vec![0, 255, 0, 255]);

        let mut ring = surface();
        highlight_cursor(
            &mut ring,
            Some(Point::new(50.0, 50.0)),
            &CursorStyle {
                filled: false,
                color: None,
                width: 20.0,
            },
        );
        // Hollow: centre untouched, rim painted.
        assert_eq!(ring.get_image_data(50, 50, 1, 1)[3], 0);
        assert!(ring.get_image_data(59, 50, 2, 1).iter().any(|&b| b > 0));
        assert_eq!(ring.line_width(), 1.0);

        let mut untouched = surface();
        highlight_cursor(&mut untouched, None, &CursorStyle::default());
        assert!(image_size(&untouched).is_none());
    }

    #[test]
    fn test_small_hatched_circle_matches_point() {
        for width in [4.0, 8.0, 10.0] {
            let marker = Marker::with_width(width)
                .color(CanvasColor::from_rgb8(200, 30, 30))
                .border(CanvasColor::BLACK);

            let mut hatched = surface();
            hatched.set_line_dash(vec![3.0, 1.0]);
            hatched_circle(&mut hatched, Some(Point::new(40.0, 60.0)), &marker);

            let mut point = surface();
            point.set_line_dash(vec![3.0, 1.0]);
            draw_point(&mut point, Some(Point::new(40.0, 60.0)), &marker);

            assert_eq!(pixels(&hatched), pixels(&point), "width {width}");
            assert_eq!(hatched.get_line_dash(), &[3.0, 1.0]);
        }
    }

    #[test]
    fn test_hatched_circle_draws_hatching_inside() {
        let center = Point::new(50.5, 50.5);
        let marker = Marker::with_width(40.0)
            .color(CanvasColor::WHITE)
            .border(CanvasColor::BLACK);

        let dark_inside = |s: &RasterSurface| {
            let data = pixels(s);
            let mut count = 0;
            for y in 0..100 {
                for x in 0..100 {
                    let (dx, dy) = (x as f32 + 0.5 - center.x, y as f32 + 0.5 - center.y);
                    if (dx * dx + dy * dy).sqrt() < 17.0 && data[(y * 100 + x) * 4] < 128 {
                        count += 1;
                    }
                }
            }
            count
        };

        let mut plain = surface();
        draw_point(&mut plain, Some(center), &marker);
        assert_eq!(dark_inside(&plain), 0);

        let mut hatched = surface();
        hatched_circle(&mut hatched, Some(center), &marker);
        assert!(dark_inside(&hatched) > 20);
        // The first dash of the horizontal spoke starts at the centre.
        assert!(hatched.get_image_data(51, 50, 1, 1)[0] < 128);
    }

    #[test]
    fn test_hatched_circle_restores_state() {
        let mut s = surface();
        s.set_line_width(3.0);
        s.set_line_dash(vec![7.0, 1.0]);
        hatched_circle(&mut s, Some(Point::new(50.0, 50.0)), &Marker::with_width(30.0));
        assert_eq!(s.line_width(), 3.0);
        assert_eq!(s.get_line_dash(), &[7.0, 1.0]);

        hatched_circle(&mut s, None, &Marker::with_width(30.0));
        assert_eq!(s.line_width(), 3.0);
    }

    #[test]
    fn test_hatched_circle_falls_back_to_line_width() {
        let mut s = surface();
        s.set_line_width(30.0);
        hatched_circle(&mut s, Some(Point::new(50.0, 50.0)), &Marker::default());
        let area = image_size(&s).unwrap();
        assert!((30..=32).contains(&area.width), "{area:?}");
        assert_eq!(s.line_width(), 30.0);
    }

    #[test]
    fn test_cross_line_floors_width() {
        let mut s = surface();
        cross_line(&mut s, Some(Point::new(50.0, 50.0)), 4.0);
        let area = image_size(&s).unwrap();
        assert!((15..=18).contains(&area.width), "{area:?}");
        assert!((15..=18).contains(&area.height), "{area:?}");
        assert!((41..=42).contains(&area.x), "{area:?}");
    }

    #[test]
    fn test_cross_line_ignores_ambient_style() {
        let mut s = surface();
        s.set_stroke_style("#ff0000").unwrap();
        s.set_line_width(9.0);
        s.set_line_dash(vec![1.0, 1.0]);

        cross_line(&mut s, Some(Point::new(50.5, 50.5)), 40.0);

        // 1 px black stroke on the half-pixel centre covers a single row.
        let data = s.get_image_data(32, 50, 1, 1);
        assert_eq!(&data[..3], &[0, 0, 0]);
        assert!(data[3] > 200, "{data:?}");
        assert_eq!(s.get_image_data(32, 52, 1, 1)[3], 0);

        assert_eq!(s.stroke_style(), CanvasColor::from_rgb8(255, 0, 0));
        assert_eq!(s.line_width(), 9.0);
        assert_eq!(s.get_line_dash(), &[1.0, 1.0]);
    }

    #[test]
    fn test_cross_line_absent_center_is_noop() {
        let mut s = surface();
        cross_line(&mut s, None, 100.0);
        assert!(image_size(&s).is_none());
    }
}
