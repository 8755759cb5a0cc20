use rstest::rstest;
use scribble_rs::area::{cut_out_area, save_area};
use scribble_rs::bounds::image_size;
use scribble_rs::grayscale::to_grayscale_in_place;
use scribble_rs::primitives::{cross_line, draw_line, draw_point, hatched_circle, MIN_CROSS_WIDTH};
use scribble_rs::recolor::recolor;
use scribble_rs::{
    CanvasColor, DirectorySink, ExportFormat, ExportOptions, Exporter, Marker, MemorySink, Point,
    RasterSurface,
};

fn opaque_pixel_count(surface: &RasterSurface) -> usize {
    surface.alpha_channel().iter().filter(|&&a| a > 0).count()
}

fn blank(width: u32, height: u32) -> RasterSurface {
    RasterSurface::new(width, height).unwrap()
}

#[test]
fn test_draw_trim_export() {
    let mut surface = blank(100, 100);
    draw_point(
        &mut surface,
        Some(Point::new(50.0, 50.0)),
        &Marker::with_width(40.0),
    );

    let bounds = image_size(&surface).expect("circle should have bounds");
    assert!((29..=30).contains(&bounds.x), "{bounds:?}");
    assert!((29..=30).contains(&bounds.y), "{bounds:?}");
    assert!((40..=42).contains(&bounds.width), "{bounds:?}");
    assert!((40..=42).contains(&bounds.height), "{bounds:?}");

    let mut trimmed = save_area(Some(&surface), None).unwrap().unwrap();
    assert_eq!((trimmed.width(), trimmed.height()), (bounds.width, bounds.height));
    assert_eq!(opaque_pixel_count(&trimmed), opaque_pixel_count(&surface));

    let sink = MemorySink::new();
    let exporter = Exporter::new(sink.clone(), ExportOptions::default());
    let download = exporter
        .export_png(Some(&trimmed), "circle")
        .unwrap()
        .unwrap();
    let decoded = RasterSurface::from_png(&download.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (bounds.width, bounds.height));
    assert_eq!(sink.len(), 1);

    to_grayscale_in_place(&mut trimmed);
    let (w, h) = (trimmed.width() as i32, trimmed.height() as i32);
    let center = trimmed.get_image_data(w / 2, h / 2, 1, 1);
    assert!(center[..3].iter().all(|&c| c <= 2), "{center:?}");
    assert_eq!(center[0], center[1]);
    assert_eq!(center[1], center[2]);
    assert_eq!(center[3], 255);
    for (x, y) in [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)] {
        assert_eq!(trimmed.get_image_data(x, y, 1, 1)[3], 0, "corner ({x}, {y})");
    }
}

fn scribbles(kind: &str) -> RasterSurface {
    let mut surface = blank(120, 90);
    match kind {
        "line" => draw_line(
            &mut surface,
            Some(Point::new(3.0, 80.0)),
            Some(Point::new(100.0, 7.5)),
        ),
        "points" => {
            draw_point(&mut surface, Some(Point::new(10.0, 10.0)), &Marker::with_width(6.0));
            draw_point(&mut surface, Some(Point::new(90.0, 70.0)), &Marker::with_width(11.0));
        }
        "hatched" => hatched_circle(
            &mut surface,
            Some(Point::new(60.0, 45.0)),
            &Marker::with_width(50.0)
                .color(CanvasColor::WHITE)
                .border(CanvasColor::BLACK),
        ),
        "cross" => cross_line(&mut surface, Some(Point::new(7.0, 7.0)), 30.0),
        _ => unreachable!(),
    }
    surface
}

#[rstest]
fn test_cut_out_bounds_keeps_every_pixel(
    #[values("line", "points", "hatched", "cross")] kind: &str,
) {
    let surface = scribbles(kind);
    let bounds = image_size(&surface).unwrap();
    let cropped = cut_out_area(&surface, bounds).unwrap();

    assert_eq!((cropped.width(), cropped.height()), (bounds.width, bounds.height));
    assert_eq!(opaque_pixel_count(&cropped), opaque_pixel_count(&surface));
    assert_eq!(
        cropped.get_image_data(0, 0, bounds.width, bounds.height),
        surface.get_image_data(bounds.x as i32, bounds.y as i32, bounds.width, bounds.height)
    );
}

#[test]
fn test_empty_surface_aborts_save() {
    let surface = blank(64, 64);
    assert!(image_size(&surface).is_none());
    assert!(save_area(Some(&surface), None).unwrap().is_none());
}

#[rstest]
#[case(0.5)]
#[case(3.0)]
#[case(17.0)]
fn test_primitives_restore_line_width(#[case] line_width: f32) {
    let mut surface = blank(60, 60);
    surface.set_line_width(line_width);
    let marker = Marker::with_width(24.0).border(CanvasColor::from_rgb8(0, 0, 200));

    draw_point(&mut surface, Some(Point::new(30.0, 30.0)), &marker);
    assert_eq!(surface.line_width(), line_width);
    hatched_circle(&mut surface, Some(Point::new(30.0, 30.0)), &marker);
    assert_eq!(surface.line_width(), line_width);
    cross_line(&mut surface, Some(Point::new(30.0, 30.0)), 10.0);
    assert_eq!(surface.line_width(), line_width);
    assert!(surface.get_line_dash().is_empty());
}

#[rstest]
fn test_cross_never_smaller_than_minimum(#[values(-5.0, 0.0, 8.0, 15.9, f32::NAN)] width: f32) {
    let mut surface = blank(64, 64);
    cross_line(&mut surface, Some(Point::new(32.0, 32.0)), width);
    let bounds = image_size(&surface).unwrap();
    assert!(bounds.width as f32 >= MIN_CROSS_WIDTH - 1.0, "{bounds:?}");
    assert!(bounds.height as f32 >= MIN_CROSS_WIDTH - 1.0, "{bounds:?}");
}

#[test]
fn test_recolor_then_grayscale() {
    let mut surface = blank(30, 10);
    surface.set_stroke_style("#333333").unwrap();
    surface.set_line_width(4.0);
    draw_line(
        &mut surface,
        Some(Point::new(0.0, 5.0)),
        Some(Point::new(15.0, 5.0)),
    );
    draw_point(
        &mut surface,
        Some(Point::new(25.0, 5.0)),
        &Marker::with_width(8.0).color(CanvasColor::from_rgb8(255, 0, 0)),
    );

    let mut recolored = recolor(&surface, "rgb(0, 0, 128)").unwrap();
    // The gray line turns blue, the red point stays red.
    let line = recolored.get_image_data(7, 5, 1, 1);
    assert_eq!((line[0], line[1]), (0, 0));
    assert!(line[2] > 128);
    assert_eq!(recolored.get_image_data(25, 5, 1, 1), vec![255, 0, 0, 255]);
    assert_eq!(recolored.alpha_channel(), surface.alpha_channel());

    to_grayscale_in_place(&mut recolored);
    let once = recolored.get_image_data(0, 0, 30, 10);
    to_grayscale_in_place(&mut recolored);
    assert_eq!(recolored.get_image_data(0, 0, 30, 10), once);
}

#[test]
fn test_export_to_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let exporter = Exporter::new(DirectorySink::new(tmp.path()), ExportOptions::default());
    let surface = scribbles("points");

    for format in [ExportFormat::Png, ExportFormat::Svg] {
        exporter
            .export(format, Some(&surface), "drawing")
            .unwrap()
            .unwrap();
    }

    let png = std::fs::read(tmp.path().join("drawing.png")).unwrap();
    let restored = RasterSurface::from_png(&png).unwrap();
    assert_eq!(
        restored.get_image_data(0, 0, 120, 90),
        surface.get_image_data(0, 0, 120, 90)
    );

    let svg = std::fs::read_to_string(tmp.path().join("drawing.svg")).unwrap();
    assert!(svg.contains(r#"viewBox="0 0 120 90""#));
}
