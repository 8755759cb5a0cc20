//! JSON drawing operations replayed by `scribble draw`.

use anyhow::{Context, Result};
use scribble_rs::primitives::{
    cross_line, draw_line, draw_point, hatched_circle, highlight_cursor,
};
use scribble_rs::{CanvasColor, CursorStyle, Marker, Point, RasterSurface};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Line {
        from: Option<Point>,
        to: Option<Point>,
    },
    Point {
        at: Option<Point>,
        #[serde(default)]
        width: f32,
        color: Option<String>,
        border: Option<String>,
    },
    Cursor {
        at: Option<Point>,
        #[serde(default)]
        width: f32,
        #[serde(default)]
        filled: bool,
        color: Option<String>,
    },
    HatchedCircle {
        at: Option<Point>,
        #[serde(default)]
        width: f32,
        color: Option<String>,
        border: Option<String>,
    },
    CrossLine {
        at: Option<Point>,
        #[serde(default)]
        width: f32,
    },
    StrokeStyle {
        color: String,
    },
    FillStyle {
        color: String,
    },
    LineWidth {
        width: f32,
    },
}

fn parse_color(color: Option<&String>) -> Result<Option<CanvasColor>> {
    color
        .map(|c| CanvasColor::parse(c).with_context(|| format!("Invalid color {c:?}")))
        .transpose()
}

fn marker(width: f32, color: Option<&String>, border: Option<&String>) -> Result<Marker> {
    Ok(Marker {
        color: parse_color(color)?,
        border_color: parse_color(border)?,
        width,
    })
}

pub fn parse_ops(json: &str) -> Result<Vec<DrawOp>> {
    serde_json::from_str(json).context("Failed to parse drawing operations")
}

pub fn apply(surface: &mut RasterSurface, op: &DrawOp) -> Result<()> {
    log::debug!("apply {op:?}");
    match op {
        DrawOp::Line { from, to } => draw_line(surface, *from, *to),
        DrawOp::Point {
            at,
            width,
            color,
            border,
        } => draw_point(surface, *at, &marker(*width, color.as_ref(), border.as_ref())?),
        DrawOp::Cursor {
            at,
            width,
            filled,
            color,
        } => {
            let style = CursorStyle {
                filled: *filled,
                color: parse_color(color.as_ref())?,
                width: *width,
            };
            highlight_cursor(surface, *at, &style)
        }
        DrawOp::HatchedCircle {
            at,
            width,
            color,
            border,
        } => hatched_circle(surface, *at, &marker(*width, color.as_ref(), border.as_ref())?),
        DrawOp::CrossLine { at, width } => cross_line(surface, *at, *width),
        DrawOp::StrokeStyle { color } => surface
            .set_stroke_style(color)
            .with_context(|| format!("Invalid stroke style {color:?}"))?,
        DrawOp::FillStyle { color } => surface
            .set_fill_style(color)
            .with_context(|| format!("Invalid fill style {color:?}"))?,
        DrawOp::LineWidth { width } => surface.set_line_width(*width),
    }
    Ok(())
}
