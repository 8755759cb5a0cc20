//! Parameter structs and value types for surface drawing operations.

use crate::error::{SurfaceError, SurfaceResult};
use std::fmt;
use std::str::FromStr;

/// Parameters for a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectParams {
    /// X coordinate of the rectangle origin.
    pub x: f32,
    /// Y coordinate of the rectangle origin.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

/// Parameters for a full circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleParams {
    /// X coordinate of the circle center.
    pub x: f32,
    /// Y coordinate of the circle center.
    pub y: f32,
    /// Radius of the circle.
    pub radius: f32,
}

/// An RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanvasColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl CanvasColor {
    pub const BLACK: CanvasColor = CanvasColor::from_rgba8(0, 0, 0, 255);
    pub const WHITE: CanvasColor = CanvasColor::from_rgba8(255, 255, 255, 255);

    /// Create a color from 8-bit RGBA components.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit RGB components.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// The RGB triple, dropping alpha.
    pub const fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Parse a CSS color string (`#rgb`, `#rrggbb`, `rgb(...)`, named colors).
    pub fn parse(s: &str) -> SurfaceResult<Self> {
        let parsed = csscolorparser::parse(s.trim())
            .map_err(|e| SurfaceError::ColorParseError(format!("{}: {}", s, e)))?;
        let [r, g, b, a] = parsed.to_rgba8();
        Ok(Self { r, g, b, a })
    }
}

impl FromStr for CanvasColor {
    type Err = SurfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CanvasColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<CanvasColor> for tiny_skia::Color {
    fn from(c: CanvasColor) -> Self {
        tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
    }
}

impl From<tiny_skia::Color> for CanvasColor {
    fn from(c: tiny_skia::Color) -> Self {
        let c = c.to_color_u8();
        Self::from_rgba8(c.red(), c.green(), c.blue(), c.alpha())
    }
}
