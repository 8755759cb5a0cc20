//! Rectangular areas and cropping.

use crate::bounds::image_size;
use crate::error::{RasterError, RasterResult};
use scribble_canvas2d::RasterSurface;
use serde::{Deserialize, Serialize};

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Area {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Area {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge, `None` on overflow.
    pub fn right(&self) -> Option<u32> {
        self.x.checked_add(self.width)
    }

    /// Exclusive bottom edge, `None` on overflow.
    pub fn bottom(&self) -> Option<u32> {
        self.y.checked_add(self.height)
    }

    /// True when the area is non-empty and lies entirely inside a
    /// `width x height` surface.
    pub fn fits(&self, width: u32, height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.right().is_some_and(|r| r <= width)
            && self.bottom().is_some_and(|b| b <= height)
    }

    /// Intersect with a `width x height` surface.
    ///
    /// Returns `None` when nothing of the area remains.
    pub fn clamped_to(&self, width: u32, height: u32) -> Option<Area> {
        let right = self.right().unwrap_or(u32::MAX).min(width);
        let bottom = self.bottom().unwrap_or(u32::MAX).min(height);
        if self.x >= right || self.y >= bottom {
            return None;
        }
        Some(Area::new(self.x, self.y, right - self.x, bottom - self.y))
    }

    fn invalid_for(&self, surface: &RasterSurface) -> RasterError {
        RasterError::InvalidArea {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            surface_width: surface.width(),
            surface_height: surface.height(),
        }
    }
}

/// Copy `area` of `surface` into a new surface of exactly the area's size.
///
/// The source is never modified. An empty area or one that extends past the
/// surface is rejected with [`RasterError::InvalidArea`].
pub fn cut_out_area(surface: &RasterSurface, area: Area) -> RasterResult<RasterSurface> {
    if !area.fits(surface.width(), surface.height()) {
        return Err(area.invalid_for(surface));
    }

    let pixels = surface.get_image_data(area.x as i32, area.y as i32, area.width, area.height);
    let mut cropped = RasterSurface::new(area.width, area.height)?;
    cropped.put_image_data(&pixels, area.width, area.height, 0, 0);
    log::debug!(
        "cut_out_area: {}x{} -> {:?}",
        surface.width(),
        surface.height(),
        area
    );
    Ok(cropped)
}

/// Crop `surface` for saving.
///
/// Without an explicit area the drawn content is trimmed to its bounding box.
/// Returns `Ok(None)` when there is no surface or nothing has been drawn, in
/// which case the caller should skip the save.
pub fn save_area(
    surface: Option<&RasterSurface>,
    area: Option<Area>,
) -> RasterResult<Option<RasterSurface>> {
    let Some(surface) = surface else {
        return Ok(None);
    };
    let area = match area {
        Some(area) => area,
        None => match image_size(surface) {
            Some(bounds) => bounds,
            None => {
                log::info!("save_area: surface is empty, nothing to save");
                return Ok(None);
            }
        },
    };
    cut_out_area(surface, area).map(Some)
}
