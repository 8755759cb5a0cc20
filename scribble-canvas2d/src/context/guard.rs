//! Scoped drawing-state restoration.

use super::RasterSurface;
use crate::drawing_state::DrawingState;
use std::ops::{Deref, DerefMut};

/// Restores a snapshot of the drawing state when dropped.
///
/// Created by [`RasterSurface::scoped`]. Pixels drawn through the guard stay
/// on the surface; style changes made through it do not outlive it.
pub struct StateGuard<'a> {
    surface: &'a mut RasterSurface,
    snapshot: DrawingState,
}

impl<'a> StateGuard<'a> {
    pub(crate) fn new(surface: &'a mut RasterSurface) -> Self {
        log::debug!(target: "canvas", "scoped save");
        let snapshot = surface.state.clone();
        Self { surface, snapshot }
    }
}

impl Deref for StateGuard<'_> {
    type Target = RasterSurface;

    fn deref(&self) -> &Self::Target {
        self.surface
    }
}

impl DerefMut for StateGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.surface
    }
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        log::debug!(target: "canvas", "scoped restore");
        let snapshot = std::mem::take(&mut self.snapshot);
        self.surface.set_state(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CanvasColor;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[test]
    fn test_guard_restores_on_drop() {
        let mut surface = RasterSurface::new(10, 10).unwrap();
        surface.set_line_width(3.0);
        surface.set_line_dash(vec![1.0, 2.0]);
        {
            let mut scoped = surface.scoped();
            scoped.set_line_width(9.0);
            scoped.set_line_dash(vec![]);
            scoped.set_fill_style_color(CanvasColor::WHITE);
            assert_eq!(scoped.line_width(), 9.0);
        }
        assert_eq!(surface.line_width(), 3.0);
        assert_eq!(surface.get_line_dash(), &[1.0, 2.0]);
        assert_eq!(surface.fill_style(), CanvasColor::BLACK);
    }

    #[test]
    fn test_guard_restores_on_panic() {
        let mut surface = RasterSurface::new(10, 10).unwrap();
        surface.set_line_width(2.0);

        let result = catch_unwind(AssertUnwindSafe(|| {
            let mut scoped = surface.scoped();
            scoped.set_line_width(7.0);
            scoped.set_line_dash(vec![2.0, 2.0]);
            panic!("interrupted mid-draw");
        }));

        assert!(result.is_err());
        assert_eq!(surface.line_width(), 2.0);
        assert!(surface.get_line_dash().is_empty());
    }

    #[test]
    fn test_nested_guards() {
        let mut surface = RasterSurface::new(10, 10).unwrap();
        {
            let mut outer = surface.scoped();
            outer.set_line_width(4.0);
            {
                let mut inner = outer.scoped();
                inner.set_line_width(8.0);
            }
            assert_eq!(outer.line_width(), 4.0);
        }
        assert_eq!(surface.line_width(), 1.0);
    }
}
