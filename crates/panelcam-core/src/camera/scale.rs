use crate::geometry::{Size, Viewport};

/// Computes the zoom factor that fits a cell into the viewport.
///
/// Only the dimension that overflows the viewport more is fitted, so the other
/// axis may still overflow. Cells that already fit are shown at 1:1; the
/// camera never zooms in past that.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScaleResolver;

impl ScaleResolver {
    pub fn resolve(&self, cell: Size, viewport: Viewport) -> f64 {
        let width_overflow = (cell.w - viewport.width).max(0.0);
        let height_overflow = (cell.h - viewport.height).max(0.0);

        let scale = if width_overflow > height_overflow {
            viewport.width / cell.w
        } else if height_overflow > width_overflow {
            viewport.height / cell.h
        } else {
            1.0
        };

        round_hundredths(scale)
    }
}

#[inline]
fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
