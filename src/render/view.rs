use crate::foundation::core::{Affine, Canvas, Point, Rect};
use crate::foundation::error::{TernvidError, TernvidResult};

/// Fixed mapping between planar diagram coordinates and canvas pixels.
///
/// `bounds` fills the whole canvas; planar `y` grows upwards, pixel `y` downwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotView {
    pub canvas: Canvas,
    pub bounds: Rect,
    to_pixels: Affine,
}

impl PlotView {
    pub fn new(canvas: Canvas, bounds: Rect) -> TernvidResult<Self> {
        canvas.validate()?;
        let (w, h) = (bounds.width(), bounds.height());
        if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
            return Err(TernvidError::validation("plot bounds must be non-empty"));
        }
        let sx = f64::from(canvas.width) / bounds.width();
        let sy = f64::from(canvas.height) / bounds.height();
        let to_pixels = Affine::new([sx, 0.0, 0.0, -sy, -bounds.x0 * sx, bounds.y1 * sy]);
        Ok(Self {
            canvas,
            bounds,
            to_pixels,
        })
    }

    pub fn to_pixels(&self) -> Affine {
        self.to_pixels
    }

    pub fn project(&self, p: Point) -> Point {
        self.to_pixels * p
    }

    /// Planar point under the centre of pixel `(px, py)`.
    pub fn unproject_pixel(&self, px: u32, py: u32) -> Point {
        let sx = self.bounds.width() / f64::from(self.canvas.width);
        let sy = self.bounds.height() / f64::from(self.canvas.height);
        Point::new(
            self.bounds.x0 + (f64::from(px) + 0.5) * sx,
            self.bounds.y1 - (f64::from(py) + 0.5) * sy,
        )
    }

    /// Pixels per planar unit along x.
    pub fn scale_x(&self) -> f64 {
        f64::from(self.canvas.width) / self.bounds.width()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/view.rs"]
mod tests;
