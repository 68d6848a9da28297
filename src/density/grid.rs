use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{TernvidError, TernvidResult};
use crate::foundation::math::linspace;

/// Fixed rectangular evaluation lattice, endpoints included on both axes.
///
/// A run builds one `Grid` and evaluates every frame on it, so frames share bounds and
/// resolution.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Grid {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub nx: usize,
    pub ny: usize,
}

impl Default for Grid {
    /// Bounds leave a margin around the triangle `(-0.5, 0)`, `(0.5, 0)`, `(0, 1)`.
    fn default() -> Self {
        Self {
            x_min: -0.6,
            x_max: 0.6,
            y_min: -0.1,
            y_max: 1.1,
            nx: 300,
            ny: 300,
        }
    }
}

impl Grid {
    pub fn validate(&self) -> TernvidResult<()> {
        let finite = [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(TernvidError::validation("grid bounds must be finite"));
        }
        if self.x_min >= self.x_max || self.y_min >= self.y_max {
            return Err(TernvidError::validation(
                "grid bounds must satisfy min < max on both axes",
            ));
        }
        if self.nx < 2 || self.ny < 2 {
            return Err(TernvidError::validation(
                "grid resolution must be at least 2 on both axes",
            ));
        }
        Ok(())
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x_min, self.y_min, self.x_max, self.y_max)
    }

    pub fn xs(&self) -> Vec<f64> {
        linspace(self.x_min, self.x_max, self.nx)
    }

    pub fn ys(&self) -> Vec<f64> {
        linspace(self.y_min, self.y_max, self.ny)
    }

    pub fn dx(&self) -> f64 {
        (self.x_max - self.x_min) / (self.nx - 1) as f64
    }

    pub fn dy(&self) -> f64 {
        (self.y_max - self.y_min) / (self.ny - 1) as f64
    }

    /// Grid point `(ix, iy)`.
    pub fn point(&self, ix: usize, iy: usize) -> Point {
        Point::new(
            self.x_min + self.dx() * ix as f64,
            self.y_min + self.dy() * iy as f64,
        )
    }

    /// Fractional lattice coordinates of `p` (`0.0 ..= n-1` inside the bounds).
    pub fn fractional_index(&self, p: Point) -> (f64, f64) {
        (
            (p.x - self.x_min) / self.dx(),
            (p.y - self.y_min) / self.dy(),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/density/grid.rs"]
mod tests;
