use crate::foundation::core::Point;

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// `n` evenly spaced values from `start` to `end`, both endpoints included.
pub(crate) fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i + 1 == n { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Symmetric 2x2 matrix `[[xx, xy], [xy, yy]]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Sym2 {
    pub xx: f64,
    pub xy: f64,
    pub yy: f64,
}

impl Sym2 {
    /// Unbiased (n - 1) sample covariance. Callers guarantee `points.len() >= 2`.
    pub(crate) fn sample_covariance(points: &[Point]) -> (Point, Self) {
        let n = points.len() as f64;
        let (sx, sy) = points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        let mean = Point::new(sx / n, sy / n);

        let mut cov = Self {
            xx: 0.0,
            xy: 0.0,
            yy: 0.0,
        };
        for p in points {
            let dx = p.x - mean.x;
            let dy = p.y - mean.y;
            cov.xx += dx * dx;
            cov.xy += dx * dy;
            cov.yy += dy * dy;
        }
        let denom = n - 1.0;
        (mean, cov.scale(1.0 / denom))
    }

    pub(crate) fn scale(self, k: f64) -> Self {
        Self {
            xx: self.xx * k,
            xy: self.xy * k,
            yy: self.yy * k,
        }
    }

    pub(crate) fn det(self) -> f64 {
        self.xx * self.yy - self.xy * self.xy
    }

    pub(crate) fn trace(self) -> f64 {
        self.xx + self.yy
    }

    /// Eigenvalues in descending order.
    pub(crate) fn eigenvalues(self) -> (f64, f64) {
        let half_tr = 0.5 * self.trace();
        let disc = (0.25 * (self.xx - self.yy).powi(2) + self.xy * self.xy).sqrt();
        (half_tr + disc, half_tr - disc)
    }

    /// Unit eigenvector of the larger eigenvalue.
    pub(crate) fn major_axis(self) -> (f64, f64) {
        let (l1, _) = self.eigenvalues();
        let (vx, vy) = if self.xy.abs() > f64::EPSILON * l1.abs().max(1.0) {
            (l1 - self.yy, self.xy)
        } else if self.xx >= self.yy {
            (1.0, 0.0)
        } else {
            (0.0, 1.0)
        };
        let len = vx.hypot(vy);
        (vx / len, vy / len)
    }

    /// Raise every eigenvalue to at least `floor`, keeping the eigenvectors.
    pub(crate) fn with_eigen_floor(self, floor: f64) -> Self {
        let (l1, l2) = self.eigenvalues();
        if l2 >= floor {
            return self;
        }
        let (ux, uy) = self.major_axis();
        let (wx, wy) = (-uy, ux);
        let l1 = l1.max(floor);
        let l2 = floor;
        Self {
            xx: l1 * ux * ux + l2 * wx * wx,
            xy: l1 * ux * uy + l2 * wx * wy,
            yy: l1 * uy * uy + l2 * wy * wy,
        }
    }

    pub(crate) fn inverse(self) -> Option<Self> {
        let det = self.det();
        if !det.is_finite() || det <= 0.0 {
            return None;
        }
        Some(Self {
            xx: self.yy / det,
            xy: -self.xy / det,
            yy: self.xx / det,
        })
    }

    /// Quadratic form `v^T M v`.
    pub(crate) fn quad_form(self, dx: f64, dy: f64) -> f64 {
        self.xx * dx * dx + 2.0 * self.xy * dx * dy + self.yy * dy * dy
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
