//! Two-dimensional Gaussian kernel density estimation.
//!
//! The kernel covariance is the window's unbiased sample covariance scaled by the square of a
//! bandwidth factor that depends only on the number of points:
//!
//! - Scott: `n^(-1/(d+4))`
//! - Silverman: `(n * (d + 2) / 4)^(-1/(d+4))`
//!
//! with `d = 2`. The density at `x` is the mean of the kernels centred on every point.

use ndarray::Array2;

use crate::density::grid::Grid;
use crate::foundation::core::Point;
use crate::foundation::math::Sym2;

const DIMS: f64 = 2.0;

/// Eigenvalue ratio below which the covariance is treated as rank-deficient (collinear points).
const COLLINEAR_RATIO: f64 = 1e-12;
/// Variance given to the null direction when a window holds exactly two distinct points,
/// relative to the dominant variance.
const COLLINEAR_FLOOR: f64 = 1e-2;

/// Bandwidth-selection rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandwidthRule {
    #[default]
    Scott,
    Silverman,
}

impl BandwidthRule {
    pub fn factor(self, n: usize) -> f64 {
        let n = n as f64;
        match self {
            BandwidthRule::Scott => n.powf(-1.0 / (DIMS + 4.0)),
            BandwidthRule::Silverman => (n * (DIMS + 2.0) / 4.0).powf(-1.0 / (DIMS + 4.0)),
        }
    }
}

/// Reasons a point set cannot be fitted.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Degeneracy {
    #[error("window holds {0} point(s); at least 2 are required")]
    TooFewPoints(usize),
    #[error("fewer than 2 distinct planar points")]
    NoDistinctPoints,
    #[error("three or more distinct points are collinear")]
    Collinear,
    #[error("points have zero spread")]
    ZeroSpread,
    #[error("non-finite planar coordinates")]
    NonFinite,
}

/// Fitted Gaussian KDE.
#[derive(Clone, Debug)]
pub struct GaussianKde {
    points: Vec<Point>,
    factor: f64,
    kernel_cov: Sym2,
    kernel_inv: Sym2,
    norm: f64,
}

impl GaussianKde {
    /// Fit a KDE to `points`.
    pub fn fit(points: &[Point], rule: BandwidthRule) -> Result<Self, Degeneracy> {
        if points.len() < 2 {
            return Err(Degeneracy::TooFewPoints(points.len()));
        }
        if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(Degeneracy::NonFinite);
        }
        let distinct = distinct_up_to_three(points);
        if distinct < 2 {
            return Err(Degeneracy::NoDistinctPoints);
        }

        let (_, data_cov) = Sym2::sample_covariance(points);
        let (major, minor) = data_cov.eigenvalues();
        if !major.is_finite() || major <= 0.0 {
            return Err(Degeneracy::ZeroSpread);
        }
        // Two distinct points always lie on a line; more than two on a line cannot be fitted.
        let data_cov = if minor <= COLLINEAR_RATIO * major {
            if distinct > 2 {
                return Err(Degeneracy::Collinear);
            }
            data_cov.with_eigen_floor(COLLINEAR_FLOOR * major)
        } else {
            data_cov
        };

        let factor = rule.factor(points.len());
        let kernel_cov = data_cov.scale(factor * factor);
        let kernel_inv = kernel_cov.inverse().ok_or(Degeneracy::ZeroSpread)?;
        let norm = 1.0 / (2.0 * std::f64::consts::PI * kernel_cov.det().sqrt());

        Ok(Self {
            points: points.to_vec(),
            factor,
            kernel_cov,
            kernel_inv,
            norm,
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Kernel covariance as `[[xx, xy], [xy, yy]]`.
    pub fn covariance(&self) -> [[f64; 2]; 2] {
        let c = self.kernel_cov;
        [[c.xx, c.xy], [c.xy, c.yy]]
    }

    /// Density at `at`.
    pub fn evaluate(&self, at: Point) -> f64 {
        let sum: f64 = self
            .points
            .iter()
            .map(|p| {
                let q = self.kernel_inv.quad_form(at.x - p.x, at.y - p.y);
                (-0.5 * q).exp()
            })
            .sum();
        self.norm * sum / self.points.len() as f64
    }

    /// Density at every point of `grid`, shape `(nx, ny)`, indexed `[[ix, iy]]`.
    pub fn evaluate_grid(&self, grid: &Grid) -> Array2<f64> {
        let xs = grid.xs();
        let ys = grid.ys();
        Array2::from_shape_fn(grid.shape(), |(ix, iy)| {
            self.evaluate(Point::new(xs[ix], ys[iy]))
        })
    }
}

/// Number of distinct points, counting no further than three.
fn distinct_up_to_three(points: &[Point]) -> usize {
    let mut seen: Vec<Point> = Vec::with_capacity(3);
    for p in points {
        if !seen.contains(p) {
            seen.push(*p);
            if seen.len() == 3 {
                break;
            }
        }
    }
    seen.len()
}

#[cfg(test)]
#[path = "../../tests/unit/density/kde.rs"]
mod tests;
