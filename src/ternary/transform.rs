//! Barycentric (ternary) to planar coordinate transform.
//!
//! The three-component simplex maps onto an equilateral-style triangle with the `A` vertex at
//! `(0, 1)`, `B` at `(-0.5, 0)` and `C` at `(0.5, 0)`:
//!
//! ```text
//! y = A / (A + B + C)
//! x = -0.5 * (1 - y) + C / (A + B + C)
//! ```

use crate::foundation::core::Point;
use crate::foundation::error::{TernvidError, TernvidResult};

/// Planar point derived from a [`CompositionTriplet`].
pub type PlanarPoint = Point;

/// Planar position of the pure-`A` vertex.
pub const VERTEX_A: PlanarPoint = Point::new(0.0, 1.0);
/// Planar position of the pure-`B` vertex.
pub const VERTEX_B: PlanarPoint = Point::new(-0.5, 0.0);
/// Planar position of the pure-`C` vertex.
pub const VERTEX_C: PlanarPoint = Point::new(0.5, 0.0);

/// Three non-negative component values, one per triangle vertex.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct CompositionTriplet {
    /// Top vertex component.
    pub a: f64,
    /// Left vertex component.
    pub b: f64,
    /// Right vertex component.
    pub c: f64,
}

impl CompositionTriplet {
    /// Build a triplet from its three components.
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Sum of the three components.
    pub fn sum(self) -> f64 {
        self.a + self.b + self.c
    }

    /// Check the triplet can be projected. `index` is only used for the diagnostic.
    pub fn check(self, index: usize) -> TernvidResult<()> {
        for (name, v) in [("A", self.a), ("B", self.b), ("C", self.c)] {
            if v.is_nan() {
                return Err(TernvidError::precondition(
                    index,
                    format!("component {name} is missing (NaN)"),
                ));
            }
            if !v.is_finite() {
                return Err(TernvidError::precondition(
                    index,
                    format!("component {name} is not finite ({v})"),
                ));
            }
            if v < 0.0 {
                return Err(TernvidError::precondition(
                    index,
                    format!("component {name} is negative ({v})"),
                ));
            }
        }
        if self.sum() <= 0.0 {
            return Err(TernvidError::precondition(
                index,
                "components sum to zero",
            ));
        }
        Ok(())
    }
}

impl From<[f64; 3]> for CompositionTriplet {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<CompositionTriplet> for [f64; 3] {
    fn from(t: CompositionTriplet) -> Self {
        [t.a, t.b, t.c]
    }
}

fn project(t: CompositionTriplet) -> PlanarPoint {
    let sum = t.sum();
    let y = t.a / sum;
    let x = -0.5 * (1.0 - y) + t.c / sum;
    Point::new(x, y)
}

/// Transform a single triplet.
pub fn to_planar(triplet: CompositionTriplet) -> TernvidResult<PlanarPoint> {
    triplet.check(0)?;
    Ok(project(triplet))
}

/// Transform an ordered sequence of triplets, one point per triplet, order preserved.
///
/// Fails on the first invalid triplet, reporting its position in `triplets`.
pub fn to_planar_many(triplets: &[CompositionTriplet]) -> TernvidResult<Vec<PlanarPoint>> {
    to_planar_many_from(triplets, 0)
}

/// Like [`to_planar_many`], with diagnostics offset by `base_index` so errors on a dataset
/// slice name the dataset index.
pub(crate) fn to_planar_many_from(
    triplets: &[CompositionTriplet],
    base_index: usize,
) -> TernvidResult<Vec<PlanarPoint>> {
    triplets
        .iter()
        .enumerate()
        .map(|(i, &t)| {
            t.check(base_index + i)?;
            Ok(project(t))
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/ternary/transform.rs"]
mod tests;
