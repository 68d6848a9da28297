use crate::foundation::error::{TernvidError, TernvidResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Zero-based animation frame number.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open index range `[start, end)` over the dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct IndexRange {
    pub start: usize,
    pub end: usize, // exclusive
}

impl IndexRange {
    pub fn new(start: usize, end: usize) -> TernvidResult<Self> {
        if start > end {
            return Err(TernvidError::validation("IndexRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    pub fn contains(self, idx: usize) -> bool {
        self.start <= idx && idx < self.end
    }

    pub fn shift(self, delta: usize) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }

    pub fn as_range(self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Output raster size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 640,
            height: 640,
        }
    }
}

impl Canvas {
    pub fn validate(self) -> TernvidResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TernvidError::validation("canvas width/height must be non-zero"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(TernvidError::validation("canvas width/height must fit in u16"));
        }
        Ok(())
    }

    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
