use crate::foundation::core::{FrameIndex, IndexRange};
use crate::foundation::error::{TernvidError, TernvidResult};

/// Sliding-window parameters: `steps` windows of `width` points, the first starting at
/// `start`, each advanced by one index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WindowSpec {
    pub start: usize,
    pub width: usize,
    pub steps: usize,
}

impl WindowSpec {
    pub fn new(start: usize, width: usize, steps: usize) -> TernvidResult<Self> {
        if width == 0 {
            return Err(TernvidError::validation("window width must be positive"));
        }
        if steps == 0 {
            return Err(TernvidError::validation("number of steps must be positive"));
        }
        Ok(Self {
            start,
            width,
            steps,
        })
    }

    /// Dataset length the spec needs: `start + width + steps`.
    ///
    /// The last window is `[start + steps - 1, start + width + steps - 1)` and a position label
    /// for it reads index `start + width + steps - 1`, so that index must exist.
    pub fn required_len(self) -> usize {
        self.start
            .saturating_add(self.width)
            .saturating_add(self.steps)
    }

    /// Check the spec against a dataset of `len` points.
    pub fn validate(self, len: usize) -> TernvidResult<()> {
        if self.width == 0 || self.steps == 0 {
            return Err(TernvidError::validation(
                "window width and number of steps must be positive",
            ));
        }
        let required = self.required_len();
        if required > len {
            return Err(TernvidError::ConfigRange {
                required,
                actual: len,
            });
        }
        Ok(())
    }

    /// Window of frame `i`: `[start + i, start + width + i)`.
    pub fn window(self, frame: FrameIndex) -> IndexRange {
        let i = frame.0 as usize;
        IndexRange {
            start: self.start + i,
            end: self.start + self.width + i,
        }
    }

    /// All windows in frame order.
    pub fn windows(self) -> Vec<IndexRange> {
        (0..self.steps as u64)
            .map(|i| self.window(FrameIndex(i)))
            .collect()
    }

    /// Indices the reference scatter covers, `[start, start + width + steps)`: every window
    /// plus the index the last label reads.
    pub fn span(self) -> IndexRange {
        IndexRange {
            start: self.start,
            end: self.required_len(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/density/window.rs"]
mod tests;
