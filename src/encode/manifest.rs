use std::path::Path;

use crate::density::estimator::DensitySequence;
use crate::density::grid::Grid;
use crate::encode::sink::ensure_parent_dir;
use crate::foundation::core::IndexRange;
use crate::foundation::error::{TernvidError, TernvidResult};

/// Per-frame entry of the run manifest.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameRecord {
    pub index: u64,
    pub window: IndexRange,
    pub label: Option<String>,
    pub max_density: f64,
}

/// JSON description of a rendered sequence.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Manifest {
    pub grid: Grid,
    pub levels: usize,
    pub fps: f64,
    pub frames: Vec<FrameRecord>,
}

impl Manifest {
    /// Build from a sequence and its labels (`labels[i]` belongs to frame `i`).
    pub fn from_sequence(
        seq: &DensitySequence,
        labels: &[Option<String>],
        levels: usize,
        fps: f64,
    ) -> TernvidResult<Self> {
        if labels.len() != seq.len() {
            return Err(TernvidError::validation(format!(
                "manifest needs one label per frame ({} labels, {} frames)",
                labels.len(),
                seq.len()
            )));
        }
        let frames = seq
            .fields
            .iter()
            .zip(labels)
            .map(|(f, label)| FrameRecord {
                index: f.frame.0,
                window: f.window,
                label: label.clone(),
                max_density: f.max(),
            })
            .collect();
        Ok(Self {
            grid: (*seq.grid).clone(),
            levels,
            fps,
            frames,
        })
    }

    pub fn write(&self, path: &Path) -> TernvidResult<()> {
        use anyhow::Context as _;

        ensure_parent_dir(path)?;
        let json = serde_json::to_vec_pretty(self)
            .map_err(|e| TernvidError::serde(format!("manifest encode failed: {e}")))?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write manifest '{}'", path.display()))?;
        tracing::info!(path = %path.display(), frames = self.frames.len(), "wrote manifest");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/manifest.rs"]
mod tests;
