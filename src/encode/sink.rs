use crate::foundation::core::FrameIndex;
use crate::foundation::error::{TernvidError, TernvidResult};
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    pub width: u32,
    pub height: u32,
    /// Playback rate in frames per second.
    pub fps: f64,
}

impl SinkConfig {
    pub fn validate(&self) -> TernvidResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TernvidError::validation("sink width/height must be non-zero"));
        }
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(TernvidError::validation("fps must be finite and positive"));
        }
        Ok(())
    }
}

/// Sink contract for consuming rendered frames.
///
/// `push_frame` must be called in strictly increasing `FrameIndex` order between one `begin`
/// and one `end`.
pub trait FrameSink: Send {
    fn begin(&mut self, cfg: SinkConfig) -> TernvidResult<()>;
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> TernvidResult<()>;
    fn end(&mut self) -> TernvidResult<()>;
}

/// Tracks the last accepted frame of a sink.
#[derive(Debug, Default, Clone)]
pub(crate) struct FrameOrder {
    last: Option<FrameIndex>,
}

impl FrameOrder {
    pub(crate) fn accept(&mut self, idx: FrameIndex) -> TernvidResult<()> {
        if let Some(last) = self.last
            && idx.0 <= last.0
        {
            return Err(TernvidError::encode(format!(
                "out-of-order frame index {} after {}",
                idx.0, last.0
            )));
        }
        self.last = Some(idx);
        Ok(())
    }

    pub(crate) fn reset(&mut self) {
        self.last = None;
    }
}

pub(crate) fn check_frame_size(cfg: &SinkConfig, frame: &FrameRGBA) -> TernvidResult<()> {
    if frame.width != cfg.width || frame.height != cfg.height {
        return Err(TernvidError::validation(format!(
            "frame size mismatch: got {}x{}, expected {}x{}",
            frame.width, frame.height, cfg.width, cfg.height
        )));
    }
    if frame.data.len() != (frame.width as usize) * (frame.height as usize) * 4 {
        return Err(TernvidError::validation(
            "frame.data size mismatch with width*height*4",
        ));
    }
    Ok(())
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    order: FrameOrder,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> TernvidResult<()> {
        cfg.validate()?;
        self.cfg = Some(cfg);
        self.order.reset();
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> TernvidResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| TernvidError::encode("in-memory sink not started"))?;
        check_frame_size(cfg, frame)?;
        self.order.accept(idx)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> TernvidResult<()> {
        if self.cfg.is_none() {
            return Err(TernvidError::encode("in-memory sink not started"));
        }
        self.finished = true;
        Ok(())
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &std::path::Path) -> TernvidResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
