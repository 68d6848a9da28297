use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Duration;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use crate::encode::sink::{FrameOrder, FrameSink, SinkConfig, check_frame_size, ensure_parent_dir};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{TernvidError, TernvidResult};
use crate::render::backend::FrameRGBA;

/// Options for [`GifSink`].
#[derive(Clone, Debug)]
pub struct GifSinkOpts {
    pub out_path: PathBuf,
    /// Quantizer speed, 1 (best) ..= 30 (fastest).
    pub speed: i32,
    /// Colour transparent pixels are composited over.
    pub background: [u8; 3],
}

impl GifSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            speed: 10,
            background: [255, 255, 255],
        }
    }
}

/// Looping animated GIF written frame by frame.
pub struct GifSink {
    opts: GifSinkOpts,
    encoder: Option<GifEncoder<BufWriter<File>>>,
    delay: Delay,
    cfg: Option<SinkConfig>,
    order: FrameOrder,
    frames: u64,
}

impl GifSink {
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            delay: Delay::from_numer_denom_ms(100, 1),
            cfg: None,
            order: FrameOrder::default(),
            frames: 0,
        }
    }
}

/// Per-frame delay for `fps` (GIF delays have 10 ms resolution).
pub(crate) fn frame_delay(fps: f64) -> Delay {
    Delay::from_saturating_duration(Duration::from_secs_f64(1.0 / fps))
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> TernvidResult<()> {
        cfg.validate()?;
        if !(1..=30).contains(&self.opts.speed) {
            return Err(TernvidError::validation("gif speed must be in 1..=30"));
        }
        ensure_parent_dir(&self.opts.out_path)?;
        let file = {
            use anyhow::Context as _;
            File::create(&self.opts.out_path).with_context(|| {
                format!("failed to create '{}'", self.opts.out_path.display())
            })?
        };
        let mut encoder = GifEncoder::new_with_speed(BufWriter::new(file), self.opts.speed);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| TernvidError::encode(format!("gif repeat setup failed: {e}")))?;

        self.delay = frame_delay(cfg.fps);
        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.order.reset();
        self.frames = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> TernvidResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| TernvidError::encode("gif sink not started"))?;
        check_frame_size(cfg, frame)?;
        self.order.accept(idx)?;

        let rgba = frame.flatten_onto(self.opts.background);
        let img = RgbaImage::from_raw(frame.width, frame.height, rgba)
            .ok_or_else(|| TernvidError::encode("frame buffer does not match its size"))?;

        let Some(encoder) = self.encoder.as_mut() else {
            return Err(TernvidError::encode("gif sink is already finalized"));
        };
        encoder
            .encode_frame(Frame::from_parts(img, 0, 0, self.delay))
            .map_err(|e| TernvidError::encode(format!("failed to encode gif frame: {e}")))?;
        self.frames += 1;
        Ok(())
    }

    fn end(&mut self) -> TernvidResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| TernvidError::encode("gif sink not started"))?;
        // The trailer is written when the encoder drops.
        drop(encoder);
        tracing::info!(
            path = %self.opts.out_path.display(),
            frames = self.frames,
            "wrote gif"
        );
        self.cfg = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
