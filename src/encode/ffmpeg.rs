use std::ffi::OsString;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::encode::sink::{FrameOrder, FrameSink, SinkConfig, check_frame_size, ensure_parent_dir};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{TernvidError, TernvidResult};
use crate::render::backend::FrameRGBA;

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Target `.mp4`; replaced if it exists.
    pub out_path: PathBuf,
    /// Colour transparent pixels are composited over.
    pub background: [u8; 3],
}

impl FfmpegSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            background: [255, 255, 255],
        }
    }
}

/// A spawned encoder: raw RGBA frames go to stdin, stderr is collected on a side thread so
/// the pipe never fills up.
struct Encoder {
    child: Child,
    stdin: ChildStdin,
    stderr: JoinHandle<Vec<u8>>,
}

impl Encoder {
    fn spawn(args: Vec<OsString>) -> TernvidResult<Self> {
        let mut child = Command::new("ffmpeg")
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| TernvidError::encode(format!("cannot start ffmpeg: {e}")))?;
        let (Some(stdin), Some(mut stderr)) = (child.stdin.take(), child.stderr.take()) else {
            return Err(TernvidError::encode("ffmpeg pipes unavailable"));
        };
        let stderr = std::thread::spawn(move || {
            let mut log = Vec::new();
            // Read errors only lose diagnostic text.
            let _ = stderr.read_to_end(&mut log);
            log
        });
        Ok(Self {
            child,
            stdin,
            stderr,
        })
    }

    fn finish(self) -> TernvidResult<()> {
        let Self {
            mut child,
            stdin,
            stderr,
        } = self;
        drop(stdin);
        let status = child
            .wait()
            .map_err(|e| TernvidError::encode(format!("ffmpeg wait: {e}")))?;
        let log = stderr.join().unwrap_or_default();
        if status.success() {
            return Ok(());
        }
        Err(TernvidError::encode(format!(
            "ffmpeg exited with {status}: {}",
            String::from_utf8_lossy(&log).trim()
        )))
    }
}

/// H.264 MP4 through the system `ffmpeg`.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    encoder: Option<Encoder>,
    cfg: Option<SinkConfig>,
    order: FrameOrder,
}

impl FfmpegSink {
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            cfg: None,
            order: FrameOrder::default(),
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> TernvidResult<()> {
        cfg.validate()?;
        // yuv420p subsamples chroma 2x2.
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(TernvidError::validation(format!(
                "mp4 output needs even dimensions, got {}x{}",
                cfg.width, cfg.height
            )));
        }
        ensure_parent_dir(&self.opts.out_path)?;
        if !is_ffmpeg_on_path() {
            return Err(TernvidError::encode("ffmpeg not found on PATH"));
        }

        self.encoder = Some(Encoder::spawn(encoder_args(&cfg, &self.opts.out_path))?);
        tracing::debug!(path = %self.opts.out_path.display(), fps = cfg.fps, "ffmpeg started");
        self.cfg = Some(cfg);
        self.order.reset();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> TernvidResult<()> {
        let (Some(cfg), Some(encoder)) = (self.cfg.as_ref(), self.encoder.as_mut()) else {
            return Err(TernvidError::encode("mp4 sink is not open"));
        };
        check_frame_size(cfg, frame)?;
        self.order.accept(idx)?;
        encoder
            .stdin
            .write_all(&frame.flatten_onto(self.opts.background))
            .map_err(|e| TernvidError::encode(format!("frame {} to ffmpeg: {e}", idx.0)))
    }

    fn end(&mut self) -> TernvidResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| TernvidError::encode("mp4 sink is not open"))?;
        self.cfg = None;
        encoder.finish()?;
        tracing::info!(path = %self.opts.out_path.display(), "wrote mp4");
        Ok(())
    }
}

/// Command line for opaque RGBA8 frames on stdin.
#[rustfmt::skip]
pub(crate) fn encoder_args(cfg: &SinkConfig, out: &Path) -> Vec<OsString> {
    let size = format!("{}x{}", cfg.width, cfg.height);
    let rate = format_rate(cfg.fps);
    let mut args: Vec<OsString> = [
        "-y",
        "-loglevel", "error",
        "-f", "rawvideo",
        "-pix_fmt", "rgba",
        "-s", size.as_str(),
        "-r", rate.as_str(),
        "-i", "pipe:0",
        "-an",
        "-c:v", "libx264",
        "-pix_fmt", "yuv420p",
        "-movflags", "+faststart",
    ]
    .iter()
    .map(OsString::from)
    .collect();
    args.push(out.into());
    args
}

/// `-r` argument for a floating-point rate; whole rates are printed without a fraction.
pub(crate) fn format_rate(fps: f64) -> String {
    if fps.fract() == 0.0 {
        format!("{}", fps as u64)
    } else {
        format!("{fps}")
    }
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
