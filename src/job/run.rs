use std::path::PathBuf;

use crate::density::estimator::{
    DensitySequence, estimate_frame, estimate_sequence, reference_scatter,
};
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::gif::{GifSink, GifSinkOpts};
use crate::encode::manifest::Manifest;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::encode::still::write_png;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{TernvidError, TernvidResult};
use crate::job::config::{JobConfig, VideoFormat};
use crate::render::backend::FrameRGBA;
use crate::render::scene::{FrameLabel, TernaryRenderer};
use crate::ternary::dataset::Dataset;

/// Files written by [`ContourJob::run`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOutputs {
    pub scatter: PathBuf,
    pub video: PathBuf,
    pub still: PathBuf,
    pub manifest: PathBuf,
    pub frames: u64,
}

/// A validated job bound to its dataset.
///
/// Construction runs every check; the density sequence is computed once, on first use, and
/// shared by every later render.
pub struct ContourJob {
    config: JobConfig,
    dataset: Dataset,
    renderer: TernaryRenderer,
    sequence: Option<DensitySequence>,
}

impl ContourJob {
    pub fn new(config: JobConfig, dataset: Dataset) -> TernvidResult<Self> {
        config.validate(&dataset)?;
        let renderer = TernaryRenderer::new(config.render_settings(), config.grid.bounds())?;
        Ok(Self {
            config,
            dataset,
            renderer,
            sequence: None,
        })
    }

    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Density fields of every frame.
    pub fn densities(&mut self) -> TernvidResult<&DensitySequence> {
        if self.sequence.is_none() {
            let seq = estimate_sequence(
                &self.dataset,
                self.config.window_spec()?,
                self.config.grid.clone(),
                &self.config.estimator_opts(),
            )?;
            self.sequence = Some(seq);
        }
        self.sequence
            .as_ref()
            .ok_or_else(|| TernvidError::validation("density sequence unavailable"))
    }

    /// Label of every frame, in frame order.
    pub fn labels(&self) -> TernvidResult<Vec<Option<String>>> {
        let positions = self.dataset.positions();
        self.config
            .window_spec()?
            .windows()
            .into_iter()
            .map(|w| self.config.display.format(w, positions))
            .collect()
    }

    fn frame_label(&self, frame: FrameIndex) -> TernvidResult<Option<FrameLabel>> {
        let window = self.config.window_spec()?.window(frame);
        let text = self
            .config
            .display
            .format(window, self.dataset.positions())?;
        Ok(text.map(|text| FrameLabel {
            text,
            anchor: self.config.display.anchor(),
        }))
    }

    /// Render one contour frame.
    ///
    /// Reads the cached sequence when there is one; otherwise only this frame's window is
    /// fitted and nothing is cached.
    pub fn render_frame(&mut self, frame: FrameIndex) -> TernvidResult<FrameRGBA> {
        if frame.0 >= self.config.steps as u64 {
            return Err(TernvidError::validation(format!(
                "frame {} is outside the {} configured steps",
                frame.0, self.config.steps
            )));
        }
        let label = self.frame_label(frame)?;
        if let Some(seq) = self.sequence.as_ref() {
            let field = seq.fields.get(frame.0 as usize).ok_or_else(|| {
                TernvidError::validation(format!("no density field for frame {}", frame.0))
            })?;
            return self
                .renderer
                .render_density(field, &seq.grid, label.as_ref());
        }
        let field = estimate_frame(
            &self.dataset,
            self.config.window_spec()?,
            &self.config.grid,
            frame,
            self.config.bandwidth,
        )?;
        self.renderer
            .render_density(&field, &self.config.grid, label.as_ref())
    }

    /// Render the static reference scatter.
    pub fn render_scatter(&mut self) -> TernvidResult<FrameRGBA> {
        let points = reference_scatter(
            &self.dataset,
            self.config.window_spec()?,
            self.config.scatter,
        )?;
        self.renderer.render_scatter(&points)
    }

    /// Render every frame into `sink`, in frame order. Returns the number of frames pushed.
    #[tracing::instrument(skip(self, sink))]
    pub fn render_range(&mut self, sink: &mut dyn FrameSink) -> TernvidResult<u64> {
        self.densities()?;
        let labels: Vec<Option<FrameLabel>> = (0..self.config.steps as u64)
            .map(|i| self.frame_label(FrameIndex(i)))
            .collect::<TernvidResult<_>>()?;
        let Some(seq) = self.sequence.as_ref() else {
            return Err(TernvidError::validation("density sequence unavailable"));
        };

        sink.begin(SinkConfig {
            width: self.config.canvas.width,
            height: self.config.canvas.height,
            fps: self.config.fps,
        })?;
        for (field, label) in seq.fields.iter().zip(&labels) {
            let frame = self
                .renderer
                .render_density(field, &seq.grid, label.as_ref())?;
            sink.push_frame(field.frame, &frame)?;
        }
        sink.end()?;
        Ok(seq.len() as u64)
    }

    /// Full run: reference scatter, video, last-frame still and manifest.
    #[tracing::instrument(skip(self))]
    pub fn run(&mut self) -> TernvidResult<RunOutputs> {
        tracing::info!(
            n = self.dataset.len(),
            steps = self.config.steps,
            "starting contour job"
        );
        self.densities()?;

        let scatter = self.config.scatter_path();
        let img = self.render_scatter()?;
        write_png(&scatter, &img)?;

        let video = self.config.video_path();
        let mut sink: Box<dyn FrameSink> = match self.config.video {
            VideoFormat::Gif => Box::new(GifSink::new(GifSinkOpts::new(&video))),
            VideoFormat::Mp4 => Box::new(FfmpegSink::new(FfmpegSinkOpts::new(&video))),
        };
        let frames = self.render_range(sink.as_mut())?;

        let still = self.config.still_path();
        let last = self.render_frame(FrameIndex(frames.saturating_sub(1)))?;
        write_png(&still, &last)?;

        let manifest = self.config.manifest_path();
        let labels = self.labels()?;
        let (levels, fps) = (self.config.levels, self.config.fps);
        let seq = self.densities()?;
        Manifest::from_sequence(seq, &labels, levels, fps)?.write(&manifest)?;

        tracing::info!(frames, video = %video.display(), "job finished");
        Ok(RunOutputs {
            scatter,
            video,
            still,
            manifest,
            frames,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/job/run.rs"]
mod tests;
