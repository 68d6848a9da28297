use std::path::{Path, PathBuf};

use crate::density::estimator::{EstimatorOpts, ScatterSpan};
use crate::density::grid::Grid;
use crate::density::kde::BandwidthRule;
use crate::density::window::WindowSpec;
use crate::foundation::core::Canvas;
use crate::foundation::error::{TernvidError, TernvidResult};
use crate::render::colormap::ColorMap;
use crate::render::label::WindowDisplay;
use crate::render::scene::RenderSettings;
use crate::ternary::dataset::Dataset;
use crate::ternary::diagram::DiagramKind;

/// Container of the animated output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoFormat {
    #[default]
    Gif,
    /// H.264 through the system `ffmpeg`.
    Mp4,
}

impl VideoFormat {
    pub fn extension(self) -> &'static str {
        match self {
            VideoFormat::Gif => "gif",
            VideoFormat::Mp4 => "mp4",
        }
    }
}

/// One contour-video job, as loaded from JSON.
///
/// `window_width`, `steps`, `start_index`, `levels`, `fps`, `display` and `diagram` must be
/// given; everything else
/// has a default.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    pub window_width: usize,
    pub steps: usize,
    pub start_index: usize,
    pub levels: usize,
    pub fps: f64,
    pub display: WindowDisplay,
    pub diagram: DiagramKind,
    #[serde(default)]
    pub colormap: ColorMap,
    #[serde(default)]
    pub bandwidth: BandwidthRule,
    #[serde(default)]
    pub grid: Grid,
    #[serde(default)]
    pub canvas: Canvas,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_base_name")]
    pub base_name: String,
    #[serde(default)]
    pub video: VideoFormat,
    #[serde(default)]
    pub parallel: bool,
    #[serde(default)]
    pub threads: Option<usize>,
    #[serde(default)]
    pub scatter: ScatterSpan,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

fn default_base_name() -> String {
    "ternvid".to_string()
}

impl JobConfig {
    /// Config with defaults for everything but the required fields.
    pub fn new(
        window_width: usize,
        steps: usize,
        levels: usize,
        fps: f64,
        diagram: DiagramKind,
    ) -> Self {
        Self {
            window_width,
            steps,
            start_index: 0,
            levels,
            fps,
            display: WindowDisplay::default(),
            diagram,
            colormap: ColorMap::default(),
            bandwidth: BandwidthRule::default(),
            grid: Grid::default(),
            canvas: Canvas::default(),
            output_dir: default_output_dir(),
            base_name: default_base_name(),
            video: VideoFormat::default(),
            parallel: false,
            threads: None,
            scatter: ScatterSpan::default(),
        }
    }

    pub fn from_json_str(s: &str) -> TernvidResult<Self> {
        serde_json::from_str(s).map_err(|e| TernvidError::serde(format!("job config: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> TernvidResult<Self> {
        use anyhow::Context as _;

        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read job config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Checks that need no dataset.
    pub fn validate_params(&self) -> TernvidResult<()> {
        WindowSpec::new(self.start_index, self.window_width, self.steps)?;
        if self.levels == 0 {
            return Err(TernvidError::validation("contour levels must be >= 1"));
        }
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(TernvidError::validation("fps must be finite and positive"));
        }
        self.grid.validate()?;
        self.canvas.validate()?;
        if self.video == VideoFormat::Mp4
            && (!self.canvas.width.is_multiple_of(2) || !self.canvas.height.is_multiple_of(2))
        {
            return Err(TernvidError::validation(
                "mp4 output needs an even canvas width and height",
            ));
        }
        if self.threads == Some(0) {
            return Err(TernvidError::validation("'threads' must be >= 1 when set"));
        }
        if self.base_name.is_empty() {
            return Err(TernvidError::validation("base_name must not be empty"));
        }
        Ok(())
    }

    /// Every check that can run before computation starts.
    pub fn validate(&self, dataset: &Dataset) -> TernvidResult<()> {
        self.validate_params()?;
        self.window_spec()?.validate(dataset.len())?;
        if self.display == WindowDisplay::Distance {
            match dataset.positions() {
                None => {
                    return Err(TernvidError::validation(
                        "display mode 'distance' needs a positions array",
                    ));
                }
                Some(p) if p.len() != dataset.len() => {
                    return Err(TernvidError::validation(format!(
                        "positions array has {} entries, dataset has {}",
                        p.len(),
                        dataset.len()
                    )));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    pub fn window_spec(&self) -> TernvidResult<WindowSpec> {
        WindowSpec::new(self.start_index, self.window_width, self.steps)
    }

    pub fn estimator_opts(&self) -> EstimatorOpts {
        EstimatorOpts {
            bandwidth: self.bandwidth,
            parallel: self.parallel,
            threads: self.threads,
        }
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            canvas: self.canvas,
            diagram: self.diagram,
            colormap: self.colormap,
            levels: self.levels,
        }
    }

    pub fn scatter_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}_Ternary_AllDataPoints.png", self.base_name))
    }

    pub fn video_path(&self) -> PathBuf {
        self.output_dir.join(format!(
            "{}_Ternary_Contour_Video_{}Axis.{}",
            self.base_name,
            self.diagram.file_tag(),
            self.video.extension()
        ))
    }

    pub fn still_path(&self) -> PathBuf {
        self.output_dir.join(format!(
            "{}_Ternary_Contour_Still_{}Axis.png",
            self.base_name,
            self.diagram.file_tag()
        ))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}_Ternary_Contour_Frames.json", self.base_name))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/job/config.rs"]
mod tests;
