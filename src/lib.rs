//! ternvid renders sliding-window kernel-density contour videos of ternary compositional data.
//!
//! The pipeline is a pure function from an ordered [`Dataset`] and a [`WindowSpec`] to an
//! immutable [`DensitySequence`], followed by CPU rendering and encoding:
//!
//! - Load a [`Dataset`] and a [`JobConfig`]
//! - Create a [`ContourJob`] (every parameter is validated up front)
//! - Run it, or render single frames / stream all frames into a [`FrameSink`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod density;
pub(crate) mod encode;
pub(crate) mod job;
pub(crate) mod render;
pub(crate) mod ternary;

pub use crate::foundation::core::{Affine, Canvas, FrameIndex, IndexRange, Point, Rect};
pub use crate::foundation::error::{TernvidError, TernvidResult};

pub use crate::density::estimator::{
    DensityField, DensitySequence, EstimatorOpts, ScatterSpan, estimate_frame, estimate_sequence,
    reference_scatter,
};
pub use crate::density::grid::Grid;
pub use crate::density::kde::{BandwidthRule, Degeneracy, GaussianKde};
pub use crate::density::window::WindowSpec;
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::gif::{GifSink, GifSinkOpts};
pub use crate::encode::manifest::{FrameRecord, Manifest};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::encode::still::write_png;
pub use crate::job::config::{JobConfig, VideoFormat};
pub use crate::job::run::{ContourJob, RunOutputs};
pub use crate::render::backend::FrameRGBA;
pub use crate::render::colormap::ColorMap;
pub use crate::render::label::WindowDisplay;
pub use crate::render::scene::{FrameLabel, RenderSettings, TernaryRenderer};
pub use crate::render::view::PlotView;
pub use crate::ternary::dataset::{Dataset, load_positions};
pub use crate::ternary::diagram::{DiagramKind, LineStyle, Overlay};
pub use crate::ternary::transform::{CompositionTriplet, PlanarPoint, to_planar, to_planar_many};
