use std::sync::Arc;

use ndarray::Array2;
use rayon::prelude::*;

use crate::density::grid::Grid;
use crate::density::kde::{BandwidthRule, GaussianKde};
use crate::density::window::WindowSpec;
use crate::foundation::core::{FrameIndex, IndexRange};
use crate::foundation::error::{TernvidError, TernvidResult};
use crate::ternary::dataset::Dataset;
use crate::ternary::transform::PlanarPoint;

/// Density estimate of one window evaluated on the run's grid.
#[derive(Clone, Debug, PartialEq)]
pub struct DensityField {
    pub frame: FrameIndex,
    pub window: IndexRange,
    /// Shape `(nx, ny)`, indexed `[[ix, iy]]`.
    pub values: Array2<f64>,
}

impl DensityField {
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

/// Ordered per-frame fields of one run. `fields[i]` belongs to frame `i`.
#[derive(Clone, Debug)]
pub struct DensitySequence {
    pub grid: Arc<Grid>,
    pub fields: Vec<DensityField>,
}

impl DensitySequence {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Window boundary pairs in frame order.
    pub fn windows(&self) -> Vec<IndexRange> {
        self.fields.iter().map(|f| f.window).collect()
    }
}

/// Estimator options.
#[derive(Clone, Debug, Default)]
pub struct EstimatorOpts {
    pub bandwidth: BandwidthRule,
    /// Compute frames on a rayon pool.
    pub parallel: bool,
    /// Worker count for the parallel pool; `None` uses rayon's default.
    pub threads: Option<usize>,
}

/// Which points the reference scatter shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScatterSpan {
    /// `[start, start + width + steps)`: every window plus the last label's index.
    #[default]
    Windows,
    /// The whole dataset.
    All,
}

/// Fit and evaluate one frame.
pub fn estimate_frame(
    dataset: &Dataset,
    spec: WindowSpec,
    grid: &Grid,
    frame: FrameIndex,
    bandwidth: BandwidthRule,
) -> TernvidResult<DensityField> {
    let window = spec.window(frame);
    let points = dataset.planar_points(window.as_range())?;
    let kde = GaussianKde::fit(&points, bandwidth).map_err(|e| TernvidError::DegenerateWindow {
        frame: frame.0,
        start: window.start,
        end: window.end,
        reason: e.to_string(),
    })?;
    tracing::debug!(
        frame = frame.0,
        start = window.start,
        end = window.end,
        factor = kde.factor(),
        "fitted window"
    );
    Ok(DensityField {
        frame,
        window,
        values: kde.evaluate_grid(grid),
    })
}

/// Compute the density field of every window.
///
/// The window range and grid are validated before the first fit. Any failing frame aborts
/// the run; in parallel mode the reported error is the one with the lowest frame index.
#[tracing::instrument(skip(dataset, grid, opts), fields(n = dataset.len()))]
pub fn estimate_sequence(
    dataset: &Dataset,
    spec: WindowSpec,
    grid: Grid,
    opts: &EstimatorOpts,
) -> TernvidResult<DensitySequence> {
    spec.validate(dataset.len())?;
    grid.validate()?;
    let grid = Arc::new(grid);
    let frames: Vec<FrameIndex> = (0..spec.steps as u64).map(FrameIndex).collect();

    let results: Vec<TernvidResult<DensityField>> = if opts.parallel {
        let pool = build_thread_pool(opts.threads)?;
        pool.install(|| {
            frames
                .par_iter()
                .map(|&f| estimate_frame(dataset, spec, &grid, f, opts.bandwidth))
                .collect()
        })
    } else {
        let mut out = Vec::with_capacity(frames.len());
        for &f in &frames {
            let field = estimate_frame(dataset, spec, &grid, f, opts.bandwidth);
            let failed = field.is_err();
            out.push(field);
            if failed {
                break;
            }
        }
        out
    };

    let mut fields = Vec::with_capacity(results.len());
    for r in results {
        fields.push(r?);
    }
    tracing::info!(frames = fields.len(), "density sequence ready");
    Ok(DensitySequence { grid, fields })
}

/// Planar points for the static reference scatter.
pub fn reference_scatter(
    dataset: &Dataset,
    spec: WindowSpec,
    span: ScatterSpan,
) -> TernvidResult<Vec<PlanarPoint>> {
    match span {
        ScatterSpan::All => dataset.planar_points(0..dataset.len()),
        ScatterSpan::Windows => {
            spec.validate(dataset.len())?;
            dataset.planar_points(spec.span().as_range())
        }
    }
}

fn build_thread_pool(threads: Option<usize>) -> TernvidResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(TernvidError::validation(
            "estimator 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| TernvidError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/density/estimator.rs"]
mod tests;
