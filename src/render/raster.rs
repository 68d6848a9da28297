use ndarray::Array2;

use crate::density::grid::Grid;
use crate::foundation::core::Point;
use crate::render::colormap::ColorMap;
use crate::render::view::PlotView;

pub(crate) const BACKGROUND: [u8; 4] = [255, 255, 255, 255];

/// Band of `value` among `levels` equal-width bands spanning `[0, max]`.
///
/// Values at or above `max` land in the top band; a non-positive `max` puts everything in
/// band 0.
pub fn band_index(value: f64, max: f64, levels: usize) -> usize {
    if levels <= 1 || !max.is_finite() || max <= 0.0 || !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let band = (value / max * levels as f64).floor();
    (band as usize).min(levels - 1)
}

/// Bilinear sample of `values` at planar point `p`; `None` outside the grid bounds.
pub fn sample_bilinear(values: &Array2<f64>, grid: &Grid, p: Point) -> Option<f64> {
    let (fx, fy) = grid.fractional_index(p);
    let (max_x, max_y) = ((grid.nx - 1) as f64, (grid.ny - 1) as f64);
    if !(0.0..=max_x).contains(&fx) || !(0.0..=max_y).contains(&fy) {
        return None;
    }
    let ix = (fx.floor() as usize).min(grid.nx - 2);
    let iy = (fy.floor() as usize).min(grid.ny - 2);
    let (tx, ty) = (fx - ix as f64, fy - iy as f64);
    let v00 = values[[ix, iy]];
    let v10 = values[[ix + 1, iy]];
    let v01 = values[[ix, iy + 1]];
    let v11 = values[[ix + 1, iy + 1]];
    let bottom = v00 + (v10 - v00) * tx;
    let top = v01 + (v11 - v01) * tx;
    Some(bottom + (top - bottom) * ty)
}

/// Filled-contour raster of one field at canvas resolution, opaque RGBA row-major.
///
/// The band scale runs from 0 to `max` (the frame's own peak); pixels outside the grid
/// take the background colour.
pub fn contour_bands(
    values: &Array2<f64>,
    max: f64,
    grid: &Grid,
    view: &PlotView,
    levels: usize,
    cmap: ColorMap,
) -> Vec<[u8; 4]> {
    let (w, h) = (view.canvas.width, view.canvas.height);
    let palette: Vec<[u8; 4]> = (0..levels.max(1))
        .map(|b| cmap.band_color(b, levels))
        .collect();
    let mut out = Vec::with_capacity(view.canvas.pixel_count());
    for py in 0..h {
        for px in 0..w {
            let p = view.unproject_pixel(px, py);
            let rgba = match sample_bilinear(values, grid, p) {
                Some(v) => palette[band_index(v, max, levels)],
                None => BACKGROUND,
            };
            out.push(rgba);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
