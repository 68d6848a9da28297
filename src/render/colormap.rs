/// Sequential colour scales for the filled-contour bands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMap {
    #[default]
    Blues,
    Viridis,
    Greys,
    Reds,
}

const BLUES: &[[u8; 3]] = &[
    [247, 251, 255],
    [222, 235, 247],
    [198, 219, 239],
    [158, 202, 225],
    [107, 174, 214],
    [66, 146, 198],
    [33, 113, 181],
    [8, 81, 156],
    [8, 48, 107],
];

const VIRIDIS: &[[u8; 3]] = &[
    [68, 1, 84],
    [72, 40, 120],
    [62, 74, 137],
    [49, 104, 142],
    [38, 130, 142],
    [31, 158, 137],
    [53, 183, 121],
    [109, 205, 89],
    [180, 222, 44],
    [253, 231, 37],
];

const GREYS: &[[u8; 3]] = &[
    [255, 255, 255],
    [240, 240, 240],
    [217, 217, 217],
    [189, 189, 189],
    [150, 150, 150],
    [115, 115, 115],
    [82, 82, 82],
    [37, 37, 37],
    [0, 0, 0],
];

const REDS: &[[u8; 3]] = &[
    [255, 245, 240],
    [254, 224, 210],
    [252, 187, 161],
    [252, 146, 114],
    [251, 106, 74],
    [239, 59, 44],
    [203, 24, 29],
    [165, 15, 21],
    [103, 0, 13],
];

/// Marker colour cycle of the reference scatter.
pub(crate) const TAB10: [[u8; 4]; 10] = [
    [31, 119, 180, 255],
    [255, 127, 14, 255],
    [44, 160, 44, 255],
    [214, 39, 40, 255],
    [148, 103, 189, 255],
    [140, 86, 75, 255],
    [227, 119, 194, 255],
    [127, 127, 127, 255],
    [188, 189, 34, 255],
    [23, 190, 207, 255],
];

impl ColorMap {
    fn table(self) -> &'static [[u8; 3]] {
        match self {
            ColorMap::Blues => BLUES,
            ColorMap::Viridis => VIRIDIS,
            ColorMap::Greys => GREYS,
            ColorMap::Reds => REDS,
        }
    }

    /// Opaque colour at `t` in `[0, 1]`; out-of-range and NaN inputs are clamped.
    pub fn sample(self, t: f64) -> [u8; 4] {
        let table = self.table();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * (table.len() - 1) as f64;
        let i = (pos.floor() as usize).min(table.len() - 2);
        let frac = pos - i as f64;
        let lerp = |a: u8, b: u8| -> u8 {
            (f64::from(a) + (f64::from(b) - f64::from(a)) * frac).round() as u8
        };
        let (lo, hi) = (table[i], table[i + 1]);
        [lerp(lo[0], hi[0]), lerp(lo[1], hi[1]), lerp(lo[2], hi[2]), 255]
    }

    /// Colour of band `band` out of `levels`, spread evenly over the full scale.
    pub fn band_color(self, band: usize, levels: usize) -> [u8; 4] {
        if levels <= 1 {
            return self.sample(0.0);
        }
        self.sample(band.min(levels - 1) as f64 / (levels - 1) as f64)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/colormap.rs"]
mod tests;
