//! Ordered compositional datasets and their loaders.
//!
//! Order is meaningful: index `i` is the `i`-th sample along the transect and every window is a
//! contiguous index range over it. Loaders never reorder, drop or repair rows; missing values
//! are reported with their row index instead.

use std::{
    fs::File,
    io::{BufRead as _, BufReader},
    path::Path,
};

use anyhow::Context as _;

use crate::foundation::error::{TernvidError, TernvidResult};
use crate::ternary::transform::{CompositionTriplet, PlanarPoint, to_planar_many_from};

/// Ordered sequence of triplets with an optional aligned position array.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    triplets: Vec<CompositionTriplet>,
    positions: Option<Vec<f64>>,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum DatasetJson {
    Bare(Vec<CompositionTriplet>),
    Object {
        triplets: Vec<CompositionTriplet>,
        #[serde(default)]
        positions: Option<Vec<f64>>,
    },
}

impl Dataset {
    /// Build a dataset, checking every triplet.
    pub fn new(triplets: Vec<CompositionTriplet>) -> TernvidResult<Self> {
        if triplets.is_empty() {
            return Err(TernvidError::validation("dataset must contain at least one triplet"));
        }
        for (i, t) in triplets.iter().enumerate() {
            t.check(i)?;
        }
        Ok(Self {
            triplets,
            positions: None,
        })
    }

    /// Attach a physical position per triplet (e.g. distance along a line scan).
    pub fn with_positions(mut self, positions: Vec<f64>) -> TernvidResult<Self> {
        if positions.len() != self.triplets.len() {
            return Err(TernvidError::validation(format!(
                "position array has {} entries, dataset has {} triplets",
                positions.len(),
                self.triplets.len()
            )));
        }
        if let Some(i) = positions.iter().position(|p| !p.is_finite()) {
            return Err(TernvidError::precondition(i, "position value is not finite"));
        }
        self.positions = Some(positions);
        Ok(self)
    }

    /// Load a dataset from `.json` or delimited text, chosen by extension.
    pub fn from_path(path: impl AsRef<Path>) -> TernvidResult<Self> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let f = File::open(path).with_context(|| format!("open dataset '{}'", path.display()))?;
        let r = BufReader::new(f);
        if is_json {
            Self::from_json_reader(r)
        } else {
            Self::from_delimited_reader(r)
        }
    }

    /// Parse `[[a, b, c], ...]` or `{"triplets": [...], "positions": [...]}`.
    pub fn from_json_reader(r: impl std::io::Read) -> TernvidResult<Self> {
        let parsed: DatasetJson = serde_json::from_reader(r)
            .map_err(|e| TernvidError::serde(format!("parse dataset JSON: {e}")))?;
        match parsed {
            DatasetJson::Bare(triplets) => Self::new(triplets),
            DatasetJson::Object {
                triplets,
                positions,
            } => {
                let ds = Self::new(triplets)?;
                match positions {
                    Some(p) => ds.with_positions(p),
                    None => Ok(ds),
                }
            }
        }
    }

    /// Parse delimited rows `a b c [position]`.
    ///
    /// Fields may be separated by commas, semicolons, tabs or spaces. Blank lines and lines
    /// starting with `#` are skipped; a first data line that does not parse as numbers is taken
    /// as a header. Rows must all have the same column count (3 or 4).
    pub fn from_delimited_reader(r: impl std::io::BufRead) -> TernvidResult<Self> {
        let mut triplets = Vec::new();
        let mut positions = Vec::new();
        let mut columns: Option<usize> = None;
        let mut seen_first = false;

        for (line_no, line) in r.lines().enumerate() {
            let line = line.with_context(|| format!("read dataset line {}", line_no + 1))?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = trimmed
                .split(|c: char| c == ',' || c == ';' || c == '\t' || c == ' ')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            let parsed: Result<Vec<f64>, _> = fields.iter().map(|s| parse_field(s)).collect();

            let values = match parsed {
                Ok(v) => v,
                Err(_) if !seen_first => {
                    seen_first = true;
                    continue;
                }
                Err(e) => {
                    return Err(TernvidError::validation(format!(
                        "dataset line {}: {e}",
                        line_no + 1
                    )));
                }
            };
            seen_first = true;

            if values.len() != 3 && values.len() != 4 {
                return Err(TernvidError::validation(format!(
                    "dataset line {}: expected 3 or 4 columns, got {}",
                    line_no + 1,
                    values.len()
                )));
            }
            match columns {
                None => columns = Some(values.len()),
                Some(n) if n != values.len() => {
                    return Err(TernvidError::validation(format!(
                        "dataset line {}: expected {n} columns like the first row, got {}",
                        line_no + 1,
                        values.len()
                    )));
                }
                Some(_) => {}
            }

            triplets.push(CompositionTriplet::new(values[0], values[1], values[2]));
            if let Some(&p) = values.get(3) {
                positions.push(p);
            }
        }

        let ds = Self::new(triplets)?;
        if positions.is_empty() {
            Ok(ds)
        } else {
            ds.with_positions(positions)
        }
    }

    /// Number of triplets.
    pub fn len(&self) -> usize {
        self.triplets.len()
    }

    /// Always `false` for a constructed dataset; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.triplets.is_empty()
    }

    /// Triplets in dataset order.
    pub fn triplets(&self) -> &[CompositionTriplet] {
        &self.triplets
    }

    /// Aligned positions, if the dataset carries them.
    pub fn positions(&self) -> Option<&[f64]> {
        self.positions.as_deref()
    }

    /// Planar points of `range`, with diagnostics naming dataset indices.
    pub fn planar_points(&self, range: std::ops::Range<usize>) -> TernvidResult<Vec<PlanarPoint>> {
        let slice = self.triplets.get(range.clone()).ok_or_else(|| TernvidError::ConfigRange {
            required: range.end,
            actual: self.triplets.len(),
        })?;
        to_planar_many_from(slice, range.start)
    }
}

fn parse_field(s: &str) -> Result<f64, String> {
    // "nan" parses as f64::NAN; keep it so the precondition check reports the row.
    s.parse::<f64>()
        .map_err(|_| format!("'{s}' is not a number"))
}

/// Load a position array: JSON array, or one number per line.
pub fn load_positions(path: impl AsRef<Path>) -> TernvidResult<Vec<f64>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open positions '{}'", path.display()))?;
    let r = BufReader::new(f);
    if path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
    {
        return serde_json::from_reader(r)
            .map_err(|e| TernvidError::serde(format!("parse positions JSON: {e}")));
    }

    let mut out = Vec::new();
    for (line_no, line) in r.lines().enumerate() {
        let line = line.with_context(|| format!("read positions line {}", line_no + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let v = parse_field(trimmed).map_err(|e| {
            TernvidError::validation(format!("positions line {}: {e}", line_no + 1))
        })?;
        out.push(v);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/ternary/dataset.rs"]
mod tests;
