//! Window-position labels: formatting and a compact bitmap glyph set to draw them.

use crate::foundation::core::{IndexRange, Point, Rect};
use crate::foundation::error::{TernvidError, TernvidResult};

/// How a frame identifies its window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowDisplay {
    /// `[start - end]` in data indices.
    #[default]
    Index,
    /// `[p(start) - p(end)nm]` using the aligned position array, truncated to integers.
    Distance,
    None,
}

impl WindowDisplay {
    /// Label for `window`, or `None` when labels are off.
    ///
    /// `end` is the window's exclusive end index; in distance mode that index must exist in
    /// `positions`.
    pub fn format(
        self,
        window: IndexRange,
        positions: Option<&[f64]>,
    ) -> TernvidResult<Option<String>> {
        match self {
            WindowDisplay::None => Ok(None),
            WindowDisplay::Index => Ok(Some(format!("[{} - {}]", window.start, window.end))),
            WindowDisplay::Distance => {
                let positions = positions.ok_or_else(|| {
                    TernvidError::validation("distance labels need a positions array")
                })?;
                let at = |i: usize| -> TernvidResult<i64> {
                    positions.get(i).map(|p| p.trunc() as i64).ok_or_else(|| {
                        TernvidError::validation(format!(
                            "positions array has no entry for index {i} (len {})",
                            positions.len()
                        ))
                    })
                };
                Ok(Some(format!(
                    "[{} - {}nm]",
                    at(window.start)?,
                    at(window.end)?
                )))
            }
        }
    }

    /// Planar anchor of the label's lower-left corner.
    pub fn anchor(self) -> Point {
        match self {
            WindowDisplay::Distance => Point::new(0.32, 0.9),
            _ => Point::new(0.38, 0.9),
        }
    }
}

const GLYPH_W: usize = 3;
const GLYPH_H: usize = 5;
const ADVANCE: f64 = 4.0;

/// 3x5 bitmaps, one `u8` per row, bit 2 is the leftmost column.
fn glyph(c: char) -> Option<[u8; GLYPH_H]> {
    Some(match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        '[' => [0b110, 0b100, 0b100, 0b100, 0b110],
        ']' => [0b011, 0b001, 0b001, 0b001, 0b011],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ' ' => [0; GLYPH_H],
        'n' => [0b000, 0b110, 0b101, 0b101, 0b101],
        'm' => [0b000, 0b111, 0b111, 0b101, 0b101],
        _ => return None,
    })
}

/// Pixel-space rectangles that draw `text` with its lower-left corner at `origin`.
///
/// `cell` is the side of one glyph dot in pixels.
pub fn glyph_rects(text: &str, origin: Point, cell: f64) -> TernvidResult<Vec<Rect>> {
    let top = origin.y - GLYPH_H as f64 * cell;
    let mut out = Vec::new();
    for (n, c) in text.chars().enumerate() {
        let rows = glyph(c)
            .ok_or_else(|| TernvidError::render(format!("no glyph for character {c:?}")))?;
        let x0 = origin.x + n as f64 * ADVANCE * cell;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_W {
                if bits & (1 << (GLYPH_W - 1 - col)) == 0 {
                    continue;
                }
                let x = x0 + col as f64 * cell;
                let y = top + row as f64 * cell;
                out.push(Rect::new(x, y, x + cell, y + cell));
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/label.rs"]
mod tests;
