//! Diagram label-sets: which mineral reference geometry is drawn on top of the ternary frame.

use crate::foundation::core::Point;

/// Closed set of supported ternary diagrams.
///
/// Vertex assignment (top / left / right):
/// - `Silicate`: Si+Al / Fe / Mg
/// - `SilicateHydration`: Si+Al / O / Mg+Fe
/// - `Sulfide`: S / Fe / Ni
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagramKind {
    Silicate,
    SilicateHydration,
    Sulfide,
}

/// Dash pattern of a reference line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

/// One piece of reference geometry, in planar diagram coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum Overlay {
    Line {
        from: Point,
        to: Point,
        style: LineStyle,
        rgba: [u8; 4],
        width: f64,
    },
    Marker {
        at: Point,
        radius: f64,
        rgba: [u8; 4],
    },
}

const DIM_GREY: [u8; 4] = [105, 105, 105, 255];

impl DiagramKind {
    /// Suffix used in output file names (`..._<name>Axis.gif`).
    pub fn file_tag(self) -> &'static str {
        match self {
            DiagramKind::Silicate => "silicate",
            DiagramKind::SilicateHydration => "silicateHydration",
            DiagramKind::Sulfide => "sulfide",
        }
    }

    /// Vertex component names, top / left / right.
    pub fn vertex_names(self) -> [&'static str; 3] {
        match self {
            DiagramKind::Silicate => ["Si + Al", "Fe", "Mg"],
            DiagramKind::SilicateHydration => ["Si + Al", "O", "Mg + Fe"],
            DiagramKind::Sulfide => ["S", "Fe", "Ni"],
        }
    }

    /// Stoichiometric reference lines and mineral markers.
    pub fn overlays(self) -> Vec<Overlay> {
        let line = |x: f64, y: f64, style| Overlay::Line {
            from: Point::new(x, y),
            to: Point::new(-x, y),
            style,
            rgba: DIM_GREY,
            width: 1.0,
        };
        match self {
            // Serpentine, saponite, olivine, pyroxene.
            DiagramKind::Silicate => vec![
                line(0.29, 0.4, LineStyle::Dotted),
                line(0.21, 0.57, LineStyle::Dotted),
                line(0.329, 0.333, LineStyle::Dashed),
                line(0.24, 0.5, LineStyle::Dashed),
            ],
            DiagramKind::SilicateHydration => vec![Overlay::Marker {
                at: Point::new(-0.21, 0.142857),
                radius: 4.0,
                rgba: [105, 105, 105, 128],
            }],
            // Troilite, pentlandite, pyrrhotite solid solution, pyrite.
            DiagramKind::Sulfide => vec![
                Overlay::Marker {
                    at: Point::new(-0.25, 0.5),
                    radius: 3.0,
                    rgba: [255, 0, 0, 255],
                },
                Overlay::Marker {
                    at: Point::new(0.0, 0.47),
                    radius: 3.0,
                    rgba: [0, 0, 255, 255],
                },
                Overlay::Line {
                    from: Point::new(-0.25, 0.5),
                    to: Point::new(-0.22, 0.56),
                    style: LineStyle::Solid,
                    rgba: [128, 0, 128, 255],
                    width: 7.0,
                },
                Overlay::Marker {
                    at: Point::new(-0.17, 0.67),
                    radius: 3.0,
                    rgba: [0, 128, 0, 255],
                },
            ],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ternary/diagram.rs"]
mod tests;
