use std::sync::Arc;

use kurbo::Shape;

use crate::density::estimator::DensityField;
use crate::density::grid::Grid;
use crate::foundation::core::{BezPath, Canvas, Point, Rect, Vec2};
use crate::foundation::error::{TernvidError, TernvidResult};
use crate::render::backend::FrameRGBA;
use crate::render::colormap::{ColorMap, TAB10};
use crate::render::label::glyph_rects;
use crate::render::raster::{BACKGROUND, contour_bands};
use crate::render::view::PlotView;
use crate::ternary::diagram::{DiagramKind, LineStyle, Overlay};
use crate::ternary::transform::{VERTEX_A, VERTEX_B, VERTEX_C};

const INK: [u8; 4] = [0, 0, 0, 255];
const TICK_STEP: f64 = 0.1;

/// Renderer settings shared by every frame of a run.
#[derive(Clone, Debug)]
pub struct RenderSettings {
    pub canvas: Canvas,
    pub diagram: DiagramKind,
    pub colormap: ColorMap,
    pub levels: usize,
}

/// A positioned frame label.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameLabel {
    pub text: String,
    /// Planar lower-left corner.
    pub anchor: Point,
}

/// CPU renderer for ternary plots, backed by `vello_cpu`.
#[derive(Clone, Debug)]
pub struct TernaryRenderer {
    settings: RenderSettings,
    view: PlotView,
}

impl TernaryRenderer {
    /// Renderer whose canvas shows exactly `bounds` (normally the density grid bounds).
    pub fn new(settings: RenderSettings, bounds: Rect) -> TernvidResult<Self> {
        if settings.levels == 0 {
            return Err(TernvidError::validation("contour levels must be >= 1"));
        }
        let view = PlotView::new(settings.canvas, bounds)?;
        Ok(Self { settings, view })
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn view(&self) -> &PlotView {
        &self.view
    }

    /// Filled contours of one field, then the ternary frame, overlays and label.
    pub fn render_density(
        &mut self,
        field: &DensityField,
        grid: &Grid,
        label: Option<&FrameLabel>,
    ) -> TernvidResult<FrameRGBA> {
        if field.values.dim() != grid.shape() {
            return Err(TernvidError::render(format!(
                "field shape {:?} does not match grid {:?}",
                field.values.dim(),
                grid.shape()
            )));
        }
        let bands = contour_bands(
            &field.values,
            field.max(),
            grid,
            &self.view,
            self.settings.levels,
            self.settings.colormap,
        );
        let backdrop = pixmap_from_opaque(&bands, self.view.canvas)?;
        let label_rects = match label {
            Some(l) => {
                let cell = 2.0 * self.stroke_scale();
                glyph_rects(&l.text, self.view.project(l.anchor), cell)?
            }
            None => Vec::new(),
        };
        tracing::debug!(
            frame = field.frame.0,
            max = field.max(),
            "rendering density frame"
        );

        self.with_ctx(|this, ctx| {
            let (w, h) = this.canvas_size_f64();
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(backdrop)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            });
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
            this.draw_frame(ctx);
            this.draw_overlays(ctx);
            set_color(ctx, INK);
            for r in &label_rects {
                ctx.fill_rect(&rect_to_cpu(*r));
            }
        })
    }

    /// White background, ternary frame, overlays and one small disc per point.
    ///
    /// Discs cycle through a ten-colour palette in input order.
    pub fn render_scatter(&mut self, points: &[Point]) -> TernvidResult<FrameRGBA> {
        let radius = 1.5 * self.stroke_scale();
        let discs: Vec<BezPath> = points
            .iter()
            .map(|p| kurbo::Circle::new(self.view.project(*p), radius).to_path(0.05))
            .collect();
        self.with_ctx(|this, ctx| {
            let (w, h) = this.canvas_size_f64();
            set_color(ctx, BACKGROUND);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
            this.draw_frame(ctx);
            this.draw_overlays(ctx);
            for (i, disc) in discs.iter().enumerate() {
                set_color(ctx, TAB10[i % TAB10.len()]);
                ctx.fill_path(&bezpath_to_cpu(disc));
            }
        })
    }

    fn with_ctx(
        &mut self,
        draw: impl FnOnce(&Self, &mut vello_cpu::RenderContext),
    ) -> TernvidResult<FrameRGBA> {
        let (w, h) = self.canvas_size_u16()?;
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        draw(self, &mut ctx);
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        Ok(FrameRGBA {
            width: u32::from(w),
            height: u32::from(h),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    /// Triangle edges and ticks every 0.1 along each edge.
    fn draw_frame(&self, ctx: &mut vello_cpu::RenderContext) {
        let s = self.stroke_scale();
        set_color(ctx, INK);
        let corners = [VERTEX_A, VERTEX_B, VERTEX_C];
        for i in 0..3 {
            let (a, b) = (corners[i], corners[(i + 1) % 3]);
            self.fill_segment(ctx, self.view.project(a), self.view.project(b), 1.5 * s);
        }

        let half = 3.0 * s;
        let steps = (1.0 / TICK_STEP).round() as usize;
        for k in 1..steps {
            let t = k as f64 * TICK_STEP;
            // Left and right edges get horizontal ticks, the base vertical ones.
            for (from, to, dir) in [
                (VERTEX_B, VERTEX_A, Vec2::new(half, 0.0)),
                (VERTEX_C, VERTEX_A, Vec2::new(half, 0.0)),
                (VERTEX_B, VERTEX_C, Vec2::new(0.0, half)),
            ] {
                let c = self.view.project(from.lerp(to, t));
                self.fill_segment(ctx, c - dir, c + dir, s);
            }
        }
    }

    fn draw_overlays(&self, ctx: &mut vello_cpu::RenderContext) {
        let s = self.stroke_scale();
        for overlay in self.settings.diagram.overlays() {
            match overlay {
                Overlay::Line {
                    from,
                    to,
                    style,
                    rgba,
                    width,
                } => {
                    set_color(ctx, rgba);
                    let (a, b) = (self.view.project(from), self.view.project(to));
                    let width = width * s;
                    for (p, q) in dash_segments(a, b, style, width) {
                        self.fill_segment(ctx, p, q, width);
                    }
                }
                Overlay::Marker { at, radius, rgba } => {
                    set_color(ctx, rgba);
                    let disc =
                        kurbo::Circle::new(self.view.project(at), radius * s).to_path(0.05);
                    ctx.fill_path(&bezpath_to_cpu(&disc));
                }
            }
        }
    }

    fn fill_segment(&self, ctx: &mut vello_cpu::RenderContext, a: Point, b: Point, width: f64) {
        if let Some(path) = segment_path(a, b, width) {
            ctx.fill_path(&bezpath_to_cpu(&path));
        }
    }

    /// Stroke widths are tuned for a 640 px canvas and scale with its shorter side.
    fn stroke_scale(&self) -> f64 {
        let short = self.view.canvas.width.min(self.view.canvas.height);
        (f64::from(short) / 640.0).max(0.5)
    }

    fn canvas_size_f64(&self) -> (f64, f64) {
        (
            f64::from(self.view.canvas.width),
            f64::from(self.view.canvas.height),
        )
    }

    fn canvas_size_u16(&self) -> TernvidResult<(u16, u16)> {
        let w: u16 = self
            .view
            .canvas
            .width
            .try_into()
            .map_err(|_| TernvidError::render("canvas width exceeds u16"))?;
        let h: u16 = self
            .view
            .canvas
            .height
            .try_into()
            .map_err(|_| TernvidError::render("canvas height exceeds u16"))?;
        Ok((w, h))
    }
}

/// Closed quad covering the segment `a..b` with the given pixel width.
pub(crate) fn segment_path(a: Point, b: Point, width: f64) -> Option<BezPath> {
    let d = b - a;
    let len = d.hypot();
    if len <= f64::EPSILON || width <= 0.0 {
        return None;
    }
    let n = Vec2::new(-d.y, d.x) * (0.5 * width / len);
    let mut p = BezPath::new();
    p.move_to(a + n);
    p.line_to(b + n);
    p.line_to(b - n);
    p.line_to(a - n);
    p.close_path();
    Some(p)
}

/// Visible pieces of a styled line, in order from `a` to `b`.
pub(crate) fn dash_segments(
    a: Point,
    b: Point,
    style: LineStyle,
    width: f64,
) -> Vec<(Point, Point)> {
    let (on, off) = match style {
        LineStyle::Solid => return vec![(a, b)],
        LineStyle::Dashed => (3.7 * width, 1.6 * width),
        LineStyle::Dotted => (width, 1.65 * width),
    };
    let len = (b - a).hypot();
    if len <= f64::EPSILON {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut t = 0.0;
    while t < len {
        let end = (t + on).min(len);
        out.push((a.lerp(b, t / len), a.lerp(b, end / len)));
        t = end + off;
    }
    out
}

fn set_color(ctx: &mut vello_cpu::RenderContext, [r, g, b, a]: [u8; 4]) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
}

fn pixmap_from_opaque(pixels: &[[u8; 4]], canvas: Canvas) -> TernvidResult<vello_cpu::Pixmap> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| TernvidError::render("pixmap width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| TernvidError::render("pixmap height exceeds u16"))?;
    if pixels.len() != canvas.pixel_count() {
        return Err(TernvidError::render("pixmap pixel count mismatch"));
    }
    let data = pixels
        .iter()
        .map(|&[r, g, b, a]| vello_cpu::peniko::color::PremulRgba8 { r, g, b, a })
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(data, w, h, false))
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
