//! Browser `<canvas>` surface with a hand-drawn look.
//!
//! Strokes are drawn twice with small seeded offsets. The jitter is derived
//! from the style's seed, so redrawing an unchanged page produces identical
//! pixels.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::{BackendType, RenderError, RenderResult, ShapeStyle};

use super::jitter::Jitter;
use super::DrawingCapability;

const STROKE_COLOR: &str = "#000000";
const TEXT_COLOR: &str = "#000000";

/// 2D canvas surface.
pub struct Canvas2DBackend {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2DBackend {
    /// Wrap a canvas element.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Surface`] if the 2D context is unavailable.
    pub fn new(canvas: HtmlCanvasElement) -> RenderResult<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| RenderError::Surface("Failed to get 2D context".to_string()))?
            .ok_or_else(|| RenderError::Surface("2D context not available".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RenderError::Surface("Failed to cast to 2D context".to_string()))?;
        tracing::debug!("Canvas2D surface {}x{}", canvas.width(), canvas.height());
        Ok(Self { canvas, ctx })
    }

    /// Look up a canvas element by id and wrap it.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Surface`] if the element is missing, is not a
    /// canvas, or has no 2D context.
    pub fn from_element_id(canvas_id: &str) -> RenderResult<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| RenderError::Surface("No document object".to_string()))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| RenderError::Surface(format!("Canvas element '{canvas_id}' not found")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| RenderError::Surface(format!("Element '{canvas_id}' is not a canvas")))?;
        Self::new(canvas)
    }

    fn sketchy_segment(&self, jitter: &mut Jitter, from: (f64, f64), to: (f64, f64)) {
        for _ in 0..2 {
            self.ctx.move_to(from.0 + jitter.offset(), from.1 + jitter.offset());
            let mid = ((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
            self.ctx.quadratic_curve_to(
                mid.0 + jitter.offset(),
                mid.1 + jitter.offset(),
                to.0 + jitter.offset(),
                to.1 + jitter.offset(),
            );
        }
    }

    fn stroke_path(&self) {
        self.ctx.set_stroke_style_str(STROKE_COLOR);
        self.ctx.set_line_width(1.0);
        self.ctx.stroke();
    }
}

fn js_err(op: &str) -> impl Fn(wasm_bindgen::JsValue) -> RenderError + '_ {
    move |e| RenderError::Surface(format!("{op} failed: {e:?}"))
}

impl DrawingCapability for Canvas2DBackend {
    fn backend_type(&self) -> BackendType {
        BackendType::Canvas2D
    }

    fn clear(&mut self, background: &str) -> RenderResult<()> {
        let (w, h) = (
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
        self.ctx.clear_rect(0.0, 0.0, w, h);
        self.ctx.set_fill_style_str(background);
        self.ctx.fill_rect(0.0, 0.0, w, h);
        Ok(())
    }

    fn rectangle(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        style: &ShapeStyle,
    ) -> RenderResult<()> {
        let (x, y, w, h) = (
            f64::from(x),
            f64::from(y),
            f64::from(width),
            f64::from(height),
        );
        if let Some(fill) = &style.fill {
            self.ctx.set_fill_style_str(fill);
            self.ctx.fill_rect(x, y, w, h);
        }

        let mut jitter = Jitter::new(style);
        let corners = [(x, y), (x + w, y), (x + w, y + h), (x, y + h)];
        self.ctx.begin_path();
        for (i, &from) in corners.iter().enumerate() {
            let to = corners[(i + 1) % corners.len()];
            self.sketchy_segment(&mut jitter, from, to);
        }
        self.stroke_path();
        Ok(())
    }

    fn ellipse(
        &mut self,
        cx: f32,
        cy: f32,
        width: f32,
        height: f32,
        style: &ShapeStyle,
    ) -> RenderResult<()> {
        let (cx, cy) = (f64::from(cx), f64::from(cy));
        let (rx, ry) = (f64::from(width).abs() / 2.0, f64::from(height).abs() / 2.0);

        if let Some(fill) = &style.fill {
            self.ctx.begin_path();
            self.ctx
                .ellipse(cx, cy, rx, ry, 0.0, 0.0, TAU)
                .map_err(js_err("ellipse"))?;
            self.ctx.set_fill_style_str(fill);
            self.ctx.fill();
        }

        let mut jitter = Jitter::new(style);
        self.ctx.begin_path();
        for _ in 0..2 {
            let (jx, jy) = (jitter.offset(), jitter.offset());
            let start = jitter.offset() * 0.1;
            self.ctx
                .ellipse(
                    cx + jx,
                    cy + jy,
                    (rx + jitter.offset()).max(0.0),
                    (ry + jitter.offset()).max(0.0),
                    0.0,
                    start,
                    start + TAU,
                )
                .map_err(js_err("ellipse"))?;
        }
        self.stroke_path();
        Ok(())
    }

    fn line(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        style: &ShapeStyle,
    ) -> RenderResult<()> {
        let mut jitter = Jitter::new(style);
        self.ctx.begin_path();
        self.sketchy_segment(
            &mut jitter,
            (f64::from(x1), f64::from(y1)),
            (f64::from(x2), f64::from(y2)),
        );
        self.stroke_path();
        Ok(())
    }

    fn text(&mut self, text: &str, x: f32, y: f32, font: &str) -> RenderResult<()> {
        self.ctx.set_font(font);
        self.ctx.set_fill_style_str(TEXT_COLOR);
        self.ctx
            .fill_text(text, f64::from(x), f64::from(y))
            .map_err(js_err("fillText"))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn measure_text(&mut self, text: &str, font: &str) -> RenderResult<f32> {
        self.ctx.set_font(font);
        let metrics = self
            .ctx
            .measure_text(text)
            .map_err(js_err("measureText"))?;
        Ok(metrics.width() as f32)
    }

    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        tracing::debug!("Canvas2D resized to {width}x{height}");
        Ok(())
    }
}
