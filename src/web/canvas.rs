use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::error::SetupError;
use crate::geometry::Point;
use crate::surface::{Rgba, Surface};

/// [`Surface`] backed by a 2D canvas context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up `#id` and grab its 2D context. Both are hard requirements.
    pub fn from_element_id(doc: &Document, id: &'static str) -> Result<Self, SetupError> {
        let canvas: HtmlCanvasElement = doc
            .get_element_by_id(id)
            .ok_or(SetupError::MissingCanvas(id))?
            .dyn_into()
            .map_err(|_| SetupError::MissingCanvas(id))?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(SetupError::NoContext(id))?
            .dyn_into()
            .map_err(|_| SetupError::NoContext(id))?;
        Ok(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill_rect(x, y, width, height);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.ctx.begin_path();
        // negative radius throws IndexSizeError
        if let Err(e) = self.ctx.arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU) {
            log::warn!("arc r={radius}: {e:?}");
            return;
        }
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgba) {
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn push_glow(&mut self, blur: f64, color: Rgba) {
        self.ctx.save();
        self.ctx.set_shadow_color(&color.css());
        self.ctx.set_shadow_blur(blur);
    }

    fn pop_glow(&mut self) {
        self.ctx.restore();
    }
}
