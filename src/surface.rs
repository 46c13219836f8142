//! Drawing surface abstraction.
//!
//! The animation only needs four primitives (filled rect, filled circle,
//! stroked segment, scoped glow). The browser implementation lives in
//! `web::canvas`; `RecordingSurface` keeps a command log for headless runs
//! and tests.

use crate::geometry::Point;

/// Straight (non-premultiplied) RGBA colour, alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn white(a: f64) -> Self {
        Self::new(255, 255, 255, a)
    }

    pub const fn black(a: f64) -> Self {
        Self::new(0, 0, 0, a)
    }

    /// CSS `rgba(...)` string understood by canvas fill/stroke styles.
    pub fn css(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// Minimal 2D drawing surface.
///
/// `push_glow` / `pop_glow` must nest: everything drawn between them gets a
/// blurred halo, nothing drawn after `pop_glow` does.
pub trait Surface {
    /// Resize the backing store. Existing content is not rescaled.
    fn resize(&mut self, width: f64, height: f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba);
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);
    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgba);
    fn push_glow(&mut self, blur: f64, color: Rgba);
    fn pop_glow(&mut self);
}

/// Run `draw` with a glow pushed when `glow` is `Some(blur)`; the glow never
/// outlives the closure.
pub fn with_glow<S: Surface + ?Sized>(surface: &mut S, glow: Option<f64>, draw: impl FnOnce(&mut S)) {
    match glow {
        Some(blur) => {
            surface.push_glow(blur, Rgba::white(1.0));
            draw(surface);
            surface.pop_glow();
        }
        None => draw(surface),
    }
}

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Resize { width: f64, height: f64 },
    FillRect { x: f64, y: f64, width: f64, height: f64, color: Rgba },
    FillCircle { center: Point, radius: f64, color: Rgba, glow: Option<f64> },
    StrokeLine { from: Point, to: Point, width: f64, color: Rgba, glow: Option<f64> },
    PushGlow { blur: f64 },
    PopGlow,
}

/// Surface that records every call instead of rasterizing.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    pub width: f64,
    pub height: f64,
    glow_stack: Vec<f64>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, ..Self::default() }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Current glow nesting depth; zero between frames on a well-behaved caller.
    pub fn glow_depth(&self) -> usize {
        self.glow_stack.len()
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::StrokeLine { .. }))
    }

    fn current_glow(&self) -> Option<f64> {
        self.glow_stack.last().copied()
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.commands.push(DrawCommand::Resize { width, height });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { x, y, width, height, color });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        let glow = self.current_glow();
        self.commands.push(DrawCommand::FillCircle { center, radius, color, glow });
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgba) {
        let glow = self.current_glow();
        self.commands.push(DrawCommand::StrokeLine { from, to, width, color, glow });
    }

    fn push_glow(&mut self, blur: f64, _color: Rgba) {
        self.glow_stack.push(blur);
        self.commands.push(DrawCommand::PushGlow { blur });
    }

    fn pop_glow(&mut self) {
        self.glow_stack.pop();
        self.commands.push(DrawCommand::PopGlow);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_format() {
        assert_eq!(Rgba::white(0.4).css(), "rgba(255,255,255,0.4)");
        assert_eq!(Rgba::black(0.3).css(), "rgba(0,0,0,0.3)");
    }

    #[test]
    fn test_with_glow_is_scoped() {
        let mut s = RecordingSurface::new(10.0, 10.0);
        with_glow(&mut s, Some(5.0), |s| s.fill_circle(Point::ZERO, 1.0, Rgba::white(1.0)));
        s.fill_circle(Point::ZERO, 1.0, Rgba::white(1.0));
        let glows: Vec<_> = s
            .circles()
            .map(|c| match c {
                DrawCommand::FillCircle { glow, .. } => *glow,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(glows, vec![Some(5.0), None]);
        assert_eq!(s.glow_depth(), 0);
    }
}
