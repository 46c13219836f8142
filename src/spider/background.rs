use rand::Rng;

use super::{Brightness, brightness};
use crate::config::SpiderConfig;
use crate::geometry::{Point, PointerState, Viewport};
use crate::surface::{Rgba, Surface, with_glow};

/// Static decorative dot. Its position is fixed for the page session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundParticle {
    pub position: Point,
}

impl BackgroundParticle {
    pub fn new(position: Point) -> Self {
        Self { position }
    }

    /// Uniformly random position inside `viewport`.
    pub fn random<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Self {
        Self::new(Point::new(
            rng.gen_range(0.0..=viewport.width.max(0.0)),
            rng.gen_range(0.0..=viewport.height.max(0.0)),
        ))
    }

    pub fn brightness(&self, pointer: &PointerState, cfg: &SpiderConfig) -> Brightness {
        brightness(self.position, pointer, cfg)
    }

    pub fn draw<S: Surface + ?Sized>(&self, pointer: &PointerState, cfg: &SpiderConfig, surface: &mut S) {
        let b = self.brightness(pointer, cfg);
        let glow = b.glow.then_some(cfg.background_glow_blur);
        with_glow(surface, glow, |s| {
            s.fill_circle(self.position, cfg.background_radius, Rgba::white(b.opacity));
        });
    }
}
