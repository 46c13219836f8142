use rand::Rng;

use super::{Brightness, BackgroundParticle, brightness};
use crate::config::SpiderConfig;
use crate::geometry::{Point, PointerState, Viewport};
use crate::surface::{Rgba, Surface, with_glow};

/// Edge from a connector to one background particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    /// Index into the background set.
    pub index: usize,
    pub distance: f64,
}

/// Pointer-seeking particle that links itself to its nearest background dots.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectorParticle {
    pub position: Point,
    pub velocity: Point,
    connections: Vec<Connection>,
}

impl ConnectorParticle {
    pub fn new(position: Point) -> Self {
        Self { position, velocity: Point::ZERO, connections: Vec::new() }
    }

    pub fn random<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Self {
        Self::new(Point::new(
            rng.gen_range(0.0..=viewport.width.max(0.0)),
            rng.gen_range(0.0..=viewport.height.max(0.0)),
        ))
    }

    /// Nearest-first, recomputed by every [`update`](Self::update).
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn update(
        &mut self,
        pointer: &PointerState,
        background: &[BackgroundParticle],
        viewport: Viewport,
        cfg: &SpiderConfig,
    ) {
        self.step(pointer, viewport, cfg);
        self.update_connections(background, cfg);
    }

    /// Pull, damp, integrate, clamp.
    ///
    /// The clamp is a hard stop: velocity is kept as is, so a particle pinned
    /// against an edge keeps pushing into it until the pointer pull reverses.
    pub fn step(&mut self, pointer: &PointerState, viewport: Viewport, cfg: &SpiderConfig) {
        if let Some(target) = pointer.position() {
            self.velocity += (target - self.position) * cfg.attraction_gain;
        }
        self.velocity *= cfg.friction;
        self.position += self.velocity;
        self.position = viewport.clamp(self.position);
    }

    pub fn update_connections(&mut self, background: &[BackgroundParticle], cfg: &SpiderConfig) {
        self.connections.clear();
        self.connections.extend(background.iter().enumerate().filter_map(|(index, dot)| {
            let distance = dot.position.distance(self.position);
            (distance < cfg.max_connection_distance).then_some(Connection { index, distance })
        }));
        self.connections.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        self.connections.truncate(cfg.max_connections);
    }

    pub fn brightness(&self, pointer: &PointerState, cfg: &SpiderConfig) -> Brightness {
        brightness(self.position, pointer, cfg)
    }

    pub fn draw<S: Surface + ?Sized>(
        &self,
        pointer: &PointerState,
        background: &[BackgroundParticle],
        cfg: &SpiderConfig,
        surface: &mut S,
    ) {
        let b = self.brightness(pointer, cfg);
        let glow = b.glow.then_some(cfg.connector_glow_blur);
        with_glow(surface, glow, |s| {
            s.fill_circle(self.position, cfg.connector_radius, Rgba::white(b.opacity));
        });

        for conn in &self.connections {
            let Some(dot) = background.get(conn.index) else {
                continue;
            };
            let falloff = 1.0 - conn.distance / cfg.max_connection_distance;
            surface.stroke_line(
                self.position,
                dot.position,
                cfg.line_width,
                Rgba::white(falloff * cfg.line_alpha),
            );
            surface.stroke_line(
                self.position,
                dot.position,
                cfg.line_glow_width,
                Rgba::white(falloff * cfg.line_glow_alpha),
            );
        }
    }
}
