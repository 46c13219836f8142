//! Cursor-reactive "spider web" animation.
//!
//! A fixed set of dim background dots brightens around the pointer while a
//! handful of connector particles chase the pointer and draw fading edges to
//! their nearest background dots. Everything here is pure: the pointer, the
//! viewport and the drawing surface are handed in per frame, so the browser
//! driver in `web` and the tests run the exact same code.
//!
//! Frame order (see [`SpiderWeb::frame`]):
//! 1. resize the surface when the viewport changed
//! 2. translucent black fill (trail fade)
//! 3. draw every background dot
//! 4. update then draw every connector

mod background;
mod connector;

pub use background::BackgroundParticle;
pub use connector::{Connection, ConnectorParticle};

use rand::Rng;

use crate::config::SpiderConfig;
use crate::geometry::{Point, PointerState, Viewport};
use crate::surface::{Rgba, Surface};

/// Rendered opacity of a particle plus whether its glow is on this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brightness {
    pub opacity: f64,
    pub glow: bool,
}

/// Linear ramp from `base_opacity` at `cursor_radius` up to 1.0 on the pointer.
pub fn brightness(position: Point, pointer: &PointerState, cfg: &SpiderConfig) -> Brightness {
    match pointer.distance_to(position) {
        Some(d) if d < cfg.cursor_radius => Brightness {
            opacity: cfg.base_opacity + (1.0 - cfg.base_opacity) * (1.0 - d / cfg.cursor_radius),
            glow: true,
        },
        _ => Brightness { opacity: cfg.base_opacity, glow: false },
    }
}

/// The whole scene: background set, connectors and the viewport they live in.
#[derive(Clone, Debug)]
pub struct SpiderWeb {
    config: SpiderConfig,
    viewport: Viewport,
    background: Vec<BackgroundParticle>,
    connectors: Vec<ConnectorParticle>,
}

impl SpiderWeb {
    /// Scatter `background_count` dots and `connector_count` connectors
    /// uniformly over `viewport`.
    pub fn new<R: Rng + ?Sized>(config: SpiderConfig, viewport: Viewport, rng: &mut R) -> Self {
        let background = (0..config.background_count)
            .map(|_| BackgroundParticle::random(viewport, rng))
            .collect();
        let connectors = (0..config.connector_count)
            .map(|_| ConnectorParticle::random(viewport, rng))
            .collect();
        Self::from_parts(config, viewport, background, connectors)
    }

    /// Build a scene from explicit particles (deterministic layouts).
    pub fn from_parts(
        config: SpiderConfig,
        viewport: Viewport,
        background: Vec<BackgroundParticle>,
        connectors: Vec<ConnectorParticle>,
    ) -> Self {
        Self { config, viewport, background, connectors }
    }

    pub fn config(&self) -> &SpiderConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn background(&self) -> &[BackgroundParticle] {
        &self.background
    }

    pub fn connectors(&self) -> &[ConnectorParticle] {
        &self.connectors
    }

    pub fn connectors_mut(&mut self) -> &mut [ConnectorParticle] {
        &mut self.connectors
    }

    /// Render one frame. Returns `true` when the surface was resized.
    pub fn frame<S: Surface + ?Sized>(
        &mut self,
        viewport: Viewport,
        pointer: &PointerState,
        surface: &mut S,
    ) -> bool {
        let resized = viewport != self.viewport;
        if resized {
            // Particles are not moved here; connectors clamp on their next update.
            self.viewport = viewport;
            surface.resize(viewport.width, viewport.height);
        }

        surface.fill_rect(
            0.0,
            0.0,
            self.viewport.width,
            self.viewport.height,
            Rgba::black(self.config.trail_alpha),
        );

        for dot in &self.background {
            dot.draw(pointer, &self.config, surface);
        }

        for c in &mut self.connectors {
            c.update(pointer, &self.background, self.viewport, &self.config);
            c.draw(pointer, &self.background, &self.config, surface);
        }
        resized
    }
}

/// Frame loop lifecycle. `Stopped` is only entered from outside the loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Inputs sampled at the start of a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub viewport: Viewport,
    pub pointer: PointerState,
}

impl FrameInput {
    pub fn new(viewport: Viewport, pointer: PointerState) -> Self {
        Self { viewport, pointer }
    }
}

/// The "yield to next frame" boundary. `None` ends the run (page gone).
pub trait FrameSource {
    fn next_frame(&mut self) -> Option<FrameInput>;
}

impl<F> FrameSource for F
where
    F: FnMut() -> Option<FrameInput>,
{
    fn next_frame(&mut self) -> Option<FrameInput> {
        self()
    }
}

/// Owns the scene and its surface and renders one frame per tick.
pub struct FrameLoop<S: Surface> {
    scene: SpiderWeb,
    surface: S,
    state: LoopState,
    frames: u64,
}

impl<S: Surface> FrameLoop<S> {
    /// Sizes the surface to the scene's viewport before the first frame.
    pub fn new(scene: SpiderWeb, mut surface: S) -> Self {
        let vp = scene.viewport();
        surface.resize(vp.width, vp.height);
        Self { scene, surface, state: LoopState::Running, frames: 0 }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scene(&self) -> &SpiderWeb {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SpiderWeb {
        &mut self.scene
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn stop(&mut self) {
        if self.state == LoopState::Running {
            log::debug!("spider web stopped after {} frames", self.frames);
        }
        self.state = LoopState::Stopped;
    }

    /// Render one frame if running. The caller schedules the next tick only
    /// while this returns `Running`.
    pub fn tick(&mut self, input: FrameInput) -> LoopState {
        if self.state == LoopState::Stopped {
            return self.state;
        }
        if self.scene.frame(input.viewport, &input.pointer, &mut self.surface) {
            log::debug!("canvas resized to {}x{}", input.viewport.width, input.viewport.height);
        }
        self.frames += 1;
        self.state
    }

    /// Drive frames from `source` until it runs dry or the loop is stopped.
    /// Returns the number of frames rendered by this call.
    pub fn run<F: FrameSource + ?Sized>(&mut self, source: &mut F) -> u64 {
        let start = self.frames;
        while self.state == LoopState::Running {
            let Some(input) = source.next_frame() else {
                break;
            };
            self.tick(input);
        }
        self.frames - start
    }
}
