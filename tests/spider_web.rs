// Behavioural tests for the spider web scene, driven frame by frame against a
// recording surface. Native only.

use rand::SeedableRng;
use rand::rngs::StdRng;

use spider_web::spider::{BackgroundParticle, ConnectorParticle};
use spider_web::surface::{DrawCommand, RecordingSurface};
use spider_web::{FrameInput, FrameLoop, Point, PointerState, SpiderConfig, SpiderWeb, Viewport};

const VP: Viewport = Viewport::new(800.0, 600.0);

fn seeded_web(seed: u64) -> SpiderWeb {
    let mut rng = StdRng::seed_from_u64(seed);
    SpiderWeb::new(SpiderConfig::default(), VP, &mut rng)
}

fn web_with(background: &[(f64, f64)], connectors: &[(f64, f64)], vp: Viewport) -> SpiderWeb {
    SpiderWeb::from_parts(
        SpiderConfig::default(),
        vp,
        background.iter().map(|&(x, y)| BackgroundParticle::new(Point::new(x, y))).collect(),
        connectors.iter().map(|&(x, y)| ConnectorParticle::new(Point::new(x, y))).collect(),
    )
}

/// Background dots are drawn with radius 2; return their (alpha, glow).
fn background_draws(s: &RecordingSurface) -> Vec<(f64, Option<f64>)> {
    s.circles()
        .filter_map(|c| match c {
            DrawCommand::FillCircle { radius, color, glow, .. } if *radius == 2.0 => Some((color.a, *glow)),
            _ => None,
        })
        .collect()
}

#[test]
fn background_opacity_stays_in_range_and_falls_off_with_distance() {
    let cfg = SpiderConfig::default();
    let dot = BackgroundParticle::new(Point::new(400.0, 300.0));
    let mut last = f64::INFINITY;
    for step in 0..=400 {
        let d = step as f64 * 0.5;
        let b = dot.brightness(&PointerState::at(400.0 + d, 300.0), &cfg);
        assert!(b.opacity >= cfg.base_opacity && b.opacity <= 1.0, "opacity {} at {d}", b.opacity);
        assert!(b.opacity <= last + 1e-12, "opacity rose at distance {d}");
        if d >= cfg.cursor_radius {
            assert_eq!(b.opacity, cfg.base_opacity);
            assert!(!b.glow);
        }
        last = b.opacity;
    }
    assert_eq!(dot.brightness(&PointerState::absent(), &cfg).opacity, cfg.base_opacity);
}

#[test]
fn connections_are_bounded_in_range_and_sorted() {
    let mut web = seeded_web(11);
    let mut surface = RecordingSurface::new(VP.width, VP.height);
    let pointers = [PointerState::at(120.0, 90.0), PointerState::absent(), PointerState::at(700.0, 500.0)];
    for frame in 0..120 {
        web.frame(VP, &pointers[frame % pointers.len()], &mut surface);
        let cfg = web.config().clone();
        for c in web.connectors() {
            let conns = c.connections();
            assert!(conns.len() <= cfg.max_connections);
            assert!(conns.iter().all(|k| k.distance < cfg.max_connection_distance));
            assert!(conns.windows(2).all(|w| w[0].distance <= w[1].distance));
            for k in conns {
                let actual = web.background()[k.index].position.distance(c.position);
                assert!((actual - k.distance).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn positions_stay_clamped_for_any_velocity() {
    let mut web = web_with(&[], &[(10.0, 10.0), (790.0, 590.0), (400.0, 300.0)], VP);
    let kicks = [Point::new(-1e6, 3e5), Point::new(5e7, 5e7), Point::new(0.0, -1e9)];
    for (c, kick) in web.connectors_mut().iter_mut().zip(kicks) {
        c.velocity = kick;
    }
    let mut surface = RecordingSurface::default();
    for _ in 0..50 {
        web.frame(VP, &PointerState::at(-500.0, 5000.0), &mut surface);
        for c in web.connectors() {
            assert!(VP.contains(c.position), "escaped to {:?}", c.position);
        }
    }
}

#[test]
fn connector_settles_on_a_fixed_pointer() {
    let mut web = web_with(&[], &[(20.0, 580.0)], VP);
    let pointer = PointerState::at(500.0, 250.0);
    let target = Point::new(500.0, 250.0);
    let start = web.connectors()[0].position.distance(target);
    let mut surface = RecordingSurface::default();
    for _ in 0..2000 {
        web.frame(VP, &pointer, &mut surface);
        let d = web.connectors()[0].position.distance(target);
        assert!(d.is_finite() && d <= 2.0 * start);
        surface.clear();
    }
    let c = &web.connectors()[0];
    assert!(c.position.distance(target) < 1e-3, "ended at {:?}", c.position);
    assert!(c.velocity.length() < 1e-3);
}

#[test]
fn absent_pointer_keeps_background_dim_and_connectors_coast_to_rest() {
    let mut web = seeded_web(3);
    for (i, c) in web.connectors_mut().iter_mut().enumerate() {
        c.velocity = Point::new(10.0 - i as f64, -7.0);
    }
    let mut lp = FrameLoop::new(web, RecordingSurface::new(VP.width, VP.height));
    let mut frames = 0;
    let mut source = || {
        frames += 1;
        (frames <= 500).then(|| FrameInput::new(VP, PointerState::absent()))
    };
    assert_eq!(lp.run(&mut source), 500);

    let base = lp.scene().config().base_opacity;
    let draws = background_draws(lp.surface());
    assert_eq!(draws.len(), 800 * 500);
    assert!(draws.iter().all(|&(a, glow)| a == base && glow.is_none()));
    assert!(lp.scene().connectors().iter().all(|c| c.velocity.length() < 1e-6));
    assert_eq!(lp.surface().glow_depth(), 0);
}

#[test]
fn pointer_on_connector_applies_only_friction() {
    let mut web = web_with(&[], &[(300.0, 200.0)], VP);
    web.connectors_mut()[0].velocity = Point::new(4.0, 2.0);
    let mut surface = RecordingSurface::default();
    web.frame(VP, &PointerState::at(300.0, 200.0), &mut surface);
    let c = &web.connectors()[0];
    assert!((c.velocity.x - 3.8).abs() < 1e-12);
    assert!((c.velocity.y - 1.9).abs() < 1e-12);
    assert!((c.position.x - 303.8).abs() < 1e-12);
}

#[test]
fn isolated_connector_draws_no_edges() {
    let mut web = web_with(&[(10.0, 10.0), (790.0, 10.0)], &[(400.0, 300.0)], VP);
    let mut surface = RecordingSurface::default();
    web.frame(VP, &PointerState::absent(), &mut surface);
    assert!(web.connectors()[0].connections().is_empty());
    assert_eq!(surface.lines().count(), 0);
}

#[test]
fn near_connector_draws_two_lines_per_edge() {
    let mut web = web_with(&[(400.0, 330.0), (430.0, 300.0), (10.0, 10.0)], &[(400.0, 300.0)], VP);
    let mut surface = RecordingSurface::default();
    web.frame(VP, &PointerState::absent(), &mut surface);
    assert_eq!(web.connectors()[0].connections().len(), 2);
    assert_eq!(surface.lines().count(), 4);
}

#[test]
fn shrinking_viewport_clamps_on_next_update() {
    let mut web = web_with(&[], &[(750.0, 550.0)], VP);
    let small = Viewport::new(400.0, 300.0);
    let mut surface = RecordingSurface::default();
    assert!(web.frame(small, &PointerState::absent(), &mut surface));
    assert_eq!(surface.commands[0], DrawCommand::Resize { width: 400.0, height: 300.0 });
    assert_eq!(web.connectors()[0].position, Point::new(400.0, 300.0));
    // Background dots are not repositioned.
    let mut web = web_with(&[(700.0, 500.0)], &[], VP);
    web.frame(small, &PointerState::absent(), &mut surface);
    assert_eq!(web.background()[0].position, Point::new(700.0, 500.0));
}

#[test]
fn wall_clamp_keeps_velocity_until_pull_reverses() {
    let mut web = web_with(&[], &[(790.0, 300.0)], VP);
    let mut surface = RecordingSurface::default();
    let right = PointerState::at(2000.0, 300.0);
    for _ in 0..30 {
        web.frame(VP, &right, &mut surface);
    }
    let pinned = &web.connectors()[0];
    assert_eq!(pinned.position.x, 800.0);
    assert!(pinned.velocity.x > 1.0, "velocity into the wall is kept: {:?}", pinned.velocity);

    // Pull back to the left: the stored velocity has to bleed off first.
    let left = PointerState::at(0.0, 300.0);
    web.frame(VP, &left, &mut surface);
    assert_eq!(web.connectors()[0].position.x, 800.0);
    for _ in 0..200 {
        web.frame(VP, &left, &mut surface);
    }
    assert!(web.connectors()[0].position.x < 800.0);
}

#[test]
fn glow_is_scoped_to_particles_near_pointer() {
    let mut web = web_with(&[(100.0, 100.0), (700.0, 500.0)], &[], VP);
    let mut surface = RecordingSurface::default();
    web.frame(VP, &PointerState::at(110.0, 100.0), &mut surface);
    let draws = background_draws(&surface);
    assert_eq!(draws[0].1, Some(5.0));
    assert_eq!(draws[1], (0.15, None));
    assert_eq!(surface.glow_depth(), 0);
}
