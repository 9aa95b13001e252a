use super::*;

fn target(x: f64, y: f64, color: Rgba8) -> TargetPoint {
    TargetPoint {
        pos: Vec2::new(x, y),
        color,
    }
}

#[test]
fn delay_comes_from_target_position() {
    assert_eq!(stagger_delay(Vec2::new(150.0, 250.0), 0.35), 0.175);
    assert_eq!(stagger_delay(Vec2::new(600.0, 400.0), 0.35), 0.0);
    let max = stagger_delay(Vec2::new(99.9, 99.9), 0.35);
    assert!(max < 0.35);
}

#[test]
fn size_is_deterministic_and_in_range() {
    let def = ParticleDef::default();
    let t = target(321.0, 123.0, Rgba8::WHITE);
    let a = Particle::new(Vec2::ZERO, &t, &def);
    let b = Particle::new(Vec2::new(5.0, 5.0), &t, &def);
    assert_eq!(a.size(), b.size());
    assert!((def.size_min..=def.size_max).contains(&a.size()));
}

#[test]
fn delayed_particle_waits() {
    let def = ParticleDef::default();
    let mut p = Particle::new(Vec2::ZERO, &target(150.0, 250.0, Rgba8::WHITE), &def);
    p.step(0.1, &def);
    assert_eq!(p.pos(), Vec2::ZERO);
    assert_eq!(p.opacity(), def.start_opacity);
}

#[test]
fn near_particle_snaps_exactly() {
    let def = ParticleDef::default();
    let mut p = Particle::new(Vec2::new(600.5, 400.5), &target(600.0, 400.0, Rgba8::WHITE), &def);
    p.step(0.5, &def);
    assert_eq!(p.pos(), p.target());
    assert_eq!(p.vel(), Vec2::ZERO);
    p.step(0.6, &def);
    assert_eq!(p.distance(), 0.0);
}

#[test]
fn accent_stays_pinned_and_base_blends_late() {
    let def = ParticleDef::default();
    let blue = Rgba8::rgb(20, 40, 230);
    let red = Rgba8::rgb(230, 20, 20);
    let mut accent = Particle::new(Vec2::ZERO, &target(600.0, 400.0, blue), &def);
    let mut base = Particle::new(Vec2::ZERO, &target(600.0, 400.0, red), &def);
    assert_eq!(accent.class(), ColorClass::Accent);
    assert_eq!(base.class(), ColorClass::Base);

    for p in [0.3, 0.59] {
        accent.step(p, &def);
        base.step(p, &def);
        assert_eq!(accent.color(), def.accent_color);
        assert_eq!(base.color(), def.base_color);
    }
    accent.step(1.0, &def);
    base.step(1.0, &def);
    assert_eq!(accent.color(), def.accent_color);
    assert_eq!(base.color(), red);
    assert_eq!(base.opacity(), 1.0);
}

#[test]
fn particle_converges_and_stays() {
    let def = ParticleDef::default();
    let mut p = Particle::new(Vec2::new(0.0, 0.0), &target(600.0, 400.0, Rgba8::WHITE), &def);
    let mut converged_at = None;
    for frame in 0..800 {
        let progress = (frame as f64 / 180.0).min(1.0);
        p.step(progress, &def);
        if p.distance() == 0.0 && converged_at.is_none() {
            converged_at = Some(frame);
        }
    }
    assert!(converged_at.is_some());
    assert_eq!(p.pos(), p.target());
}

#[test]
fn reset_returns_to_start() {
    let def = ParticleDef::default();
    let mut p = Particle::new(Vec2::new(10.0, 10.0), &target(600.0, 400.0, Rgba8::WHITE), &def);
    for _ in 0..30 {
        p.step(0.5, &def);
    }
    assert_ne!(p.pos(), p.start());
    p.reset(&def);
    assert_eq!(p.pos(), Vec2::new(10.0, 10.0));
    assert_eq!(p.vel(), Vec2::ZERO);
    assert_eq!(p.opacity(), def.start_opacity);
}
