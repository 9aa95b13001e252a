use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use super::*;
use crate::foundation::math::Rng64;

fn grid_targets(cols: u32, rows: u32) -> Vec<TargetPoint> {
    (0..rows)
        .flat_map(|r| (0..cols).map(move |c| (c, r)))
        .map(|(c, r)| TargetPoint {
            pos: Vec2::new(300.0 + c as f64 * 13.0, 200.0 + r as f64 * 11.0),
            color: Rgba8::rgb(200, 200, 200),
        })
        .collect()
}

fn scattered(n: usize) -> Vec<Vec2> {
    let mut rng = Rng64::new(99);
    (0..n)
        .map(|_| Vec2::new(rng.next_f64_01() * 1200.0, rng.next_f64_01() * 800.0))
        .collect()
}

fn counting(field: &mut ParticleField) -> Arc<AtomicUsize> {
    let calls = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&calls);
    field.on_formed(move || {
        c.fetch_add(1, Ordering::SeqCst);
    });
    calls
}

fn run(field: &mut ParticleField, ramp_frames: usize, hold_frames: usize) {
    for frame in 0..ramp_frames + hold_frames {
        field.step((frame as f64 / ramp_frames as f64).min(1.0));
    }
}

#[test]
fn formed_fires_exactly_once_per_run() {
    let targets = grid_targets(12, 8);
    let mut field = ParticleField::new(&targets, &scattered(40), ParticleDef::default());
    let calls = counting(&mut field);

    run(&mut field, 180, 600);
    assert!(field.is_formed());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    run(&mut field, 1, 100);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(field.particles().iter().all(|p| p.pos() == p.target()));

    field.restart();
    assert!(!field.is_formed());
    assert!(field.particles().iter().all(|p| p.pos() == p.start()));
    run(&mut field, 180, 600);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn spring_free_finish_still_forms() {
    let def = ParticleDef {
        decel: 1.0,
        settle_pull: 0.05,
        ..ParticleDef::default()
    };
    def.validate().unwrap();
    let targets = grid_targets(12, 8);
    let mut field = ParticleField::new(&targets, &scattered(40), def);
    let calls = counting(&mut field);

    run(&mut field, 180, 1500);
    assert!(field.is_formed());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(field.particles().iter().all(|p| p.distance() <= 0.5));
}

#[test]
fn formed_waits_for_progress_threshold() {
    let targets = grid_targets(4, 4);
    let starts: Vec<Vec2> = targets.iter().map(|t| t.pos).collect();
    let mut field = ParticleField::new(&targets, &starts, ParticleDef::default());
    let calls = counting(&mut field);

    assert!(!field.step(0.5));
    assert!(!field.step(0.94));
    assert!(field.step(0.95));
    assert!(!field.step(1.0));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn large_fields_form_on_the_parallel_path() {
    let targets = grid_targets(80, 64);
    assert!(targets.len() >= PARALLEL_THRESHOLD);
    let mut field = ParticleField::new(&targets, &[], ParticleDef::default());
    let calls = counting(&mut field);
    assert!(field.step(1.0));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn starts_are_matched_to_target_count() {
    let targets = grid_targets(5, 2);
    let starts = [Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)];
    let field = ParticleField::new(&targets, &starts, ParticleDef::default());
    assert_eq!(field.len(), 10);
    assert_eq!(field.particles()[0].start(), starts[0]);
    assert_eq!(field.particles()[1].start(), starts[1]);
    assert_eq!(field.particles()[2].start(), starts[0]);
}

#[test]
fn splat_draws_over_background() {
    let targets = [TargetPoint {
        pos: Vec2::new(5.0, 5.0),
        color: Rgba8::rgb(255, 0, 0),
    }];
    let mut field = ParticleField::new(&targets, &[], ParticleDef::default());
    field.step(1.0);
    let img = field.splat(10, 10, Rgba8::rgb(0, 0, 0));
    assert_eq!(img.get_pixel(5, 5).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
}

#[test]
fn blending_respects_opacity() {
    let mut px = [0, 0, 0, 255];
    blend_over(&mut px, Rgba8::rgb(255, 255, 255), 0.5);
    assert_eq!(px, [128, 128, 128, 255]);

    let mut clear = [0, 0, 0, 0];
    blend_over(&mut clear, Rgba8::rgb(10, 20, 30), 1.0);
    assert_eq!(clear, [10, 20, 30, 255]);
}
