use super::*;

fn solid(w: u32, h: u32, px: [u8; 4]) -> Raster {
    Raster::from_image(image::RgbaImage::from_pixel(w, h, image::Rgba(px)))
}

fn dense() -> ParticleDef {
    ParticleDef {
        density: 1.0,
        ..ParticleDef::default()
    }
}

#[test]
fn classify_uses_blue_dominance() {
    assert_eq!(classify(Rgba8::rgb(0x3b, 0x82, 0xf6), 30), ColorClass::Accent);
    assert_eq!(classify(Rgba8::WHITE, 30), ColorClass::Base);
    assert_eq!(classify(Rgba8::rgb(0, 0, 20), 30), ColorClass::Base);
    assert_eq!(classify(Rgba8::rgb(0, 200, 220), 30), ColorClass::Base);
}

#[test]
fn targets_walk_stride_grid_and_fit_canvas() {
    let def = dense();
    let r = solid(10, 10, [200, 10, 10, 255]);
    let pts = sample_targets(&r, &def, &def.placement());
    assert_eq!(pts.len(), 25);
    assert_eq!(pts[0].pos, Vec2::new(360.0, 160.0));
    assert_eq!(pts[1].pos, Vec2::new(360.0 + 2.0 * 48.0, 160.0));
    assert!(pts.iter().all(|p| p.color == Rgba8::rgb(200, 10, 10)));
}

#[test]
fn transparent_pixels_are_skipped() {
    let def = dense();
    let mut img = image::RgbaImage::from_pixel(8, 8, image::Rgba([0, 0, 0, 0]));
    for y in 0..8 {
        for x in 0..4 {
            img.put_pixel(x, y, image::Rgba([255, 255, 255, 200]));
        }
    }
    let pts = sample_targets(&Raster::from_image(img), &def, &def.placement());
    assert_eq!(pts.len(), 8);
    assert!(pts.iter().all(|p| p.color.a == 255));
}

#[test]
fn density_thinning_is_seeded() {
    let def = ParticleDef::default();
    let r = solid(60, 60, [255, 255, 255, 255]);
    let a = sample_targets(&r, &def, &def.placement());
    let b = sample_targets(&r, &def, &def.placement());
    assert_eq!(a, b);
    assert!(!a.is_empty() && a.len() < 900);

    let other = ParticleDef {
        seed: 8,
        ..ParticleDef::default()
    };
    assert_ne!(a, sample_targets(&r, &other, &other.placement()));
}

#[test]
fn targets_are_capped() {
    let def = ParticleDef {
        density: 1.0,
        sample_step: 1,
        max_particles: 6000,
        ..ParticleDef::default()
    };
    let pts = sample_targets(&solid(100, 100, [255; 4]), &def, &def.placement());
    assert_eq!(pts.len(), 6000);
}

#[test]
fn shape_fills_whole_canvas_without_thinning() {
    let def = ParticleDef::default();
    let pts = sample_shape(&solid(10, 10, [0, 0, 0, 255]), &def, &def.placement());
    assert_eq!(pts.len(), 25);
    assert_eq!(pts[0], Vec2::new(200.0, 0.0));
}

#[test]
fn cardinality_cycles_or_strides() {
    let pts: Vec<Vec2> = (0..3).map(|i| Vec2::new(i as f64, 0.0)).collect();
    let cycled = match_cardinality(&pts, 7);
    let xs: Vec<f64> = cycled.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![0.0, 1.0, 2.0, 0.0, 1.0, 2.0, 0.0]);

    let many: Vec<Vec2> = (0..10).map(|i| Vec2::new(i as f64, 0.0)).collect();
    let strided = match_cardinality(&many, 5);
    let xs: Vec<f64> = strided.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![0.0, 2.0, 4.0, 6.0, 8.0]);

    assert_eq!(match_cardinality(&many, 10), many);
    assert!(match_cardinality(&[], 4).is_empty());
}
