use super::*;

fn geom(top: f64, content: f64, viewport: f64) -> ScrollGeometry {
    ScrollGeometry {
        container_top: top,
        content_height: content,
        viewport_height: viewport,
    }
}

#[test]
fn maps_scroll_linearly_and_clamps() {
    let g = geom(100.0, 1100.0, 100.0);
    assert_eq!(scroll_progress(100.0, &g), 0.0);
    assert_eq!(scroll_progress(600.0, &g), 0.5);
    assert_eq!(scroll_progress(1100.0, &g), 1.0);
    assert_eq!(scroll_progress(5_000.0, &g), 1.0);
    assert_eq!(scroll_progress(-20.0, &g), 0.0);
}

#[test]
fn content_that_fits_viewport_yields_zero() {
    let g = geom(0.0, 800.0, 800.0);
    assert_eq!(scroll_progress(400.0, &g), 0.0);
    let g = geom(0.0, 600.0, 800.0);
    assert_eq!(scroll_progress(400.0, &g), 0.0);
}

#[test]
fn non_finite_inputs_never_produce_nan() {
    let g = geom(0.0, f64::NAN, 100.0);
    assert_eq!(scroll_progress(10.0, &g), 0.0);
    let g = geom(0.0, 1000.0, 100.0);
    assert_eq!(scroll_progress(f64::INFINITY, &g), 0.0);
}

#[test]
fn progress_keeps_overshoot_until_consumed() {
    let g = geom(0.0, 200.0, 100.0);
    let p = Progress::from_scroll(150.0, &g);
    assert_eq!(p.raw(), 1.5);
    assert_eq!(p.value(), 1.0);
}

#[test]
fn unmeasured_source_recomputes_after_resize() {
    let mut src = ProgressSource::new();
    assert_eq!(src.on_resize(geom(0.0, 0.0, 800.0)), 0.0);
    assert!(!src.is_measured());

    assert_eq!(src.on_scroll(450.0), 0.0);

    let p = src.on_resize(geom(0.0, 1700.0, 800.0));
    assert!(src.is_measured());
    assert_eq!(p, 0.5);
}

#[test]
fn inverse_mapping_round_trips_for_label_navigation() {
    let src = ProgressSource::with_geometry(geom(200.0, 2200.0, 200.0));
    assert_eq!(src.scroll_for_progress(0.25), Some(700.0));
    assert_eq!(ProgressSource::new().scroll_for_progress(0.25), None);
}
