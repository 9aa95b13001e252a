use super::*;

#[test]
fn ratio_covers_partial_full_and_outside() {
    assert_eq!(intersection_ratio(0.0, 100.0, 0.0, 800.0), 1.0);
    assert_eq!(intersection_ratio(750.0, 100.0, 0.0, 800.0), 0.5);
    assert_eq!(intersection_ratio(900.0, 100.0, 0.0, 800.0), 0.0);
    assert_eq!(intersection_ratio(-50.0, 100.0, 0.0, 800.0), 0.5);
}

#[test]
fn degenerate_inputs_are_not_visible() {
    assert_eq!(intersection_ratio(0.0, 100.0, 0.0, 0.0), 0.0);
    assert_eq!(intersection_ratio(f64::NAN, 100.0, 0.0, 800.0), 0.0);
    assert_eq!(intersection_ratio(10.0, 0.0, 0.0, 800.0), 1.0);
}

#[test]
fn tracker_reports_edges_only() {
    let mut t = VisibilityTracker::new(0.3);
    assert_eq!(t.update(0.1), None);
    assert_eq!(t.update(0.3), Some(true));
    assert_eq!(t.update(0.9), None);
    assert_eq!(t.update(0.0), Some(false));
    assert!(!t.is_visible());
}
