use super::*;

const ALL: [Ease; 9] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::OutExpo,
    Ease::Smoothstep,
];

#[test]
fn endpoints_are_exact() {
    for e in ALL {
        assert_eq!(e.apply(0.0), 0.0, "{e:?}");
        assert_eq!(e.apply(1.0), 1.0, "{e:?}");
    }
}

#[test]
fn out_of_range_input_is_clamped() {
    for e in ALL {
        assert_eq!(e.apply(-0.5), 0.0);
        assert_eq!(e.apply(1.5), 1.0);
    }
}

#[test]
fn every_curve_is_monotonic() {
    for e in ALL {
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = e.apply(i as f64 / 100.0);
            assert!(v + 1e-12 >= prev, "{e:?} at {i}");
            prev = v;
        }
    }
}

#[test]
fn out_cubic_matches_closed_form() {
    let t = 0.3;
    assert!((Ease::OutCubic.apply(t) - (1.0 - (1.0f64 - t).powi(3))).abs() < 1e-12);
}
