use super::*;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn stat() -> CounterDef {
    CounterDef {
        duration_ms: 1500,
        final_display: Some("110+".to_owned()),
        ..CounterDef::new(110)
    }
}

#[test]
fn hidden_counter_shows_zero() {
    let c = CounterAnimator::new(stat());
    let d = c.display(ms(5_000));
    assert_eq!(d.value, 0);
    assert_eq!(d.text, "0");
    assert_eq!(d.numeric_opacity, 1.0);
    assert_eq!(d.final_opacity, 0.0);
}

#[test]
fn final_display_replaces_number_after_duration() {
    let mut c = CounterAnimator::new(stat());
    assert!(c.set_visible(true, ms(0)));
    assert_eq!(c.display(ms(750)).value, 96);
    assert_eq!(c.display(ms(1_499)).text, "110");

    let settled = c.on_frame(ms(1_500)).unwrap();
    assert_eq!(settled.display.text, "110+");
    assert_eq!(settled.display.value, 110);
    assert!(settled.reschedule);
    assert!(matches!(c.phase(), CounterPhase::Settled { .. }));

    let faded = c.on_frame(ms(1_800)).unwrap();
    assert_eq!(faded.display.final_opacity, 1.0);
    assert_eq!(faded.display.numeric_opacity, 0.0);
    assert!(!faded.reschedule);
    assert_eq!(c.display(ms(60_000)).text, "110+");
}

#[test]
fn settle_delay_postpones_the_switch() {
    let mut c = CounterAnimator::new(CounterDef {
        settle_delay_ms: 200,
        ..stat()
    });
    c.set_visible(true, ms(0));
    let d = c.display(ms(1_600));
    assert_eq!(d.value, 110);
    assert_eq!(d.text, "110");
    assert_eq!(c.display(ms(1_700)).text, "110+");
}

#[test]
fn count_is_frame_rate_independent() {
    let mut smooth = CounterAnimator::new(stat());
    let mut janky = CounterAnimator::new(stat());
    smooth.set_visible(true, ms(0));
    janky.set_visible(true, ms(0));

    let mut t = 0;
    while t < 1_500 {
        t = (t + 16).min(1_500);
        smooth.on_frame(ms(t));
    }
    let mut t = 0;
    for step in [5, 90, 3, 400, 1, 250, 33, 718] {
        t += step;
        janky.on_frame(ms(t));
    }
    assert_eq!(t, 1_500);
    assert_eq!(smooth.display(ms(1_500)), janky.display(ms(1_500)));
    assert_eq!(janky.display(ms(1_500)).value, 110);
}

#[test]
fn value_is_monotonic_and_exact_at_end() {
    let c = CounterAnimator::new(CounterDef::new(1_000_000));
    let mut last = 0;
    for t in (0..=2_000).step_by(10) {
        let v = c.value_at(ms(t));
        assert!(v >= last);
        last = v;
    }
    assert_eq!(c.value_at(ms(2_000)), 1_000_000);
    assert_eq!(c.value_at(ms(0)), 0);
}

#[test]
fn visibility_loss_restarts_from_zero() {
    let mut c = CounterAnimator::new(stat());
    c.set_visible(true, ms(0));
    c.on_frame(ms(1_500));
    assert_eq!(c.display(ms(1_500)).text, "110+");

    assert!(!c.set_visible(false, ms(2_000)));
    assert_eq!(c.display(ms(2_100)).value, 0);

    c.set_visible(true, ms(3_000));
    assert_eq!(c.phase(), CounterPhase::Counting { since: ms(3_000) });
    assert_eq!(c.display(ms(3_000)).value, 0);
    assert_eq!(c.display(ms(3_750)).value, 96);
    assert_eq!(c.display(ms(4_500)).text, "110+");
}

#[test]
fn repeated_visible_does_not_restart() {
    let mut c = CounterAnimator::new(stat());
    c.set_visible(true, ms(0));
    assert!(!c.set_visible(true, ms(700)));
    assert_eq!(c.phase(), CounterPhase::Counting { since: ms(0) });
}

#[test]
fn intersection_edges_drive_visibility() {
    let mut c = CounterAnimator::new(CounterDef::new(10));
    assert!(!c.on_intersection(0.1, ms(0)));
    assert!(c.on_intersection(0.5, ms(100)));
    assert!(!c.on_intersection(0.9, ms(200)));
    assert_eq!(c.phase(), CounterPhase::Counting { since: ms(100) });
    c.on_intersection(0.0, ms(300));
    assert_eq!(c.phase(), CounterPhase::Hidden);
}

#[test]
fn suffix_is_applied_while_counting() {
    let mut c = CounterAnimator::new(CounterDef {
        suffix: Some("%".to_owned()),
        ..CounterDef::new(2_500)
    });
    c.set_visible(true, ms(0));
    assert_eq!(c.display(ms(2_000)).text, "2,500%");
    let frame = c.on_frame(ms(2_000)).unwrap();
    assert!(!frame.reschedule);
}

#[test]
fn unmount_stops_frames() {
    let mut c = CounterAnimator::new(stat());
    c.set_visible(true, ms(0));
    assert!(c.unmount());
    assert!(c.on_frame(ms(16)).is_none());
    assert!(!c.set_visible(true, ms(32)));
}

#[test]
fn validate_rejects_bad_threshold() {
    let bad = CounterDef {
        visibility_threshold: 1.5,
        ..CounterDef::new(1)
    };
    assert!(bad.validate().is_err());
    assert!(CounterDef::new(1).validate().is_ok());
}

#[test]
fn validate_caps_every_timing_field() {
    for def in [
        CounterDef {
            settle_delay_ms: u64::MAX,
            ..stat()
        },
        CounterDef {
            crossfade_ms: u64::MAX,
            ..stat()
        },
        CounterDef {
            duration_ms: u64::MAX,
            ..stat()
        },
    ] {
        assert!(def.validate().is_err(), "{def:?}");
    }
}

#[test]
fn huge_settle_delay_counts_without_overflow() {
    let mut c = CounterAnimator::new(CounterDef {
        settle_delay_ms: u64::MAX,
        ..stat()
    });
    c.set_visible(true, ms(0));
    let early = c.on_frame(ms(1_000)).unwrap();
    assert!(early.reschedule);
    let late = c.on_frame(ms(3_000)).unwrap();
    assert_eq!(late.display.value, 110);
    assert_eq!(late.display.text, "110");
    assert!(matches!(c.phase(), CounterPhase::Counting { .. }));
}

#[test]
fn defs_parse_with_defaults() {
    let def: CounterDef =
        serde_json::from_str(r#"{ "label": "clients", "target": 110, "final_display": "110+" }"#)
            .unwrap();
    assert_eq!(def.duration_ms, 2000);
    assert_eq!(def.crossfade_ms, 300);
    assert_eq!(def.final_display.as_deref(), Some("110+"));
}
