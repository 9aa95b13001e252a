use super::*;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn stopped_clock_reports_zero() {
    let c = AnimationClock::new(ms(1000));
    assert_eq!(c.progress(ms(500)), 0.0);
    assert!(!c.is_finished(ms(5000)));
}

#[test]
fn progress_tracks_elapsed_and_clamps() {
    let mut c = AnimationClock::new(ms(1000));
    assert!(c.start(ms(200)));
    assert!(!c.start(ms(300)));
    assert_eq!(c.progress(ms(700)), 0.5);
    assert_eq!(c.progress(ms(100)), 0.0);
    assert_eq!(c.progress(ms(4000)), 1.0);
    assert!(c.is_finished(ms(1200)));
}

#[test]
fn zero_duration_completes_immediately() {
    let mut c = AnimationClock::new(Duration::ZERO);
    c.start(ms(10));
    assert_eq!(c.progress(ms(10)), 1.0);
}

#[test]
fn restart_rewinds() {
    let mut c = AnimationClock::new(ms(100));
    c.start(ms(0));
    c.restart(ms(1000));
    assert_eq!(c.progress(ms(1050)), 0.5);
}
