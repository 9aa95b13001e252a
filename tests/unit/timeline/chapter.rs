use super::*;
use crate::timeline::model::ChapterDef;

fn def(n: usize) -> TimelineDef {
    TimelineDef::new(
        (0..n)
            .map(|i| ChapterDef {
                label: format!("c{i}"),
                panel: format!("panel-{i}"),
                tweens: vec![],
                content: serde_json::Value::Null,
            })
            .collect(),
    )
}

#[test]
fn segments_are_contiguous_and_cover_domain() {
    let layouts = ChapterLayout::for_def(&def(4));
    assert_eq!(layouts.first().unwrap().start, 0.0);
    assert_eq!(layouts.last().unwrap().end, 1.0);
    for w in layouts.windows(2) {
        assert_eq!(w[0].end, w[1].start);
    }
}

#[test]
fn first_has_no_entry_and_last_has_no_exit() {
    let layouts = ChapterLayout::for_def(&def(3));
    assert!(layouts[0].entry.is_none());
    assert!(layouts[0].exit.is_some());
    assert!(layouts[2].entry.is_some());
    assert!(layouts[2].exit.is_none());
}

#[test]
fn next_entry_overlaps_previous_exit() {
    let layouts = ChapterLayout::for_def(&def(3));
    let exit = layouts[0].exit.unwrap();
    let entry = layouts[1].entry.unwrap();
    assert!(entry.start < exit.end);
    assert!(entry.start > exit.start);
    let mid = (entry.start + exit.end) / 2.0;
    assert!(exit.contains(mid) && entry.contains(mid));
}

#[test]
fn panel_state_is_bounded_and_monotonic_in_windows() {
    let layouts = ChapterLayout::for_def(&def(3));
    let l = layouts[1];
    let entry = l.entry.unwrap();
    let exit = l.exit.unwrap();
    let mut prev = f64::NEG_INFINITY;
    for i in 0..=50 {
        let p = entry.start + (entry.end - entry.start) * i as f64 / 50.0;
        let o = l.panel(p, Ease::OutCubic).opacity();
        assert!((0.0..=1.0).contains(&o));
        assert!(o >= prev);
        prev = o;
    }
    let mut prev = f64::INFINITY;
    for i in 0..=50 {
        let p = exit.start + (exit.end - exit.start) * i as f64 / 50.0;
        let o = l.panel(p, Ease::OutCubic).opacity();
        assert!((0.0..=1.0).contains(&o));
        assert!(o <= prev);
        prev = o;
    }
}

#[test]
fn single_chapter_is_always_visible() {
    let layouts = ChapterLayout::for_def(&def(1));
    assert_eq!(layouts.len(), 1);
    for p in [0.0, 0.5, 1.0] {
        assert_eq!(layouts[0].panel(p, Ease::Linear).opacity(), 1.0);
    }
}
