use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    animation::signal::ElementStyle,
    foundation::error::SceneResult,
    foundation::math::{clamp01, inverse_lerp, lerp},
    timeline::chapter::ChapterLayout,
    timeline::model::{Property, TimelineDef},
};

#[derive(Clone, Debug)]
struct ResolvedTween {
    start: f64,
    end: f64,
    from: f64,
    to: f64,
    ease: Ease,
}

impl ResolvedTween {
    fn value_at(&self, p: f64) -> f64 {
        lerp(self.from, self.to, self.ease.apply(inverse_lerp(self.start, self.end, p)))
    }
}

/// Every visual the timeline drives, sampled at one progress value.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TimelineFrame {
    /// Clamped progress the frame was sampled at.
    pub progress: f64,
    /// Index of the chapter whose segment contains `progress`.
    pub active: usize,
    /// Label of the active chapter.
    pub active_label: String,
    /// Shared rail fill; tracks total progress, not per-chapter progress.
    pub rail: f64,
    /// `reached[i]` once progress passed chapter `i`'s label.
    pub reached: Vec<bool>,
    /// Style of every driven element, keyed by element id.
    pub elements: BTreeMap<String, ElementStyle>,
}

/// Chapter timeline over a single normalized progress domain.
///
/// Each chapter owns an equal segment. Panels cross-fade through overlapping entry and exit
/// windows; per-element tweens resolve like a timeline with immediate render: the latest tween
/// that has started owns the property, and the first tween's `from` applies before any starts.
#[derive(Clone, Debug)]
pub struct ChapterTimeline {
    def: TimelineDef,
    layouts: Vec<ChapterLayout>,
    tracks: BTreeMap<(String, Property), Vec<ResolvedTween>>,
}

impl ChapterTimeline {
    /// Validate `def` and resolve every tween onto the shared domain.
    pub fn new(def: TimelineDef) -> SceneResult<Self> {
        def.validate()?;
        let layouts = ChapterLayout::for_def(&def);

        let mut tracks: BTreeMap<(String, Property), Vec<ResolvedTween>> = BTreeMap::new();
        for (chapter, layout) in def.chapters.iter().zip(&layouts) {
            for tw in &chapter.tweens {
                tracks
                    .entry((tw.target.clone(), tw.property))
                    .or_default()
                    .push(ResolvedTween {
                        start: layout.at(tw.range.start),
                        end: layout.at(tw.range.end),
                        from: tw.from,
                        to: tw.to,
                        ease: tw.ease,
                    });
            }
        }
        for track in tracks.values_mut() {
            track.sort_by(|a, b| a.start.total_cmp(&b.start));
        }

        Ok(Self {
            def,
            layouts,
            tracks,
        })
    }

    /// Number of chapters.
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    /// Always `false`: validation rejects empty timelines.
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Chapter placements.
    pub fn layouts(&self) -> &[ChapterLayout] {
        &self.layouts
    }

    /// The definition this timeline was built from.
    pub fn def(&self) -> &TimelineDef {
        &self.def
    }

    /// Progress value of a chapter label.
    pub fn label_progress(&self, label: &str) -> Option<f64> {
        self.def
            .chapters
            .iter()
            .position(|c| c.label == label)
            .map(|i| self.layouts[i].start)
    }

    /// Chapter whose segment contains `p`. `p = 1` belongs to the last chapter.
    pub fn active_index(&self, p: f64) -> usize {
        let n = self.layouts.len();
        ((clamp01(p) * n as f64).floor() as usize).min(n.saturating_sub(1))
    }

    /// Sample every driven visual at progress `p` (clamped into `[0, 1]`).
    pub fn sample(&self, p: f64) -> TimelineFrame {
        let p = clamp01(p);
        let mut elements: BTreeMap<String, ElementStyle> = BTreeMap::new();

        for (chapter, layout) in self.def.chapters.iter().zip(&self.layouts) {
            let panel = layout.panel(p, self.def.ease);
            let style = elements.entry(chapter.panel.clone()).or_default();
            style.opacity = panel.opacity();
            style.translate_y = panel.translate_y(self.def.offset_px);
        }

        for ((target, property), track) in &self.tracks {
            let started = track.partition_point(|t| t.start <= p);
            let value = match started {
                0 => track[0].from,
                n => track[n - 1].value_at(p),
            };
            property.apply(elements.entry(target.clone()).or_default(), value);
        }

        if let Some(rail) = &self.def.rail {
            elements.entry(rail.clone()).or_default().fill = p;
        }

        let active = self.active_index(p);
        TimelineFrame {
            progress: p,
            active,
            active_label: self.def.chapters[active].label.clone(),
            rail: p,
            reached: self.layouts.iter().map(|l| p >= l.start).collect(),
            elements,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/timeline.rs"]
mod tests;
