use crate::{animation::ease::Ease, foundation::math::inverse_lerp, timeline::model::TimelineDef};

/// A `[start, end]` window on the shared progress domain.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Window {
    /// Window start.
    pub start: f64,
    /// Window end.
    pub end: f64,
}

impl Window {
    fn eased(self, p: f64, ease: Ease) -> f64 {
        ease.apply(inverse_lerp(self.start, self.end, p))
    }

    /// `true` when `p` lies inside the window.
    pub fn contains(self, p: f64) -> bool {
        self.start <= p && p <= self.end
    }
}

/// Placement of one chapter on the shared `[0, 1]` domain.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ChapterLayout {
    /// Chapter index.
    pub index: usize,
    /// Label position (segment start).
    pub start: f64,
    /// Segment end (next label).
    pub end: f64,
    /// Fade-in window. The first chapter starts visible and has none.
    pub entry: Option<Window>,
    /// Fade-out window. The last chapter stays visible and has none.
    pub exit: Option<Window>,
}

/// Panel visibility of one chapter at some progress value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelState {
    /// Eased entry amount in `[0, 1]`.
    pub entered: f64,
    /// Eased exit amount in `[0, 1]`.
    pub exited: f64,
}

impl PanelState {
    /// `entered * (1 - exited)`.
    pub fn opacity(self) -> f64 {
        (self.entered * (1.0 - self.exited)).clamp(0.0, 1.0)
    }

    /// Slides up from `offset` while entering and away by `offset` while leaving.
    pub fn translate_y(self, offset: f64) -> f64 {
        offset * (1.0 - self.entered) - offset * self.exited
    }
}

impl ChapterLayout {
    /// Lay out every chapter of `def` as equal contiguous segments.
    pub fn for_def(def: &TimelineDef) -> Vec<Self> {
        let n = def.chapters.len();
        if n == 0 {
            return Vec::new();
        }
        let seg = 1.0 / n as f64;
        (0..n)
            .map(|i| {
                let start = i as f64 / n as f64;
                let end = (i + 1) as f64 / n as f64;
                let entry = (i > 0).then(|| {
                    let s = start - def.overlap * seg;
                    Window {
                        start: s,
                        end: s + def.entry_fraction * seg,
                    }
                });
                let exit = (i + 1 < n).then(|| Window {
                    start: end - def.exit_fraction * seg,
                    end,
                });
                Self {
                    index: i,
                    start,
                    end,
                    entry,
                    exit,
                }
            })
            .collect()
    }

    /// Segment length.
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Map a fraction of this chapter's segment onto the shared domain.
    pub fn at(&self, fraction: f64) -> f64 {
        self.start + fraction * self.span()
    }

    /// Panel state at shared progress `p`.
    pub fn panel(&self, p: f64, ease: Ease) -> PanelState {
        PanelState {
            entered: self.entry.map_or(1.0, |w| w.eased(p, ease)),
            exited: self.exit.map_or(0.0, |w| w.eased(p, ease)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/chapter.rs"]
mod tests;
