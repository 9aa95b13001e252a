use crate::foundation::math::clamp01;

/// Scroll geometry of one pinned container, in px.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollGeometry {
    /// Document offset of the container's top edge.
    pub container_top: f64,
    /// Total scrollable height of the container.
    pub content_height: f64,
    /// Height of the viewport.
    pub viewport_height: f64,
}

impl ScrollGeometry {
    /// Scroll distance that maps to the full `[0, 1]` progress domain.
    ///
    /// Zero when the content fits the viewport or any input is not finite.
    pub fn scroll_range(&self) -> f64 {
        let range = self.content_height - self.viewport_height;
        if range.is_finite() && range > 0.0 {
            range
        } else {
            0.0
        }
    }

    /// A container that has not been laid out yet reports zero content height.
    pub fn is_measurable(&self) -> bool {
        self.content_height.is_finite()
            && self.content_height > 0.0
            && self.container_top.is_finite()
    }
}

/// `clamp((scroll_y - top) / (content_height - viewport_height), 0, 1)`.
///
/// A non-positive denominator or a non-finite input yields 0.
pub fn scroll_progress(scroll_y: f64, geometry: &ScrollGeometry) -> f64 {
    Progress::from_scroll(scroll_y, geometry).value()
}

/// Normalized progress that keeps the raw (possibly overshooting) value around.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Progress(f64);

impl Progress {
    /// Zero progress.
    pub const ZERO: Self = Self(0.0);

    /// Wrap a raw value. Non-finite input is stored as 0.
    pub fn new(raw: f64) -> Self {
        if raw.is_finite() { Self(raw) } else { Self(0.0) }
    }

    /// Progress for a scroll position inside `geometry`, unclamped.
    pub fn from_scroll(scroll_y: f64, geometry: &ScrollGeometry) -> Self {
        let range = geometry.scroll_range();
        if range <= 0.0 || !scroll_y.is_finite() || !geometry.container_top.is_finite() {
            return Self::ZERO;
        }
        Self::new((scroll_y - geometry.container_top) / range)
    }

    /// Raw value, possibly outside `[0, 1]`.
    pub fn raw(self) -> f64 {
        self.0
    }

    /// Value clamped into `[0, 1]`.
    pub fn value(self) -> f64 {
        clamp01(self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Measure {
    Unmeasured,
    Measured(ScrollGeometry),
}

/// Scroll-driven progress for one container.
///
/// Until a measurable geometry arrives the source reports 0 and remembers the last scroll position,
/// so the first resize after layout settles recomputes from it.
#[derive(Clone, Debug)]
pub struct ProgressSource {
    measure: Measure,
    scroll_y: f64,
    progress: Progress,
}

impl Default for ProgressSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSource {
    /// Source with no geometry yet.
    pub fn new() -> Self {
        Self {
            measure: Measure::Unmeasured,
            scroll_y: 0.0,
            progress: Progress::ZERO,
        }
    }

    /// Source measured against `geometry` from the start.
    pub fn with_geometry(geometry: ScrollGeometry) -> Self {
        let mut s = Self::new();
        s.on_resize(geometry);
        s
    }

    /// Record a scroll position and recompute. Returns the clamped progress.
    pub fn on_scroll(&mut self, scroll_y: f64) -> f64 {
        if scroll_y.is_finite() {
            self.scroll_y = scroll_y;
        }
        self.recompute()
    }

    /// Re-measure after layout changes. Returns the clamped progress.
    pub fn on_resize(&mut self, geometry: ScrollGeometry) -> f64 {
        self.measure = if geometry.is_measurable() {
            Measure::Measured(geometry)
        } else {
            tracing::debug!(?geometry, "container not measurable yet");
            Measure::Unmeasured
        };
        self.recompute()
    }

    fn recompute(&mut self) -> f64 {
        self.progress = match self.measure {
            Measure::Unmeasured => Progress::ZERO,
            Measure::Measured(g) => Progress::from_scroll(self.scroll_y, &g),
        };
        self.progress.value()
    }

    /// Last computed progress, clamped.
    pub fn progress(&self) -> f64 {
        self.progress.value()
    }

    /// Last computed progress, raw.
    pub fn raw(&self) -> Progress {
        self.progress
    }

    /// `true` once a measurable geometry has been seen.
    pub fn is_measured(&self) -> bool {
        matches!(self.measure, Measure::Measured(_))
    }

    /// Current geometry, if measured.
    pub fn geometry(&self) -> Option<ScrollGeometry> {
        match self.measure {
            Measure::Measured(g) => Some(g),
            Measure::Unmeasured => None,
        }
    }

    /// Scroll position that produces progress `p`. `None` until measured.
    pub fn scroll_for_progress(&self, p: f64) -> Option<f64> {
        let g = self.geometry()?;
        Some(g.container_top + clamp01(p) * g.scroll_range())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/progress/source.rs"]
mod tests;
