/// Fraction of an element's height currently inside the viewport, in `[0, 1]`.
///
/// Zero-height elements count as visible when their top edge lies inside the viewport.
pub fn intersection_ratio(
    element_top: f64,
    element_height: f64,
    viewport_top: f64,
    viewport_height: f64,
) -> f64 {
    let inputs = [element_top, element_height, viewport_top, viewport_height];
    if inputs.iter().any(|v| !v.is_finite()) || viewport_height <= 0.0 {
        return 0.0;
    }
    let viewport_bottom = viewport_top + viewport_height;
    if element_height <= 0.0 {
        let inside = element_top >= viewport_top && element_top <= viewport_bottom;
        return if inside { 1.0 } else { 0.0 };
    }
    let top = element_top.max(viewport_top);
    let bottom = (element_top + element_height).min(viewport_bottom);
    ((bottom - top) / element_height).clamp(0.0, 1.0)
}

/// Edge detector over [`intersection_ratio`].
#[derive(Clone, Copy, Debug)]
pub struct VisibilityTracker {
    threshold: f64,
    visible: bool,
}

impl VisibilityTracker {
    /// Tracker that flips to visible once the ratio reaches `threshold`.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            visible: false,
        }
    }

    /// Current state.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Feed a new ratio. Returns `Some(state)` only when the state flips.
    pub fn update(&mut self, ratio: f64) -> Option<bool> {
        let now = ratio > 0.0 && ratio >= self.threshold;
        if now == self.visible {
            return None;
        }
        self.visible = now;
        Some(now)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/progress/visibility.rs"]
mod tests;
