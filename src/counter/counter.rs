use std::time::Duration;

use crate::{
    SceneError, SceneResult,
    counter::format::format_count,
    foundation::math::{clamp01, inverse_lerp},
    progress::frame::FrameLoop,
    progress::visibility::VisibilityTracker,
};

// One day.
const MAX_SPAN_MS: u64 = 24 * 60 * 60 * 1000;

fn default_duration_ms() -> u64 {
    2000
}
fn default_crossfade_ms() -> u64 {
    300
}
fn default_visibility_threshold() -> f64 {
    0.3
}

/// One count-up statistic.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CounterDef {
    /// Caption shown next to the number.
    #[serde(default)]
    pub label: String,
    /// Value the count ends on.
    pub target: i64,
    /// Length of the count.
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    /// Literal shown instead of the number once settled, e.g. `"110+"`.
    #[serde(default)]
    pub final_display: Option<String>,
    /// Pause between the end of the count and the switch to `final_display`.
    #[serde(default)]
    pub settle_delay_ms: u64,
    /// Cross-fade length between the number and `final_display`.
    #[serde(default = "default_crossfade_ms")]
    pub crossfade_ms: u64,
    /// Appended to the formatted number.
    #[serde(default)]
    pub suffix: Option<String>,
    /// Intersection ratio at which the counter counts as visible.
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f64,
}

impl CounterDef {
    /// Counter for `target` with default timings.
    pub fn new(target: i64) -> Self {
        Self {
            label: String::new(),
            target,
            duration_ms: default_duration_ms(),
            final_display: None,
            settle_delay_ms: 0,
            crossfade_ms: default_crossfade_ms(),
            suffix: None,
            visibility_threshold: default_visibility_threshold(),
        }
    }

    pub(crate) fn validate(&self) -> SceneResult<()> {
        for (name, ms) in [
            ("duration_ms", self.duration_ms),
            ("settle_delay_ms", self.settle_delay_ms),
            ("crossfade_ms", self.crossfade_ms),
        ] {
            if ms > MAX_SPAN_MS {
                return Err(SceneError::validation(format!(
                    "counter {:?}: {name} must be at most {MAX_SPAN_MS}, got {ms}",
                    self.label
                )));
            }
        }
        if !(self.visibility_threshold.is_finite()
            && (0.0..=1.0).contains(&self.visibility_threshold))
        {
            return Err(SceneError::validation(format!(
                "counter {:?}: visibility_threshold must be in [0, 1]",
                self.label
            )));
        }
        if self.final_display.as_deref() == Some("") {
            return Err(SceneError::validation(format!(
                "counter {:?}: final_display must not be empty when set",
                self.label
            )));
        }
        Ok(())
    }

    fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    fn settle_after(&self) -> Duration {
        Duration::from_millis(self.duration_ms.saturating_add(self.settle_delay_ms))
    }
}

/// What a counter is doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterPhase {
    /// Out of view, showing 0.
    Hidden,
    /// Counting up since the rising edge at `since`.
    Counting {
        /// Rising edge timestamp.
        since: Duration,
    },
    /// Done counting; `at` is when the final display took over.
    Settled {
        /// Rising edge timestamp of this run.
        since: Duration,
        /// Switch-over timestamp.
        at: Duration,
    },
}

/// Values the view layer binds to.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CounterDisplay {
    /// Current numeric value.
    pub value: i64,
    /// Text to show.
    pub text: String,
    /// Opacity of the numeric text.
    pub numeric_opacity: f64,
    /// Opacity of the final display literal.
    pub final_opacity: f64,
}

/// Result of one [`CounterAnimator::on_frame`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct CounterFrame {
    /// What to show.
    pub display: CounterDisplay,
    /// `true` when the host must schedule another frame.
    pub reschedule: bool,
}

/// Count-up driven by wall-clock time and a visibility signal.
#[derive(Clone, Debug)]
pub struct CounterAnimator {
    def: CounterDef,
    phase: CounterPhase,
    visibility: VisibilityTracker,
    frame_loop: FrameLoop,
}

impl CounterAnimator {
    /// A hidden counter.
    pub fn new(def: CounterDef) -> Self {
        let visibility = VisibilityTracker::new(def.visibility_threshold);
        Self {
            def,
            phase: CounterPhase::Hidden,
            visibility,
            frame_loop: FrameLoop::Idle,
        }
    }

    /// Feed the element's intersection ratio. Returns `true` when a frame must be scheduled.
    pub fn on_intersection(&mut self, ratio: f64, now: Duration) -> bool {
        match self.visibility.update(ratio) {
            Some(visible) => self.set_visible(visible, now),
            None => false,
        }
    }

    /// Drive visibility directly. Returns `true` when a frame must be scheduled.
    ///
    /// Losing visibility resets to 0 and every rising edge replays the count from 0.
    pub fn set_visible(&mut self, visible: bool, now: Duration) -> bool {
        if self.frame_loop.is_cancelled() {
            return false;
        }
        let next = match (visible, self.phase) {
            (false, CounterPhase::Hidden) => return false,
            (false, _) => CounterPhase::Hidden,
            (true, CounterPhase::Hidden) => CounterPhase::Counting { since: now },
            (true, _) => return false,
        };
        tracing::debug!(label = %self.def.label, from = ?self.phase, to = ?next, "counter phase");
        self.phase = next;
        match next {
            CounterPhase::Counting { .. } => self.frame_loop.schedule(),
            CounterPhase::Hidden | CounterPhase::Settled { .. } => false,
        }
    }

    /// Frame callback. `None` once unmounted.
    pub fn on_frame(&mut self, now: Duration) -> Option<CounterFrame> {
        if !self.frame_loop.fire() {
            return None;
        }
        if let CounterPhase::Counting { since } = self.phase
            && now.saturating_sub(since) >= self.def.settle_after()
        {
            let at = since.saturating_add(self.def.settle_after());
            tracing::debug!(label = %self.def.label, "counter settled");
            self.phase = CounterPhase::Settled { since, at };
        }
        let display = self.display(now);
        let done = match self.phase {
            CounterPhase::Hidden => true,
            CounterPhase::Counting { .. } => false,
            CounterPhase::Settled { at, .. } => {
                self.def.final_display.is_none()
                    || now.saturating_sub(at) >= Duration::from_millis(self.def.crossfade_ms)
            }
        };
        let reschedule = !done && self.frame_loop.schedule();
        Some(CounterFrame {
            display,
            reschedule,
        })
    }

    /// What to show at `now`, computed from elapsed time alone.
    pub fn display(&self, now: Duration) -> CounterDisplay {
        let since = match self.phase {
            CounterPhase::Hidden => return self.numeric(0),
            CounterPhase::Counting { since } | CounterPhase::Settled { since, .. } => since,
        };
        let elapsed = now.saturating_sub(since);
        let settle_after = self.def.settle_after();
        if elapsed < settle_after {
            return self.numeric(self.value_at(elapsed));
        }
        match &self.def.final_display {
            None => self.numeric(self.def.target),
            Some(text) => {
                let fade = inverse_lerp(
                    0.0,
                    self.def.crossfade_ms as f64,
                    (elapsed - settle_after).as_secs_f64() * 1000.0,
                );
                CounterDisplay {
                    value: self.def.target,
                    text: text.clone(),
                    numeric_opacity: 1.0 - fade,
                    final_opacity: fade,
                }
            }
        }
    }

    /// `round(target * easeOutCubic(elapsed / duration))`, exactly `target` once elapsed.
    pub fn value_at(&self, elapsed: Duration) -> i64 {
        let duration = self.def.duration();
        if duration.is_zero() || elapsed >= duration {
            return self.def.target;
        }
        let t = clamp01(elapsed.as_secs_f64() / duration.as_secs_f64());
        let eased = 1.0 - (1.0 - t).powi(3);
        (self.def.target as f64 * eased).round() as i64
    }

    fn numeric(&self, value: i64) -> CounterDisplay {
        CounterDisplay {
            value,
            text: format_count(value, self.def.suffix.as_deref()),
            numeric_opacity: 1.0,
            final_opacity: 0.0,
        }
    }

    /// Tear down. Returns `true` when a frame callback was outstanding and must be cancelled.
    pub fn unmount(&mut self) -> bool {
        self.phase = CounterPhase::Hidden;
        self.frame_loop.cancel()
    }

    /// Current phase.
    pub fn phase(&self) -> CounterPhase {
        self.phase
    }

    /// Definition this counter was built from.
    pub fn def(&self) -> &CounterDef {
        &self.def
    }
}

#[cfg(test)]
#[path = "../../tests/unit/counter/counter.rs"]
mod tests;
