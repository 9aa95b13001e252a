use std::time::Duration;

/// Synthetic animation clock that replaces scroll as a progress source.
///
/// Times are host timestamps measured from an arbitrary epoch (for example the page's
/// `performance.now()` converted to a [`Duration`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationClock {
    duration: Duration,
    started_at: Option<Duration>,
}

impl AnimationClock {
    /// Stopped clock running for `duration` once started.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            started_at: None,
        }
    }

    /// Configured run length.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Start if not already running. Returns `false` when it was running.
    pub fn start(&mut self, now: Duration) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now);
        true
    }

    /// Start over from `now`.
    pub fn restart(&mut self, now: Duration) {
        self.started_at = Some(now);
    }

    /// Stop and forget the start time.
    pub fn stop(&mut self) {
        self.started_at = None;
    }

    /// `true` once started.
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Time since start, zero when stopped or when `now` precedes the start.
    pub fn elapsed(&self, now: Duration) -> Duration {
        match self.started_at {
            Some(start) => now.saturating_sub(start),
            None => Duration::ZERO,
        }
    }

    /// `clamp01(elapsed / duration)`. A zero-length clock reports 1 once started.
    pub fn progress(&self, now: Duration) -> f64 {
        if self.started_at.is_none() {
            return 0.0;
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        crate::foundation::math::clamp01(
            self.elapsed(now).as_secs_f64() / self.duration.as_secs_f64(),
        )
    }

    /// `true` once progress reached 1.
    pub fn is_finished(&self, now: Duration) -> bool {
        self.is_running() && self.progress(now) >= 1.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/progress/clock.rs"]
mod tests;
