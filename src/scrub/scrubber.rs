use crate::foundation::math::clamp01;

/// Duration used while media metadata is unavailable or unusable.
pub const FALLBACK_DURATION_SECS: f64 = 10.0;

fn default_fast_threshold() -> f64 {
    0.5
}
fn default_precise_threshold() -> f64 {
    0.05
}
fn default_fast_factor() -> f64 {
    0.25
}
fn default_precise_factor() -> f64 {
    0.08
}
fn default_factor() -> f64 {
    0.15
}
fn default_write_epsilon() -> f64 {
    0.001
}
fn default_snap_epsilon() -> f64 {
    0.0005
}

/// Tiered lerp factors for [`SmoothedScrubber`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrubTuning {
    /// Differences above this use `fast_factor`.
    #[serde(default = "default_fast_threshold")]
    pub fast_threshold: f64,
    /// Differences below this use `precise_factor`.
    #[serde(default = "default_precise_threshold")]
    pub precise_threshold: f64,
    /// Factor for large jumps.
    #[serde(default = "default_fast_factor")]
    pub fast_factor: f64,
    /// Factor for fine settling.
    #[serde(default = "default_precise_factor")]
    pub precise_factor: f64,
    /// Factor in between.
    #[serde(default = "default_factor")]
    pub default_factor: f64,
    /// Minimum change worth writing to the media element.
    #[serde(default = "default_write_epsilon")]
    pub write_epsilon: f64,
    /// Distance under which current snaps onto target.
    #[serde(default = "default_snap_epsilon")]
    pub snap_epsilon: f64,
}

impl Default for ScrubTuning {
    fn default() -> Self {
        Self {
            fast_threshold: default_fast_threshold(),
            precise_threshold: default_precise_threshold(),
            fast_factor: default_fast_factor(),
            precise_factor: default_precise_factor(),
            default_factor: default_factor(),
            write_epsilon: default_write_epsilon(),
            snap_epsilon: default_snap_epsilon(),
        }
    }
}

impl ScrubTuning {
    /// Lerp factor for a distance of `diff`.
    pub fn factor_for(&self, diff: f64) -> f64 {
        if diff > self.fast_threshold {
            self.fast_factor
        } else if diff < self.precise_threshold {
            self.precise_factor
        } else {
            self.default_factor
        }
    }

    pub(crate) fn validate(&self) -> crate::SceneResult<()> {
        for (name, f) in [
            ("fast_factor", self.fast_factor),
            ("precise_factor", self.precise_factor),
            ("default_factor", self.default_factor),
        ] {
            if !(f > 0.0 && f <= 1.0) {
                return Err(crate::SceneError::validation(format!(
                    "scrub {name} must be in (0, 1], got {f}"
                )));
            }
        }
        if !(self.precise_threshold >= 0.0 && self.precise_threshold <= self.fast_threshold) {
            return Err(crate::SceneError::validation(
                "scrub thresholds must satisfy 0 <= precise_threshold <= fast_threshold",
            ));
        }
        if !(self.write_epsilon >= 0.0 && self.snap_epsilon >= 0.0) {
            return Err(crate::SceneError::validation(
                "scrub epsilons must be non-negative",
            ));
        }
        Ok(())
    }
}

/// Resolution of the scrubbable span of a media element.
pub struct EffectiveDuration;

impl EffectiveDuration {
    /// Effective duration for a media element whose natural length is `natural`.
    ///
    /// Missing or unusable metadata falls back to [`FALLBACK_DURATION_SECS`]. `crop_end` trims the
    /// tail: the result is `min(crop_end, natural)` when `crop_end` is positive.
    pub fn resolve(natural: Option<f64>, crop_end: Option<f64>) -> f64 {
        let natural = match natural {
            Some(d) if d.is_finite() && d > 0.0 => d,
            _ => FALLBACK_DURATION_SECS,
        };
        match crop_end {
            Some(c) if c.is_finite() && c > 0.0 => c.min(natural),
            _ => natural,
        }
    }
}

/// Scroll distance (px) needed so that progress 1 lands exactly on `effective_duration`.
pub fn scroll_length_for(effective_duration: f64, px_per_second: f64, viewport_height: f64) -> f64 {
    let d = if effective_duration.is_finite() {
        effective_duration.max(0.0)
    } else {
        0.0
    };
    let rate = if px_per_second.is_finite() {
        px_per_second.max(0.0)
    } else {
        0.0
    };
    d * rate + viewport_height.max(0.0)
}

/// Smooths a media time target into a per-frame current value.
#[derive(Clone, Debug)]
pub struct SmoothedScrubber {
    current: f64,
    target: f64,
    effective_duration: f64,
    tuning: ScrubTuning,
}

impl SmoothedScrubber {
    /// Scrubber at time 0 over `effective_duration` seconds.
    pub fn new(effective_duration: f64, tuning: ScrubTuning) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            effective_duration: EffectiveDuration::resolve(Some(effective_duration), None),
            tuning,
        }
    }

    /// Set the target from normalized progress: `clamp01(p) * effective_duration`.
    pub fn set_progress(&mut self, p: f64) -> f64 {
        self.target = clamp01(p) * self.effective_duration;
        self.target
    }

    /// Set the target time directly, clamped into `[0, effective_duration]`.
    pub fn set_target(&mut self, t: f64) {
        self.target = if t.is_finite() {
            t.clamp(0.0, self.effective_duration)
        } else {
            0.0
        };
    }

    /// Change the scrubbable span. Target and current are clamped into it.
    pub fn set_effective_duration(&mut self, d: f64) {
        self.effective_duration = EffectiveDuration::resolve(Some(d), None);
        self.target = self.target.clamp(0.0, self.effective_duration);
        self.current = self.current.clamp(0.0, self.effective_duration);
    }

    /// Advance one frame and return the new current time.
    pub fn step(&mut self) -> f64 {
        let delta = self.target - self.current;
        let diff = delta.abs();
        if diff <= self.tuning.snap_epsilon {
            self.current = self.target;
        } else {
            self.current += delta * self.tuning.factor_for(diff);
            if (self.target - self.current).abs() <= self.tuning.snap_epsilon {
                self.current = self.target;
            }
        }
        self.current = self.current.clamp(0.0, self.effective_duration);
        self.current
    }

    /// Smoothed time.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Desired time.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Upper clamp for both target and current.
    pub fn effective_duration(&self) -> f64 {
        self.effective_duration
    }

    /// Tuning in use.
    pub fn tuning(&self) -> &ScrubTuning {
        &self.tuning
    }

    /// `true` once current equals target exactly.
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scrub/scrubber.rs"]
mod tests;
