use crate::{
    progress::frame::FrameLoop,
    progress::source::{ProgressSource, ScrollGeometry},
    scrub::media::{MediaElement, MediaEvent, MediaState},
    scrub::scrubber::{EffectiveDuration, ScrubTuning, SmoothedScrubber, scroll_length_for},
};

fn default_px_per_second() -> f64 {
    300.0
}

/// Static configuration of one scroll-scrubbed video.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollVideoDef {
    /// Opaque asset path handed to the page layer.
    #[serde(default)]
    pub src: Option<String>,
    /// Trim the tail: scrubbing stops at this time (seconds) instead of the natural end.
    #[serde(default)]
    pub crop_end_secs: Option<f64>,
    /// Scroll distance that corresponds to one second of media.
    #[serde(default = "default_px_per_second")]
    pub px_per_second: f64,
    /// Smoothing factors.
    #[serde(default)]
    pub tuning: ScrubTuning,
}

impl Default for ScrollVideoDef {
    fn default() -> Self {
        Self {
            src: None,
            crop_end_secs: None,
            px_per_second: default_px_per_second(),
            tuning: ScrubTuning::default(),
        }
    }
}

impl ScrollVideoDef {
    pub(crate) fn validate(&self) -> crate::SceneResult<()> {
        if !(self.px_per_second.is_finite() && self.px_per_second > 0.0) {
            return Err(crate::SceneError::validation(
                "video.px_per_second must be finite and > 0",
            ));
        }
        if let Some(c) = self.crop_end_secs
            && !(c.is_finite() && c > 0.0)
        {
            return Err(crate::SceneError::validation(
                "video.crop_end_secs must be finite and > 0 when set",
            ));
        }
        self.tuning.validate()
    }
}

/// Result of one [`ScrollVideo::on_frame`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrubFrame {
    /// Smoothed time after this frame.
    pub current_time: f64,
    /// Whether `current_time` was written to the media element.
    pub wrote: bool,
    /// Whether the host must schedule another frame.
    pub reschedule: bool,
}

/// Scroll-scrubbed video component: scroll position in, media `currentTime` out.
#[derive(Debug)]
pub struct ScrollVideo<M> {
    media: M,
    def: ScrollVideoDef,
    state: MediaState,
    source: ProgressSource,
    scrubber: SmoothedScrubber,
    frame_loop: FrameLoop,
}

impl<M> ScrollVideo<M>
where
    M: MediaElement,
{
    /// Mount a component around `media`. Starts in [`MediaState::LOADING`].
    pub fn new(media: M, def: ScrollVideoDef) -> Self {
        let effective = EffectiveDuration::resolve(None, def.crop_end_secs);
        let scrubber = SmoothedScrubber::new(effective, def.tuning);
        Self {
            media,
            def,
            state: MediaState::LOADING,
            source: ProgressSource::new(),
            scrubber,
            frame_loop: FrameLoop::Idle,
        }
    }

    /// Scroll input. Returns `true` when the host must schedule a frame callback.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        if self.frame_loop.is_cancelled() {
            return false;
        }
        let p = self.source.on_scroll(scroll_y);
        self.scrubber.set_progress(p);
        self.request_frame()
    }

    /// Layout input. Returns `true` when the host must schedule a frame callback.
    pub fn on_resize(&mut self, geometry: ScrollGeometry) -> bool {
        if self.frame_loop.is_cancelled() {
            return false;
        }
        let p = self.source.on_resize(geometry);
        self.scrubber.set_progress(p);
        self.request_frame()
    }

    /// Media element signal. Returns `true` when the host must schedule a frame callback.
    pub fn on_media_event(&mut self, ev: &MediaEvent) -> bool {
        if self.frame_loop.is_cancelled() {
            return false;
        }
        let prev = std::mem::replace(&mut self.state, MediaState::LOADING);
        self.state = prev.transition(ev);
        tracing::debug!(event = ?ev, state = ?self.state, "media state");

        match ev {
            MediaEvent::LoadedMetadata { .. } | MediaEvent::Reset => {
                let effective = EffectiveDuration::resolve(
                    self.state.natural_duration(),
                    self.def.crop_end_secs,
                );
                self.scrubber.set_effective_duration(effective);
                self.scrubber.set_progress(self.source.progress());
            }
            MediaEvent::Seeked => {}
            MediaEvent::Error(msg) => {
                tracing::warn!(error = %msg, "media failed; scrubbing disabled");
                return false;
            }
            MediaEvent::Seeking => return false,
        }
        self.request_frame()
    }

    /// Per-frame update: smooth toward the target and write the media time if allowed.
    pub fn on_frame(&mut self) -> ScrubFrame {
        if !self.frame_loop.fire() || self.state.is_error() {
            return ScrubFrame {
                current_time: self.scrubber.current(),
                wrote: false,
                reschedule: false,
            };
        }
        let current = self.scrubber.step();
        let settled = self.scrubber.is_settled();
        let delta = (current - self.media.current_time()).abs();
        // The settling frame always lands exactly on the target.
        let worth_writing = delta > self.def.tuning.write_epsilon || (settled && delta > 0.0);
        let mut wrote = false;
        if self.state.accepts_writes() && worth_writing {
            self.media.set_current_time(current);
            wrote = true;
        }

        let reschedule = !settled && self.request_frame();
        ScrubFrame {
            current_time: current,
            wrote,
            reschedule,
        }
    }

    // The loop alone coalesces: idle interpolation frames ask for a successor without new input.
    fn request_frame(&mut self) -> bool {
        self.frame_loop.schedule()
    }

    /// Tear down. Returns `true` when a frame callback was outstanding and must be cancelled.
    pub fn unmount(&mut self) -> bool {
        self.frame_loop.cancel()
    }

    /// Scrollable height that makes progress 1 land on the effective duration.
    pub fn scroll_length(&self, viewport_height: f64) -> f64 {
        scroll_length_for(
            self.scrubber.effective_duration(),
            self.def.px_per_second,
            viewport_height,
        )
    }

    /// `true` when the page should render its fallback instead of the video.
    pub fn has_error(&self) -> bool {
        self.state.is_error()
    }

    /// Current media state.
    pub fn state(&self) -> &MediaState {
        &self.state
    }

    /// Current scroll progress.
    pub fn progress(&self) -> f64 {
        self.source.progress()
    }

    /// The smoothing state.
    pub fn scrubber(&self) -> &SmoothedScrubber {
        &self.scrubber
    }

    /// The driven element.
    pub fn media(&self) -> &M {
        &self.media
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scrub/video.rs"]
mod tests;
