use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use tokio_util::sync::CancellationToken;

use crate::{
    foundation::math::inverse_lerp,
    particles::def::ParticleDef,
    particles::field::ParticleField,
    particles::source::{FieldBuild, FieldStrategy},
    progress::clock::AnimationClock,
    progress::frame::FrameLoop,
};

/// Setup state of a [`ParticleIntro`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    /// Nothing requested yet.
    Idle,
    /// A build is in flight.
    Loading,
    /// The sampled field is running.
    Ready(FieldStrategy),
    /// The synthetic field is running.
    Fallback(String),
}

/// The particle logo intro: one field, one clock, one frame loop.
#[derive(Debug)]
pub struct ParticleIntro {
    def: ParticleDef,
    phase: LoadPhase,
    field: Option<ParticleField>,
    clock: AnimationClock,
    frame_loop: FrameLoop,
    cancel: CancellationToken,
    formed_flag: Arc<AtomicBool>,
    formed_at: Option<Duration>,
}

impl ParticleIntro {
    /// An idle intro.
    pub fn new(def: ParticleDef) -> Self {
        let clock = AnimationClock::new(def.duration());
        Self {
            def,
            phase: LoadPhase::Idle,
            field: None,
            clock,
            frame_loop: FrameLoop::Idle,
            cancel: CancellationToken::new(),
            formed_flag: Arc::new(AtomicBool::new(false)),
            formed_at: None,
        }
    }

    /// Claim the right to build the field.
    ///
    /// Returns `false` while a build is in flight, once a field exists, or after unmount.
    pub fn begin_load(&mut self) -> bool {
        if self.phase != LoadPhase::Idle || self.frame_loop.is_cancelled() {
            return false;
        }
        self.phase = LoadPhase::Loading;
        tracing::debug!("particle intro loading");
        true
    }

    /// Token to hand to [`build_field`](crate::build_field). Fires on unmount.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Install a finished build and start the run at `now`.
    ///
    /// Returns `true` when the host must schedule a frame callback.
    pub fn finish_load(&mut self, build: FieldBuild, now: Duration) -> bool {
        if self.phase != LoadPhase::Loading || self.frame_loop.is_cancelled() {
            return false;
        }
        let FieldBuild { mut field, strategy } = build;
        let flag = Arc::clone(&self.formed_flag);
        field.on_formed(move || flag.store(true, Ordering::Release));

        self.phase = match strategy {
            FieldStrategy::Fallback(reason) => LoadPhase::Fallback(reason),
            other => LoadPhase::Ready(other),
        };
        tracing::debug!(phase = ?self.phase, particles = field.len(), "particle intro ready");
        self.field = Some(field);
        self.clock.start(now);
        self.frame_loop.schedule()
    }

    /// Frame callback. Returns `true` while further frames are needed.
    pub fn on_frame(&mut self, now: Duration) -> bool {
        if !self.frame_loop.fire() {
            return false;
        }
        let Some(field) = self.field.as_mut() else {
            return false;
        };
        field.step(self.clock.progress(now));
        if self.formed_at.is_none() && self.formed_flag.load(Ordering::Acquire) {
            self.formed_at = Some(now);
        }
        if self.fade_out(now) <= 0.0 {
            return false;
        }
        self.frame_loop.schedule()
    }

    /// Replay the formation from the start points.
    pub fn restart(&mut self, now: Duration) -> bool {
        if self.frame_loop.is_cancelled() {
            return false;
        }
        let Some(field) = self.field.as_mut() else {
            return false;
        };
        field.restart();
        self.formed_flag.store(false, Ordering::Release);
        self.formed_at = None;
        self.clock.restart(now);
        self.frame_loop.schedule()
    }

    /// `true` once the current run has formed.
    pub fn is_formed(&self) -> bool {
        self.formed_at.is_some()
    }

    /// Opacity of the intro layer: 1 until formed, then down to 0 over `fade_out_ms`.
    pub fn fade_out(&self, now: Duration) -> f64 {
        let Some(at) = self.formed_at else {
            return 1.0;
        };
        let since = now.saturating_sub(at).as_secs_f64();
        let span = Duration::from_millis(self.def.fade_out_ms).as_secs_f64();
        1.0 - inverse_lerp(0.0, span, since)
    }

    /// Cancel in-flight setup and the frame loop.
    ///
    /// Returns `true` when a frame callback was outstanding and must be cancelled.
    pub fn unmount(&mut self) -> bool {
        self.cancel.cancel();
        self.clock.stop();
        self.frame_loop.cancel()
    }

    /// Current setup state.
    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    /// The installed field, if any.
    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    /// Run progress at `now`.
    pub fn progress(&self, now: Duration) -> f64 {
        self.clock.progress(now)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/intro.rs"]
mod tests;
