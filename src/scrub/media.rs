/// The media element a [`crate::ScrollVideo`] drives.
///
/// The scrubber is the only writer of `current_time` for a given element.
pub trait MediaElement {
    /// Playback position in seconds.
    fn current_time(&self) -> f64;
    /// Seek to `t` seconds.
    fn set_current_time(&mut self, t: f64);
}

/// Signals raised by the media element itself.
#[derive(Clone, Debug, PartialEq)]
pub enum MediaEvent {
    /// Metadata loaded; `duration` may still be NaN or infinite for live sources.
    LoadedMetadata {
        /// Reported natural duration in seconds.
        duration: f64,
    },
    /// A seek started.
    Seeking,
    /// The outstanding seek finished.
    Seeked,
    /// Load or decode failure.
    Error(String),
    /// The source was replaced; start over.
    Reset,
}

/// Tagged lifecycle of a scrubbed media element.
#[derive(Clone, Debug, PartialEq)]
pub enum MediaState {
    /// Waiting for metadata. Scrubbing uses the fallback duration.
    Loading {
        /// A seek started before metadata arrived and has not finished.
        seeking: bool,
    },
    /// Metadata known; writes allowed.
    Ready {
        /// Natural duration, if the element reported a usable one.
        natural: Option<f64>,
    },
    /// A seek is in flight; writes are held back until it completes.
    Seeking {
        /// Natural duration carried over from `Ready`.
        natural: Option<f64>,
    },
    /// The element failed. Only [`MediaEvent::Reset`] leaves this state.
    Error(String),
}

impl MediaState {
    /// Initial state: no metadata, no seek in flight.
    pub const LOADING: Self = Self::Loading { seeking: false };

    /// Apply `ev` and return the next state.
    pub fn transition(self, ev: &MediaEvent) -> Self {
        use MediaEvent as E;
        match (self, ev) {
            (_, E::Reset) => Self::LOADING,
            (Self::Error(msg), _) => Self::Error(msg),
            (_, E::Error(msg)) => Self::Error(msg.clone()),
            (
                Self::Loading { seeking: true } | Self::Seeking { .. },
                E::LoadedMetadata { duration },
            ) => Self::Seeking {
                natural: usable(*duration),
            },
            (_, E::LoadedMetadata { duration }) => Self::Ready {
                natural: usable(*duration),
            },
            (Self::Ready { natural } | Self::Seeking { natural }, E::Seeking) => {
                Self::Seeking { natural }
            }
            (Self::Seeking { natural } | Self::Ready { natural }, E::Seeked) => {
                Self::Ready { natural }
            }
            (Self::Loading { .. }, E::Seeking) => Self::Loading { seeking: true },
            (Self::Loading { .. }, E::Seeked) => Self::LOADING,
        }
    }

    /// Whether the scrubber may write `current_time` in this state.
    pub fn accepts_writes(&self) -> bool {
        matches!(self, Self::Loading { seeking: false } | Self::Ready { .. })
    }

    /// Natural duration known so far.
    pub fn natural_duration(&self) -> Option<f64> {
        match self {
            Self::Ready { natural } | Self::Seeking { natural } => *natural,
            Self::Loading { .. } | Self::Error(_) => None,
        }
    }

    /// `true` in [`MediaState::Error`].
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

fn usable(d: f64) -> Option<f64> {
    (d.is_finite() && d > 0.0).then_some(d)
}

#[cfg(test)]
#[path = "../../tests/unit/scrub/media.rs"]
mod tests;
