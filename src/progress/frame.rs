/// Coalesces bursts of input events into at most one pending frame update.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    /// Gate with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an update as wanted. Returns `true` only when the caller must schedule a frame.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Consume the pending update at frame time. Returns whether one was pending.
    pub fn begin_frame(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// `true` while an update is waiting for its frame.
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Lifecycle of a component's per-frame callback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrameLoop {
    /// No frame callback outstanding.
    #[default]
    Idle,
    /// A frame callback is outstanding.
    Scheduled,
    /// Torn down; refuses every further request.
    Cancelled,
}

impl FrameLoop {
    /// Ask for a frame. Returns `true` when the host must schedule a new callback.
    pub fn schedule(&mut self) -> bool {
        match self {
            Self::Idle => {
                *self = Self::Scheduled;
                true
            }
            Self::Scheduled | Self::Cancelled => false,
        }
    }

    /// Called when the scheduled callback fires. Returns `false` once cancelled.
    pub fn fire(&mut self) -> bool {
        match self {
            Self::Cancelled => false,
            Self::Idle | Self::Scheduled => {
                *self = Self::Idle;
                true
            }
        }
    }

    /// Tear down. Returns `true` when a callback was outstanding and must be cancelled.
    pub fn cancel(&mut self) -> bool {
        let outstanding = *self == Self::Scheduled;
        *self = Self::Cancelled;
        outstanding
    }

    /// `true` after [`FrameLoop::cancel`].
    pub fn is_cancelled(&self) -> bool {
        *self == Self::Cancelled
    }
}

#[cfg(test)]
#[path = "../../tests/unit/progress/frame.rs"]
mod tests;
