use crate::{
    animation::signal::StyleBoard,
    foundation::error::SceneResult,
    progress::frame::{FrameGate, FrameLoop},
    progress::source::{ProgressSource, ScrollGeometry},
    timeline::model::TimelineDef,
    timeline::timeline::{ChapterTimeline, TimelineFrame},
};

/// A pinned, chaptered scroll story.
///
/// Each instance owns its timeline, its style board and its frame loop; two stories mounted on
/// the same page never see each other's state.
#[derive(Debug)]
pub struct ScrollStory {
    source: ProgressSource,
    timeline: ChapterTimeline,
    board: StyleBoard,
    gate: FrameGate,
    frame_loop: FrameLoop,
    last: Option<TimelineFrame>,
}

impl ScrollStory {
    /// Build the timeline and write its initial state into a fresh board.
    pub fn new(def: TimelineDef) -> SceneResult<Self> {
        let timeline = ChapterTimeline::new(def)?;
        let mut story = Self {
            source: ProgressSource::new(),
            timeline,
            board: StyleBoard::new(),
            gate: FrameGate::new(),
            frame_loop: FrameLoop::Idle,
            last: None,
        };
        story.render(0.0);
        Ok(story)
    }

    /// Scroll input. Returns `true` when the host must schedule a frame callback.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        if self.frame_loop.is_cancelled() {
            return false;
        }
        self.source.on_scroll(scroll_y);
        self.request_frame()
    }

    /// Layout input. Returns `true` when the host must schedule a frame callback.
    pub fn on_resize(&mut self, geometry: ScrollGeometry) -> bool {
        if self.frame_loop.is_cancelled() {
            return false;
        }
        self.source.on_resize(geometry);
        self.request_frame()
    }

    fn request_frame(&mut self) -> bool {
        if !self.gate.request() {
            return false;
        }
        self.frame_loop.schedule()
    }

    /// Frame callback: resample at the latest progress and publish into the board.
    ///
    /// Returns the number of element styles that changed, or `None` once unmounted.
    pub fn on_frame(&mut self) -> Option<usize> {
        if !self.frame_loop.fire() {
            return None;
        }
        if !self.gate.begin_frame() {
            return Some(0);
        }
        Some(self.render(self.source.progress()))
    }

    fn render(&mut self, p: f64) -> usize {
        let frame = self.timeline.sample(p);
        let changed = frame
            .elements
            .iter()
            .filter(|(id, style)| self.board.write(id, **style))
            .count();
        self.last = Some(frame);
        changed
    }

    /// Swap in a new definition (hot reload). The previous timeline's styles are cleared first.
    pub fn reload(&mut self, def: TimelineDef) -> SceneResult<()> {
        let timeline = ChapterTimeline::new(def)?;
        self.board.clear();
        self.timeline = timeline;
        self.render(self.source.progress());
        Ok(())
    }

    /// Scroll position that lands on `label`, once the container is measured.
    pub fn scroll_for_label(&self, label: &str) -> Option<f64> {
        let p = self.timeline.label_progress(label)?;
        self.source.scroll_for_progress(p)
    }

    /// Tear down: cancel the frame loop and revert every applied style.
    ///
    /// Returns `true` when a frame callback was outstanding and must be cancelled.
    pub fn unmount(&mut self) -> bool {
        let outstanding = self.frame_loop.cancel();
        self.board.clear();
        self.last = None;
        outstanding
    }

    /// Styles published so far.
    pub fn board(&self) -> &StyleBoard {
        &self.board
    }

    /// The most recent sampled frame.
    pub fn last_frame(&self) -> Option<&TimelineFrame> {
        self.last.as_ref()
    }

    /// Current scroll progress.
    pub fn progress(&self) -> f64 {
        self.source.progress()
    }

    /// The underlying timeline.
    pub fn timeline(&self) -> &ChapterTimeline {
        &self.timeline
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/story.rs"]
mod tests;
