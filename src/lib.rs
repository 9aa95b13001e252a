//! scrollscene is a scroll-synchronized animation engine.
//!
//! A page hands the engine raw inputs (scroll offsets, container geometry, media events, frame
//! timestamps) and binds its view to the values the engine writes back. Nothing in here touches
//! a DOM: the view layer reads [`StyleBoard`] signals and media times, and paints them.
//!
//! # Components
//!
//! - [`ScrollVideo`]: maps the scroll progress of a tall container onto a media element's
//!   `currentTime`, smoothed by a [`SmoothedScrubber`].
//! - [`ScrollStory`]: a pinned, chaptered [`ChapterTimeline`] with cross-faded panels, per-chapter
//!   tweens and a progress rail.
//! - [`ParticleIntro`]: a [`ParticleField`] that forms a logo from a shape, built off the frame
//!   loop by [`build_field`] and bounded by [`bounded`].
//! - [`CounterAnimator`]: a wall-clock count-up with an optional final literal.
//!
//! Each component is an explicit handle: it owns its progress source, its [`FrameLoop`] and its
//! state enum, and `unmount()` tears it down. There is no global registry.
//!
//! # Errors
//!
//! Per-frame paths never fail. Geometry problems degrade to progress 0, media faults become
//! [`MediaState::Error`], and particle setup substitutes a [`FallbackPattern`]. Only
//! configuration loading and explicit asset decoding return [`SceneError`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod counter;
mod foundation;
mod particles;
mod progress;
mod scene;
mod scrub;
mod timeline;

pub use animation::ease::Ease;
pub use animation::lerp::Lerp;
pub use animation::signal::{ElementStyle, Signal, StyleBoard};
pub use counter::counter::{
    CounterAnimator, CounterDef, CounterDisplay, CounterFrame, CounterPhase,
};
pub use counter::format::format_count;
pub use foundation::core::{Point, Rgba8, Vec2};
pub use foundation::error::{SceneError, SceneResult};
pub use foundation::math::{Rng64, clamp01, inverse_lerp, lerp};
#[cfg(feature = "fetch")]
pub use particles::fetch::HttpGeoJsonShape;
pub use particles::fetch::bounded;
pub use particles::def::{ParticleDef, Placement};
pub use particles::field::{PARALLEL_THRESHOLD, ParticleField};
pub use particles::intro::{LoadPhase, ParticleIntro};
pub use particles::particle::{Particle, stagger_delay};
pub use particles::raster::Raster;
pub use particles::sample::{
    ColorClass, TargetPoint, classify, match_cardinality, sample_shape, sample_targets,
};
pub use particles::source::{
    FallbackPattern, FieldBuild, FieldStrategy, GeoJsonShape, PointShape, RasterShape,
    ShapeSource, build_field,
};
pub use progress::clock::AnimationClock;
pub use progress::frame::{FrameGate, FrameLoop};
pub use progress::source::{Progress, ProgressSource, ScrollGeometry, scroll_progress};
pub use progress::visibility::{VisibilityTracker, intersection_ratio};
pub use scene::config::SceneConfig;
pub use scrub::media::{MediaElement, MediaEvent, MediaState};
pub use scrub::scrubber::{
    EffectiveDuration, FALLBACK_DURATION_SECS, ScrubTuning, SmoothedScrubber, scroll_length_for,
};
pub use scrub::video::{ScrollVideo, ScrollVideoDef, ScrubFrame};
pub use timeline::chapter::{ChapterLayout, PanelState, Window};
pub use timeline::model::{ChapterDef, Property, SubRange, TimelineDef, TweenDef};
pub use timeline::story::ScrollStory;
pub use timeline::timeline::{ChapterTimeline, TimelineFrame};
