use std::collections::BTreeSet;

use crate::{
    animation::ease::Ease,
    animation::signal::ElementStyle,
    foundation::error::{SceneError, SceneResult},
};

/// Visual property a tween drives.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    /// [`ElementStyle::opacity`].
    Opacity,
    /// [`ElementStyle::translate_x`].
    TranslateX,
    /// [`ElementStyle::translate_y`].
    TranslateY,
    /// [`ElementStyle::scale`].
    Scale,
    /// [`ElementStyle::fill`].
    Fill,
    /// [`ElementStyle::draw`].
    Draw,
}

impl Property {
    /// Write `v` into the matching field of `style`.
    pub fn apply(self, style: &mut ElementStyle, v: f64) {
        match self {
            Self::Opacity => style.opacity = v.clamp(0.0, 1.0),
            Self::TranslateX => style.translate_x = v,
            Self::TranslateY => style.translate_y = v,
            Self::Scale => style.scale = v,
            Self::Fill => style.fill = v.clamp(0.0, 1.0),
            Self::Draw => style.draw = v.clamp(0.0, 1.0),
        }
    }

    /// Read the matching field of `style`.
    pub fn read(self, style: &ElementStyle) -> f64 {
        match self {
            Self::Opacity => style.opacity,
            Self::TranslateX => style.translate_x,
            Self::TranslateY => style.translate_y,
            Self::Scale => style.scale,
            Self::Fill => style.fill,
            Self::Draw => style.draw,
        }
    }
}

/// Fraction `[start, end]` of a chapter's segment.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SubRange {
    /// Start fraction in `[0, 1]`.
    pub start: f64,
    /// End fraction in `[start, 1]`.
    pub end: f64,
}

impl Default for SubRange {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 1.0,
        }
    }
}

/// One property animation owned by a chapter.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TweenDef {
    /// Element id the view binds to.
    pub target: String,
    /// Driven property.
    pub property: Property,
    /// Value before the tween starts.
    pub from: f64,
    /// Value after the tween ends.
    pub to: f64,
    /// Where inside the chapter segment the tween runs.
    #[serde(default)]
    pub range: SubRange,
    /// Easing curve.
    #[serde(default)]
    pub ease: Ease,
}

/// One chapter of a pinned scroll story.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChapterDef {
    /// Label used for navigation (`scroll to "logistics"`).
    pub label: String,
    /// Element id of the chapter's panel (cross-faded as a whole).
    pub panel: String,
    /// Chapter-specific visuals: bar fills, stroke draws, dot reveals.
    #[serde(default)]
    pub tweens: Vec<TweenDef>,
    /// Opaque content (copy, stat targets) passed through to the view.
    #[serde(default)]
    pub content: serde_json::Value,
}

fn default_entry_fraction() -> f64 {
    0.15
}
fn default_exit_fraction() -> f64 {
    0.15
}
fn default_overlap() -> f64 {
    0.05
}
fn default_offset_px() -> f64 {
    20.0
}

/// Static configuration of a chaptered, scroll-pinned timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineDef {
    /// Chapters in scroll order.
    pub chapters: Vec<ChapterDef>,
    /// Leading fraction of each segment spent fading in.
    #[serde(default = "default_entry_fraction")]
    pub entry_fraction: f64,
    /// Trailing fraction of each segment spent fading out.
    #[serde(default = "default_exit_fraction")]
    pub exit_fraction: f64,
    /// How far (as a segment fraction) an entry starts before its segment, overlapping the
    /// previous exit.
    #[serde(default = "default_overlap")]
    pub overlap: f64,
    /// Vertical offset of panels that have not entered yet.
    #[serde(default = "default_offset_px")]
    pub offset_px: f64,
    /// Element id of the shared progress rail, if any.
    #[serde(default)]
    pub rail: Option<String>,
    /// Ease for panel entries and exits.
    #[serde(default)]
    pub ease: Ease,
}

impl TimelineDef {
    /// Definition with default tuning around `chapters`.
    pub fn new(chapters: Vec<ChapterDef>) -> Self {
        Self {
            chapters,
            entry_fraction: default_entry_fraction(),
            exit_fraction: default_exit_fraction(),
            overlap: default_overlap(),
            offset_px: default_offset_px(),
            rail: None,
            ease: Ease::default(),
        }
    }

    /// Check contiguity and the fraction constraints.
    pub fn validate(&self) -> SceneResult<()> {
        if self.chapters.is_empty() {
            return Err(SceneError::validation("timeline needs at least one chapter"));
        }
        let unit = |name: &str, v: f64| -> SceneResult<()> {
            if v.is_finite() && (0.0..1.0).contains(&v) {
                Ok(())
            } else {
                Err(SceneError::validation(format!(
                    "timeline.{name} must be in [0, 1), got {v}"
                )))
            }
        };
        unit("entry_fraction", self.entry_fraction)?;
        unit("exit_fraction", self.exit_fraction)?;
        unit("overlap", self.overlap)?;
        if self.entry_fraction + self.exit_fraction > 1.0 {
            return Err(SceneError::validation(
                "timeline entry_fraction + exit_fraction must be <= 1",
            ));
        }
        if self.overlap > self.exit_fraction {
            return Err(SceneError::validation(
                "timeline overlap must not exceed exit_fraction",
            ));
        }
        if !self.offset_px.is_finite() {
            return Err(SceneError::validation("timeline.offset_px must be finite"));
        }

        let mut labels = BTreeSet::new();
        for (i, c) in self.chapters.iter().enumerate() {
            if c.label.trim().is_empty() || c.panel.trim().is_empty() {
                return Err(SceneError::validation(format!(
                    "chapter {i} needs a non-empty label and panel"
                )));
            }
            if !labels.insert(c.label.as_str()) {
                return Err(SceneError::validation(format!(
                    "duplicate chapter label '{}'",
                    c.label
                )));
            }
            for tw in &c.tweens {
                let SubRange { start, end } = tw.range;
                if !(0.0..=1.0).contains(&start) || !(start..=1.0).contains(&end) {
                    return Err(SceneError::validation(format!(
                        "chapter '{}': tween on '{}' has invalid range [{start}, {end}]",
                        c.label, tw.target
                    )));
                }
                if !tw.from.is_finite() || !tw.to.is_finite() {
                    return Err(SceneError::validation(format!(
                        "chapter '{}': tween on '{}' needs finite from/to",
                        c.label, tw.target
                    )));
                }
            }
        }
        Ok(())
    }
}
