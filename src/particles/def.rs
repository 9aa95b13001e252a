use std::time::Duration;

use crate::{
    SceneError, SceneResult,
    foundation::core::{Rgba8, Vec2},
};

fn default_alpha_cutoff() -> u8 {
    128
}
fn default_density() -> f64 {
    0.35
}
fn default_sample_step() -> u32 {
    2
}
fn default_max_particles() -> usize {
    6000
}
fn default_seed() -> u64 {
    7
}
fn default_accent_margin() -> u8 {
    30
}
fn default_accent_color() -> Rgba8 {
    Rgba8::rgb(0x3b, 0x82, 0xf6)
}
fn default_base_color() -> Rgba8 {
    Rgba8::WHITE
}
fn default_color_threshold() -> f64 {
    0.6
}
fn default_accel() -> f64 {
    0.02
}
fn default_decel() -> f64 {
    0.8
}
fn default_damping() -> f64 {
    0.98
}
fn default_snap_distance() -> f64 {
    1.0
}
fn default_stagger_span() -> f64 {
    0.35
}
fn default_settle_from() -> f64 {
    0.85
}
fn default_settle_pull() -> f64 {
    0.2
}
fn default_start_opacity() -> f64 {
    0.5
}
fn default_formed_epsilon() -> f64 {
    0.5
}
fn default_formed_progress() -> f64 {
    0.95
}
fn default_timeout_ms() -> u64 {
    4000
}
fn default_duration_ms() -> u64 {
    3000
}
fn default_fade_out_ms() -> u64 {
    600
}
fn default_canvas_width() -> f64 {
    1200.0
}
fn default_canvas_height() -> f64 {
    800.0
}
fn default_target_fit() -> f64 {
    0.6
}
fn default_size_min() -> f64 {
    1.0
}
fn default_size_max() -> f64 {
    2.5
}
fn default_fallback_cols() -> u32 {
    40
}
fn default_fallback_rows() -> u32 {
    24
}

/// Tuning of a particle logo formation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParticleDef {
    /// Pixels with alpha below this never become particles.
    #[serde(default = "default_alpha_cutoff")]
    pub alpha_cutoff: u8,
    /// Probability that an eligible pixel is kept.
    #[serde(default = "default_density")]
    pub density: f64,
    /// Stride of the sampling grid, in source pixels.
    #[serde(default = "default_sample_step")]
    pub sample_step: u32,
    /// Hard cap on the particle count.
    #[serde(default = "default_max_particles")]
    pub max_particles: usize,
    /// Seed for density thinning and scattered starts.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Blue must exceed red and green by this much for a pixel to count as accent.
    #[serde(default = "default_accent_margin")]
    pub accent_margin: u8,
    /// Color pinned on accent particles.
    #[serde(default = "default_accent_color")]
    pub accent_color: Rgba8,
    /// Color base particles start from.
    #[serde(default = "default_base_color")]
    pub base_color: Rgba8,
    /// Progress after which base particles blend towards their sampled color.
    #[serde(default = "default_color_threshold")]
    pub color_threshold: f64,

    /// Spring strength towards the target, in `(0, 1]`.
    #[serde(default = "default_accel")]
    pub accel: f64,
    /// How much the spring weakens as a particle's own progress reaches 1.
    #[serde(default = "default_decel")]
    pub decel: f64,
    /// Per-frame velocity retention, in `(0, 1)`.
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Distance under which a particle snaps onto its target.
    #[serde(default = "default_snap_distance")]
    pub snap_distance: f64,
    /// Largest start delay, as a fraction of the run.
    #[serde(default = "default_stagger_span")]
    pub stagger_span: f64,
    /// Particle progress at which the settle pull starts ramping in.
    #[serde(default = "default_settle_from")]
    pub settle_from: f64,
    /// Fraction of the remaining distance removed per frame at full ramp, in `(0, 1]`.
    #[serde(default = "default_settle_pull")]
    pub settle_pull: f64,

    /// Opacity of a particle that has not started moving.
    #[serde(default = "default_start_opacity")]
    pub start_opacity: f64,

    /// Every particle must be this close to its target to count as formed.
    #[serde(default = "default_formed_epsilon")]
    pub formed_epsilon: f64,
    /// Minimum run progress before the field may report formed.
    #[serde(default = "default_formed_progress")]
    pub formed_progress: f64,

    /// Upper bound on asynchronous setup.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Length of one formation run.
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    /// Fade of the intro layer once the logo is formed.
    #[serde(default = "default_fade_out_ms")]
    pub fade_out_ms: u64,

    /// Canvas width in px.
    #[serde(default = "default_canvas_width")]
    pub canvas_width: f64,
    /// Canvas height in px.
    #[serde(default = "default_canvas_height")]
    pub canvas_height: f64,
    /// Share of the canvas the target logo is fitted into.
    #[serde(default = "default_target_fit")]
    pub target_fit: f64,

    /// Smallest particle size in px.
    #[serde(default = "default_size_min")]
    pub size_min: f64,
    /// Largest particle size in px.
    #[serde(default = "default_size_max")]
    pub size_max: f64,

    /// Columns of the synthetic fallback grid.
    #[serde(default = "default_fallback_cols")]
    pub fallback_cols: u32,
    /// Rows of the synthetic fallback grid.
    #[serde(default = "default_fallback_rows")]
    pub fallback_rows: u32,
}

impl Default for ParticleDef {
    fn default() -> Self {
        Self {
            alpha_cutoff: default_alpha_cutoff(),
            density: default_density(),
            sample_step: default_sample_step(),
            max_particles: default_max_particles(),
            seed: default_seed(),
            accent_margin: default_accent_margin(),
            accent_color: default_accent_color(),
            base_color: default_base_color(),
            color_threshold: default_color_threshold(),
            accel: default_accel(),
            decel: default_decel(),
            damping: default_damping(),
            snap_distance: default_snap_distance(),
            stagger_span: default_stagger_span(),
            settle_from: default_settle_from(),
            settle_pull: default_settle_pull(),
            start_opacity: default_start_opacity(),
            formed_epsilon: default_formed_epsilon(),
            formed_progress: default_formed_progress(),
            timeout_ms: default_timeout_ms(),
            duration_ms: default_duration_ms(),
            fade_out_ms: default_fade_out_ms(),
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            target_fit: default_target_fit(),
            size_min: default_size_min(),
            size_max: default_size_max(),
            fallback_cols: default_fallback_cols(),
            fallback_rows: default_fallback_rows(),
        }
    }
}

impl ParticleDef {
    /// Setup deadline.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Length of one formation run.
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Canvas mapping used for targets.
    pub fn placement(&self) -> Placement {
        Placement {
            canvas: Vec2::new(self.canvas_width, self.canvas_height),
            fit: self.target_fit,
        }
    }

    /// Check ranges and relationships between fields.
    pub fn validate(&self) -> SceneResult<()> {
        fn unit_open(name: &str, v: f64) -> SceneResult<()> {
            if !(v.is_finite() && v > 0.0 && v <= 1.0) {
                return Err(SceneError::validation(format!(
                    "particles.{name} must be in (0, 1], got {v}"
                )));
            }
            Ok(())
        }
        fn unit(name: &str, v: f64) -> SceneResult<()> {
            if !(v.is_finite() && (0.0..=1.0).contains(&v)) {
                return Err(SceneError::validation(format!(
                    "particles.{name} must be in [0, 1], got {v}"
                )));
            }
            Ok(())
        }
        fn unit_exclusive(name: &str, v: f64) -> SceneResult<()> {
            if !(v.is_finite() && v > 0.0 && v < 1.0) {
                return Err(SceneError::validation(format!(
                    "particles.{name} must be in (0, 1), got {v}"
                )));
            }
            Ok(())
        }
        fn positive(name: &str, v: f64) -> SceneResult<()> {
            if !(v.is_finite() && v > 0.0) {
                return Err(SceneError::validation(format!(
                    "particles.{name} must be finite and > 0, got {v}"
                )));
            }
            Ok(())
        }

        unit_open("density", self.density)?;
        // Formation must always finish: velocity has to decay and the settle pull has to act,
        // since the spring alone vanishes when decel is 1.
        unit_exclusive("damping", self.damping)?;
        unit_open("settle_pull", self.settle_pull)?;
        unit_open("accel", self.accel)?;
        unit_open("target_fit", self.target_fit)?;
        unit("decel", self.decel)?;
        unit("color_threshold", self.color_threshold)?;
        unit("settle_from", self.settle_from)?;
        unit("start_opacity", self.start_opacity)?;
        unit("formed_progress", self.formed_progress)?;
        positive("snap_distance", self.snap_distance)?;
        positive("formed_epsilon", self.formed_epsilon)?;
        positive("canvas_width", self.canvas_width)?;
        positive("canvas_height", self.canvas_height)?;
        positive("size_min", self.size_min)?;

        if !(self.stagger_span.is_finite() && (0.0..1.0).contains(&self.stagger_span)) {
            return Err(SceneError::validation(
                "particles.stagger_span must be in [0, 1)",
            ));
        }
        if self.settle_from >= 1.0 {
            return Err(SceneError::validation("particles.settle_from must be < 1"));
        }
        if !(self.size_max.is_finite() && self.size_max >= self.size_min) {
            return Err(SceneError::validation(
                "particles.size_max must be >= size_min",
            ));
        }
        if self.sample_step == 0 {
            return Err(SceneError::validation("particles.sample_step must be >= 1"));
        }
        if self.max_particles == 0 {
            return Err(SceneError::validation(
                "particles.max_particles must be >= 1",
            ));
        }
        if self.fallback_cols == 0 || self.fallback_rows == 0 {
            return Err(SceneError::validation(
                "particles.fallback grid must have at least one column and row",
            ));
        }
        if self.timeout_ms == 0 {
            return Err(SceneError::validation("particles.timeout_ms must be > 0"));
        }
        Ok(())
    }
}

/// Mapping from source image pixels into canvas space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Canvas size in px.
    pub canvas: Vec2,
    /// Share of the canvas the source is fitted into, keeping its aspect ratio.
    pub fit: f64,
}

impl Placement {
    /// Same canvas, different fit.
    pub fn with_fit(self, fit: f64) -> Self {
        Self { fit, ..self }
    }

    /// Scale and offset that center a `width` x `height` source on the canvas.
    pub fn fit_rect(&self, width: f64, height: f64) -> (f64, Vec2) {
        if width <= 0.0 || height <= 0.0 {
            return (0.0, self.canvas * 0.5);
        }
        let scale = (self.canvas.x * self.fit / width).min(self.canvas.y * self.fit / height);
        let offset = Vec2::new(
            (self.canvas.x - width * scale) * 0.5,
            (self.canvas.y - height * scale) * 0.5,
        );
        (scale, offset)
    }

    /// Top-left corner and size of the fitted area for a `width` x `height` source.
    pub fn area(&self, width: f64, height: f64) -> (Vec2, Vec2) {
        let (scale, offset) = self.fit_rect(width, height);
        (offset, Vec2::new(width * scale, height * scale))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/def.rs"]
mod tests;
