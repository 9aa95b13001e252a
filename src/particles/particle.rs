use crate::{
    animation::lerp::Lerp,
    foundation::core::{Rgba8, Vec2},
    foundation::math::{clamp01, hash01, inverse_lerp, lerp},
    particles::def::ParticleDef,
    particles::sample::{ColorClass, TargetPoint, classify},
};

/// One moving point of a [`ParticleField`](crate::ParticleField).
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    start: Vec2,
    pos: Vec2,
    vel: Vec2,
    target: Vec2,
    class: ColorClass,
    start_color: Rgba8,
    target_color: Rgba8,
    color: Rgba8,
    opacity: f64,
    size: f64,
    delay: f64,
}

impl Particle {
    /// A particle at rest on `start`, headed for `target`.
    pub fn new(start: Vec2, target: &TargetPoint, def: &ParticleDef) -> Self {
        let class = classify(target.color, def.accent_margin);
        let start_color = match class {
            ColorClass::Accent => def.accent_color,
            ColorClass::Base => def.base_color,
        };
        let tp = target.pos;
        let delay = stagger_delay(tp, def.stagger_span);
        let size = lerp(def.size_min, def.size_max, hash01(def.seed, tp.x, tp.y));
        Self {
            start,
            pos: start,
            vel: Vec2::ZERO,
            target: tp,
            class,
            start_color,
            target_color: target.color,
            color: start_color,
            opacity: def.start_opacity,
            size,
            delay,
        }
    }

    /// Advance one frame at run progress `progress`.
    pub(crate) fn step(&mut self, progress: f64, def: &ParticleDef) {
        let adjusted = self.adjusted(progress);
        self.opacity = lerp(def.start_opacity, 1.0, adjusted);
        self.color = match self.class {
            ColorClass::Accent => def.accent_color,
            ColorClass::Base if progress >= def.color_threshold => {
                let t = inverse_lerp(def.color_threshold, 1.0, progress);
                Rgba8::lerp(&self.start_color, &self.target_color, t)
            }
            ColorClass::Base => self.start_color,
        };
        if adjusted <= 0.0 {
            return;
        }

        let d = self.target - self.pos;
        if d.length() <= def.snap_distance {
            self.pos = self.target;
            self.vel = Vec2::ZERO;
            return;
        }
        self.vel += d * (def.accel * (1.0 - adjusted * def.decel));
        self.vel *= def.damping;
        self.pos += self.vel;

        let ramp = if adjusted > def.settle_from {
            inverse_lerp(def.settle_from, 1.0, adjusted)
        } else {
            0.0
        };
        self.pos += (self.target - self.pos) * (def.settle_pull * ramp);
    }

    /// Run progress remapped past this particle's delay.
    pub fn adjusted(&self, progress: f64) -> f64 {
        clamp01((progress - self.delay) / (1.0 - self.delay))
    }

    pub(crate) fn reset(&mut self, def: &ParticleDef) {
        self.pos = self.start;
        self.vel = Vec2::ZERO;
        self.color = self.start_color;
        self.opacity = def.start_opacity;
    }

    /// Distance left to the target.
    pub fn distance(&self) -> f64 {
        (self.target - self.pos).length()
    }

    /// Where the particle is now.
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Where the particle started.
    pub fn start(&self) -> Vec2 {
        self.start
    }

    /// Current velocity in px per frame.
    pub fn vel(&self) -> Vec2 {
        self.vel
    }

    /// Where the particle ends up.
    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Color bucket.
    pub fn class(&self) -> ColorClass {
        self.class
    }

    /// Current color.
    pub fn color(&self) -> Rgba8 {
        self.color
    }

    /// Sampled destination color.
    pub fn target_color(&self) -> Rgba8 {
        self.target_color
    }

    /// Current opacity.
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Square size in px.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Start delay as a fraction of the run.
    pub fn delay(&self) -> f64 {
        self.delay
    }
}

/// Delay derived from the target position, so neighbours move together and the field does not
/// move in lockstep.
pub fn stagger_delay(target: Vec2, span: f64) -> f64 {
    let tx = target.x.rem_euclid(100.0);
    let ty = target.y.rem_euclid(100.0);
    (tx + ty) / 200.0 * span
}

#[cfg(test)]
#[path = "../../tests/unit/particles/particle.rs"]
mod tests;
