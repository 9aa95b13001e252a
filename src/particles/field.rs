use rayon::prelude::*;

use crate::{
    foundation::core::{Rgba8, Vec2},
    particles::def::ParticleDef,
    particles::particle::Particle,
    particles::sample::{TargetPoint, match_cardinality},
};

/// Fields at least this large integrate on the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 4096;

type FormedCallback = Box<dyn FnMut() + Send>;

/// A set of particles converging from start points onto a sampled logo.
pub struct ParticleField {
    def: ParticleDef,
    particles: Vec<Particle>,
    formed: bool,
    on_formed: Option<FormedCallback>,
}

impl std::fmt::Debug for ParticleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleField")
            .field("particles", &self.particles.len())
            .field("formed", &self.formed)
            .field("has_callback", &self.on_formed.is_some())
            .finish()
    }
}

impl ParticleField {
    /// Pair every target with a start point. `starts` is cycled or strided to match.
    ///
    /// With no starts at all, particles begin on their targets.
    pub fn new(targets: &[TargetPoint], starts: &[Vec2], def: ParticleDef) -> Self {
        let starts = match_cardinality(starts, targets.len());
        let particles = targets
            .iter()
            .enumerate()
            .map(|(i, t)| Particle::new(starts.get(i).copied().unwrap_or(t.pos), t, &def))
            .collect();
        Self {
            def,
            particles,
            formed: false,
            on_formed: None,
        }
    }

    /// Register the callback that fires once per run when the logo is formed.
    pub fn on_formed(&mut self, f: impl FnMut() + Send + 'static) {
        self.on_formed = Some(Box::new(f));
    }

    /// Advance every particle one frame at run progress `progress`.
    ///
    /// Returns `true` on the frame the field becomes formed.
    pub fn step(&mut self, progress: f64) -> bool {
        let def = &self.def;
        if self.particles.len() >= PARALLEL_THRESHOLD {
            self.particles
                .par_iter_mut()
                .for_each(|p| p.step(progress, def));
        } else {
            for p in &mut self.particles {
                p.step(progress, def);
            }
        }

        if self.formed || progress < self.def.formed_progress || !self.all_within_epsilon() {
            return false;
        }
        self.formed = true;
        tracing::debug!(particles = self.particles.len(), "particle field formed");
        if let Some(cb) = self.on_formed.as_mut() {
            cb();
        }
        true
    }

    fn all_within_epsilon(&self) -> bool {
        let eps = self.def.formed_epsilon;
        if self.particles.len() >= PARALLEL_THRESHOLD {
            self.particles.par_iter().all(|p| p.distance() <= eps)
        } else {
            self.particles.iter().all(|p| p.distance() <= eps)
        }
    }

    /// Put every particle back on its start and re-arm the formed callback.
    pub fn restart(&mut self) {
        for p in &mut self.particles {
            p.reset(&self.def);
        }
        self.formed = false;
    }

    /// `true` once the current run has formed.
    pub fn is_formed(&self) -> bool {
        self.formed
    }

    /// Particles in sampling order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// `true` for a field without particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Tuning the field was built with.
    pub fn def(&self) -> &ParticleDef {
        &self.def
    }

    /// Draw the particles as alpha-blended squares over `background`.
    pub fn splat(&self, width: u32, height: u32, background: Rgba8) -> image::RgbaImage {
        let bg = image::Rgba([background.r, background.g, background.b, background.a]);
        let mut img = image::RgbaImage::from_pixel(width, height, bg);
        for p in &self.particles {
            let side = p.size().round().max(1.0);
            let x0 = (p.pos().x - side * 0.5).round();
            let y0 = (p.pos().y - side * 0.5).round();
            let c = p.color();
            let alpha = (c.a as f64 / 255.0) * p.opacity();
            for dy in 0..side as i64 {
                for dx in 0..side as i64 {
                    let x = x0 as i64 + dx;
                    let y = y0 as i64 + dy;
                    if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                        continue;
                    }
                    let dst = img.get_pixel_mut(x as u32, y as u32);
                    blend_over(&mut dst.0, c, alpha);
                }
            }
        }
        img
    }
}

fn blend_over(dst: &mut [u8; 4], src: Rgba8, alpha: f64) {
    let sa = alpha.clamp(0.0, 1.0);
    let da = dst[3] as f64 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        *dst = [0, 0, 0, 0];
        return;
    }
    let mix = |s: u8, d: u8| -> u8 {
        let v = (s as f64 * sa + d as f64 * da * (1.0 - sa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    *dst = [
        mix(src.r, dst[0]),
        mix(src.g, dst[1]),
        mix(src.b, dst[2]),
        (out_a * 255.0).round() as u8,
    ];
}

#[cfg(test)]
#[path = "../../tests/unit/particles/field.rs"]
mod tests;
