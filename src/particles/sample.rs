use crate::{
    foundation::core::{Rgba8, Vec2},
    foundation::math::Rng64,
    particles::def::{ParticleDef, Placement},
    particles::raster::Raster,
};

/// A sampled destination: where a particle ends and the color it ends with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetPoint {
    /// Canvas position.
    pub pos: Vec2,
    /// Opaque sampled color.
    pub color: Rgba8,
}

/// Two-way color bucket of a target pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorClass {
    /// Pinned to the accent color for the whole run.
    Accent,
    /// Starts at the base color and blends towards the sampled one.
    Base,
}

/// Blue-dominance test: `Accent` when blue beats both red and green by more than `margin`.
pub fn classify(color: Rgba8, margin: u8) -> ColorClass {
    let b = color.b as i16;
    let m = margin as i16;
    if b - color.r as i16 > m && b - color.g as i16 > m {
        ColorClass::Accent
    } else {
        ColorClass::Base
    }
}

fn opaque_pixels(raster: &Raster, def: &ParticleDef) -> impl Iterator<Item = (u32, u32, Rgba8)> {
    let step = def.sample_step.max(1) as usize;
    let cutoff = def.alpha_cutoff;
    (0..raster.height()).step_by(step).flat_map(move |y| {
        (0..raster.width())
            .step_by(step)
            .filter_map(move |x| {
                let px = raster.pixel(x, y);
                (px.a >= cutoff).then_some((x, y, px))
            })
    })
}

/// Target points of the logo: opaque pixels on a stride grid, thinned by density, capped.
#[tracing::instrument(skip_all, fields(w = raster.width(), h = raster.height()))]
pub fn sample_targets(
    raster: &Raster,
    def: &ParticleDef,
    placement: &Placement,
) -> Vec<TargetPoint> {
    let (scale, offset) = placement.fit_rect(raster.width() as f64, raster.height() as f64);
    let mut rng = Rng64::new(def.seed);
    let kept: Vec<TargetPoint> = opaque_pixels(raster, def)
        .filter(|_| rng.next_f64_01() < def.density)
        .map(|(x, y, px)| TargetPoint {
            pos: offset + Vec2::new(x as f64, y as f64) * scale,
            color: px.with_alpha(255),
        })
        .collect();
    let out = stride_sample(&kept, def.max_particles);
    tracing::debug!(kept = kept.len(), particles = out.len(), "sampled targets");
    out
}

/// Start points from a silhouette, fitted to the whole canvas. No density thinning.
#[tracing::instrument(skip_all, fields(w = raster.width(), h = raster.height()))]
pub fn sample_shape(raster: &Raster, def: &ParticleDef, placement: &Placement) -> Vec<Vec2> {
    let (scale, offset) = placement
        .with_fit(1.0)
        .fit_rect(raster.width() as f64, raster.height() as f64);
    opaque_pixels(raster, def)
        .map(|(x, y, _)| offset + Vec2::new(x as f64, y as f64) * scale)
        .collect()
}

/// Resize `points` to exactly `n`: cycle when short, stride evenly when long.
pub fn match_cardinality(points: &[Vec2], n: usize) -> Vec<Vec2> {
    if points.is_empty() {
        return Vec::new();
    }
    if points.len() < n {
        return (0..n).map(|i| points[i % points.len()]).collect();
    }
    stride_sample(points, n)
}

/// Keep at most `n` items, spread evenly over the whole slice.
pub(crate) fn stride_sample<T: Copy>(items: &[T], n: usize) -> Vec<T> {
    if items.len() <= n {
        return items.to_vec();
    }
    let stride = items.len() as f64 / n as f64;
    (0..n)
        .map(|i| items[((i as f64 * stride) as usize).min(items.len() - 1)])
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/particles/sample.rs"]
mod tests;
