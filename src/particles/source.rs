use std::{future::Future, sync::Arc};

use anyhow::Context;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::{
    SceneError, SceneResult,
    foundation::core::Vec2,
    foundation::math::Rng64,
    particles::def::ParticleDef,
    particles::fetch::bounded,
    particles::field::ParticleField,
    particles::raster::Raster,
    particles::sample::{TargetPoint, sample_shape, sample_targets},
};

/// Where particle start points come from.
pub trait ShapeSource: Send + Sync {
    /// Short label for logs and [`FieldStrategy`].
    fn name(&self) -> &str;

    /// Produce start points in canvas space.
    fn load(&self, def: &ParticleDef) -> impl Future<Output = SceneResult<Vec<Vec2>>> + Send;
}

/// Start points sampled from a silhouette image.
#[derive(Clone, Debug)]
pub struct RasterShape {
    raster: Arc<Raster>,
}

impl RasterShape {
    /// Use `raster` as the silhouette.
    pub fn new(raster: Raster) -> Self {
        Self {
            raster: Arc::new(raster),
        }
    }
}

impl ShapeSource for RasterShape {
    fn name(&self) -> &str {
        "raster"
    }

    async fn load(&self, def: &ParticleDef) -> SceneResult<Vec<Vec2>> {
        let raster = Arc::clone(&self.raster);
        let def = def.clone();
        tokio::task::spawn_blocking(move || sample_shape(&raster, &def, &def.placement()))
            .await
            .context("join shape sampling task")
            .map_err(SceneError::from)
    }
}

/// Explicit start points.
#[derive(Clone, Debug, Default)]
pub struct PointShape {
    points: Vec<Vec2>,
}

impl PointShape {
    /// Use `points` as given.
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }
}

impl ShapeSource for PointShape {
    fn name(&self) -> &str {
        "points"
    }

    async fn load(&self, _def: &ParticleDef) -> SceneResult<Vec<Vec2>> {
        Ok(self.points.clone())
    }
}

/// Polygon outlines from a GeoJSON document, projected equirectangularly onto the canvas.
#[derive(Clone, Debug)]
pub struct GeoJsonShape {
    doc: serde_json::Value,
}

impl GeoJsonShape {
    /// Wrap an already parsed document.
    pub fn new(doc: serde_json::Value) -> Self {
        Self { doc }
    }

    /// Parse a GeoJSON document.
    pub fn from_json_str(s: &str) -> SceneResult<Self> {
        let doc = serde_json::from_str(s).map_err(|e| SceneError::serde(e.to_string()))?;
        Ok(Self { doc })
    }
}

impl ShapeSource for GeoJsonShape {
    fn name(&self) -> &str {
        "geojson"
    }

    async fn load(&self, def: &ParticleDef) -> SceneResult<Vec<Vec2>> {
        project_geojson(&self.doc, def)
    }
}

/// Outline points of every Polygon and MultiPolygon ring in `doc`, densified along edges.
pub(crate) fn project_geojson(
    doc: &serde_json::Value,
    def: &ParticleDef,
) -> SceneResult<Vec<Vec2>> {
    let mut rings = Vec::new();
    collect_rings(doc, &mut rings)?;
    let (w, h) = (def.canvas_width, def.canvas_height);
    let project =
        |lon: f64, lat: f64| Vec2::new((lon + 180.0) / 360.0 * w, (90.0 - lat) / 180.0 * h);
    let spacing = def.sample_step.max(1) as f64;

    let mut out = Vec::new();
    for ring in rings {
        let pts: Vec<Vec2> = ring.into_iter().map(|(lon, lat)| project(lon, lat)).collect();
        for pair in pts.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let steps = ((b - a).length() / spacing).ceil().max(1.0) as usize;
            out.extend((0..steps).map(|i| a.lerp(b, i as f64 / steps as f64)));
        }
    }
    if out.is_empty() {
        return Err(SceneError::asset("geojson contains no polygon rings"));
    }
    Ok(out)
}

type Ring = Vec<(f64, f64)>;

fn collect_rings(v: &serde_json::Value, out: &mut Vec<Ring>) -> SceneResult<()> {
    let kind = v.get("type").and_then(|t| t.as_str()).unwrap_or_default();
    match kind {
        "FeatureCollection" => {
            let features = v
                .get("features")
                .and_then(|f| f.as_array())
                .ok_or_else(|| SceneError::asset("FeatureCollection without features"))?;
            for f in features {
                collect_rings(f, out)?;
            }
        }
        "Feature" => {
            if let Some(g) = v.get("geometry").filter(|g| !g.is_null()) {
                collect_rings(g, out)?;
            }
        }
        "GeometryCollection" => {
            for g in v
                .get("geometries")
                .and_then(|g| g.as_array())
                .into_iter()
                .flatten()
            {
                collect_rings(g, out)?;
            }
        }
        "Polygon" => {
            for ring in coords(v)?.as_array().into_iter().flatten() {
                out.push(parse_ring(ring)?);
            }
        }
        "MultiPolygon" => {
            for poly in coords(v)?.as_array().into_iter().flatten() {
                for ring in poly.as_array().into_iter().flatten() {
                    out.push(parse_ring(ring)?);
                }
            }
        }
        // Points and lines carry no area.
        _ => {}
    }
    Ok(())
}

fn coords(v: &serde_json::Value) -> SceneResult<&serde_json::Value> {
    v.get("coordinates")
        .ok_or_else(|| SceneError::asset("geometry without coordinates"))
}

fn parse_ring(ring: &serde_json::Value) -> SceneResult<Ring> {
    let positions = ring
        .as_array()
        .ok_or_else(|| SceneError::asset("polygon ring must be an array"))?;
    positions
        .iter()
        .map(|p| {
            let lon = p.get(0).and_then(|x| x.as_f64());
            let lat = p.get(1).and_then(|x| x.as_f64());
            match (lon, lat) {
                (Some(lon), Some(lat)) => Ok((lon, lat)),
                _ => Err(SceneError::asset("position must be [lon, lat]")),
            }
        })
        .collect()
}

/// Deterministic stand-in used when sampling fails, times out, or yields nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackPattern {
    /// A `cols` x `rows` grid over the logo area.
    Grid {
        /// Columns.
        cols: u32,
        /// Rows.
        rows: u32,
    },
}

impl FallbackPattern {
    /// The grid configured in `def`.
    pub fn from_def(def: &ParticleDef) -> Self {
        Self::Grid {
            cols: def.fallback_cols.max(1),
            rows: def.fallback_rows.max(1),
        }
    }

    /// Grid targets in the fitted logo area, all in the base color.
    pub fn targets(&self, def: &ParticleDef) -> Vec<TargetPoint> {
        let Self::Grid { cols, rows } = *self;
        let placement = def.placement();
        let (origin, size) = placement.area(def.canvas_width, def.canvas_height);
        let cell = Vec2::new(size.x / cols as f64, size.y / rows as f64);
        let color = def.base_color.with_alpha(255);
        (0..rows)
            .flat_map(|r| (0..cols).map(move |c| (c, r)))
            .map(|(c, r)| TargetPoint {
                pos: origin + Vec2::new((c as f64 + 0.5) * cell.x, (r as f64 + 0.5) * cell.y),
                color,
            })
            .collect()
    }

    /// Start points scattered over the canvas, reproducible from `def.seed`.
    pub fn starts(n: usize, def: &ParticleDef) -> Vec<Vec2> {
        let mut rng = Rng64::new(def.seed ^ 0x5eed_5ca7);
        (0..n)
            .map(|_| {
                let x = rng.next_f64_01() * def.canvas_width;
                let y = rng.next_f64_01() * def.canvas_height;
                Vec2::new(x, y)
            })
            .collect()
    }
}

/// Which strategy produced a [`FieldBuild`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldStrategy {
    /// Sampled targets with start points from the named shape source.
    Shape(String),
    /// Sampled targets with scattered starts (no shape, or the shape failed).
    Scatter,
    /// The synthetic fallback pattern, with the reason it was needed.
    Fallback(String),
}

impl FieldStrategy {
    /// `true` when the synthetic pattern replaced the target logo.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// A constructed field and how it came to be.
#[derive(Debug)]
pub struct FieldBuild {
    /// The particles, never empty.
    pub field: ParticleField,
    /// Strategy that produced them.
    pub strategy: FieldStrategy,
}

impl FieldBuild {
    /// The synthetic field, labelled with `reason`.
    pub fn fallback(def: &ParticleDef, reason: impl Into<String>) -> Self {
        let pattern = FallbackPattern::from_def(def);
        let targets = pattern.targets(def);
        let starts = FallbackPattern::starts(targets.len(), def);
        Self {
            field: ParticleField::new(&targets, &starts, def.clone()),
            strategy: FieldStrategy::Fallback(reason.into()),
        }
    }
}

/// Build a particle field, falling back instead of failing.
///
/// Target sampling runs on a blocking task. Target sampling and shape loading share one deadline
/// of `def.timeout_ms`.
#[tracing::instrument(skip_all, fields(shape = shape.map(|s| s.name()).unwrap_or("none")))]
pub async fn build_field<S: ShapeSource>(
    target: Arc<Raster>,
    shape: Option<&S>,
    def: &ParticleDef,
    cancel: &CancellationToken,
) -> FieldBuild {
    let deadline = Instant::now() + def.timeout();
    let remaining = || deadline.saturating_duration_since(Instant::now());

    let sampling = {
        let def = def.clone();
        async move {
            tokio::task::spawn_blocking(move || sample_targets(&target, &def, &def.placement()))
                .await
                .context("join target sampling task")
                .map_err(SceneError::from)
        }
    };
    let targets = match bounded(sampling, remaining(), cancel).await {
        Ok(t) if t.is_empty() => {
            tracing::warn!("target sampling produced no particles; using fallback");
            return FieldBuild::fallback(def, "no particles sampled");
        }
        Ok(t) => t,
        Err(e) => {
            tracing::warn!(error = %e, "target sampling failed; using fallback");
            return FieldBuild::fallback(def, e.to_string());
        }
    };

    let Some(shape) = shape else {
        let starts = FallbackPattern::starts(targets.len(), def);
        return FieldBuild {
            field: ParticleField::new(&targets, &starts, def.clone()),
            strategy: FieldStrategy::Scatter,
        };
    };

    match bounded(shape.load(def), remaining(), cancel).await {
        Ok(points) if !points.is_empty() => FieldBuild {
            field: ParticleField::new(&targets, &points, def.clone()),
            strategy: FieldStrategy::Shape(shape.name().to_owned()),
        },
        Ok(_) | Err(_) if cancel.is_cancelled() => FieldBuild::fallback(def, "cancelled"),
        outcome => {
            match outcome {
                Ok(_) => {
                    tracing::warn!(shape = shape.name(), "shape produced no points; scattering starts")
                }
                Err(e) => {
                    tracing::warn!(shape = shape.name(), error = %e, "shape failed; scattering starts")
                }
            }
            let starts = FallbackPattern::starts(targets.len(), def);
            FieldBuild {
                field: ParticleField::new(&targets, &starts, def.clone()),
                strategy: FieldStrategy::Scatter,
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/source.rs"]
mod tests;
