/// Clamp `v` into `[0, 1]`. NaN maps to 0.
pub fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Position of `v` inside `[a, b]`, clamped to `[0, 1]`.
///
/// A degenerate span reports 0 below `a` and 1 at or above it.
pub fn inverse_lerp(a: f64, b: f64, v: f64) -> f64 {
    let span = b - a;
    if !span.is_finite() || span.abs() < f64::EPSILON {
        return if v >= a { 1.0 } else { 0.0 };
    }
    clamp01((v - a) / span)
}

/// SplitMix64 generator. Used wherever the engine needs repeatable pseudo-randomness.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Seed a new generator.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, 1)` with 53 bits of precision.
    pub fn next_f64_01(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a over `bytes`, continuing from `state`.
pub(crate) fn fnv1a(state: u64, bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(state, |h, &b| (h ^ u64::from(b)).wrapping_mul(FNV_PRIME))
}

/// Deterministic hash of a pair of coordinates, mapped to `[0, 1)`.
pub(crate) fn hash01(seed: u64, x: f64, y: f64) -> f64 {
    let h = fnv1a(FNV_OFFSET ^ seed, &x.to_bits().to_le_bytes());
    let h = fnv1a(h, &y.to_bits().to_le_bytes());
    Rng64::new(h).next_f64_01()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
