use crate::foundation::core::{Rgba8, Vec2};

/// Values that can be linearly interpolated.
pub trait Lerp: Sized {
    /// Interpolate from `a` (at `t = 0`) to `b` (at `t = 1`).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        crate::foundation::math::lerp(*a, *b, t)
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.lerp(*b, t)
    }
}

// Channels round to nearest so a half-way blend of 0 and 255 lands on 128.
impl Rgba8 {
    fn map2(self, other: Self, f: impl Fn(u8, u8) -> u8) -> Self {
        Self {
            r: f(self.r, other.r),
            g: f(self.g, other.g),
            b: f(self.b, other.b),
            a: f(self.a, other.a),
        }
    }
}

impl Lerp for Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.map2(*b, |x, y| {
            let v = crate::foundation::math::lerp(f64::from(x), f64::from(y), t);
            v.round().clamp(0.0, 255.0) as u8
        })
    }
}
