use glam::{Vec2, Vec3};

/// Linear interpolation with the blend factor clamped to [0, 1]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

/// Clamp `value` into `[min, max]` without panicking on an inverted range;
/// when `min > max` the upper bound wins
pub fn clamp_range(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Values that can be blended toward a target
pub trait Lerp: Copy {
    const ZERO: Self;

    /// Blend toward `target`, clamping `t` to [0, 1]
    fn lerp_to(self, target: Self, t: f32) -> Self;

    /// Largest absolute component
    fn magnitude(self) -> f32;
}

impl Lerp for f32 {
    const ZERO: Self = 0.0;

    fn lerp_to(self, target: Self, t: f32) -> Self {
        lerp(self, target, t)
    }

    fn magnitude(self) -> f32 {
        self.abs()
    }
}

impl Lerp for Vec2 {
    const ZERO: Self = Vec2::ZERO;

    fn lerp_to(self, target: Self, t: f32) -> Self {
        self.lerp(target, t.clamp(0.0, 1.0))
    }

    fn magnitude(self) -> f32 {
        self.abs().max_element()
    }
}

impl Lerp for Vec3 {
    const ZERO: Self = Vec3::ZERO;

    fn lerp_to(self, target: Self, t: f32) -> Self {
        self.lerp(target, t.clamp(0.0, 1.0))
    }

    fn magnitude(self) -> f32 {
        self.abs().max_element()
    }
}
