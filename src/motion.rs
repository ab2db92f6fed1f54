//! Per-channel exponential smoothing.
//!
//! Every channel blends toward its target with `lerp(value, target, rate)`.
//! The rate is the channel's configured speed and is *not* scaled by elapsed
//! time, so smoothing strength depends on frame rate. Rates of 1 or more snap
//! straight to the target.

use glam::{Vec2, Vec3};

use crate::math::Lerp;

/// Magnitude below which a smoothed value counts as settled
pub const SETTLE_EPSILON: f32 = 1e-4;

/// A value that trails its target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoothed<T: Lerp> {
    value: T,
}

impl<T: Lerp> Smoothed<T> {
    pub fn new() -> Self {
        Self { value: T::ZERO }
    }

    /// Move toward `target` by `rate` (clamped to [0, 1]) and return the new value
    pub fn blend(&mut self, target: T, rate: f32) -> T {
        self.value = self.value.lerp_to(target, rate);
        self.value
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn is_settled(&self) -> bool {
        self.value.magnitude() < SETTLE_EPSILON
    }

    pub fn reset(&mut self) {
        self.value = T::ZERO;
    }
}

impl<T: Lerp> Default for Smoothed<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Smoothing state for every input channel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotionState {
    pub keyboard_move: Smoothed<Vec3>,
    pub edge_pan: Smoothed<Vec3>,
    pub drag_pan: Smoothed<Vec3>,
    pub zoom: Smoothed<f32>,
    pub rotation: Smoothed<Vec2>,
}

impl MotionState {
    /// True when no channel is still carrying motion
    pub fn is_settled(&self) -> bool {
        self.keyboard_move.is_settled()
            && self.edge_pan.is_settled()
            && self.drag_pan.is_settled()
            && self.zoom.is_settled()
            && self.rotation.is_settled()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
