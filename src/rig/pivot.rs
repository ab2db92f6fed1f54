use glam::Vec3;

use crate::camera::CameraPose;
use crate::math::lerp;

/// Pitch distance (degrees) at which an easing pivot counts as finished
pub const PIVOT_SETTLE_EPSILON: f32 = 1e-3;

/// Near-ground tilt behaviour.
///
/// The anchor is the camera position captured when the state was entered;
/// while active the camera is pinned to it and only its height eases.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PivotState {
    #[default]
    Idle,
    /// Zooming in near the ground: tilt toward the pivot angle and sink
    Pivoting { anchor: Vec3 },
    /// Zooming out near the ground: tilt back to the initial angle and rise
    ResettingPivot { anchor: Vec3 },
}

/// Scroll intent for the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollIntent {
    None,
    ZoomIn,
    ZoomOut,
}

impl ScrollIntent {
    /// Classify a raw scroll value; `out_sign` is +1 when positive scroll zooms out
    pub fn from_scroll(scroll: f32, out_sign: f32) -> Self {
        let signed = scroll * out_sign;
        if signed > 0.0 {
            ScrollIntent::ZoomOut
        } else if signed < 0.0 {
            ScrollIntent::ZoomIn
        } else {
            ScrollIntent::None
        }
    }
}

/// Target pitches and heights for the two active states
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotTargets {
    /// Height below which scrolling engages the state machine
    pub threshold: f32,
    pub reset_pitch: f32,
    pub reset_height: f32,
    pub pivot_pitch: f32,
    pub pivot_height: f32,
}

impl PivotState {
    pub fn is_active(&self) -> bool {
        !matches!(self, PivotState::Idle)
    }

    pub fn anchor(&self) -> Option<Vec3> {
        match self {
            PivotState::Idle => None,
            PivotState::Pivoting { anchor } | PivotState::ResettingPivot { anchor } => Some(*anchor),
        }
    }

    /// Edge-triggered transitions from the camera position and scroll intent
    pub fn transition(self, position: Vec3, threshold: f32, intent: ScrollIntent) -> Self {
        if position.y >= threshold {
            return PivotState::Idle;
        }

        match intent {
            ScrollIntent::ZoomOut => PivotState::ResettingPivot { anchor: position },
            ScrollIntent::ZoomIn => PivotState::Pivoting { anchor: position },
            ScrollIntent::None => self,
        }
    }

    /// Ease pitch and anchor height by `t`, pin the pose to the anchor, and
    /// fall back to `Idle` once the target pitch is reached
    pub fn advance(&mut self, pose: &mut CameraPose, targets: &PivotTargets, t: f32) {
        let (mut anchor, pitch_target, height_target) = match *self {
            PivotState::Idle => return,
            PivotState::Pivoting { anchor } => (anchor, targets.pivot_pitch, targets.pivot_height),
            PivotState::ResettingPivot { anchor } => (anchor, targets.reset_pitch, targets.reset_height),
        };

        pose.pitch = lerp(pose.pitch, pitch_target, t);
        anchor.y = lerp(anchor.y, height_target, t);
        pose.position = anchor;

        *self = if (pose.pitch - pitch_target).abs() <= PIVOT_SETTLE_EPSILON {
            PivotState::Idle
        } else {
            match *self {
                PivotState::Pivoting { .. } => PivotState::Pivoting { anchor },
                _ => PivotState::ResettingPivot { anchor },
            }
        };
    }
}
