use glam::{Vec2, Vec3};

use super::{InputSource, MouseButton};
use crate::camera::Viewport;
use crate::config::RtsCameraConfig;

/// Net direction of two opposing buttons: +1, -1, or 0 when both or neither are held
pub fn resolve_opposed_keys(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

/// Everything the rig needs from the input layer for one frame.
///
/// Channels that are disabled or inactive this frame are `None` so the rig can
/// tell "no input" apart from "channel not running".
#[derive(Debug, Clone, PartialEq)]
pub struct InputFrame {
    /// Keyboard/gamepad direction as `(x, 0, y)`
    pub keyboard_move: Option<Vec3>,
    pub edge_pan: Option<Vec3>,
    pub drag_pan: Option<Vec3>,
    /// Signed zoom amount; positive moves away from the terrain
    pub zoom: f32,
    /// Zoom sensitivity selected by the channels that ran, if any
    pub zoom_speed: Option<f32>,
    /// Raw scroll, used by the pivot state machine
    pub scroll: f32,
    pub rotation: Vec2,
    pub rotation_speed: Option<f32>,
    pub pointer: Vec2,
}

impl InputFrame {
    pub fn gather<I: InputSource + ?Sized>(
        input: &I,
        config: &RtsCameraConfig,
        viewport: &Viewport,
        dt: f32,
    ) -> Self {
        let pointer = input.pointer_position();
        let pointer_delta = input.pointer_delta();
        let middle_held = input.is_button_down(MouseButton::Middle);

        let keyboard_move = config.movement.enabled.then(|| {
            let axis = input.move_axis();
            Vec3::new(axis.x, 0.0, axis.y)
        });

        let edge_pan = (config.screen_edge.enabled && !middle_held && !input.is_pointer_over_ui())
            .then(|| edge_direction(pointer, viewport, config.screen_edge.border));

        let drag_pan = (config.panning.enabled && middle_held && pointer_delta != Vec2::ZERO)
            .then(|| Vec3::new(-pointer_delta.x, 0.0, -pointer_delta.y));

        let scroll = input.scroll_delta().y;
        let sign = config.zoom.direction_sign();
        let mut zoom = 0.0;
        let mut zoom_speed = None;

        if config.keyboard_zoom.enabled && input.scroll_delta() == Vec2::ZERO {
            let direction = resolve_opposed_keys(
                input.is_key_down(config.keyboard_zoom.zoom_out_key),
                input.is_key_down(config.keyboard_zoom.zoom_in_key),
            );
            zoom += direction * dt * config.keyboard_zoom.sensitivity * sign;
            zoom_speed = Some(config.keyboard_zoom.sensitivity);
        }

        if config.scroll_zoom.enabled {
            zoom += scroll * dt * config.scroll_zoom.sensitivity * sign;
            zoom_speed = Some(config.scroll_zoom.sensitivity);
        }

        let mut rotation = Vec2::ZERO;
        let mut rotation_speed = None;

        if config.keyboard_rotation.enabled {
            rotation.x = resolve_opposed_keys(
                input.is_key_down(config.keyboard_rotation.rotate_right_key),
                input.is_key_down(config.keyboard_rotation.rotate_left_key),
            );
            rotation_speed = Some(config.keyboard_rotation.speed);
        }

        if config.mouse_rotation.enabled && input.is_button_down(MouseButton::Right) {
            rotation.x = pointer_delta.x;
            rotation_speed = Some(config.mouse_rotation.speed);
        }

        Self {
            keyboard_move,
            edge_pan,
            drag_pan,
            zoom,
            zoom_speed,
            scroll,
            rotation,
            rotation_speed,
            pointer,
        }
    }
}

/// Pan direction for a pointer inside the `border` band of the viewport edges
fn edge_direction(pointer: Vec2, viewport: &Viewport, border: f32) -> Vec3 {
    let axis = |value: f32, extent: f32| {
        if (0.0..=border).contains(&value) {
            -1.0
        } else if value >= extent - border && value <= extent {
            1.0
        } else {
            0.0
        }
    };

    Vec3::new(axis(pointer.x, viewport.width), 0.0, axis(pointer.y, viewport.height))
}
