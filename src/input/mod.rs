//! Input collaborators.
//!
//! The rig never talks to a device directly. It reads one latched
//! [`InputSource`] per frame; [`InputSnapshot`] is the plain-data version and
//! [`WinitInput`] builds one from window events.

pub mod aggregator;
pub mod winit_adapter;

pub use aggregator::{resolve_opposed_keys, InputFrame};
pub use winit_adapter::WinitInput;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Keyboard key identifier used by configurable bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    PageUp,
    PageDown,
    Home,
    End,
    Space,
    Shift,
    Escape,
}

/// Pointer button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Per-frame input state the rig reads from.
///
/// Pointer coordinates are pixels with the origin at the bottom-left of the
/// viewport. Deltas are accumulated over the current frame.
pub trait InputSource {
    /// Continuous movement axis in [-1, 1] (x = strafe, y = forward)
    fn move_axis(&self) -> Vec2;

    fn pointer_position(&self) -> Vec2;

    fn pointer_delta(&self) -> Vec2;

    /// Scroll wheel delta; only `y` drives zoom
    fn scroll_delta(&self) -> Vec2;

    fn is_button_down(&self, button: MouseButton) -> bool;

    fn is_key_down(&self, key: Key) -> bool;

    /// Whether a UI element currently captures the pointer
    fn is_pointer_over_ui(&self) -> bool {
        false
    }

    /// Whether the host application has focus
    fn has_focus(&self) -> bool {
        true
    }
}

/// Latched input values for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct InputSnapshot {
    pub move_axis: Vec2,
    pub pointer_position: Vec2,
    pub pointer_delta: Vec2,
    pub scroll_delta: Vec2,
    pub buttons: Vec<MouseButton>,
    pub keys: Vec<Key>,
    pub pointer_over_ui: bool,
    pub focused: bool,
}

impl InputSnapshot {
    /// Neutral input with the pointer resting at `pointer_position`
    pub fn at(pointer_position: Vec2) -> Self {
        Self {
            move_axis: Vec2::ZERO,
            pointer_position,
            pointer_delta: Vec2::ZERO,
            scroll_delta: Vec2::ZERO,
            buttons: Vec::new(),
            keys: Vec::new(),
            pointer_over_ui: false,
            focused: true,
        }
    }

    pub fn with_move(mut self, axis: Vec2) -> Self {
        self.move_axis = axis;
        self
    }

    pub fn with_scroll(mut self, y: f32) -> Self {
        self.scroll_delta = Vec2::new(0.0, y);
        self
    }

    pub fn with_pointer_delta(mut self, delta: Vec2) -> Self {
        self.pointer_delta = delta;
        self
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        if !self.buttons.contains(&button) {
            self.buttons.push(button);
        }
        self
    }

    pub fn with_key(mut self, key: Key) -> Self {
        if !self.keys.contains(&key) {
            self.keys.push(key);
        }
        self
    }
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self::at(Vec2::ZERO)
    }
}

impl InputSource for InputSnapshot {
    fn move_axis(&self) -> Vec2 {
        self.move_axis
    }

    fn pointer_position(&self) -> Vec2 {
        self.pointer_position
    }

    fn pointer_delta(&self) -> Vec2 {
        self.pointer_delta
    }

    fn scroll_delta(&self) -> Vec2 {
        self.scroll_delta
    }

    fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    fn is_pointer_over_ui(&self) -> bool {
        self.pointer_over_ui
    }

    fn has_focus(&self) -> bool {
        self.focused
    }
}
