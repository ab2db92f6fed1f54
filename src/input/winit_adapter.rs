use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::{resolve_opposed_keys, InputSource, Key, MouseButton};

/// Pixels of trackpad scroll treated as one wheel notch
const PIXELS_PER_LINE: f32 = 40.0;

/// Adapter that latches winit window events into an [`InputSource`].
///
/// Feed every `WindowEvent` to [`process_event`](Self::process_event), run the
/// rig, then call [`end_frame`](Self::end_frame) to clear per-frame deltas.
#[derive(Debug, Clone)]
pub struct WinitInput {
    pressed_keys: HashSet<Key>,
    pressed_buttons: HashSet<MouseButton>,
    /// Last cursor position, bottom-left origin
    pointer_position: Option<Vec2>,
    pointer_delta: Vec2,
    scroll_delta: Vec2,
    window_height: f32,
    focused: bool,
    pointer_over_ui: bool,
}

impl WinitInput {
    pub fn new(window_height: f32) -> Self {
        Self {
            pressed_keys: HashSet::new(),
            pressed_buttons: HashSet::new(),
            pointer_position: None,
            pointer_delta: Vec2::ZERO,
            scroll_delta: Vec2::ZERO,
            window_height,
            focused: true,
            pointer_over_ui: false,
        }
    }

    /// Process a winit `WindowEvent` and update internal state
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    if let Some(key) = Self::keycode_to_key(code) {
                        match event.state {
                            ElementState::Pressed => {
                                self.pressed_keys.insert(key);
                            }
                            ElementState::Released => {
                                self.pressed_keys.remove(&key);
                            }
                        }
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = Self::mouse_button(*button) {
                    match state {
                        ElementState::Pressed => {
                            self.pressed_buttons.insert(button);
                        }
                        ElementState::Released => {
                            self.pressed_buttons.remove(&button);
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.move_pointer(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll_delta += match delta {
                    MouseScrollDelta::LineDelta(x, y) => Vec2::new(*x, *y),
                    MouseScrollDelta::PixelDelta(pos) => {
                        Vec2::new(pos.x as f32, pos.y as f32) / PIXELS_PER_LINE
                    }
                };
            }
            WindowEvent::Resized(size) => {
                let height = size.height as f32;
                // Keep the stored pointer on the same window pixel under the new flip
                if let Some(position) = &mut self.pointer_position {
                    position.y += height - self.window_height;
                }
                self.window_height = height;
            }
            WindowEvent::Focused(focused) => {
                self.focused = *focused;
                if !focused {
                    // Releases are not delivered to unfocused windows
                    self.pressed_keys.clear();
                    self.pressed_buttons.clear();
                }
            }
            _ => {}
        }
    }

    /// Record a cursor position given in window coordinates (top-left origin)
    pub fn move_pointer(&mut self, window_position: Vec2) {
        let position = Vec2::new(window_position.x, self.window_height - window_position.y);
        if let Some(previous) = self.pointer_position {
            self.pointer_delta += position - previous;
        }
        self.pointer_position = Some(position);
    }

    /// Let a UI layer report that it owns the pointer
    pub fn set_pointer_over_ui(&mut self, over_ui: bool) {
        self.pointer_over_ui = over_ui;
    }

    /// Reset per-frame state; call after the rig update
    pub fn end_frame(&mut self) {
        self.pointer_delta = Vec2::ZERO;
        self.scroll_delta = Vec2::ZERO;
    }

    pub fn pressed_keys(&self) -> impl Iterator<Item = &Key> {
        self.pressed_keys.iter()
    }

    fn keycode_to_key(code: KeyCode) -> Option<Key> {
        let key = match code {
            KeyCode::KeyA => Key::A,
            KeyCode::KeyB => Key::B,
            KeyCode::KeyC => Key::C,
            KeyCode::KeyD => Key::D,
            KeyCode::KeyE => Key::E,
            KeyCode::KeyF => Key::F,
            KeyCode::KeyG => Key::G,
            KeyCode::KeyH => Key::H,
            KeyCode::KeyI => Key::I,
            KeyCode::KeyJ => Key::J,
            KeyCode::KeyK => Key::K,
            KeyCode::KeyL => Key::L,
            KeyCode::KeyM => Key::M,
            KeyCode::KeyN => Key::N,
            KeyCode::KeyO => Key::O,
            KeyCode::KeyP => Key::P,
            KeyCode::KeyQ => Key::Q,
            KeyCode::KeyR => Key::R,
            KeyCode::KeyS => Key::S,
            KeyCode::KeyT => Key::T,
            KeyCode::KeyU => Key::U,
            KeyCode::KeyV => Key::V,
            KeyCode::KeyW => Key::W,
            KeyCode::KeyX => Key::X,
            KeyCode::KeyY => Key::Y,
            KeyCode::KeyZ => Key::Z,
            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::Space => Key::Space,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
            KeyCode::Escape => Key::Escape,
            _ => return None,
        };
        Some(key)
    }

    fn mouse_button(button: winit::event::MouseButton) -> Option<MouseButton> {
        match button {
            winit::event::MouseButton::Left => Some(MouseButton::Left),
            winit::event::MouseButton::Middle => Some(MouseButton::Middle),
            winit::event::MouseButton::Right => Some(MouseButton::Right),
            _ => None,
        }
    }

    fn held(&self, keys: [Key; 2]) -> bool {
        keys.iter().any(|key| self.pressed_keys.contains(key))
    }
}

impl Default for WinitInput {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl InputSource for WinitInput {
    /// WASD and the arrow keys
    fn move_axis(&self) -> Vec2 {
        Vec2::new(
            resolve_opposed_keys(self.held([Key::D, Key::ArrowRight]), self.held([Key::A, Key::ArrowLeft])),
            resolve_opposed_keys(self.held([Key::W, Key::ArrowUp]), self.held([Key::S, Key::ArrowDown])),
        )
    }

    fn pointer_position(&self) -> Vec2 {
        self.pointer_position.unwrap_or(Vec2::new(-1.0, -1.0))
    }

    fn pointer_delta(&self) -> Vec2 {
        self.pointer_delta
    }

    fn scroll_delta(&self) -> Vec2 {
        self.scroll_delta
    }

    fn is_button_down(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.pressed_keys.contains(&key)
    }

    fn is_pointer_over_ui(&self) -> bool {
        self.pointer_over_ui
    }

    fn has_focus(&self) -> bool {
        self.focused
    }
}
