//! Camera rig tunables.
//!
//! Every section carries `#[serde(default)]`, so a config file only needs the
//! values it changes:
//!
//! ```json
//! { "zoom": { "invert": false, "max_height": 40.0 } }
//! ```

use anyhow::{bail, Context, Result};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::input::Key;
use crate::math::clamp_range;
use crate::terrain::LayerMask;

/// Keyboard / gamepad axis movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    pub enabled: bool,
    /// World units per second, also the direction blend factor
    pub speed: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 5.0,
        }
    }
}

/// Panning when the pointer rests near a viewport edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenEdgeSettings {
    pub enabled: bool,
    /// Width of the active band along each edge, in pixels
    pub border: f32,
    pub speed: f32,
}

impl Default for ScreenEdgeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            border: 25.0,
            speed: 3.0,
        }
    }
}

/// Middle-button drag panning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanningSettings {
    pub enabled: bool,
    pub speed: f32,
}

impl Default for PanningSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 10.0,
        }
    }
}

/// Map bounds. One `[min, max]` range is shared by the X and Z axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapLimitSettings {
    pub enabled: bool,
    pub min: f32,
    pub max: f32,
}

impl Default for MapLimitSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            min: -50.0,
            max: 50.0,
        }
    }
}

impl MapLimitSettings {
    pub fn clamp(&self, value: f32) -> f32 {
        if self.enabled {
            clamp_range(value, self.min, self.max)
        } else {
            value
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationSettings {
    pub use_limit: bool,
    /// Allowed pitch range in degrees
    pub limit_pitch: Vec2,
    /// Allowed yaw range in degrees
    pub limit_yaw: Vec2,
    /// Horizontal (X, Z) offset between the camera and the point it frames,
    /// measured at the initial zoom height and scaled linearly with height
    pub pivot_offset: Vec2,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            use_limit: true,
            limit_pitch: Vec2::new(15.0, 90.0),
            limit_yaw: Vec2::new(-360.0, 360.0),
            pivot_offset: Vec2::new(-15.0, -15.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardRotationSettings {
    pub enabled: bool,
    pub rotate_right_key: Key,
    pub rotate_left_key: Key,
    /// Degrees per second per unit of input
    pub speed: f32,
}

impl Default for KeyboardRotationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            rotate_right_key: Key::X,
            rotate_left_key: Key::Z,
            speed: 50.0,
        }
    }
}

/// Right-button drag orbit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MouseRotationSettings {
    pub enabled: bool,
    pub speed: f32,
}

impl Default for MouseRotationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 10.0,
        }
    }
}

/// Automatic height compensation over rising terrain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightSettings {
    pub auto_height: bool,
    /// Terrain height below which no compensation is applied
    pub dampening: f32,
    pub ground_mask: LayerMask,
}

impl Default for HeightSettings {
    fn default() -> Self {
        Self {
            auto_height: true,
            dampening: 0.0,
            ground_mask: LayerMask::ALL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomSettings {
    pub invert: bool,
    pub use_pivot: bool,
    /// Distance above `min_height` inside which the pivot behaviour engages
    pub pivot_min_height_range: f32,
    /// Pitch reached while pivoting near the ground, in degrees
    pub pivot_target_angle: f32,
    pub pivot_speed: f32,
    pub initial_height: f32,
    pub max_height: f32,
    pub min_height: f32,
    /// Starting `(pitch, yaw, roll)` in degrees
    pub initial_euler_angles: Vec3,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            invert: true,
            use_pivot: true,
            pivot_min_height_range: 5.0,
            pivot_target_angle: 25.0,
            pivot_speed: 25.0,
            initial_height: 18.0,
            max_height: 25.0,
            min_height: 5.0,
            initial_euler_angles: Vec3::new(45.0, 45.0, 0.0),
        }
    }
}

impl ZoomSettings {
    /// Height below which the pivot state machine reacts to scrolling
    pub fn pivot_threshold(&self) -> f32 {
        self.min_height + self.pivot_min_height_range
    }

    /// +1 when positive scroll zooms out, -1 when inverted
    pub fn direction_sign(&self) -> f32 {
        if self.invert {
            -1.0
        } else {
            1.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardZoomSettings {
    pub enabled: bool,
    pub zoom_in_key: Key,
    pub zoom_out_key: Key,
    pub sensitivity: f32,
}

impl Default for KeyboardZoomSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            zoom_in_key: Key::E,
            zoom_out_key: Key::Q,
            sensitivity: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollZoomSettings {
    pub enabled: bool,
    pub sensitivity: f32,
}

impl Default for ScrollZoomSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            sensitivity: 25.0,
        }
    }
}

/// Complete rig configuration, loaded once per session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RtsCameraConfig {
    /// Query the injected physics scene instead of the default scene
    pub use_physics_scene: bool,
    pub movement: MovementSettings,
    pub screen_edge: ScreenEdgeSettings,
    pub panning: PanningSettings,
    pub map_limit: MapLimitSettings,
    pub rotation: RotationSettings,
    pub keyboard_rotation: KeyboardRotationSettings,
    pub mouse_rotation: MouseRotationSettings,
    pub height: HeightSettings,
    pub zoom: ZoomSettings,
    pub keyboard_zoom: KeyboardZoomSettings,
    pub scroll_zoom: ScrollZoomSettings,
}

impl RtsCameraConfig {
    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read camera config {:?}", path))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("Invalid camera config {:?}", path))?;
        log::info!("Loaded camera config from {:?}", path);
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("Failed to parse camera config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize camera config")
    }

    /// Reject ranges and speeds the rig cannot work with
    pub fn validate(&self) -> Result<()> {
        let zoom = &self.zoom;
        if zoom.min_height >= zoom.max_height {
            bail!(
                "zoom.min_height ({}) must be below zoom.max_height ({})",
                zoom.min_height,
                zoom.max_height
            );
        }
        if zoom.initial_height <= 0.0 {
            bail!("zoom.initial_height must be positive, got {}", zoom.initial_height);
        }
        if self.map_limit.min > self.map_limit.max {
            bail!(
                "map_limit.min ({}) must not exceed map_limit.max ({})",
                self.map_limit.min,
                self.map_limit.max
            );
        }
        let rotation = &self.rotation;
        if rotation.limit_pitch.x > rotation.limit_pitch.y {
            bail!("rotation.limit_pitch is inverted: {:?}", rotation.limit_pitch);
        }
        if rotation.limit_yaw.x > rotation.limit_yaw.y {
            bail!("rotation.limit_yaw is inverted: {:?}", rotation.limit_yaw);
        }

        let speeds = [
            ("movement.speed", self.movement.speed),
            ("screen_edge.speed", self.screen_edge.speed),
            ("screen_edge.border", self.screen_edge.border),
            ("panning.speed", self.panning.speed),
            ("keyboard_rotation.speed", self.keyboard_rotation.speed),
            ("mouse_rotation.speed", self.mouse_rotation.speed),
            ("zoom.pivot_speed", zoom.pivot_speed),
            ("zoom.pivot_min_height_range", zoom.pivot_min_height_range),
            ("keyboard_zoom.sensitivity", self.keyboard_zoom.sensitivity),
            ("scroll_zoom.sensitivity", self.scroll_zoom.sensitivity),
        ];
        if let Some((name, value)) = speeds.iter().find(|(_, value)| *value < 0.0) {
            bail!("{name} must not be negative, got {value}");
        }

        Ok(())
    }
}
