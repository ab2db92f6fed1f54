//! The RTS camera rig.
//!
//! One [`RtsCamera`] owns the camera pose and all per-session state. The host
//! calls [`RtsCamera::initialize`] once, then [`RtsCamera::update`] every frame
//! after input has been latched. Each update runs three stages in order:
//! planar movement, zoom (with height compensation and the near-ground pivot),
//! and orbit rotation.

mod height;
mod pivot;

pub use height::HeightCompensation;
pub use pivot::{PivotState, PivotTargets, ScrollIntent, PIVOT_SETTLE_EPSILON};

use glam::{Vec2, Vec3};

use crate::camera::{CameraPose, Viewport};
use crate::config::RtsCameraConfig;
use crate::input::{InputFrame, InputSource};
use crate::math::clamp_range;
use crate::motion::MotionState;
use crate::terrain::{SceneQuery, TerrainQuery};

pub struct RtsCamera {
    config: RtsCameraConfig,
    pose: CameraPose,
    viewport: Viewport,
    terrain: TerrainQuery,
    motion: MotionState,
    pivot: PivotState,
    height: HeightCompensation,
    /// Sensitivity of the zoom channel that ran last
    zoom_speed: f32,
    /// Speed of the rotation channel that ran last
    rotation_speed: f32,
    orbit_center: Vec3,
    enabled: bool,
    initialized: bool,
}

impl RtsCamera {
    /// Take ownership of the camera pose; `scene` is the default terrain backend
    pub fn new(pose: CameraPose, viewport: Viewport, scene: Box<dyn SceneQuery>) -> Self {
        Self {
            config: RtsCameraConfig::default(),
            pose,
            viewport,
            terrain: TerrainQuery::new(scene),
            motion: MotionState::default(),
            pivot: PivotState::Idle,
            height: HeightCompensation::default(),
            zoom_speed: 0.0,
            rotation_speed: 0.0,
            orbit_center: Vec3::ZERO,
            enabled: true,
            initialized: false,
        }
    }

    /// Apply `config` and place the camera at its initial height and angles.
    ///
    /// Invalid configs are logged and used as-is; inverted ranges then resolve
    /// to their upper bound instead of panicking. Load through
    /// [`RtsCameraConfig::load`] to reject them up front.
    pub fn initialize(&mut self, config: RtsCameraConfig) {
        if let Err(e) = config.validate() {
            log::warn!("Camera config failed validation, using it anyway: {:#}", e);
        }

        self.terrain.configure(&config);
        self.pose.position.y = config.zoom.initial_height;
        self.pose.pitch = config.zoom.initial_euler_angles.x;
        self.pose.yaw = config.zoom.initial_euler_angles.y;
        self.config = config;

        self.motion.reset();
        self.pivot = PivotState::Idle;
        self.height = HeightCompensation::default();
        self.recenter_orbit();
        self.initialized = true;

        log::info!(
            "RTS camera initialized at {:?} (pitch {:.1}, yaw {:.1})",
            self.pose.position,
            self.pose.pitch,
            self.pose.yaw
        );
    }

    /// Run one frame. Returns false when the frame was skipped because the rig
    /// is disabled, uninitialized, or the host is unfocused.
    pub fn update<I: InputSource + ?Sized>(&mut self, dt: f32, input: &I) -> bool {
        if !self.initialized || !self.enabled || !input.has_focus() {
            return false;
        }

        let frame = InputFrame::gather(input, &self.config, &self.viewport, dt);

        self.apply_movement(&frame, dt);
        self.apply_zoom(&frame, dt);
        self.apply_rotation(&frame, dt);
        self.enforce_map_limits();

        log::trace!("Camera pose {:?}", self.pose);
        true
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            log::debug!("RTS camera {}", if enabled { "enabled" } else { "disabled" });
        }
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Route terrain queries to a designated physics scene when
    /// `use_physics_scene` is set
    pub fn set_physics_scene(&mut self, scene: Box<dyn SceneQuery>) {
        self.terrain.set_physics_scene(scene);
    }

    pub fn clear_physics_scene(&mut self) -> Option<Box<dyn SceneQuery>> {
        self.terrain.clear_physics_scene()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    pub fn config(&self) -> &RtsCameraConfig {
        &self.config
    }

    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    pub fn pivot_state(&self) -> PivotState {
        self.pivot
    }

    pub fn height_compensation(&self) -> &HeightCompensation {
        &self.height
    }

    /// Point the camera currently orbits around
    pub fn orbit_center(&self) -> Vec3 {
        self.orbit_center
    }

    /// World point under `screen_point`, see [`TerrainQuery::screen_to_world`]
    pub fn screen_to_world(&self, screen_point: Vec2, apply_offset: bool) -> Vec3 {
        self.terrain
            .screen_to_world(&self.pose, &self.viewport, screen_point, apply_offset)
    }

    /// Slide the camera horizontally so that `target` ends up framed at the
    /// screen centre
    pub fn focus_on(&mut self, target: Vec3) {
        let offset = self.terrain.height_scaled_offset(self.pose.height());
        self.pose.position.x = target.x + offset.x;
        self.pose.position.z = target.z + offset.y;
        self.enforce_map_limits();
        self.motion.reset();
        self.recenter_orbit();

        log::debug!("Camera focused on {:?}", target);
    }

    fn apply_movement(&mut self, frame: &InputFrame, dt: f32) {
        if let Some(direction) = frame.keyboard_move {
            let speed = self.config.movement.speed;
            let smoothed = self.motion.keyboard_move.blend(direction, speed);
            self.translate_planar(smoothed, speed, dt);
        }

        if let Some(direction) = frame.edge_pan {
            let speed = self.config.screen_edge.speed;
            let smoothed = self.motion.edge_pan.blend(direction, speed);
            self.translate_planar(smoothed, speed, dt);
        }

        if let Some(direction) = frame.drag_pan {
            let speed = self.config.panning.speed;
            let smoothed = self.motion.drag_pan.blend(direction, speed);
            self.translate_planar(smoothed, speed, dt);
        }
    }

    /// Move along the ground using yaw only, then clamp to the map
    fn translate_planar(&mut self, direction: Vec3, speed: f32, dt: f32) {
        let position = self.pose.position + self.pose.planar_rotation() * direction * speed * dt;
        let limits = &self.config.map_limit;

        self.pose.position = Vec3::new(limits.clamp(position.x), position.y, limits.clamp(position.z));
    }

    fn apply_zoom(&mut self, frame: &InputFrame, dt: f32) {
        if let Some(speed) = frame.zoom_speed {
            self.zoom_speed = speed;
        }

        let center_ground = self
            .terrain
            .project(&self.pose, &self.viewport, self.viewport.center());
        let pointer_ground = self.terrain.project(&self.pose, &self.viewport, frame.pointer);

        // Zoom moves toward or away from whatever is under the cursor
        let zoom_direction = match pointer_ground {
            Some(point) => (self.pose.position - point).normalize_or_zero(),
            None => -self.pose.forward(),
        };

        self.update_pivot(frame.scroll, dt);

        let start = self.pose.position;
        let zoom = &self.config.zoom;

        let lift = self.height.step(
            center_ground.map(|point| point.y),
            self.config.height.auto_height,
            self.config.height.dampening,
            self.zoom_speed,
            dt,
        );
        let mut translation = lift * self.pose.forward();

        let smoothed = self.motion.zoom.blend(frame.zoom, self.zoom_speed);
        translation += self.zoom_speed * dt * smoothed * zoom_direction;

        self.pose.position += translation;

        let height = self.pose.position.y;
        if height < zoom.min_height || height > zoom.max_height {
            self.pose.position = Vec3::new(
                start.x,
                clamp_range(start.y, zoom.min_height, zoom.max_height),
                start.z,
            );
        }
    }

    fn update_pivot(&mut self, scroll: f32, dt: f32) {
        let zoom = &self.config.zoom;
        if !zoom.use_pivot {
            return;
        }

        let targets = PivotTargets {
            threshold: zoom.pivot_threshold(),
            reset_pitch: zoom.initial_euler_angles.x,
            reset_height: zoom.pivot_threshold() + 1.0,
            pivot_pitch: zoom.pivot_target_angle,
            pivot_height: zoom.min_height,
        };
        let intent = ScrollIntent::from_scroll(scroll, zoom.direction_sign());

        let previous = self.pivot;
        self.pivot = self.pivot.transition(self.pose.position, targets.threshold, intent);
        self.pivot
            .advance(&mut self.pose, &targets, zoom.pivot_speed * dt);

        if std::mem::discriminant(&previous) != std::mem::discriminant(&self.pivot) {
            log::debug!("Pivot state {:?} -> {:?}", previous, self.pivot);
        }
    }

    fn apply_rotation(&mut self, frame: &InputFrame, dt: f32) {
        if let Some(speed) = frame.rotation_speed {
            self.rotation_speed = speed;
        }

        let smoothed = self.motion.rotation.blend(frame.rotation, self.rotation_speed);

        // Freeze the orbit point while rotating, pick a new one once settled
        if self.motion.rotation.is_settled() {
            self.recenter_orbit();
        }

        let step = self.rotation_speed * dt;
        self.pose
            .orbit(self.orbit_center, smoothed.x * step, smoothed.y * step);

        let rotation = &self.config.rotation;
        if rotation.use_limit {
            self.pose.pitch = clamp_range(self.pose.pitch, rotation.limit_pitch.x, rotation.limit_pitch.y);
            self.pose.yaw = clamp_range(self.pose.yaw, rotation.limit_yaw.x, rotation.limit_yaw.y);
        }
    }

    fn recenter_orbit(&mut self) {
        self.orbit_center = self.screen_to_world(self.viewport.center(), false);
    }

    fn enforce_map_limits(&mut self) {
        let limits = &self.config.map_limit;
        self.pose.position.x = limits.clamp(self.pose.position.x);
        self.pose.position.z = limits.clamp(self.pose.position.z);
    }
}
