use glam::{Vec2, Vec3};

use super::{LayerMask, SceneQuery};
use crate::camera::{CameraPose, Viewport};
use crate::config::RtsCameraConfig;

/// Screen-to-terrain adapter over the default scene and an optional
/// designated physics scene
pub struct TerrainQuery {
    default_scene: Box<dyn SceneQuery>,
    physics_scene: Option<Box<dyn SceneQuery>>,
    use_physics_scene: bool,
    ground_mask: LayerMask,
    pivot_offset: Vec2,
    initial_height: f32,
}

impl TerrainQuery {
    pub fn new(default_scene: Box<dyn SceneQuery>) -> Self {
        let config = RtsCameraConfig::default();
        let mut query = Self {
            default_scene,
            physics_scene: None,
            use_physics_scene: false,
            ground_mask: LayerMask::ALL,
            pivot_offset: Vec2::ZERO,
            initial_height: 1.0,
        };
        query.configure(&config);
        query
    }

    /// Pick up the query-related settings from `config`
    pub fn configure(&mut self, config: &RtsCameraConfig) {
        self.use_physics_scene = config.use_physics_scene;
        self.ground_mask = config.height.ground_mask;
        self.pivot_offset = config.rotation.pivot_offset;
        self.initial_height = config.zoom.initial_height;
    }

    pub fn set_physics_scene(&mut self, scene: Box<dyn SceneQuery>) {
        log::info!("Physics scene '{}' attached to terrain query", scene.name());
        self.physics_scene = Some(scene);
    }

    pub fn clear_physics_scene(&mut self) -> Option<Box<dyn SceneQuery>> {
        self.physics_scene.take()
    }

    /// The backend raycasts go to: the physics scene when enabled and present
    pub fn active_scene(&self) -> &dyn SceneQuery {
        match &self.physics_scene {
            Some(scene) if self.use_physics_scene => scene.as_ref(),
            _ => self.default_scene.as_ref(),
        }
    }

    /// Terrain point hit by a ray leaving the near plane under `screen_point`.
    ///
    /// The ray travels along the camera's forward axis rather than through the
    /// pixel, so every sample looks straight down the current view direction.
    pub fn project(&self, pose: &CameraPose, viewport: &Viewport, screen_point: Vec2) -> Option<Vec3> {
        let mut ray = viewport.screen_point_to_ray(pose, screen_point);
        ray.direction = pose.forward();

        self.active_scene()
            .raycast(&ray, f32::INFINITY, self.ground_mask)
            .map(|hit| hit.point)
    }

    /// Like [`project`](Self::project) but never fails: a miss falls back to
    /// unprojecting at a depth equal to the camera height. With `apply_offset`
    /// the result is shifted by the pivot offset scaled to the current height.
    pub fn screen_to_world(
        &self,
        pose: &CameraPose,
        viewport: &Viewport,
        screen_point: Vec2,
        apply_offset: bool,
    ) -> Vec3 {
        let world = self
            .project(pose, viewport, screen_point)
            .unwrap_or_else(|| viewport.unproject(pose, screen_point, pose.height()));

        if apply_offset {
            let offset = self.height_scaled_offset(pose.height());
            Vec3::new(world.x - offset.x, world.y, world.z - offset.y)
        } else {
            world
        }
    }

    /// Pivot offset at `height`, linear in height relative to the initial height
    pub fn height_scaled_offset(&self, height: f32) -> Vec2 {
        self.pivot_offset * height / self.initial_height
    }
}
