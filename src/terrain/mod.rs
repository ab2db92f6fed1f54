//! Terrain raycasting.
//!
//! [`SceneQuery`] is the scene-query service the rig consumes. The collider
//! types here are small self-contained backends for it; hosts with their own
//! physics engine implement the trait instead.

pub mod heightfield;
pub mod mesh;
pub mod plane;
pub mod query;

pub use heightfield::Heightfield;
pub use mesh::TriangleMesh;
pub use plane::GroundPlane;
pub use query::TerrainQuery;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::math::Ray;

/// Bit set of collision layers (32 layers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    pub const NONE: LayerMask = LayerMask(0);

    /// Mask containing the single layer `layer` (0..32)
    pub const fn layer(layer: u8) -> Self {
        LayerMask(1u32 << (layer % 32))
    }

    pub const fn contains(self, layer: u8) -> bool {
        self.0 & (1u32 << (layer % 32)) != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Closest surface point found by a raycast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub point: Vec3,
    pub distance: f32,
    pub normal: Vec3,
}

/// Scene-query service used to find terrain under the camera
pub trait SceneQuery {
    /// Nearest hit within `max_distance` on a layer included in `mask`
    fn raycast(&self, ray: &Ray, max_distance: f32, mask: LayerMask) -> Option<RaycastHit>;

    fn name(&self) -> &str {
        "Scene"
    }
}

/// Collider shapes a [`TerrainScene`] can hold
#[derive(Debug, Clone)]
pub enum Shape {
    Plane(GroundPlane),
    Heightfield(Heightfield),
    Mesh(TriangleMesh),
}

impl Shape {
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RaycastHit> {
        match self {
            Shape::Plane(plane) => plane.raycast(ray, max_distance),
            Shape::Heightfield(field) => field.raycast(ray, max_distance),
            Shape::Mesh(mesh) => mesh.raycast(ray, max_distance),
        }
    }
}

/// A shape placed on a collision layer
#[derive(Debug, Clone)]
pub struct Collider {
    pub layer: u8,
    pub shape: Shape,
}

/// Collection of colliders answering raycasts with the nearest hit
#[derive(Debug, Clone, Default)]
pub struct TerrainScene {
    name: String,
    colliders: Vec<Collider>,
}

impl TerrainScene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colliders: Vec::new(),
        }
    }

    pub fn with_collider(mut self, layer: u8, shape: Shape) -> Self {
        self.add(layer, shape);
        self
    }

    pub fn add(&mut self, layer: u8, shape: Shape) {
        log::debug!("Scene '{}': collider added on layer {}", self.name, layer);
        self.colliders.push(Collider { layer, shape });
    }

    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }
}

impl SceneQuery for TerrainScene {
    fn raycast(&self, ray: &Ray, max_distance: f32, mask: LayerMask) -> Option<RaycastHit> {
        self.colliders
            .iter()
            .filter(|collider| mask.contains(collider.layer))
            .filter_map(|collider| collider.shape.raycast(ray, max_distance))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
