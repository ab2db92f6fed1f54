use glam::Vec3;

use super::AABB;

/// Half-line with a normalized direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Slab test against an axis-aligned box.
///
/// Returns the entry and exit distances along the ray. A ray starting inside
/// the box reports an entry distance of zero.
pub fn intersect_aabb(ray: &Ray, bounds: &AABB) -> Option<(f32, f32)> {
    const EPSILON: f32 = 1e-8;

    // Near-zero components get a huge inverse instead of dividing by zero
    let inv = |d: f32| {
        if d.abs() < EPSILON {
            1.0 / EPSILON.copysign(d)
        } else {
            1.0 / d
        }
    };
    let inv_dir = Vec3::new(inv(ray.direction.x), inv(ray.direction.y), inv(ray.direction.z));

    let t_min = (bounds.min - ray.origin) * inv_dir;
    let t_max = (bounds.max - ray.origin) * inv_dir;

    let t1 = t_min.min(t_max);
    let t2 = t_min.max(t_max);

    let t_near = t1.max_element();
    let t_far = t2.min_element();

    if t_near > t_far || t_far < 0.0 {
        return None;
    }

    Some((t_near.max(0.0), t_far))
}

/// Distance along the ray to the horizontal plane `y = height`
pub fn intersect_plane_y(ray: &Ray, height: f32) -> Option<f32> {
    const EPSILON: f32 = 1e-6;

    if ray.direction.y.abs() < EPSILON {
        return None;
    }

    let t = (height - ray.origin.y) / ray.direction.y;
    (t >= 0.0).then_some(t)
}
