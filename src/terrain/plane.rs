use glam::Vec3;

use super::RaycastHit;
use crate::math::{intersect_plane_y, Ray};

/// Infinite horizontal ground at a fixed height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPlane {
    pub height: f32,
}

impl GroundPlane {
    pub fn new(height: f32) -> Self {
        Self { height }
    }

    pub fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RaycastHit> {
        let t = intersect_plane_y(ray, self.height)?;
        if t > max_distance {
            return None;
        }

        let normal = if ray.direction.y < 0.0 { Vec3::Y } else { -Vec3::Y };

        Some(RaycastHit {
            point: ray.at(t),
            distance: t,
            normal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oblique_hit() {
        let plane = GroundPlane::new(2.0);
        let ray = Ray::new(Vec3::new(0.0, 12.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let hit = plane.raycast(&ray, f32::INFINITY).expect("ray should hit");

        assert!((hit.point - Vec3::new(10.0, 2.0, 0.0)).length() < 1e-4);
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn test_looking_up_misses() {
        let plane = GroundPlane::new(0.0);
        let ray = Ray::new(Vec3::new(0.0, 12.0, 0.0), Vec3::new(0.0, 1.0, 1.0));
        assert!(plane.raycast(&ray, f32::INFINITY).is_none());
    }
}
