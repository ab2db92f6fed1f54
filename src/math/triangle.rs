use glam::Vec3;

/// Result of a ray/triangle test
#[derive(Debug, Clone, Copy)]
pub struct TriangleIntersection {
    pub t: f32,
    pub normal: Vec3,
}

/// Möller-Trumbore ray-triangle intersection.
///
/// Both windings are accepted; the returned normal is flipped to face the ray.
pub fn moller_trumbore_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<TriangleIntersection> {
    const EPSILON: f32 = 1e-6;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray_dir.cross(edge2);
    let a = edge1.dot(h);

    // Parallel to the triangle plane
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray_origin - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray_dir.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);

    if t < EPSILON {
        return None;
    }

    let mut normal = edge1.cross(edge2).normalize_or_zero();
    if normal.dot(ray_dir) > 0.0 {
        normal = -normal;
    }

    Some(TriangleIntersection { t, normal })
}
