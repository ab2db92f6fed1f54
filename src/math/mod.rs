mod aabb;
mod lerp;
mod ray;
mod triangle;

pub use aabb::AABB;
pub use lerp::{clamp_range, lerp, Lerp};
pub use ray::{intersect_aabb, intersect_plane_y, Ray};
pub use triangle::{moller_trumbore_intersect, TriangleIntersection};
