use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use std::path::Path;

use super::RaycastHit;
use crate::math::{intersect_aabb, moller_trumbore_intersect, Ray, AABB};

/// Triangle soup collider with a bounding-box early out
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    triangles: Vec<[Vec3; 3]>,
    bounds: AABB,
}

impl TriangleMesh {
    pub fn new(triangles: Vec<[Vec3; 3]>) -> Result<Self> {
        let bounds = AABB::from_points(triangles.iter().flatten().copied())
            .context("terrain mesh has no triangles")?;
        Ok(Self { triangles, bounds })
    }

    /// Load every mesh primitive of a glTF file, with node transforms applied
    pub fn from_gltf(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading terrain mesh from {:?}", path);

        let (document, buffers, _images) =
            gltf::import(path).with_context(|| format!("Failed to load glTF file: {:?}", path))?;

        let mut triangles = Vec::new();
        for scene in document.scenes() {
            for node in scene.nodes() {
                collect_node_triangles(&node, &buffers, &Mat4::IDENTITY, &mut triangles)?;
            }
        }

        log::info!("Terrain mesh loaded: {} triangles", triangles.len());
        Self::new(triangles).with_context(|| format!("No triangles found in {:?}", path))
    }

    pub fn bounds(&self) -> AABB {
        self.bounds
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RaycastHit> {
        let (t_enter, _) = intersect_aabb(ray, &self.bounds)?;
        if t_enter > max_distance {
            return None;
        }

        self.triangles
            .iter()
            .filter_map(|[a, b, c]| moller_trumbore_intersect(ray.origin, ray.direction, *a, *b, *c))
            .filter(|hit| hit.t <= max_distance)
            .min_by(|a, b| a.t.total_cmp(&b.t))
            .map(|hit| RaycastHit {
                point: ray.at(hit.t),
                distance: hit.t,
                normal: hit.normal,
            })
    }
}

fn collect_node_triangles(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &Mat4,
    triangles: &mut Vec<[Vec3; 3]>,
) -> Result<()> {
    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

            let vertices: Vec<Vec3> = reader
                .read_positions()
                .context("Mesh primitive has no positions")?
                .map(|pos| global_transform.transform_point3(Vec3::from_array(pos)))
                .collect();

            let indices: Vec<u32> = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                None => (0..vertices.len() as u32).collect(),
            };

            for tri in indices.chunks_exact(3) {
                let corner = |i: u32| {
                    vertices
                        .get(i as usize)
                        .copied()
                        .with_context(|| format!("Index {} out of range in mesh {:?}", i, mesh.name()))
                };
                triangles.push([corner(tri[0])?, corner(tri[1])?, corner(tri[2])?]);
            }
        }
    }

    for child in node.children() {
        collect_node_triangles(&child, buffers, &global_transform, triangles)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> TriangleMesh {
        // Two triangles forming a 10x10 quad tilted up along +Z
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(10.0, 0.0, 0.0);
        let c = Vec3::new(10.0, 5.0, 10.0);
        let d = Vec3::new(0.0, 5.0, 10.0);
        TriangleMesh::new(vec![[a, b, c], [a, c, d]]).expect("non-empty mesh")
    }

    #[test]
    fn test_empty_mesh_rejected() {
        assert!(TriangleMesh::new(Vec::new()).is_err());
    }

    #[test]
    fn test_hit_on_ramp() {
        let mesh = ramp();
        let ray = Ray::new(Vec3::new(5.0, 20.0, 5.0), -Vec3::Y);
        let hit = mesh.raycast(&ray, f32::INFINITY).expect("ray should hit");
        assert!((hit.point.y - 2.5).abs() < 1e-4);
        assert!(hit.normal.y > 0.0);
    }

    #[test]
    fn test_miss_beside_ramp() {
        let mesh = ramp();
        let ray = Ray::new(Vec3::new(15.0, 20.0, 5.0), -Vec3::Y);
        assert!(mesh.raycast(&ray, f32::INFINITY).is_none());
    }

    #[test]
    fn test_missing_gltf_file_is_error() {
        assert!(TriangleMesh::from_gltf("does/not/exist.glb").is_err());
    }
}
