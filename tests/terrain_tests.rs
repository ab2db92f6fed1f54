use glam::{Vec2, Vec3};
use rts_camera::math::Ray;
use rts_camera::{GroundPlane, Heightfield, LayerMask, SceneQuery, Shape, TerrainScene, TriangleMesh};

const TRIANGLE_GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [{ "nodes": [0] }],
  "nodes": [{ "mesh": 0, "translation": [0.0, 2.0, 0.0] }],
  "meshes": [{ "primitives": [{ "attributes": { "POSITION": 0 } }] }],
  "buffers": [{
    "byteLength": 36,
    "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAAAgQQAAAAAAAAAAAAAAAAAAAAAAACBB"
  }],
  "bufferViews": [{ "buffer": 0, "byteOffset": 0, "byteLength": 36 }],
  "accessors": [{
    "bufferView": 0,
    "componentType": 5126,
    "count": 3,
    "type": "VEC3",
    "min": [0.0, 0.0, 0.0],
    "max": [10.0, 0.0, 10.0]
  }]
}"#;

fn rolling_hills() -> Heightfield {
    Heightfield::from_fn(Vec2::new(-20.0, -20.0), 2.0, 21, 21, |x, z| {
        (x * 0.3).sin() * 2.0 + (z * 0.2).cos() * 1.5 + 4.0
    })
    .expect("valid heightfield")
}

#[cfg(test)]
mod terrain_tests {
    use super::*;

    #[test]
    fn test_vertical_rays_match_interpolated_height() {
        let field = rolling_hills();

        for i in 0..40 {
            for j in 0..40 {
                let x = -19.5 + i as f32 * 0.97;
                let z = -19.5 + j as f32 * 0.97;
                let expected = field.height_at(x, z).expect("inside grid");

                let ray = Ray::new(Vec3::new(x, 100.0, z), -Vec3::Y);
                let hit = field.raycast(&ray, f32::INFINITY).expect("vertical ray over grid");
                assert!((hit.point.y - expected).abs() < 1e-3, "at ({x}, {z}): {} vs {}", hit.point.y, expected);
            }
        }
    }

    #[test]
    fn test_oblique_hits_lie_on_surface() {
        let field = rolling_hills();

        for yaw in 0..16 {
            let angle = yaw as f32 * std::f32::consts::TAU / 16.0;
            let direction = Vec3::new(angle.sin(), -0.6, angle.cos());
            let ray = Ray::new(Vec3::new(0.0, 18.0, 0.0), direction);

            if let Some(hit) = field.raycast(&ray, f32::INFINITY) {
                let surface = field.height_at(hit.point.x, hit.point.z).expect("hit inside grid");
                assert!((hit.point.y - surface).abs() < 1e-2, "yaw step {yaw}");
                assert!(hit.normal.dot(direction) <= 0.0);
            }
        }
    }

    #[test]
    fn test_max_distance_limits_hits() {
        let field = rolling_hills();
        let ray = Ray::new(Vec3::new(0.0, 100.0, 0.0), -Vec3::Y);

        assert!(field.raycast(&ray, 50.0).is_none());
        assert!(field.raycast(&ray, 200.0).is_some());
    }

    #[test]
    fn test_scene_returns_nearest_collider() {
        let scene = TerrainScene::new("stacked")
            .with_collider(0, Shape::Plane(GroundPlane::new(0.0)))
            .with_collider(1, Shape::Heightfield(rolling_hills()));
        let ray = Ray::new(Vec3::new(1.0, 50.0, 1.0), -Vec3::Y);

        let hit = scene.raycast(&ray, f32::INFINITY, LayerMask::ALL).expect("hit");
        assert!(hit.point.y > 0.5);

        let ground_only = scene.raycast(&ray, f32::INFINITY, LayerMask::layer(0)).expect("hit");
        assert!(ground_only.point.y.abs() < 1e-4);

        assert!(scene.raycast(&ray, f32::INFINITY, LayerMask::NONE).is_none());
    }

    #[test]
    fn test_scene_name_is_reported() {
        let scene = TerrainScene::new("island");
        assert_eq!(scene.name(), "island");
        assert!(scene.colliders().is_empty());
    }

    #[test]
    fn test_gltf_mesh_applies_node_transform() {
        let path = std::env::temp_dir().join(format!("rts_camera_triangle_{}.gltf", std::process::id()));
        std::fs::write(&path, TRIANGLE_GLTF).expect("write test asset");

        let mesh = TriangleMesh::from_gltf(&path).expect("load glTF");
        std::fs::remove_file(&path).ok();

        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.bounds().min.y, 2.0);

        let ray = Ray::new(Vec3::new(2.0, 10.0, 2.0), -Vec3::Y);
        let hit = mesh.raycast(&ray, f32::INFINITY).expect("hit triangle");
        assert!((hit.point.y - 2.0).abs() < 1e-4);

        let beside = Ray::new(Vec3::new(8.0, 10.0, 8.0), -Vec3::Y);
        assert!(mesh.raycast(&beside, f32::INFINITY).is_none());
    }

    #[test]
    fn test_missing_gltf_is_error() {
        let err = TriangleMesh::from_gltf("does/not/exist.gltf").unwrap_err();
        assert!(format!("{err:#}").contains("exist.gltf"));
    }
}
