use glam::{Vec2, Vec3};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rts_camera::math::Ray;
use rts_camera::{
    CameraPose, GroundPlane, Heightfield, InputSnapshot, Key, LayerMask, MouseButton, PivotState,
    RaycastHit, RtsCamera, RtsCameraConfig, SceneQuery, Shape, TerrainScene, Viewport,
};

const DT: f32 = 0.02;

struct EmptyScene;

impl SceneQuery for EmptyScene {
    fn raycast(&self, _ray: &Ray, _max_distance: f32, _mask: LayerMask) -> Option<RaycastHit> {
        None
    }
}

fn flat_scene(height: f32) -> Box<dyn SceneQuery> {
    Box::new(TerrainScene::new("flat").with_collider(0, Shape::Plane(GroundPlane::new(height))))
}

fn hilly_scene() -> Box<dyn SceneQuery> {
    let hills = Heightfield::from_fn(Vec2::splat(-64.0), 4.0, 33, 33, |x, z| {
        ((x * 0.1).sin() + (z * 0.13).cos()) * 2.5 + 2.5
    })
    .expect("valid heightfield");

    Box::new(
        TerrainScene::new("hills")
            .with_collider(0, Shape::Plane(GroundPlane::new(0.0)))
            .with_collider(1, Shape::Heightfield(hills)),
    )
}

fn rig_with(scene: Box<dyn SceneQuery>, config: RtsCameraConfig) -> RtsCamera {
    let mut rig = RtsCamera::new(CameraPose::default(), Viewport::new(800.0, 600.0), scene);
    rig.initialize(config);
    rig
}

fn idle(rig: &RtsCamera) -> InputSnapshot {
    InputSnapshot::at(rig.viewport().center())
}

fn random_input(rng: &mut ChaCha8Rng, viewport: &Viewport) -> InputSnapshot {
    let pointer = Vec2::new(
        rng.random_range(0.0..viewport.width),
        rng.random_range(0.0..viewport.height),
    );
    let mut input = InputSnapshot::at(pointer)
        .with_move(Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
        .with_pointer_delta(Vec2::new(rng.random_range(-20.0..20.0), rng.random_range(-20.0..20.0)));

    if rng.random_bool(0.5) {
        input = input.with_scroll(if rng.random_bool(0.5) { 1.0 } else { -1.0 });
    }
    if rng.random_bool(0.2) {
        input = input.with_button(MouseButton::Middle);
    }
    if rng.random_bool(0.2) {
        input = input.with_button(MouseButton::Right);
    }
    if rng.random_bool(0.3) {
        input = input.with_key(Key::X);
    }
    if rng.random_bool(0.3) {
        input = input.with_key(Key::Q);
    }
    input
}

fn assert_within_limits(rig: &RtsCamera) {
    let pose = rig.pose();
    let config = rig.config();

    assert!(pose.position.y >= config.zoom.min_height - 1e-3, "too low: {:?}", pose);
    assert!(pose.position.y <= config.zoom.max_height + 1e-3, "too high: {:?}", pose);
    for value in [pose.position.x, pose.position.z] {
        assert!(value >= config.map_limit.min && value <= config.map_limit.max, "off map: {:?}", pose);
    }
    assert!(pose.pitch >= config.rotation.limit_pitch.x && pose.pitch <= config.rotation.limit_pitch.y);
    assert!(pose.yaw >= config.rotation.limit_yaw.x && pose.yaw <= config.rotation.limit_yaw.y);
}

#[cfg(test)]
mod rig_tests {
    use super::*;

    #[test]
    fn test_random_input_keeps_camera_within_limits() {
        for (seed, scene) in [(7, flat_scene(0.0)), (42, hilly_scene())] {
            let mut rig = rig_with(scene, RtsCameraConfig::default());
            let mut rng = ChaCha8Rng::seed_from_u64(seed);

            for _ in 0..2000 {
                let input = random_input(&mut rng, rig.viewport());
                rig.update(DT, &input);
                assert_within_limits(&rig);
            }
        }
    }

    #[test]
    fn test_idle_input_leaves_pose_unchanged() {
        let mut rig = rig_with(flat_scene(0.0), RtsCameraConfig::default());
        let input = idle(&rig);

        rig.update(DT, &input);
        let settled = *rig.pose();

        for _ in 0..100 {
            rig.update(DT, &input);
        }
        assert_eq!(*rig.pose(), settled);
        assert!(rig.motion().is_settled());
    }

    #[test]
    fn test_holding_forward_stops_at_map_edge() {
        let mut rig = rig_with(flat_scene(0.0), RtsCameraConfig::default());
        let input = idle(&rig).with_move(Vec2::Y);

        for _ in 0..2000 {
            rig.update(DT, &input);
        }

        // Yaw 45 heads toward +X +Z
        assert_eq!(rig.pose().position.x, 50.0);
        assert_eq!(rig.pose().position.z, 50.0);
    }

    #[test]
    fn test_map_limit_can_be_disabled() {
        let mut config = RtsCameraConfig::default();
        config.map_limit.enabled = false;
        let mut rig = rig_with(flat_scene(0.0), config);
        let input = idle(&rig).with_move(Vec2::Y);

        for _ in 0..2000 {
            rig.update(DT, &input);
        }
        assert!(rig.pose().position.x > 50.0);
    }

    #[test]
    fn test_scroll_zooms_toward_screen_centre() {
        let mut rig = rig_with(flat_scene(0.0), RtsCameraConfig::default());
        let start = *rig.pose();

        // Inverted by default: positive scroll zooms in
        rig.update(DT, &idle(&rig).with_scroll(1.0));

        let moved = rig.pose().position - start.position;
        assert!(moved.abs_diff_eq(start.forward() * 0.25, 1e-3), "moved {:?}", moved);
    }

    #[test]
    fn test_uninverted_scroll_direction() {
        let mut config = RtsCameraConfig::default();
        config.zoom.invert = false;

        let mut rig = rig_with(flat_scene(0.0), config.clone());
        rig.update(DT, &idle(&rig).with_scroll(1.0));
        assert!(rig.pose().position.y > 18.0);

        let mut rig = rig_with(flat_scene(0.0), config);
        rig.update(DT, &idle(&rig).with_scroll(-1.0));
        assert!(rig.pose().position.y < 18.0);
    }

    #[test]
    fn test_zoom_leans_toward_cursor() {
        let mut rig = rig_with(flat_scene(0.0), RtsCameraConfig::default());
        let start = *rig.pose();
        let pointer = Vec2::new(700.0, 300.0);

        rig.update(DT, &InputSnapshot::at(pointer).with_scroll(1.0));

        let moved = rig.pose().position - start.position;
        assert!(moved.dot(start.forward()) > 0.0);
        assert!(moved.dot(start.right()) > 0.0);
    }

    #[test]
    fn test_zoom_without_terrain_backs_along_view_axis() {
        let mut rig = rig_with(Box::new(EmptyScene), RtsCameraConfig::default());
        let start = *rig.pose();

        rig.update(DT, &idle(&rig).with_scroll(-1.0));

        let moved = rig.pose().position - start.position;
        assert!(moved.abs_diff_eq(-start.forward() * 0.25, 1e-3), "moved {:?}", moved);
    }

    #[test]
    fn test_zoom_stops_at_height_limits() {
        let mut config = RtsCameraConfig::default();
        config.zoom.use_pivot = false;
        let mut rig = rig_with(flat_scene(0.0), config);

        for _ in 0..500 {
            rig.update(DT, &idle(&rig).with_scroll(1.0));
        }
        assert!(rig.pose().position.y >= 5.0);
        assert!(rig.pose().position.y < 6.0);

        for _ in 0..500 {
            rig.update(DT, &idle(&rig).with_scroll(-1.0));
        }
        assert!(rig.pose().position.y <= 25.0);
        assert!(rig.pose().position.y > 24.0);
    }

    #[test]
    fn test_pivot_states_replace_each_other() {
        let mut config = RtsCameraConfig::default();
        config.zoom.invert = false;
        config.zoom.initial_height = 9.99;
        let mut rig = rig_with(flat_scene(0.0), config);

        // Zoom in first: entering ResettingPivot from the initial pitch settles
        // in the same frame, so the out-then-in order is covered by the pivot
        // unit tests instead
        rig.update(DT, &idle(&rig).with_scroll(-1.0));
        assert!(matches!(rig.pivot_state(), PivotState::Pivoting { .. }));
        assert!(rig.pose().pitch < 45.0);

        rig.update(DT, &idle(&rig).with_scroll(1.0));
        assert!(matches!(rig.pivot_state(), PivotState::ResettingPivot { .. }));
    }

    #[test]
    fn test_pivot_ignored_above_threshold() {
        let mut rig = rig_with(flat_scene(0.0), RtsCameraConfig::default());
        rig.update(DT, &idle(&rig).with_scroll(1.0));

        assert_eq!(rig.pivot_state(), PivotState::Idle);
        assert_eq!(rig.pose().pitch, 45.0);
    }

    #[test]
    fn test_pivot_tilts_to_target_angle() {
        let mut config = RtsCameraConfig::default();
        config.zoom.initial_height = 9.0;
        let mut rig = rig_with(flat_scene(0.0), config);

        rig.update(DT, &idle(&rig).with_scroll(1.0));
        for _ in 0..200 {
            rig.update(DT, &idle(&rig));
        }

        assert_eq!(rig.pivot_state(), PivotState::Idle);
        assert!((rig.pose().pitch - 25.0).abs() < 1e-2);
    }

    #[test]
    fn test_orbit_center_frozen_while_rotating() {
        let mut rig = rig_with(flat_scene(0.0), RtsCameraConfig::default());
        let center = rig.orbit_center();
        let radius = (rig.pose().position - center).length();
        let rotate = idle(&rig).with_key(Key::X);

        for _ in 0..10 {
            rig.update(DT, &rotate);
            assert_eq!(rig.orbit_center(), center);
            assert!(((rig.pose().position - center).length() - radius).abs() < 1e-3);
        }
        assert!((rig.pose().yaw - 55.0).abs() < 1e-3);

        // Once rotation settles the new centre is the same ground point
        rig.update(DT, &idle(&rig));
        assert!(rig.orbit_center().abs_diff_eq(center, 1e-2));
    }

    #[test]
    fn test_yaw_limit_clamps_rotation() {
        let mut config = RtsCameraConfig::default();
        config.rotation.limit_yaw = Vec2::new(0.0, 50.0);
        let mut rig = rig_with(flat_scene(0.0), config);
        let rotate = idle(&rig).with_key(Key::X);

        for _ in 0..100 {
            rig.update(DT, &rotate);
        }
        assert_eq!(rig.pose().yaw, 50.0);
    }

    #[test]
    fn test_raised_terrain_lifts_camera() {
        let mut rig = rig_with(flat_scene(4.0), RtsCameraConfig::default());
        let input = idle(&rig);

        for _ in 0..20 {
            rig.update(DT, &input);
        }

        let rise = rig.pose().position.y - 18.0;
        assert!(rise > 2.5 && rise < 3.5, "rise {}", rise);
        assert!(rig.height_compensation().is_adding_offset);

        let settled = *rig.pose();
        rig.update(DT, &input);
        assert_eq!(*rig.pose(), settled);
    }

    #[test]
    fn test_ground_mask_filters_terrain_layers() {
        let scene = TerrainScene::new("layers")
            .with_collider(0, Shape::Plane(GroundPlane::new(0.0)))
            .with_collider(3, Shape::Plane(GroundPlane::new(6.0)));

        let mut config = RtsCameraConfig::default();
        config.height.ground_mask = LayerMask::layer(0);
        let rig = rig_with(Box::new(scene.clone()), config);
        assert!(rig.orbit_center().y.abs() < 1e-3);

        let rig = rig_with(Box::new(scene), RtsCameraConfig::default());
        assert!((rig.orbit_center().y - 6.0).abs() < 1e-3);
    }

    #[test]
    fn test_physics_scene_used_when_enabled() {
        let mut config = RtsCameraConfig::default();
        config.use_physics_scene = true;

        let mut rig = RtsCamera::new(CameraPose::default(), Viewport::new(800.0, 600.0), flat_scene(0.0));
        rig.set_physics_scene(flat_scene(3.0));
        rig.initialize(config);

        assert!((rig.orbit_center().y - 3.0).abs() < 1e-3);
        assert!(rig.clear_physics_scene().is_some());
    }

    #[test]
    fn test_screen_to_world_with_offset() {
        let rig = rig_with(flat_scene(0.0), RtsCameraConfig::default());
        let center = rig.viewport().center();

        let plain = rig.screen_to_world(center, false);
        let shifted = rig.screen_to_world(center, true);
        assert!((shifted - plain).abs_diff_eq(Vec3::new(15.0, 0.0, 15.0), 1e-3));
    }
}
