use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::math::Ray;

/// Camera placement in world space.
///
/// Angles are Euler degrees with roll fixed at zero. At `yaw = pitch = 0` the
/// camera looks along +Z with +X to its right and +Y up; positive pitch tilts
/// the view toward the ground. Yaw is kept continuous (never wrapped) so that
/// yaw limits behave across full turns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub pitch: f32,
    pub yaw: f32,
}

impl CameraPose {
    pub fn new(position: Vec3, pitch: f32, yaw: f32) -> Self {
        Self { position, pitch, yaw }
    }

    /// Pose from an `(x = pitch, y = yaw, z = roll)` Euler triple; roll is ignored
    pub fn from_euler(position: Vec3, euler_degrees: Vec3) -> Self {
        Self::new(position, euler_degrees.x, euler_degrees.y)
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            0.0,
        )
    }

    /// Rotation by yaw alone, used to move across the ground plane
    pub fn planar_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw.to_radians())
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation() * Vec3::Y
    }

    pub fn height(&self) -> f32 {
        self.position.y
    }

    /// Orbit around `center`: first about world up by `yaw_delta` degrees,
    /// then about the camera's right axis by `pitch_delta` degrees.
    pub fn orbit(&mut self, center: Vec3, yaw_delta: f32, pitch_delta: f32) {
        if yaw_delta != 0.0 {
            let spin = Quat::from_axis_angle(Vec3::Y, yaw_delta.to_radians());
            self.position = center + spin * (self.position - center);
            self.yaw += yaw_delta;
        }

        if pitch_delta != 0.0 {
            let tilt = Quat::from_axis_angle(self.right(), pitch_delta.to_radians());
            self.position = center + tilt * (self.position - center);
            self.pitch += pitch_delta;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_lh(self.position, self.forward(), self.up())
    }

    pub fn to_uniform(&self, viewport: &Viewport) -> CameraUniform {
        let view_proj = viewport.projection_matrix() * self.view_matrix();

        CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
            position: self.position.to_array(),
            _pad1: 0.0,
            forward: self.forward().to_array(),
            _pad2: 0.0,
        }
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 0.0, 0.0)
    }
}

/// Camera data laid out for a GPU uniform buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub _pad1: f32,
    pub forward: [f32; 3],
    pub _pad2: f32,
}

/// Screen dimensions and perspective projection.
///
/// Screen points are in pixels with the origin at the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            fov_y: 60.0,
            near: 0.3,
            far: 1000.0,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.size() * 0.5
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_lh(self.fov_y.to_radians(), self.aspect(), self.near, self.far)
    }

    /// View-space direction through `screen_point`, scaled so its forward
    /// component is exactly one
    fn view_direction(&self, screen_point: Vec2) -> Vec3 {
        let size = self.size().max(Vec2::ONE);
        let ndc = screen_point / size * 2.0 - Vec2::ONE;
        let tan_half = (self.fov_y.to_radians() * 0.5).tan();

        Vec3::new(ndc.x * tan_half * self.aspect(), ndc.y * tan_half, 1.0)
    }

    /// Ray from the near-plane point under `screen_point` through the scene
    pub fn screen_point_to_ray(&self, pose: &CameraPose, screen_point: Vec2) -> Ray {
        let direction = pose.rotation() * self.view_direction(screen_point);
        Ray::new(pose.position + direction * self.near, direction)
    }

    /// World point under `screen_point` at `depth` units in front of the camera
    pub fn unproject(&self, pose: &CameraPose, screen_point: Vec2, depth: f32) -> Vec3 {
        pose.position + pose.rotation() * (self.view_direction(screen_point) * depth)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}
