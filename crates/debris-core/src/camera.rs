//! Chase camera that trails the ship.
//!
//! The eye and look-at target are fixed offsets in the ship's local frame,
//! rotated by the ship's heading (yaw) and aim (pitch). Roll is always zero.

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;

/// View and projection matrices handed to the renderer.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraMatrices {
    /// World to view transform.
    pub view: Mat4,
    /// View to clip transform.
    pub projection: Mat4,
}

impl Default for CameraMatrices {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        }
    }
}

/// Third-person camera following the ship.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    settings: CameraConfig,
    eye: Vec3,
    target: Vec3,
    matrices: CameraMatrices,
}

impl Camera {
    /// Creates a camera with identity matrices; call [`Camera::update`]
    /// before the first gameplay frame.
    #[must_use]
    pub fn new(settings: CameraConfig) -> Self {
        Self {
            settings,
            eye: Vec3::ZERO,
            target: Vec3::ZERO,
            matrices: CameraMatrices::default(),
        }
    }

    /// Recomputes the matrices from the ship pose.
    pub fn update(&mut self, heading: f32, pitch: f32, position: Vec3) {
        let rotation = Quat::from_euler(EulerRot::YXZ, heading, pitch, 0.0);
        self.eye = position + rotation * self.settings.head_offset;
        self.target = position + rotation * self.settings.target_offset;

        self.matrices = CameraMatrices {
            view: Mat4::look_at_rh(self.eye, self.target, Vec3::Y),
            projection: Mat4::perspective_rh(
                self.settings.fov_degrees.to_radians(),
                self.settings.aspect_ratio,
                self.settings.near_clip,
                self.settings.far_clip,
            ),
        };
    }

    /// Camera position from the last update.
    #[must_use]
    pub const fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Look-at point from the last update.
    #[must_use]
    pub const fn target(&self) -> Vec3 {
        self.target
    }

    /// Matrices from the last update.
    #[must_use]
    pub const fn matrices(&self) -> &CameraMatrices {
        &self.matrices
    }
}
