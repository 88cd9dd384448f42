//! Camera description shared by the composer (pointer unprojection), the CPU
//! shading reference and the GPU frontends.

use crate::constants::{CAMERA_FOVY_DEG, CAMERA_Z, CAMERA_ZFAR, CAMERA_ZNEAR, POINTER_UNPROJECT_DEPTH};
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Camera {
    pub fn with_aspect(width: u32, height: u32) -> Self {
        Self {
            aspect: width.max(1) as f32 / height.max(1) as f32,
            ..Self::default()
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Intersect the pointer ray through `ndc` with the world `z = 0` plane.
    ///
    /// Returns `None` when the ray is parallel to the plane or the matrices
    /// degenerate (e.g. a zero-sized viewport).
    pub fn unproject_to_plane(&self, ndc: Vec2) -> Option<Vec3> {
        let inv = (self.projection_matrix() * self.view_matrix()).inverse();
        let p = inv * Vec4::new(ndc.x, ndc.y, POINTER_UNPROJECT_DEPTH, 1.0);
        if p.w.abs() < f32::EPSILON {
            return None;
        }
        let on_ray = p.truncate() / p.w;
        let dir = (on_ray - self.eye).normalize_or_zero();
        if dir.z.abs() < 1e-6 {
            return None;
        }
        let distance = -self.eye.z / dir.z;
        let hit = self.eye + dir * distance;
        hit.is_finite().then_some(hit)
    }
}
