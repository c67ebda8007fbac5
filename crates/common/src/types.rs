use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Spatial transform: position, Euler rotation (radians), scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Rotation about X, Y and Z, in radians.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Composed matrix `T * S * Rz * Ry * Rx`.
    pub fn matrix(&self) -> Mat4 {
        let rotation = Mat4::from_rotation_z(self.rotation.z)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_x(self.rotation.x);
        Mat4::from_translation(self.position) * Mat4::from_scale(self.scale) * rotation
    }
}
