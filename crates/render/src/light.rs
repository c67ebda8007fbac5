use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Size of the point light uniform array.
pub const MAX_POINT_LIGHTS: usize = 5;
/// Size of the directional light uniform array.
pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;

/// Omnidirectional light with a falloff radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub is_lit: bool,
    pub radius: f32,
    pub position: Vec3,
    pub color: Vec4,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            is_lit: true,
            radius: 10.0,
            position: Vec3::splat(2.0),
            color: Vec4::splat(0.8),
        }
    }
}

/// Light arriving from a fixed direction, plus an ambient term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub is_lit: bool,
    pub direction: Vec3,
    pub ambient: Vec4,
    pub color: Vec4,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            is_lit: true,
            direction: Vec3::ONE,
            ambient: Vec4::new(0.2, 0.2, 0.0, 1.0),
            color: Vec4::new(0.8, 0.8, 0.7, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_light_default() {
        let l = PointLight::default();
        assert!(l.is_lit);
        assert_eq!(l.radius, 10.0);
        assert_eq!(l.position, Vec3::splat(2.0));
    }

    #[test]
    fn directional_light_default() {
        let l = DirectionalLight::default();
        assert!(l.is_lit);
        assert_eq!(l.direction, Vec3::ONE);
        assert_eq!(l.color, Vec4::new(0.8, 0.8, 0.7, 1.0));
    }
}
