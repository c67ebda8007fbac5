use glam::{Mat4, Vec4};
use serde::{Deserialize, Serialize};

/// A handle referencing mesh buffers owned by the GPU backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshHandle(pub u64);

/// Phong surface parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub shininess: f32,
    pub emissive: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vec4::splat(0.1),
            diffuse: Vec4::splat(0.8),
            specular: Vec4::ZERO,
            shininess: 10.0,
            emissive: 0.0,
        }
    }
}

impl Material {
    /// Flat white, used for light gizmos.
    pub fn debug_light() -> Self {
        Self {
            ambient: Vec4::ONE,
            diffuse: Vec4::ONE,
            specular: Vec4::ONE,
            shininess: 10.0,
            emissive: 0.0,
        }
    }
}

/// A drawable resource shared by any number of entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub name: String,
    pub mesh: MeshHandle,
    pub material: Material,
    /// Local transform applied before the entity's world transform.
    pub transform: Mat4,
}

impl Model {
    pub fn new(name: impl Into<String>, mesh: MeshHandle) -> Self {
        Self {
            name: name.into(),
            mesh,
            material: Material::default(),
            transform: Mat4::IDENTITY,
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_builder() {
        let m = Model::new("cube", MeshHandle(3))
            .with_material(Material::debug_light())
            .with_transform(Mat4::from_scale(glam::Vec3::splat(0.5)));
        assert_eq!(m.name, "cube");
        assert_eq!(m.mesh, MeshHandle(3));
        assert_eq!(m.material.diffuse, Vec4::ONE);
        assert_ne!(m.transform, Mat4::IDENTITY);
    }

    #[test]
    fn default_material_has_no_specular() {
        let m = Material::default();
        assert_eq!(m.specular, Vec4::ZERO);
        assert_eq!(m.shininess, 10.0);
    }
}
