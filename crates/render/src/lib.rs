//! Rendering Adapter: renderer-agnostic draw interface.
//!
//! # Invariants
//! - Renderers never mutate scene state; they only receive uniforms and draws.
//! - Light arrays are bounded by [`MAX_POINT_LIGHTS`] and
//!   [`MAX_DIRECTIONAL_LIGHTS`].
//!
//! The GPU backend is out of tree. [`RecordingRenderer`] implements the trait
//! headlessly; swap in a real backend without changing consumers.

mod light;
mod material;
mod renderer;

pub use light::{DirectionalLight, MAX_DIRECTIONAL_LIGHTS, MAX_POINT_LIGHTS, PointLight};
pub use material::{Material, MeshHandle, Model};
pub use renderer::{CameraUniforms, RecordingRenderer, RenderCommand, Renderer};

pub fn crate_info() -> &'static str {
    "labyrinth-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
