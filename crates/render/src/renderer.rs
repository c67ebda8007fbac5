use glam::{Mat4, Vec3};
use std::fmt;

use crate::light::{DirectionalLight, PointLight};
use crate::material::{Material, MeshHandle, Model};

/// Per-frame camera state handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraUniforms {
    pub view: Mat4,
    pub projection: Mat4,
    /// Camera position in world space.
    pub eye: Vec3,
}

impl Default for CameraUniforms {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            eye: Vec3::ZERO,
        }
    }
}

/// Renderer-agnostic draw interface.
///
/// The core only pushes uniform state and issues draw calls. Mesh buffers,
/// shaders and the GPU context stay behind the implementation.
pub trait Renderer {
    fn set_camera(&mut self, camera: &CameraUniforms);

    fn set_model_matrix(&mut self, matrix: Mat4);

    /// Toggle the selection highlight for subsequent draws.
    fn set_selected(&mut self, selected: bool);

    fn set_material(&mut self, material: &Material);

    /// Write slot `index` of the directional light array.
    fn set_directional_light(&mut self, index: usize, light: &DirectionalLight);

    /// Write slot `index` of the point light array.
    fn set_point_light(&mut self, index: usize, light: &PointLight);

    /// Draw `model` with the currently bound uniforms.
    fn draw_model(&mut self, model: &Model);
}

/// One call made against a [`Renderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    Camera(CameraUniforms),
    ModelMatrix(Mat4),
    Selected(bool),
    Material(Material),
    DirectionalLight(usize, DirectionalLight),
    PointLight(usize, PointLight),
    Draw { model: String, mesh: MeshHandle },
}

/// Headless renderer that records every call.
///
/// Stands in for the GPU backend in the CLI and in tests.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<RenderCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Drop recorded commands, typically once per frame.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn draw_calls(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::Draw { .. }))
            .count()
    }

    /// Selection flag in effect at each draw call, in draw order.
    pub fn selection_per_draw(&self) -> Vec<bool> {
        let mut selected = false;
        let mut out = Vec::new();
        for cmd in &self.commands {
            match cmd {
                RenderCommand::Selected(s) => selected = *s,
                RenderCommand::Draw { .. } => out.push(selected),
                _ => {}
            }
        }
        out
    }

    /// Model matrix in effect at each draw call, in draw order.
    pub fn matrices_per_draw(&self) -> Vec<Mat4> {
        let mut matrix = Mat4::IDENTITY;
        let mut out = Vec::new();
        for cmd in &self.commands {
            match cmd {
                RenderCommand::ModelMatrix(m) => matrix = *m,
                RenderCommand::Draw { .. } => out.push(matrix),
                _ => {}
            }
        }
        out
    }
}

impl Renderer for RecordingRenderer {
    fn set_camera(&mut self, camera: &CameraUniforms) {
        self.commands.push(RenderCommand::Camera(*camera));
    }

    fn set_model_matrix(&mut self, matrix: Mat4) {
        self.commands.push(RenderCommand::ModelMatrix(matrix));
    }

    fn set_selected(&mut self, selected: bool) {
        self.commands.push(RenderCommand::Selected(selected));
    }

    fn set_material(&mut self, material: &Material) {
        self.commands.push(RenderCommand::Material(*material));
    }

    fn set_directional_light(&mut self, index: usize, light: &DirectionalLight) {
        self.commands.push(RenderCommand::DirectionalLight(index, *light));
    }

    fn set_point_light(&mut self, index: usize, light: &PointLight) {
        self.commands.push(RenderCommand::PointLight(index, *light));
    }

    fn draw_model(&mut self, model: &Model) {
        tracing::trace!(model = %model.name, "draw");
        self.commands.push(RenderCommand::Draw {
            model: model.name.clone(),
            mesh: model.mesh,
        });
    }
}

impl fmt::Display for RecordingRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cmd in &self.commands {
            match cmd {
                RenderCommand::Camera(c) => writeln!(
                    f,
                    "camera eye=({:.2}, {:.2}, {:.2})",
                    c.eye.x, c.eye.y, c.eye.z
                )?,
                RenderCommand::ModelMatrix(m) => {
                    let t = m.w_axis;
                    writeln!(f, "model translation=({:.2}, {:.2}, {:.2})", t.x, t.y, t.z)?
                }
                RenderCommand::Selected(s) => writeln!(f, "selected={s}")?,
                RenderCommand::Material(m) => writeln!(f, "material shininess={:.1}", m.shininess)?,
                RenderCommand::DirectionalLight(i, l) => writeln!(
                    f,
                    "directional[{i}] lit={} dir=({:.2}, {:.2}, {:.2})",
                    l.is_lit, l.direction.x, l.direction.y, l.direction.z
                )?,
                RenderCommand::PointLight(i, l) => writeln!(
                    f,
                    "point[{i}] lit={} pos=({:.2}, {:.2}, {:.2}) r={:.1}",
                    l.is_lit, l.position.x, l.position.y, l.position.z, l.radius
                )?,
                RenderCommand::Draw { model, mesh } => writeln!(f, "draw {model} mesh={}", mesh.0)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_starts_empty() {
        let r = RecordingRenderer::new();
        assert!(r.commands().is_empty());
        assert_eq!(r.draw_calls(), 0);
        assert!(r.to_string().is_empty());
    }

    #[test]
    fn recorder_tracks_state_per_draw() {
        let mut r = RecordingRenderer::new();
        let model = Model::new("wall", MeshHandle(1));
        let lifted = Mat4::from_translation(Vec3::Y);

        r.set_model_matrix(lifted);
        r.set_selected(true);
        r.draw_model(&model);
        r.set_selected(false);
        r.set_model_matrix(Mat4::IDENTITY);
        r.draw_model(&model);

        assert_eq!(r.draw_calls(), 2);
        assert_eq!(r.selection_per_draw(), vec![true, false]);
        assert_eq!(r.matrices_per_draw(), vec![lifted, Mat4::IDENTITY]);
    }

    #[test]
    fn recorder_text_output() {
        let mut r = RecordingRenderer::new();
        r.set_point_light(0, &PointLight::default());
        r.draw_model(&Model::new("floor", MeshHandle(0)));
        let text = r.to_string();
        assert!(text.contains("point[0] lit=true"));
        assert!(text.contains("draw floor mesh=0"));
    }

    #[test]
    fn clear_drops_commands() {
        let mut r = RecordingRenderer::new();
        r.set_selected(true);
        r.clear();
        assert!(r.commands().is_empty());
    }

    #[test]
    fn camera_uniforms_default() {
        let c = CameraUniforms::default();
        assert_eq!(c.view, Mat4::IDENTITY);
        assert_eq!(c.eye, Vec3::ZERO);
    }
}
