use glam::Vec3;
use labyrinth_camera::{Camera, Movement};
use labyrinth_input::{Action, FrameInput};
use labyrinth_render::{Model, Renderer};
use labyrinth_scene::{Entity, Scene};
use std::rc::Rc;

/// Uniform scale of the sphere drawn at each point light.
pub const LIGHT_GIZMO_SCALE: f32 = 0.2;

/// Free-fly camera detached from the player, plus light gizmos.
///
/// While active, movement intents fly the camera instead of walking the
/// player. WASD translates along the view basis and E/Q along its up vector.
/// HJKL feed `sensitivity * dt` into [`Camera::rotate`], which scales by
/// `sensitivity` again.
#[derive(Debug, Clone)]
pub struct DebugView {
    camera: Camera,
}

impl DebugView {
    /// Start flying from wherever `camera` currently looks.
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            camera: camera.clone(),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Apply one frame of held intents.
    pub fn fly(&mut self, input: &FrameInput) {
        let dt = input.delta_time;
        let look = self.camera.sensitivity * dt;
        for action in input.actions.iter() {
            match action {
                Action::MoveForward => self.camera.translate(Movement::Forward, dt),
                Action::MoveBackward => self.camera.translate(Movement::Backward, dt),
                Action::StrafeLeft => self.camera.translate(Movement::Left, dt),
                Action::StrafeRight => self.camera.translate(Movement::Right, dt),
                Action::FlyUp => self.camera.translate(Movement::Up, dt),
                Action::FlyDown => self.camera.translate(Movement::Down, dt),
                Action::OrbitLeft => self.camera.rotate(-look, 0.0, true),
                Action::OrbitRight => self.camera.rotate(look, 0.0, true),
                Action::TiltUp => self.camera.rotate(0.0, look, true),
                Action::TiltDown => self.camera.rotate(0.0, -look, true),
            }
        }
    }

    /// Draw `gizmo` at every point light in the scene, lit or not.
    pub fn draw_light_gizmos<R: Renderer + ?Sized>(
        scene: &Scene,
        gizmo: &Rc<Model>,
        renderer: &mut R,
    ) {
        for light in scene.point_lights() {
            let mut marker = Entity::from_model(Rc::clone(gizmo));
            marker.set_prs(light.position, Vec3::ZERO, Vec3::splat(LIGHT_GIZMO_SCALE));
            marker.draw(renderer);
        }
    }
}
