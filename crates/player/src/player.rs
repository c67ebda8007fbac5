use glam::Vec3;
use labyrinth_camera::Camera;
use labyrinth_input::{Action, FrameInput};
use labyrinth_render::Renderer;
use labyrinth_scene::Entity;

/// Walking speed in world units per second.
pub const DEFAULT_SPEED: f32 = 2.0;
pub const ORBIT_RADIUS: f32 = 2.0;
/// Initial azimuth of the orbit camera, degrees.
pub const DEFAULT_THETA: f32 = 45.0;
/// Initial polar angle of the orbit camera, degrees.
pub const DEFAULT_PHI: f32 = 45.0;
pub const MIN_PHI: f32 = 30.0;
pub const MAX_PHI: f32 = 60.0;
/// Azimuth change per second while an orbit intent is held, degrees.
pub const ORBIT_RATE: f32 = 90.0;
/// Polar change per second while a tilt intent is held, degrees.
pub const TILT_RATE: f32 = 40.0;
/// Fraction of the remaining turn applied to the body each frame.
pub const TURN_BLEND: f32 = 0.1;

/// Third-person controller. Owns the player entity and the camera that
/// orbits it.
#[derive(Debug, Clone)]
pub struct Player {
    entity: Entity,
    camera: Camera,
    pub speed: f32,
    camera_theta: f32,
    camera_phi: f32,
    target_rotation: Vec3,
}

impl Player {
    pub fn from_entity(entity: Entity) -> Self {
        let mut p = Self {
            entity,
            camera: Camera::default(),
            speed: DEFAULT_SPEED,
            camera_theta: DEFAULT_THETA,
            camera_phi: DEFAULT_PHI,
            target_rotation: Vec3::ZERO,
        };
        p.center_camera();
        p
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn position(&self) -> Vec3 {
        self.entity.position()
    }

    pub fn camera_theta(&self) -> f32 {
        self.camera_theta
    }

    pub fn camera_phi(&self) -> f32 {
        self.camera_phi
    }

    pub fn target_rotation(&self) -> Vec3 {
        self.target_rotation
    }

    /// Advance one frame.
    ///
    /// The body turns a fraction toward last frame's target, which then
    /// becomes "face away from the camera". Movement is taken from the camera
    /// basis before this frame's orbit is applied.
    pub fn update(&mut self, input: &FrameInput) {
        let dt = input.delta_time;
        let actions = &input.actions;

        let blended = self.entity.rotation().lerp(self.target_rotation, TURN_BLEND);
        self.entity.set_rotation(blended);
        self.target_rotation = Vec3::new(0.0, (180.0 + self.camera_theta).to_radians(), 0.0);

        let mut delta = Vec3::ZERO;
        if actions.is_held(Action::MoveForward) {
            delta += self.camera.front();
        }
        if actions.is_held(Action::StrafeLeft) {
            delta -= self.camera.right();
        }
        if actions.is_held(Action::MoveBackward) {
            delta -= self.camera.front();
        }
        if actions.is_held(Action::StrafeRight) {
            delta += self.camera.right();
        }
        delta.y = 0.0;

        if actions.is_held(Action::OrbitLeft) {
            self.camera_theta += ORBIT_RATE * dt;
        }
        if actions.is_held(Action::TiltUp) {
            self.camera_phi = (self.camera_phi + TILT_RATE * dt).clamp(MIN_PHI, MAX_PHI);
        }
        if actions.is_held(Action::TiltDown) {
            self.camera_phi = (self.camera_phi - TILT_RATE * dt).clamp(MIN_PHI, MAX_PHI);
        }
        if actions.is_held(Action::OrbitRight) {
            self.camera_theta -= ORBIT_RATE * dt;
        }

        // Opposite intents may leave rounding residue rather than exact zero.
        if delta.length_squared() > f32::EPSILON {
            self.entity.translate(delta.normalize() * self.speed * dt);
        }

        self.center_camera();
        tracing::trace!(
            position = ?self.entity.position(),
            theta = self.camera_theta,
            phi = self.camera_phi,
            "player updated"
        );
    }

    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        self.entity.draw(renderer);
    }

    fn center_camera(&mut self) {
        let theta = self.camera_theta.to_radians();
        let phi = self.camera_phi.to_radians();
        let offset = Vec3::new(theta.sin() * phi.sin(), phi.cos(), theta.cos() * phi.sin());
        self.camera.set_position(self.entity.position() + ORBIT_RADIUS * offset);
        self.camera.set_rotation(-90.0 - self.camera_theta, self.camera_phi - 80.0);
    }
}
