use glam::{Mat4, Vec2, Vec3};
use labyrinth_common::Ray;
use labyrinth_render::CameraUniforms;

pub const DEFAULT_YAW: f32 = -90.0;
pub const DEFAULT_PITCH: f32 = 0.0;
pub const DEFAULT_SPEED: f32 = 2.5;
pub const DEFAULT_SENSITIVITY: f32 = 10.0;
/// Vertical field of view in degrees.
pub const DEFAULT_ZOOM: f32 = 70.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

const PITCH_LIMIT: f32 = 89.0;
const MIN_ZOOM: f32 = 1.0;
const MAX_ZOOM: f32 = 45.0;

/// Free-fly translation directions, relative to the camera basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Yaw/pitch camera. Yaw and pitch are degrees; `yaw = -90` looks down -Z.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    pub movement_speed: f32,
    pub sensitivity: f32,
    zoom: f32,
    pub aspect_ratio: f32,
}

impl Default for Camera {
    fn default() -> Self {
        let mut c = Self {
            position: Vec3::ZERO,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            world_up: Vec3::Y,
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            movement_speed: DEFAULT_SPEED,
            sensitivity: DEFAULT_SENSITIVITY,
            zoom: DEFAULT_ZOOM,
            aspect_ratio: 1.0,
        };
        c.update_vectors();
        c
    }
}

impl Camera {
    pub fn new(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut c = Self {
            position,
            world_up,
            yaw,
            pitch,
            ..Self::default()
        };
        c.update_vectors();
        c
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set yaw and pitch (degrees) without clamping.
    pub fn set_rotation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch;
        self.update_vectors();
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.zoom.to_radians(),
            self.aspect_ratio,
            NEAR_PLANE,
            FAR_PLANE,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn uniforms(&self) -> CameraUniforms {
        CameraUniforms {
            view: self.view_matrix(),
            projection: self.projection_matrix(),
            eye: self.position,
        }
    }

    pub fn translate(&mut self, movement: Movement, dt: f32) {
        let velocity = self.movement_speed * dt;
        let delta = match movement {
            Movement::Forward => self.front,
            Movement::Backward => -self.front,
            Movement::Left => -self.right,
            Movement::Right => self.right,
            Movement::Up => self.up,
            Movement::Down => -self.up,
        };
        self.position += delta * velocity;
    }

    /// Apply a look offset scaled by `sensitivity`. With `constrain_pitch` the
    /// pitch stays within +-89 degrees so the basis never flips.
    pub fn rotate(&mut self, dx: f32, dy: f32, constrain_pitch: bool) {
        self.yaw += dx * self.sensitivity;
        self.pitch += dy * self.sensitivity;
        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
        self.update_vectors();
    }

    /// Narrow (positive scroll) or widen the field of view, clamped to
    /// `[1, 45]` degrees.
    pub fn zoom_by(&mut self, scroll: f32) {
        self.zoom = (self.zoom - scroll).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// World-space pick ray through a window-space cursor.
    ///
    /// `cursor` has its origin at the top-left of a `viewport`-sized window.
    /// The ray starts on the near plane and points toward the far plane.
    pub fn screen_ray(&self, cursor: Vec2, viewport: Vec2) -> Ray {
        let size = viewport.max(Vec2::ONE);
        let ndc = Vec2::new(2.0 * cursor.x / size.x - 1.0, 1.0 - 2.0 * cursor.y / size.y);
        let inverse = self.view_projection().inverse();
        let near = inverse.project_point3(ndc.extend(-1.0));
        let far = inverse.project_point3(ndc.extend(1.0));
        let direction = (far - near).try_normalize().unwrap_or(self.front);
        Ray::new(near, direction)
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        let front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos());
        self.front = front.normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}
