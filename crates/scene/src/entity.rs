use glam::{Mat4, Vec3};
use labyrinth_common::{Shape, Sphere, Transform};
use labyrinth_render::{Model, Renderer};
use std::rc::Rc;

/// Radius of the pick sphere given to every new entity.
pub const DEFAULT_PICK_RADIUS: f32 = 1.0;

/// A placed instance of a shared [`Model`].
///
/// Every setter recomputes the world matrix immediately and moves the pick
/// shape to the new position. The pick shape ignores rotation and scale.
#[derive(Debug, Clone)]
pub struct Entity {
    transform: Transform,
    world_matrix: Mat4,
    model: Rc<Model>,
    pick_shape: Shape,
    is_selected: bool,
}

impl Entity {
    pub fn from_model(model: Rc<Model>) -> Self {
        let mut e = Self {
            transform: Transform::default(),
            world_matrix: Mat4::IDENTITY,
            model,
            pick_shape: Shape::Sphere(Sphere::new(Vec3::ZERO, DEFAULT_PICK_RADIUS)),
            is_selected: false,
        };
        e.recompute();
        e
    }

    /// Replace the pick shape with a sphere of `radius` around the entity.
    pub fn with_pick_radius(self, radius: f32) -> Self {
        self.with_pick_shape(Sphere::new(Vec3::ZERO, radius))
    }

    /// Replace the pick shape. Its center is moved to the entity position.
    pub fn with_pick_shape(mut self, shape: impl Into<Shape>) -> Self {
        self.pick_shape = shape.into();
        self.recompute();
        self
    }

    pub fn set_prs(&mut self, position: Vec3, rotation: Vec3, scale: Vec3) {
        self.transform = Transform::new(position, rotation, scale);
        self.recompute();
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.recompute();
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
        self.recompute();
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.transform.rotation = rotation;
        self.recompute();
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.transform.scale = scale;
        self.recompute();
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.transform.position += delta;
        self.recompute();
    }

    /// Single place where derived state is refreshed after a transform change.
    fn recompute(&mut self) {
        self.world_matrix = self.transform.matrix() * self.model.transform;
        self.pick_shape.set_center(self.transform.position);
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn rotation(&self) -> Vec3 {
        self.transform.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.transform.scale
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn world_matrix(&self) -> Mat4 {
        self.world_matrix
    }

    pub fn model(&self) -> &Rc<Model> {
        &self.model
    }

    pub fn pick_shape(&self) -> &Shape {
        &self.pick_shape
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    /// Only the owning [`Scene`](crate::Scene) flips this, so at most one
    /// entity is ever flagged.
    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.is_selected = selected;
    }

    /// Distance along the ray to the pick shape, or `NO_HIT`.
    pub fn ray_test(&self, origin: Vec3, direction: Vec3) -> f32 {
        self.pick_shape.ray_test(origin, direction)
    }

    /// Issue this entity's draw. The selection highlight and model matrix are
    /// reset afterwards so they never leak into the next draw.
    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.set_model_matrix(self.world_matrix);
        renderer.set_selected(self.is_selected);
        renderer.set_material(&self.model.material);
        renderer.draw_model(&self.model);
        renderer.set_selected(false);
        renderer.set_model_matrix(Mat4::IDENTITY);
    }
}
