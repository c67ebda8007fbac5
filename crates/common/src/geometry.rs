use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Distance returned by every ray test that does not hit.
pub const NO_HIT: f32 = f32::INFINITY;

const COLLINEAR_EPSILON: f32 = 1e-6;

/// A ray with an origin and a (not necessarily unit) direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point reached after travelling `t` times the direction vector.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub center: Vec3,
}

impl Point {
    pub fn new(center: Vec3) -> Self {
        Self { center }
    }

    /// Hits only when `direction` points straight at the point. Returns the
    /// distance in multiples of `|direction|`.
    pub fn ray_test(&self, origin: Vec3, direction: Vec3) -> f32 {
        let to_center = self.center - origin;
        let len_d = direction.length();
        if len_d <= f32::EPSILON {
            return NO_HIT;
        }
        if to_center.length_squared() <= f32::EPSILON {
            return 0.0;
        }
        let off_axis = to_center.normalize().cross(direction / len_d).length();
        if off_axis < COLLINEAR_EPSILON && to_center.dot(direction) > 0.0 {
            return to_center.length() / len_d;
        }
        NO_HIT
    }
}

/// Bounding sphere used for picking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Nearest positive intersection distance, or [`NO_HIT`].
    ///
    /// The quadratic is solved against the normalized direction, so the result is
    /// a world-space distance along the ray regardless of `|direction|`. Callers
    /// that pass a non-unit direction must not rebuild the hit point as
    /// `origin + t * direction`.
    pub fn ray_test(&self, origin: Vec3, direction: Vec3) -> f32 {
        let to_center = self.center - origin;
        let b = direction.normalize_or_zero().dot(to_center);
        let c = to_center.dot(to_center) - self.radius * self.radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return NO_HIT;
        }
        let root = discriminant.sqrt();
        let near = b - root;
        if near > 0.0 {
            return near;
        }
        // Origin inside the sphere: the exit point is the only one ahead.
        let far = b + root;
        if far > 0.0 { far } else { NO_HIT }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub center: Vec3,
    pub normal: Vec3,
}

impl Plane {
    /// Plane through `point` with the given normal.
    pub fn point_normal(point: Vec3, normal: Vec3) -> Self {
        Self {
            center: point,
            normal,
        }
    }

    /// Signed parameter `t` with `origin + t * direction` on the plane. Negative
    /// values lie behind the origin; a ray parallel to the plane never hits.
    pub fn ray_test(&self, origin: Vec3, direction: Vec3) -> f32 {
        let denom = direction.dot(self.normal);
        if denom.abs() <= f32::EPSILON {
            return NO_HIT;
        }
        (self.center - origin).dot(self.normal) / denom
    }
}

/// Pick geometry as a tagged value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Point(Point),
    Sphere(Sphere),
    Plane(Plane),
}

impl Shape {
    pub fn center(&self) -> Vec3 {
        match self {
            Self::Point(p) => p.center,
            Self::Sphere(s) => s.center,
            Self::Plane(p) => p.center,
        }
    }

    pub fn set_center(&mut self, center: Vec3) {
        match self {
            Self::Point(p) => p.center = center,
            Self::Sphere(s) => s.center = center,
            Self::Plane(p) => p.center = center,
        }
    }

    /// Radius of the smallest sphere around the center that holds the shape.
    pub fn bounding_radius(&self) -> f32 {
        match self {
            Self::Point(_) => 0.0,
            Self::Sphere(s) => s.radius,
            Self::Plane(_) => f32::INFINITY,
        }
    }

    pub fn ray_test(&self, origin: Vec3, direction: Vec3) -> f32 {
        match self {
            Self::Point(p) => p.ray_test(origin, direction),
            Self::Sphere(s) => s.ray_test(origin, direction),
            Self::Plane(p) => p.ray_test(origin, direction),
        }
    }
}

impl From<Point> for Shape {
    fn from(p: Point) -> Self {
        Self::Point(p)
    }
}

impl From<Sphere> for Shape {
    fn from(s: Sphere) -> Self {
        Self::Sphere(s)
    }
}

impl From<Plane> for Shape {
    fn from(p: Plane) -> Self {
        Self::Plane(p)
    }
}
