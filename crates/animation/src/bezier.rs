use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Linear interpolation between two values.
pub trait Lerp: Copy {
    fn lerp(self, other: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Vec3 {
    fn lerp(self, other: Self, t: f32) -> Self {
        Vec3::lerp(self, other, t)
    }
}

impl Lerp for Vec4 {
    fn lerp(self, other: Self, t: f32) -> Self {
        Vec4::lerp(self, other, t)
    }
}

/// Bezier curve of arbitrary degree, evaluated with de Casteljau's algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bezier<T> {
    control_points: Vec<T>,
}

impl<T: Lerp> Bezier<T> {
    pub fn new(control_points: Vec<T>) -> Self {
        Self { control_points }
    }

    pub fn control_points(&self) -> &[T] {
        &self.control_points
    }

    /// Sample the curve. Only the fractional part of `t` is used, so
    /// `at(t)` and `at(t + 1.0)` agree. Returns `None` for an empty curve.
    pub fn at(&self, t: f64) -> Option<T> {
        let t = t.rem_euclid(1.0) as f32;
        let mut points = self.control_points.clone();
        while points.len() > 1 {
            for i in 0..points.len() - 1 {
                points[i] = points[i].lerp(points[i + 1], t);
            }
            points.pop();
        }
        points.first().copied()
    }
}

impl<T: Lerp> FromIterator<T> for Bezier<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_curve_has_no_value() {
        let b: Bezier<f32> = Bezier::new(Vec::new());
        assert_eq!(b.at(0.3), None);
    }

    #[test]
    fn single_point_is_constant() {
        let b = Bezier::new(vec![Vec3::new(1.0, 2.0, 3.0)]);
        assert_eq!(b.at(0.0), Some(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(b.at(0.77), Some(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn linear_segment() {
        let b = Bezier::new(vec![0.0_f32, 10.0]);
        assert_relative_eq!(b.at(0.25).unwrap(), 2.5);
    }

    #[test]
    fn quadratic_midpoint() {
        // B(0.5) = 0.25 * p0 + 0.5 * p1 + 0.25 * p2
        let b = Bezier::new(vec![0.0_f32, 4.0, 0.0]);
        assert_relative_eq!(b.at(0.5).unwrap(), 2.0);
    }

    #[test]
    fn starts_at_first_control_point() {
        let b: Bezier<Vec4> = [Vec4::ONE, Vec4::ZERO, Vec4::ZERO, Vec4::ONE]
            .into_iter()
            .collect();
        assert_eq!(b.at(0.0), Some(Vec4::ONE));
    }

    #[test]
    fn parameter_wraps() {
        let b = Bezier::new(vec![1.0_f32, 0.0, 0.0, 1.0]);
        assert_relative_eq!(b.at(3.4).unwrap(), b.at(0.4).unwrap(), epsilon = 1e-5);
        assert_relative_eq!(b.at(-0.6).unwrap(), b.at(0.4).unwrap(), epsilon = 1e-5);
    }

    #[test]
    fn closed_loop_returns_to_start() {
        let b = Bezier::new(vec![
            Vec3::new(2.0, 1.0, 2.0),
            Vec3::new(9.0, 1.0, 2.0),
            Vec3::new(9.0, 1.0, 9.0),
            Vec3::new(2.0, 1.0, 9.0),
            Vec3::new(2.0, 1.0, 2.0),
        ]);
        let near_end = b.at(0.999_999).unwrap();
        assert!(near_end.abs_diff_eq(Vec3::new(2.0, 1.0, 2.0), 1e-3));
    }
}
