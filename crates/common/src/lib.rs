//! Shared math for the labyrinth engine.
//!
//! # Invariants
//! - Ray tests never fail: a miss is the [`NO_HIT`] sentinel (+infinity).
//! - `Transform::matrix` composes as `T * S * Rz * Ry * Rx`.

pub mod geometry;
pub mod types;

pub use geometry::{NO_HIT, Plane, Point, Ray, Shape, Sphere};
pub use types::Transform;

pub fn crate_info() -> &'static str {
    "labyrinth-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }
}
