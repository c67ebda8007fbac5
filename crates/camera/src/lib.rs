//! Camera: view and projection from a position and yaw/pitch angles.
//!
//! # Invariants
//! - `front`, `right` and `up` are unit length and refreshed after every
//!   change to yaw, pitch or world up.
//! - Angles are stored in degrees; conversion happens at the basis update.
//! - Projection targets OpenGL clip space (`z` in `[-1, 1]`).

mod camera;

pub use camera::{
    Camera, DEFAULT_PITCH, DEFAULT_SENSITIVITY, DEFAULT_SPEED, DEFAULT_YAW, DEFAULT_ZOOM, FAR_PLANE,
    Movement, NEAR_PLANE,
};

pub fn crate_info() -> &'static str {
    "labyrinth-camera v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("camera"));
    }
}
