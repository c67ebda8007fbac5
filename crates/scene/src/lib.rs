//! Scene: entity transforms, lights, draw dispatch and ray-cast selection.
//!
//! # Invariants
//! - An entity's world matrix is `T * S * Rz * Ry * Rx * model.transform`,
//!   recomputed by every setter.
//! - At most one entity is selected; selection is a handle, never a reference.
//! - Entities draw in insertion order after all light uniforms are pushed.

pub mod entity;
pub mod scene;

pub use entity::{DEFAULT_PICK_RADIUS, Entity};
pub use scene::{EntityHandle, Scene};

pub fn crate_info() -> &'static str {
    "labyrinth-scene v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("scene"));
    }
}
