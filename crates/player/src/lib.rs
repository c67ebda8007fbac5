//! Player: an entity steered by intents, watched by an orbit camera.
//!
//! # Invariants
//! - The camera sits on a sphere of radius [`ORBIT_RADIUS`] around the
//!   player, recomputed at the end of every update.
//! - The polar angle stays within `[MIN_PHI, MAX_PHI]`.
//! - Movement never changes the player's height.

mod player;

pub use player::{
    DEFAULT_PHI, DEFAULT_SPEED, DEFAULT_THETA, MAX_PHI, MIN_PHI, ORBIT_RADIUS, ORBIT_RATE,
    Player, TILT_RATE, TURN_BLEND,
};

pub fn crate_info() -> &'static str {
    "labyrinth-player v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("player"));
    }
}
