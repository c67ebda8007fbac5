//! Animation curves.
//!
//! # Invariants
//! - Curve parameters wrap, so sampling with an ever-growing clock loops.

mod bezier;

pub use bezier::{Bezier, Lerp};

pub fn crate_info() -> &'static str {
    "labyrinth-animation v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("animation"));
    }
}
