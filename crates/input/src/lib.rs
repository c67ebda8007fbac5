//! Input intents: decoded actions and per-frame input.
//!
//! # Invariants
//! - The core reads intents and a frame delta, never raw device state.
//! - Key bindings are data; the same intents drive any front end.

pub mod action;
pub mod script;

pub use action::{Action, ActionState, FrameInput};
pub use script::{ScriptError, parse_script};

pub fn crate_info() -> &'static str {
    "labyrinth-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
