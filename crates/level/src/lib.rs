//! Level: turns a generated maze into a lit, playable scene and steps it.
//!
//! # Invariants
//! - One entity per maze tile, added in the maze's `x`-outer iteration order.
//! - Building is deterministic in the config (maze seed drives floor jitter).
//! - A session frame always draws the scene before the player.
//! - While the debug camera is active the player does not move and every
//!   point light gets a gizmo after the player draw.

mod builder;
mod config;
mod debug;
mod lights;
mod session;

pub use builder::{Level, LevelModels};
pub use config::{LevelConfig, LevelError};
pub use debug::{DebugView, LIGHT_GIZMO_SCALE};
pub use lights::{LOOP_PERIOD, LightRig};
pub use session::{FrameReport, Session};

pub fn crate_info() -> &'static str {
    "labyrinth-level v0.1.0"
}
