//! Developer tooling: scene inspector and maze statistics.
//!
//! # Invariants
//! - Tools only read; they never mutate the scene or maze they inspect.

mod inspector;
mod maze_stats;

pub use inspector::{EntityInfo, SceneInspector, SceneSummary};
pub use maze_stats::MazeStats;

pub fn crate_info() -> &'static str {
    "labyrinth-tools v0.1.0"
}
