//! Maze generation: randomized depth-first carving of a perfect maze.
//!
//! # Invariants
//! - Output is `(2w + 1) x (2h + 1)` tiles for a `w x h` cell maze.
//! - Every cell is reachable from the start through floor tiles, with exactly
//!   one path between any two cells.
//! - Border and pillar tiles (both coordinates even) are never floor.
//! - Generation is deterministic given the seed.

mod generator;
mod grid;

pub use generator::{MazeConfig, MazeError, carve, generate};
pub use grid::{CellCoord, Maze, TileType};

pub fn crate_info() -> &'static str {
    "labyrinth-maze v0.1.0"
}
