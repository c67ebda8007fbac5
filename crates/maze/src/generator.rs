use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::grid::{CellCoord, Maze, TileType};

/// Axis neighbours; diagonals are never carved.
const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Errors from maze generation.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MazeError {
    #[error("maze dimensions must be positive, got {width}x{height}")]
    InvalidDimension { width: usize, height: usize },
    #[error("maze of {width}x{height} cells does not fit in memory")]
    TooLarge { width: usize, height: usize },
    #[error("statue chance must lie in [0, 1], got {0}")]
    InvalidStatueChance(f64),
}

/// Parameters for a generated maze.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Logical width in cells.
    pub width: usize,
    /// Logical height in cells.
    pub height: usize,
    pub seed: u64,
    /// Probability that an uncarved tile is a statue instead of a wall.
    pub statue_chance: f64,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            seed: 0,
            statue_chance: 0.1,
        }
    }
}

impl MazeConfig {
    /// Generate the maze described by this config. Deterministic in the seed.
    pub fn generate(&self) -> Result<Maze, MazeError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        carve(self.width, self.height, self.statue_chance, &mut rng)
    }
}

/// Generate a `width x height` maze with the default statue chance.
pub fn generate(width: usize, height: usize, seed: u64) -> Result<Maze, MazeError> {
    MazeConfig {
        width,
        height,
        seed,
        ..MazeConfig::default()
    }
    .generate()
}

/// Number of tiles in a `(2w+1) x (2h+1)` grid, `None` when it cannot be
/// allocated.
fn checked_tile_count(width: usize, height: usize) -> Option<usize> {
    let tiles_x = width.checked_mul(2)?.checked_add(1)?;
    let tiles_y = height.checked_mul(2)?.checked_add(1)?;
    tiles_x
        .checked_mul(tiles_y)
        .filter(|&n| n <= isize::MAX as usize)
}

/// Carve a perfect maze with randomized iterative depth-first search.
///
/// Every tile starts as wall (or statue). Starting from the center cell, each
/// popped cell becomes floor and claims all of its unvisited neighbours,
/// opening the wall tile in between. Claimed neighbours are pushed in shuffled
/// order so branches come off the stack in random directions.
pub fn carve<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    statue_chance: f64,
    rng: &mut R,
) -> Result<Maze, MazeError> {
    if width == 0 || height == 0 {
        return Err(MazeError::InvalidDimension { width, height });
    }
    if !(0.0..=1.0).contains(&statue_chance) {
        return Err(MazeError::InvalidStatueChance(statue_chance));
    }

    let tile_count =
        checked_tile_count(width, height).ok_or(MazeError::TooLarge { width, height })?;

    let _span = tracing::debug_span!("maze_carve", width, height).entered();

    let tiles = (0..tile_count)
        .map(|_| {
            if rng.gen_bool(statue_chance) {
                TileType::Statue
            } else {
                TileType::Wall
            }
        })
        .collect();

    let start = CellCoord::new(width / 2, height / 2);
    let mut maze = Maze::filled(width, height, tiles, start);

    let mut visited = vec![false; width * height];
    let visit_index = |c: CellCoord| c.x * height + c.y;

    let mut stack = vec![start];
    visited[visit_index(start)] = true;
    let mut carved = 0usize;

    while let Some(cell) = stack.pop() {
        let (cx, cy) = cell.tile();
        maze.set(cx, cy, TileType::Floor);

        let mut candidates = Vec::with_capacity(NEIGHBOR_OFFSETS.len());
        for (dx, dy) in NEIGHBOR_OFFSETS {
            let Some(next) = cell.offset(dx, dy, width, height) else {
                continue;
            };
            if visited[visit_index(next)] {
                continue;
            }
            visited[visit_index(next)] = true;

            // (cx + dx, cy + dy) is the wall between the two cell centers.
            maze.set(cx.wrapping_add_signed(dx), cy.wrapping_add_signed(dy), TileType::Floor);
            carved += 1;
            candidates.push(next);
        }

        candidates.shuffle(rng);
        stack.extend(candidates);
    }

    let end = maze.farthest_cell(start);
    maze.set_end(end);

    tracing::debug!(
        passages = carved,
        floor = maze.floor_count(),
        end_x = end.x,
        end_y = end.y,
        "maze carved"
    );

    Ok(maze)
}
