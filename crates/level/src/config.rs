use glam::Vec2;
use labyrinth_maze::{MazeConfig, MazeError};
use labyrinth_scene::DEFAULT_PICK_RADIUS;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from level configuration and building.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("maze error: {0}")]
    Maze(#[from] MazeError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Everything needed to turn a maze into a playable scene.
///
/// Missing JSON fields take their default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub maze: MazeConfig,
    /// World units per tile.
    pub tile_scale: f32,
    /// Floor tiles are raised by `floor_jitter * k` with `k` in `0..3`.
    pub floor_jitter: f32,
    /// Height at which wall blocks are placed.
    pub wall_height: f32,
    pub statue_scale: f32,
    pub player_scale: f32,
    pub player_speed: f32,
    /// Pick sphere radius given to every tile entity.
    pub pick_radius: f32,
    /// Window size in pixels, used for the camera aspect and pick rays.
    pub viewport: Vec2,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            maze: MazeConfig::default(),
            tile_scale: 1.0,
            floor_jitter: 0.01,
            wall_height: 1.0,
            statue_scale: 0.5,
            player_scale: 0.2,
            player_speed: 2.0,
            pick_radius: DEFAULT_PICK_RADIUS,
            viewport: Vec2::new(1024.0, 768.0),
        }
    }
}

impl LevelConfig {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), "loaded level config");
        Ok(config)
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.viewport.y > 0.0 {
            self.viewport.x / self.viewport.y
        } else {
            1.0
        }
    }
}
