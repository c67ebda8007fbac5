use glam::{Vec2, Vec3};
use labyrinth_maze::{CellCoord, Maze, TileType};
use labyrinth_player::Player;
use labyrinth_render::{Material, MeshHandle, Model};
use labyrinth_scene::{Entity, EntityHandle, Scene};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::rc::Rc;

use crate::config::{LevelConfig, LevelError};
use crate::lights::LightRig;

/// Mixed into the maze seed so floor jitter does not replay the carve
/// sequence.
const JITTER_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;
/// Number of distinct floor heights.
const JITTER_STEPS: u32 = 3;

/// Shared models placed by the level builder.
#[derive(Debug, Clone)]
pub struct LevelModels {
    pub floor: Rc<Model>,
    pub wall: Rc<Model>,
    pub statue: Rc<Model>,
    pub player: Rc<Model>,
    /// Drawn at each point light while the debug camera is active.
    pub light_gizmo: Rc<Model>,
}

impl LevelModels {
    /// Placeholder models with sequential mesh handles, for runs without a
    /// GPU backend. Floor and wall share one cube mesh.
    pub fn headless() -> Self {
        Self {
            floor: Rc::new(Model::new("tile_floor", MeshHandle(0))),
            wall: Rc::new(Model::new("tile_wall", MeshHandle(0))),
            statue: Rc::new(Model::new("statue", MeshHandle(1))),
            player: Rc::new(Model::new("player", MeshHandle(2))),
            light_gizmo: Rc::new(
                Model::new("light_gizmo", MeshHandle(3)).with_material(Material::debug_light()),
            ),
        }
    }
}

/// A maze turned into a lit scene with a player standing on the start cell.
#[derive(Debug)]
pub struct Level {
    config: LevelConfig,
    maze: Maze,
    scene: Scene,
    player: Player,
    lights: LightRig,
    light_gizmo: Rc<Model>,
    start_location: Vec3,
    end_location: Vec3,
}

impl Level {
    /// Generate the maze and place one entity per tile.
    ///
    /// Tile `(x, y)` sits at `(x * scale, height, y * scale)`. Floor height is
    /// a small random step so coplanar tiles do not z-fight, walls are raised
    /// to `wall_height`, statues stand on the ground.
    pub fn build(config: &LevelConfig, models: &LevelModels) -> Result<Self, LevelError> {
        let _span = tracing::info_span!(
            "level_build",
            width = config.maze.width,
            height = config.maze.height,
            seed = config.maze.seed
        )
        .entered();

        let maze = config.maze.generate()?;
        let mut rng = StdRng::seed_from_u64(config.maze.seed ^ JITTER_SEED_SALT);
        let mut scene = Scene::new();
        let scale = config.tile_scale;

        for (x, y, tile) in maze.iter() {
            let (model, height, size) = match tile {
                TileType::Floor => {
                    let step = rng.gen_range(0..JITTER_STEPS) as f32;
                    (&models.floor, config.floor_jitter * step, scale)
                }
                TileType::Wall => (&models.wall, config.wall_height, scale),
                TileType::Statue => (&models.statue, 0.0, scale * config.statue_scale),
            };
            let mut entity =
                Entity::from_model(Rc::clone(model)).with_pick_radius(config.pick_radius);
            entity.set_position(tile_position(scale, x, y, height));
            entity.set_scale(Vec3::splat(size));
            scene.add_entity(entity);
        }

        let (tiles_x, tiles_y) = maze.dimensions();
        let extent = Vec2::new(tiles_x as f32, tiles_y as f32) * scale;
        let lights = LightRig::install(&mut scene, extent);

        let start_location = cell_position(scale, maze.start());
        let end_location = cell_position(scale, maze.end());

        let mut body = Entity::from_model(Rc::clone(&models.player))
            .with_pick_radius(config.pick_radius);
        body.set_position(start_location);
        body.set_scale(Vec3::splat(config.player_scale));
        let mut player = Player::from_entity(body).with_speed(config.player_speed);
        player.camera_mut().aspect_ratio = config.aspect_ratio();

        tracing::info!(
            entities = scene.entity_count(),
            floor = maze.floor_count(),
            start = ?maze.start(),
            end = ?maze.end(),
            "level built"
        );

        Ok(Self {
            config: config.clone(),
            maze,
            scene,
            player,
            lights,
            light_gizmo: Rc::clone(&models.light_gizmo),
            start_location,
            end_location,
        })
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn lights(&self) -> &LightRig {
        &self.lights
    }

    pub fn light_gizmo(&self) -> &Rc<Model> {
        &self.light_gizmo
    }

    /// Scene, player and light rig borrowed together for a frame update.
    pub fn parts_mut(&mut self) -> (&mut Scene, &mut Player, &LightRig) {
        (&mut self.scene, &mut self.player, &self.lights)
    }

    /// Ground position of the start cell.
    pub fn start_location(&self) -> Vec3 {
        self.start_location
    }

    /// Ground position of the cell farthest from the start.
    pub fn end_location(&self) -> Vec3 {
        self.end_location
    }

    /// Entity placed for tile `(x, y)`. Tiles are added column by column, so
    /// handles follow the maze's iteration order.
    pub fn tile_entity(&self, x: usize, y: usize) -> Option<EntityHandle> {
        let (tiles_x, tiles_y) = self.maze.dimensions();
        (x < tiles_x && y < tiles_y).then(|| EntityHandle((x * tiles_y + y) as u64))
    }

    /// Logical cell under a world position, if it lies on a cell tile.
    pub fn cell_at(&self, position: Vec3) -> Option<CellCoord> {
        let scale = self.config.tile_scale;
        let tx = (position.x / scale).round();
        let ty = (position.z / scale).round();
        if tx < 1.0 || ty < 1.0 {
            return None;
        }
        let (tx, ty) = (tx as usize, ty as usize);
        if tx % 2 == 0 || ty % 2 == 0 {
            return None;
        }
        let (w, h) = self.maze.cell_dimensions();
        let cell = CellCoord::new(tx / 2, ty / 2);
        (cell.x < w && cell.y < h).then_some(cell)
    }

    /// Whether the player stands on the end cell.
    pub fn player_reached_end(&self) -> bool {
        self.cell_at(self.player.position()) == Some(self.maze.end())
    }
}

fn tile_position(scale: f32, x: usize, y: usize, height: f32) -> Vec3 {
    Vec3::new(x as f32 * scale, height, y as f32 * scale)
}

fn cell_position(scale: f32, cell: CellCoord) -> Vec3 {
    let (x, y) = cell.tile();
    tile_position(scale, x, y, 0.0)
}
