use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec3;
use labyrinth_input::{FrameInput, parse_script};
use labyrinth_level::{Level, LevelConfig, LevelModels, Session};
use labyrinth_maze::MazeConfig;
use labyrinth_render::{MeshHandle, Model, RecordingRenderer};
use labyrinth_scene::{Entity, Scene};
use labyrinth_tools::{MazeStats, SceneInspector};
use std::path::PathBuf;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "labyrinth-cli", about = "CLI tool for the labyrinth engine")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// Generate a maze and print it as ASCII with its statistics
    Maze {
        /// Logical width in cells
        #[arg(long, default_value = "10")]
        width: usize,
        /// Logical height in cells
        #[arg(long, default_value = "10")]
        height: usize,
        /// RNG seed
        #[arg(short, long, default_value = "0")]
        seed: u64,
        /// Probability that an uncarved tile is a statue
        #[arg(long, default_value = "0.1")]
        statue_chance: f64,
    },
    /// Cast a ray into a small scene and report what gets picked
    Pick,
    /// Run the headless frame loop on a generated level
    Simulate {
        /// Minimum number of frames; idle frames pad a shorter script
        #[arg(short, long, default_value = "120")]
        frames: usize,
        /// Input script, e.g. `w:30,hj:10,:5,pick:512:384,debug,e:20,zoom:10`
        #[arg(long)]
        script: Option<String>,
        /// Level config JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Seconds per frame
        #[arg(long, default_value = "0.016666668")]
        dt: f32,
    },
    /// Print the default level config as JSON
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("labyrinth-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("maze: {}", labyrinth_maze::crate_info());
            println!("render: {}", labyrinth_render::crate_info());
            println!("scene: {}", labyrinth_scene::crate_info());
            println!("input: {}", labyrinth_input::crate_info());
            println!("camera: {}", labyrinth_camera::crate_info());
            println!("player: {}", labyrinth_player::crate_info());
            println!("level: {}", labyrinth_level::crate_info());
            println!("tools: {}", labyrinth_tools::crate_info());
        }
        Commands::Maze {
            width,
            height,
            seed,
            statue_chance,
        } => {
            let maze = MazeConfig {
                width,
                height,
                seed,
                statue_chance,
            }
            .generate()
            .context("failed to generate maze")?;
            print!("{maze}");
            let stats = MazeStats::of(&maze);
            println!("{stats}");
            println!("Perfect: {}", if stats.is_perfect() { "OK" } else { "NO" });
        }
        Commands::Pick => run_pick(),
        Commands::Simulate {
            frames,
            script,
            config,
            dt,
        } => run_simulate(frames, script.as_deref(), config, dt)?,
        Commands::Config => {
            let json = LevelConfig::default()
                .to_json()
                .context("failed to serialize default config")?;
            println!("{json}");
        }
    }

    Ok(())
}

fn run_pick() {
    let model = Rc::new(Model::new("sphere", MeshHandle(0)));
    let mut scene = Scene::new();
    for z in [0.0, -2.0, -4.0] {
        let mut e = Entity::from_model(Rc::clone(&model));
        e.set_position(Vec3::new(0.0, 0.0, z));
        scene.add_entity(e);
    }

    let origin = Vec3::new(0.0, 0.0, 5.0);
    let direction = Vec3::NEG_Z;
    println!("Ray: origin={origin} direction={direction}");
    for handle in SceneInspector::list_entities(&scene) {
        if let Some(e) = scene.entity(handle) {
            println!(
                "  #{} at {} -> t={}",
                handle.0,
                e.position(),
                e.ray_test(origin, direction)
            );
        }
    }

    scene.select_by_ray_cast(origin, direction);
    match scene.selected().and_then(|h| SceneInspector::inspect_entity(&scene, h)) {
        Some(info) => println!("Selected: {info}"),
        None => println!("Selected: none"),
    }

    scene.select_by_ray_cast(origin, Vec3::Y);
    println!("After miss: {}", SceneInspector::summary(&scene));
}

fn run_simulate(
    frames: usize,
    script: Option<&str>,
    config: Option<PathBuf>,
    dt: f32,
) -> anyhow::Result<()> {
    let config = match config {
        Some(path) => LevelConfig::load(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => LevelConfig::default(),
    };

    let mut inputs = match script {
        Some(s) => parse_script(s, dt).context("invalid input script")?,
        None => Vec::new(),
    };
    if inputs.len() < frames {
        inputs.resize(frames, FrameInput::idle(dt));
    }

    let level = Level::build(&config, &LevelModels::headless()).context("failed to build level")?;
    println!(
        "Level: {}x{} cells, seed={}, start={} end={}",
        config.maze.width,
        config.maze.height,
        config.maze.seed,
        level.start_location(),
        level.end_location()
    );

    tracing::info!(frames = inputs.len(), "simulating");
    let mut session = Session::new(level);
    let mut renderer = RecordingRenderer::new();
    let mut reached_end_at = None;
    for input in &inputs {
        renderer.clear();
        let report = session.step(input, &mut renderer);
        if let Some(picked) = report.picked {
            match picked {
                Some(h) => println!("frame {}: picked #{}", report.frame, h.0),
                None => println!("frame {}: picked nothing", report.frame),
            }
        }
        if report.reached_end && reached_end_at.is_none() {
            reached_end_at = Some(report.frame);
        }
    }

    let level = session.level();
    println!(
        "Simulated {} frames ({:.2}s)",
        session.frame(),
        session.time()
    );
    println!("Player: {}", level.player().position());
    let camera = session.active_camera();
    println!(
        "Camera: {} zoom={:.1}{}",
        camera.position(),
        camera.zoom(),
        if session.debug_view().is_some() { " (debug)" } else { "" }
    );
    println!("{}", SceneInspector::summary(level.scene()));
    if let Some(info) = level
        .scene()
        .selected()
        .and_then(|h| SceneInspector::inspect_entity(level.scene(), h))
    {
        println!("Selected: {info}");
    }
    println!("Last frame: {} draw calls", renderer.draw_calls());
    match reached_end_at {
        Some(frame) => println!("Reached end at frame {frame}"),
        None => println!("End not reached"),
    }
    Ok(())
}
