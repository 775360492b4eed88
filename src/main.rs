use aimtrainer::config;
use aimtrainer::game::Game;
use aimtrainer::logging;
use aimtrainer::placement::RngSource;
use aimtrainer::render::Renderer;
use aimtrainer::sensitivity::{self, MouseSensitivity};
use aimtrainer::spawner::{EnvironmentSettings, TargetSpawner};
use aimtrainer::types::Size;
use clap::{Parser, Subcommand};
use log::{error, info};
use macroquad::prelude::Conf;
use macroquad::Window;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::error::Error;
use std::process;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Debug filter to specify log topics (e.g., "placement,spawner,game")
    #[arg(long, global = true)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the trainer window
    Play(EnvironmentArgs),
    /// Place targets once and print their positions
    Spawn(EnvironmentArgs),
    /// Convert a sensitivity value between games
    Sens {
        /// Sensitivity in the source game's units
        value: f64,
        /// Game the value comes from
        #[arg(long, default_value = "Default")]
        from: String,
        /// Game to convert to; prints the trainer sensitivity if omitted
        #[arg(long)]
        to: Option<String>,
    },
}

#[derive(clap::Args, Debug)]
struct EnvironmentArgs {
    /// Wall width in world units
    #[arg(long, default_value_t = config::DEFAULT_WALL_WIDTH)]
    wall_width: f64,

    /// Wall height in world units
    #[arg(long, default_value_t = config::DEFAULT_WALL_HEIGHT)]
    wall_height: f64,

    /// Distance from the player to the wall
    #[arg(long, default_value_t = config::DEFAULT_WALL_DISTANCE)]
    wall_distance: u32,

    /// Target diameter
    #[arg(long, default_value_t = config::DEFAULT_TARGET_SIZE)]
    target_size: f64,

    /// Number of targets on the wall
    #[arg(long, default_value_t = config::DEFAULT_TARGET_COUNT)]
    targets: usize,

    /// Minimum distance between target centers
    #[arg(long, default_value_t = config::DEFAULT_MIN_DISTANCE)]
    min_distance: f64,

    /// Placement retries before accepting an overlapping position
    #[arg(long, default_value_t = config::DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Seed for reproducible target layouts
    #[arg(long)]
    seed: Option<u64>,
}

impl EnvironmentArgs {
    fn settings(&self) -> EnvironmentSettings {
        EnvironmentSettings {
            wall: Size::new(self.wall_width, self.wall_height),
            wall_distance: self.wall_distance,
            target_size: self.target_size,
            target_count: self.targets,
            min_distance: self.min_distance,
            max_attempts: self.max_attempts,
        }
    }

    fn spawner(&self) -> Result<TargetSpawner<RngSource<StdRng>>, Box<dyn Error>> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(TargetSpawner::new(self.settings(), RngSource(rng))?)
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Aim Trainer".to_owned(),
        window_width: config::WINDOW_WIDTH,
        window_height: config::WINDOW_HEIGHT,
        window_resizable: true,
        ..Default::default()
    }
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Play(env) => {
            let mut game = Game::new(env.spawner()?);
            info!("Opening trainer window");
            Window::from_config(window_conf(), async move {
                let renderer = Renderer::new();
                game.run(&renderer).await;
            });
        }
        Command::Spawn(env) => {
            let mut spawner = env.spawner()?;
            for target in spawner.spawn().iter() {
                println!("{} {:.3} {:.3}", target.id, target.position.x, target.position.y);
            }
        }
        Command::Sens { value, from, to } => {
            let source = sensitivity::parse_game(&from)?;
            match to {
                Some(to) => {
                    let target = sensitivity::parse_game(&to)?;
                    let converted = sensitivity::convert_between(source, target, value);
                    println!("{} {:.3} = {} {:.3}", source, value, target, converted);
                }
                None => {
                    let sens = MouseSensitivity::new(source, value);
                    println!("Trainer sensitivity: {:.3}", sens.trainer_sensitivity());
                }
            }
        }
    }
    Ok(())
}

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    if let Err(e) = logging::init_logger(logging::parse_level(&args.log_level), args.debug_filter) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    if let Err(e) = run(args.command) {
        error!("{}", e);
        process::exit(1);
    }
}
