use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod sim;

#[derive(Parser, Debug)]
#[command(name = "orrery", about = "Procedural galaxy flight sandbox")]
struct Args {
    /// Galaxy seed
    #[arg(long, default_value_t = 123_456)]
    seed: u64,
    /// Optional galaxy generation config (TOML)
    #[arg(long)]
    galaxy_config: Option<PathBuf>,
    /// Optional ship catalog (TOML); the stock roster is used otherwise
    #[arg(long)]
    ships: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fly a scripted pursuit route through the galaxy
    Run {
        /// Ship model to fly
        #[arg(long, default_value = "Gladius")]
        ship: String,
        /// Number of simulation ticks
        #[arg(long, default_value_t = 3600)]
        ticks: u32,
        /// Fixed tick rate in Hz
        #[arg(long, default_value_t = 60.0)]
        tick_hz: f32,
        /// Pursuit target, world coordinates
        #[arg(long, default_value_t = 60_000.0)]
        target_x: f32,
        #[arg(long, default_value_t = 45_000.0)]
        target_y: f32,
        /// Save file written on completion (and resumed from with --resume)
        #[arg(long, default_value = "savegame.json")]
        save: PathBuf,
        /// Resume from the save file instead of starting fresh
        #[arg(long)]
        resume: bool,
    },
    /// Print the generated content of one chunk
    Inspect {
        #[arg(long)]
        cx: i32,
        #[arg(long)]
        cy: i32,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let gen_cfg = match &args.galaxy_config {
        Some(path) => match orrery_world::config::load_config_from_path(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("galaxy config {}: {e}; using defaults", path.display());
                orrery_world::GalaxyGenConfig::default()
            }
        },
        None => orrery_world::GalaxyGenConfig::default(),
    };
    let catalog = match &args.ships {
        Some(path) => match orrery_flight::load_catalog_from_path(path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("ship catalog {}: {e}; using stock roster", path.display());
                orrery_flight::ShipCatalog::builtin()
            }
        },
        None => orrery_flight::ShipCatalog::builtin(),
    };

    match args.command {
        Command::Run {
            ship,
            ticks,
            tick_hz,
            target_x,
            target_y,
            save,
            resume,
        } => {
            let opts = sim::RunOptions {
                seed: args.seed,
                ship,
                ticks,
                tick_hz,
                target: orrery_geom::Vec2::new(target_x, target_y),
                save_path: save,
                resume,
            };
            if let Err(e) = sim::run(&opts, gen_cfg, &catalog) {
                log::error!("{e}");
                std::process::exit(1);
            }
        }
        Command::Inspect { cx, cy } => {
            sim::inspect(args.seed, gen_cfg, cx, cy);
        }
    }
}
