use std::error::Error;
use std::path::PathBuf;

use orrery_chunk::{ChunkCache, ChunkCacheStats, stream};
use orrery_flight::{
    Controller, ControlIntent, PursuitController, ShipCatalog, ShipSpec, ShipState, integrate,
};
use orrery_geom::Vec2;
use orrery_save::{SaveError, SaveGame};
use orrery_world::{ChunkCoord, Galaxy, GalaxyGenConfig, Planet};

/// Upper bound on a single integration step; frame hitches must not explode
/// the integrator.
const MAX_TICK_DT: f32 = 0.1;
/// How far beyond a planet's rim the observer still counts as "in range".
const INTERACT_MARGIN: f32 = 500.0;

pub struct RunOptions {
    pub seed: u64,
    pub ship: String,
    pub ticks: u32,
    pub tick_hz: f32,
    pub target: Vec2,
    pub save_path: PathBuf,
    pub resume: bool,
}

/// Everything a renderer needs for one frame. This core never draws; the
/// sink decides what to do with it.
pub struct Frame<'a> {
    pub tick: u64,
    pub ship_name: &'a str,
    pub ship: &'a ShipState,
    pub zoom: f32,
    pub planets: Vec<&'a Planet>,
}

pub trait FrameSink {
    fn present(&mut self, frame: &Frame<'_>);
}

/// Headless stand-in for a renderer: a HUD line in the log every N ticks.
pub struct HudLog {
    pub every: u64,
}

impl FrameSink for HudLog {
    fn present(&mut self, frame: &Frame<'_>) {
        if self.every == 0 || frame.tick % self.every != 0 {
            return;
        }
        let in_range = frame.planets.iter().filter(|p| p.in_range).count();
        log::info!(
            "tick {:>6} | {} at ({:>9.0}, {:>9.0}) speed {:>7.1} heading {:>5.1} | {} planets nearby, {} in range",
            frame.tick,
            frame.ship_name,
            frame.ship.pos.x,
            frame.ship.pos.y,
            frame.ship.speed(),
            frame.ship.heading,
            frame.planets.len(),
            in_range,
        );
    }
}

/// One observer flying through one galaxy: the tick loop owns the flight
/// integration and keeps the streaming cache centered on the ship.
pub struct Sim {
    galaxy: Galaxy,
    cache: ChunkCache,
    spec: ShipSpec,
    state: ShipState,
    zoom: f32,
    tick: u64,
}

impl Sim {
    pub fn new(galaxy: Galaxy, spec: ShipSpec) -> Self {
        let cache = ChunkCache::new(galaxy.config().max_loaded_chunks);
        Self {
            galaxy,
            cache,
            spec,
            state: ShipState::new(),
            zoom: 1.0,
            tick: 0,
        }
    }

    pub fn from_save(
        save: &SaveGame,
        spec: ShipSpec,
        gen_cfg: GalaxyGenConfig,
    ) -> Result<Self, SaveError> {
        let mut sim = Sim::new(Galaxy::new(save.seed, gen_cfg), spec);
        sim.state = save.ship_state();
        sim.zoom = save.zoom;
        save.apply_chunks(&mut sim.cache)?;
        Ok(sim)
    }

    /// Advance one tick: intent, physics, then the streaming sweep.
    pub fn tick(&mut self, controller: &mut dyn Controller, dt: f32) {
        let dt = dt.min(MAX_TICK_DT);
        let intent = controller.control(&self.state);
        self.step_with_intent(intent, dt);
    }

    fn step_with_intent(&mut self, intent: ControlIntent, dt: f32) {
        integrate(&mut self.state, &self.spec, intent, dt);
        stream::ensure_resident(&mut self.cache, &self.galaxy, self.state.pos);
        let pos = self.state.pos;
        stream::for_each_nearby_mut(&mut self.cache, &self.galaxy, pos, |p| {
            p.in_range = p.contains_point(pos, INTERACT_MARGIN);
        });
        self.tick += 1;
    }

    pub fn present(&self, sink: &mut dyn FrameSink) {
        let frame = Frame {
            tick: self.tick,
            ship_name: &self.spec.name,
            ship: &self.state,
            zoom: self.zoom,
            planets: stream::gather_nearby(&self.cache, &self.galaxy, self.state.pos),
        };
        sink.present(&frame);
    }

    pub fn snapshot(&self) -> SaveGame {
        SaveGame::snapshot(
            self.galaxy.seed(),
            &self.cache,
            &self.spec.name,
            &self.state,
            self.zoom,
        )
    }

    pub fn cache_stats(&self) -> ChunkCacheStats {
        self.cache.stats()
    }

    pub fn ship(&self) -> &ShipState {
        &self.state
    }
}

pub fn run(
    opts: &RunOptions,
    gen_cfg: GalaxyGenConfig,
    catalog: &ShipCatalog,
) -> Result<(), Box<dyn Error>> {
    let mut sim = load_or_fresh(opts, gen_cfg, catalog)?;
    let mut controller = PursuitController::new(opts.target);
    let mut hud = HudLog { every: 60 };
    let dt = 1.0 / opts.tick_hz;

    for _ in 0..opts.ticks {
        sim.tick(&mut controller, dt);
        sim.present(&mut hud);
    }

    let stats = sim.cache_stats();
    log::info!(
        "flight done at ({:.0}, {:.0}): {} chunks resident, {} hits / {} misses / {} evictions",
        sim.ship().pos.x,
        sim.ship().pos.y,
        stats.entries,
        stats.hits,
        stats.misses,
        stats.evictions,
    );

    orrery_save::write_file(&opts.save_path, &sim.snapshot())?;
    Ok(())
}

fn load_or_fresh(
    opts: &RunOptions,
    gen_cfg: GalaxyGenConfig,
    catalog: &ShipCatalog,
) -> Result<Sim, Box<dyn Error>> {
    // Any load failure is recoverable: report it and start a fresh game.
    if opts.resume {
        match orrery_save::read_file(&opts.save_path) {
            Ok(save) => match catalog.find(&save.ship) {
                Some(spec) => match Sim::from_save(&save, spec.clone(), gen_cfg.clone()) {
                    Ok(sim) => {
                        log::info!(
                            "resuming {} at ({:.0}, {:.0})",
                            save.ship,
                            save.pos[0],
                            save.pos[1]
                        );
                        return Ok(sim);
                    }
                    Err(e) => log::warn!("save restore failed: {e}; starting fresh"),
                },
                None => {
                    log::warn!("ship template {:?} not found; starting fresh", save.ship);
                }
            },
            Err(SaveError::NoSave) => log::warn!("no save found; starting fresh"),
            Err(e) => log::warn!("save load failed: {e}; starting fresh"),
        }
    }

    let spec = match catalog.find(&opts.ship) {
        Some(spec) => spec.clone(),
        None => {
            let fallback = catalog.ships.first().ok_or("ship catalog is empty")?;
            log::warn!("ship {:?} not in catalog; flying {}", opts.ship, fallback.name);
            fallback.clone()
        }
    };
    Ok(Sim::new(Galaxy::new(opts.seed, gen_cfg), spec))
}

/// Dump one chunk's generated content to stdout.
pub fn inspect(seed: u64, gen_cfg: GalaxyGenConfig, cx: i32, cy: i32) {
    let galaxy = Galaxy::new(seed, gen_cfg);
    let systems = galaxy.systems_in_chunk(ChunkCoord::new(cx, cy));
    println!("chunk ({cx}, {cy}) @ seed {seed}: {} systems", systems.len());
    for (i, sys) in systems.iter().enumerate() {
        println!(
            "  system {i} [{}] center ({:.1}, {:.1}), {} planets",
            sys.biome.label(),
            sys.center.x,
            sys.center.y,
            sys.planets.len()
        );
        for p in &sys.planets {
            println!(
                "    {:<12} r {:>7.1} at ({:>10.1}, {:>10.1}) color #{:02x}{:02x}{:02x}",
                p.name, p.radius, p.pos.x, p.pos.y, p.color[0], p.color[1], p.color[2]
            );
        }
    }
}
