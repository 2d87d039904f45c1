use orrery_geom::{Aabb, Vec2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::chunk_coord::ChunkCoord;
use crate::config::GalaxyGenConfig;
use crate::planet::{Biome, Planet, StarSystem, generate_name};

/// Seeded galaxy. Generation is a pure function of (seed, chunk coordinate),
/// so any chunk can be dropped and rebuilt identically at any time.
pub struct Galaxy {
    seed: u64,
    cfg: GalaxyGenConfig,
}

impl Galaxy {
    pub fn new(seed: u64, cfg: GalaxyGenConfig) -> Self {
        Self { seed, cfg }
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn config(&self) -> &GalaxyGenConfig {
        &self.cfg
    }

    #[inline]
    pub fn chunk_size(&self) -> f32 {
        self.cfg.chunk_size
    }

    #[inline]
    pub fn chunk_of(&self, pos: Vec2) -> ChunkCoord {
        ChunkCoord::of_position(pos, self.cfg.chunk_size)
    }

    /// World-space bounds of a chunk, half-open on the max edge.
    pub fn chunk_bounds(&self, coord: ChunkCoord) -> Aabb {
        let size = self.cfg.chunk_size;
        let min = Vec2::new(coord.cx as f32 * size, coord.cy as f32 * size);
        Aabb::new(min, min + Vec2::new(size, size))
    }

    /// Per-chunk stream: one stable 64-bit value per (seed, cx, cy) triple.
    fn chunk_rng(&self, coord: ChunkCoord) -> ChaCha8Rng {
        let mut buf = [0u8; 22];
        buf[..6].copy_from_slice(b"ORRY-C");
        buf[6..14].copy_from_slice(&self.seed.to_le_bytes());
        buf[14..18].copy_from_slice(&coord.cx.to_le_bytes());
        buf[18..22].copy_from_slice(&coord.cy.to_le_bytes());
        ChaCha8Rng::seed_from_u64(fnv1a64(&buf))
    }

    /// Generate the chunk's star systems. Draw order is stable and is part of
    /// the reproducibility contract; callers relying on planet order get the
    /// same sequence for the same (seed, coordinate) forever.
    pub fn systems_in_chunk(&self, coord: ChunkCoord) -> Vec<StarSystem> {
        let cfg = &self.cfg;
        let mut rng = self.chunk_rng(coord);
        let bounds = self.chunk_bounds(coord);

        let n_systems = rng.gen_range(cfg.systems_per_chunk[0]..=cfg.systems_per_chunk[1]);
        let mut systems = Vec::with_capacity(n_systems as usize);
        for _ in 0..n_systems {
            // Offsets are drawn against the chunk origin so far-out chunks
            // (where min and max collapse to the same float) stay total.
            let sx = bounds.min.x + rng.gen_range(0.0..cfg.chunk_size);
            let sy = bounds.min.y + rng.gen_range(0.0..cfg.chunk_size);
            let center = Vec2::new(sx, sy);
            let biome = Biome::ALL[rng.gen_range(0..Biome::ALL.len())];

            let n_planets = rng.gen_range(cfg.planets_per_system[0]..=cfg.planets_per_system[1]);
            let mut planets = Vec::with_capacity(n_planets as usize);
            for _ in 0..n_planets {
                let angle = rng.gen_range(0.0..core::f32::consts::TAU);
                // Unit offset from the system center, kept as-is from the
                // reference galaxy; saves generated against it depend on
                // these exact positions.
                let pos = center + Vec2::from_angle(angle);
                let radius = rng.gen_range(cfg.radius_range[0]..=cfg.radius_range[1]);
                let color = [
                    rng.gen_range(cfg.color_floor..=255),
                    rng.gen_range(cfg.color_floor..=255),
                    rng.gen_range(cfg.color_floor..=255),
                ];
                let name = generate_name(&mut rng, cfg);
                planets.push(Planet::new(pos, radius, color, name));
            }
            systems.push(StarSystem {
                center,
                biome,
                planets,
            });
        }
        systems
    }

    /// Flattened chunk content: system draw order, then planet draw order.
    pub fn generate_chunk(&self, coord: ChunkCoord) -> Vec<Planet> {
        self.systems_in_chunk(coord)
            .into_iter()
            .flat_map(|s| s.planets)
            .collect()
    }
}

fn fnv1a64(bytes: &[u8]) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0100_0000_01b3;
    let mut hash = FNV_OFFSET;
    for b in bytes {
        hash = (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME);
    }
    hash
}
