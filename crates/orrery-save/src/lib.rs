//! Save-game codec: seed, resident chunks (verbatim), observer state, zoom.
//!
//! The resident chunks are captured exactly as they sit in the cache rather
//! than re-derived from the seed: per-planet state a player has touched (an
//! open overlay, for instance) must survive the round trip, and regeneration
//! would discard it. The seed still travels along so chunks that were *not*
//! resident at save time regenerate identically after load.
#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use orrery_chunk::ChunkCache;
use orrery_flight::ShipState;
use orrery_geom::Vec2;
use orrery_world::{ChunkCoord, Planet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    /// No save file at the given path. Recoverable; start a fresh game.
    #[error("no save found")]
    NoSave,
    #[error("save io: {0}")]
    Io(#[from] io::Error),
    #[error("corrupt save: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("corrupt save: bad chunk key {0:?}")]
    BadChunkKey(String),
}

/// One persisted planet. `in_range` is recomputed every tick and is
/// deliberately absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanetRecord {
    pub pos: [f32; 2],
    pub radius: f32,
    pub color: [u8; 3],
    pub name: String,
    pub show_overlay: bool,
}

impl PlanetRecord {
    pub fn from_planet(p: &Planet) -> Self {
        Self {
            pos: [p.pos.x, p.pos.y],
            radius: p.radius,
            color: p.color,
            name: p.name.clone(),
            show_overlay: p.show_overlay,
        }
    }

    pub fn into_planet(self) -> Planet {
        let mut p = Planet::new(
            Vec2::new(self.pos[0], self.pos[1]),
            self.radius,
            self.color,
            self.name,
        );
        p.show_overlay = self.show_overlay;
        p
    }
}

/// The durable record. Chunk keys are `"cx,cy"`; a `BTreeMap` keeps the
/// serialized form stable across saves of the same state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    pub seed: u64,
    pub ship: String,
    pub pos: [f32; 2],
    pub vel: [f32; 2],
    pub heading: f32,
    pub zoom: f32,
    pub chunks: BTreeMap<String, Vec<PlanetRecord>>,
}

impl SaveGame {
    /// Capture the live state. The cache snapshot is verbatim, flags and all.
    pub fn snapshot(
        seed: u64,
        cache: &ChunkCache,
        ship_name: &str,
        state: &ShipState,
        zoom: f32,
    ) -> Self {
        let chunks = cache
            .all_resident()
            .map(|(coord, planets)| {
                (
                    chunk_key(coord),
                    planets.iter().map(PlanetRecord::from_planet).collect(),
                )
            })
            .collect();
        Self {
            seed,
            ship: ship_name.to_string(),
            pos: [state.pos.x, state.pos.y],
            vel: [state.vel.x, state.vel.y],
            heading: state.heading,
            zoom,
            chunks,
        }
    }

    pub fn ship_state(&self) -> ShipState {
        ShipState {
            pos: Vec2::new(self.pos[0], self.pos[1]),
            vel: Vec2::new(self.vel[0], self.vel[1]),
            heading: self.heading,
        }
    }

    /// Reinsert every persisted chunk through the cache's verbatim-restore
    /// path, never through generation.
    pub fn apply_chunks(&self, cache: &mut ChunkCache) -> Result<(), SaveError> {
        for (key, records) in &self.chunks {
            let coord = parse_chunk_key(key)?;
            let planets = records.iter().cloned().map(PlanetRecord::into_planet).collect();
            cache.restore(coord, planets);
        }
        Ok(())
    }
}

fn chunk_key(coord: ChunkCoord) -> String {
    format!("{},{}", coord.cx, coord.cy)
}

fn parse_chunk_key(key: &str) -> Result<ChunkCoord, SaveError> {
    let bad = || SaveError::BadChunkKey(key.to_string());
    let (x, y) = key.split_once(',').ok_or_else(bad)?;
    let cx = x.trim().parse().map_err(|_| bad())?;
    let cy = y.trim().parse().map_err(|_| bad())?;
    Ok(ChunkCoord::new(cx, cy))
}

pub fn encode(save: &SaveGame) -> Result<Vec<u8>, SaveError> {
    Ok(serde_json::to_vec(save)?)
}

pub fn decode(bytes: &[u8]) -> Result<SaveGame, SaveError> {
    Ok(serde_json::from_slice(bytes)?)
}

pub fn write_file(path: &Path, save: &SaveGame) -> Result<(), SaveError> {
    fs::write(path, encode(save)?)?;
    log::info!(
        "saved game: seed {}, {} resident chunks -> {}",
        save.seed,
        save.chunks.len(),
        path.display()
    );
    Ok(())
}

pub fn read_file(path: &Path) -> Result<SaveGame, SaveError> {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(SaveError::NoSave),
        Err(e) => return Err(e.into()),
    };
    let save = decode(&bytes)?;
    log::info!(
        "loaded game: seed {}, {} resident chunks <- {}",
        save.seed,
        save.chunks.len(),
        path.display()
    );
    Ok(save)
}
