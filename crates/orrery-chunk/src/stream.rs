//! 3×3 neighborhood residency around the observer.
//!
//! One chunk of slack on every side guarantees that nothing queried or drawn
//! near the observer is missing because it straddles a chunk boundary, at the
//! cost of modest over-fetching.

use orrery_geom::Vec2;
use orrery_world::{ChunkCoord, Galaxy, Planet};

use crate::ChunkCache;

/// The chunk containing `center` plus its eight immediate neighbors.
pub fn neighborhood(center: ChunkCoord) -> [ChunkCoord; 9] {
    let mut out = [center; 9];
    let mut i = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            out[i] = center.offset(dx, dy);
            i += 1;
        }
    }
    out
}

/// Make the observer's 3×3 neighborhood resident, generating on miss.
/// Idempotent; safe to call every tick.
pub fn ensure_resident(
    cache: &mut ChunkCache,
    galaxy: &Galaxy,
    observer: Vec2,
) -> Vec<ChunkCoord> {
    let coords = neighborhood(galaxy.chunk_of(observer));
    for &coord in &coords {
        cache.get_or_create(galaxy, coord);
    }
    coords.to_vec()
}

/// Flatten the resident planets of the observer's 3×3 neighborhood.
/// Within-chunk order is generation order; cross-chunk order carries no
/// meaning and callers must not depend on it.
pub fn gather_nearby<'c>(cache: &'c ChunkCache, galaxy: &Galaxy, observer: Vec2) -> Vec<&'c Planet> {
    neighborhood(galaxy.chunk_of(observer))
        .iter()
        .filter_map(|&coord| cache.planets(coord))
        .flatten()
        .collect()
}

/// Mutable sweep over the same neighborhood, for transient-flag upkeep.
pub fn for_each_nearby_mut<F>(cache: &mut ChunkCache, galaxy: &Galaxy, observer: Vec2, mut f: F)
where
    F: FnMut(&mut Planet),
{
    for coord in neighborhood(galaxy.chunk_of(observer)) {
        if let Some(planets) = cache.planets_mut(coord) {
            for p in planets {
                f(p);
            }
        }
    }
}
