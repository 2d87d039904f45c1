use std::collections::VecDeque;

use hashbrown::HashMap;
use orrery_world::{ChunkCoord, Galaxy, Planet};

#[derive(Clone, Copy, Debug, Default)]
pub struct ChunkCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub entries: usize,
}

/// Bounded mapping from chunk coordinate to generated planets.
///
/// Recency order lives in `order`: least-recently-used at the front, with
/// insertion order breaking ties. Evicted chunks are simply dropped; their
/// content is regenerable on demand, which is what makes eviction safe.
pub struct ChunkCache {
    entries: HashMap<ChunkCoord, Vec<Planet>>,
    order: VecDeque<ChunkCoord>,
    capacity: usize,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl ChunkCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.entries.contains_key(&coord)
    }

    /// Resident planets for `coord`, or generate-and-insert on miss. The
    /// touched entry becomes most-recently-used either way; the cache never
    /// holds more than `capacity` chunks once this returns.
    pub fn get_or_create(&mut self, galaxy: &Galaxy, coord: ChunkCoord) -> &[Planet] {
        if self.entries.contains_key(&coord) {
            self.hits += 1;
            self.touch(coord);
        } else {
            self.misses += 1;
            let planets = galaxy.generate_chunk(coord);
            self.insert(coord, planets);
        }
        self.entries.get(&coord).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Insert a chunk verbatim, bypassing generation. Used by the save codec;
    /// counts toward capacity and recency like any other insert.
    pub fn restore(&mut self, coord: ChunkCoord, planets: Vec<Planet>) {
        self.insert(coord, planets);
    }

    #[inline]
    pub fn planets(&self, coord: ChunkCoord) -> Option<&[Planet]> {
        self.entries.get(&coord).map(Vec::as_slice)
    }

    /// Mutable view for transient-flag updates; geometry is never rewritten.
    #[inline]
    pub fn planets_mut(&mut self, coord: ChunkCoord) -> Option<&mut [Planet]> {
        self.entries.get_mut(&coord).map(Vec::as_mut_slice)
    }

    /// Every resident chunk, for persistence snapshots.
    pub fn all_resident(&self) -> impl Iterator<Item = (ChunkCoord, &[Planet])> {
        self.entries.iter().map(|(c, p)| (*c, p.as_slice()))
    }

    pub fn stats(&self) -> ChunkCacheStats {
        ChunkCacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            entries: self.entries.len(),
        }
    }

    fn touch(&mut self, coord: ChunkCoord) {
        if let Some(pos) = self.order.iter().position(|c| *c == coord) {
            if let Some(entry) = self.order.remove(pos) {
                self.order.push_back(entry);
            }
        }
    }

    fn insert(&mut self, coord: ChunkCoord, planets: Vec<Planet>) {
        if self.entries.insert(coord, planets).is_some() {
            // Re-inserting an existing coordinate refreshes its recency slot.
            if let Some(pos) = self.order.iter().position(|c| *c == coord) {
                self.order.remove(pos);
            }
        }
        self.order.push_back(coord);
        self.enforce_capacity();
    }

    fn enforce_capacity(&mut self) {
        while self.order.len() > self.capacity {
            let Some(victim) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&victim);
            self.evictions += 1;
            log::debug!("evicted chunk ({}, {})", victim.cx, victim.cy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_world::GalaxyGenConfig;

    fn galaxy() -> Galaxy {
        Galaxy::new(42, GalaxyGenConfig::default())
    }

    #[test]
    fn lru_evicts_least_recently_touched() {
        let g = galaxy();
        let mut cache = ChunkCache::new(2);
        let a = ChunkCoord::new(0, 0);
        let b = ChunkCoord::new(1, 0);
        let c = ChunkCoord::new(2, 0);

        cache.get_or_create(&g, a);
        cache.get_or_create(&g, b);
        cache.get_or_create(&g, a); // refresh A
        cache.get_or_create(&g, c); // evicts B, not A

        assert!(cache.contains(a));
        assert!(!cache.contains(b));
        assert!(cache.contains(c));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn hit_and_miss_counters_track_accesses() {
        let g = galaxy();
        let mut cache = ChunkCache::new(4);
        let a = ChunkCoord::new(0, 0);
        cache.get_or_create(&g, a);
        cache.get_or_create(&g, a);
        cache.get_or_create(&g, ChunkCoord::new(1, 1));
        let stats = cache.stats();
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.entries, 2);
    }

    #[test]
    fn restore_counts_toward_capacity() {
        let g = galaxy();
        let mut cache = ChunkCache::new(2);
        cache.restore(ChunkCoord::new(0, 0), Vec::new());
        cache.restore(ChunkCoord::new(1, 0), Vec::new());
        cache.get_or_create(&g, ChunkCoord::new(2, 0));
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(ChunkCoord::new(0, 0)));
    }

    #[test]
    fn eviction_loses_transient_flags() {
        let g = galaxy();
        // Find a chunk that actually has planets.
        let coord = (0..64)
            .map(|i| ChunkCoord::new(i, 0))
            .find(|&c| !g.generate_chunk(c).is_empty())
            .expect("some chunk in 64 has planets");

        let mut cache = ChunkCache::new(1);
        cache.get_or_create(&g, coord);
        cache.planets_mut(coord).unwrap()[0].show_overlay = true;

        // Force the chunk out, then regenerate it.
        cache.get_or_create(&g, coord.offset(1000, 1000));
        assert!(!cache.contains(coord));
        let regenerated = cache.get_or_create(&g, coord);
        assert!(!regenerated[0].show_overlay);
    }

    #[test]
    fn regenerated_chunk_matches_original_content() {
        let g = galaxy();
        let coord = ChunkCoord::new(5, -7);
        let mut cache = ChunkCache::new(1);
        let first = cache.get_or_create(&g, coord).to_vec();
        cache.get_or_create(&g, ChunkCoord::new(99, 99)); // evict
        let second = cache.get_or_create(&g, coord).to_vec();
        assert_eq!(first, second);
    }
}
