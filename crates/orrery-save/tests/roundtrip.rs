use std::collections::BTreeMap;

use orrery_chunk::ChunkCache;
use orrery_flight::ShipState;
use orrery_geom::Vec2;
use orrery_save::{SaveGame, SaveError, decode, encode, read_file, write_file};
use orrery_world::{ChunkCoord, Galaxy, GalaxyGenConfig, Planet};

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "orrery-save-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn sample_state() -> (ChunkCache, ShipState) {
    let mut cache = ChunkCache::new(25);

    let mut p1 = Planet::new(Vec2::new(100.0, 200.0), 500.0, [61, 120, 240], "Tyno-4".into());
    p1.show_overlay = true;
    let p2 = Planet::new(Vec2::new(25_000.0, 90.0), 1200.0, [255, 61, 61], "Vencula".into());

    cache.restore(ChunkCoord::new(0, 0), vec![p1]);
    cache.restore(ChunkCoord::new(1, 0), vec![p2]);

    let state = ShipState {
        pos: Vec2::new(10.0, 20.0),
        vel: Vec2::ZERO,
        heading: 90.0,
    };
    (cache, state)
}

#[test]
fn encode_decode_round_trips_everything() {
    let (cache, state) = sample_state();
    let save = SaveGame::snapshot(123_456, &cache, "Gladius", &state, 1.5);

    let restored = decode(&encode(&save).unwrap()).unwrap();
    assert_eq!(restored, save);
}

#[test]
fn applied_chunks_match_the_saved_cache() {
    let (cache, state) = sample_state();
    let save = SaveGame::snapshot(42, &cache, "Aurora", &state, 1.0);
    let save = decode(&encode(&save).unwrap()).unwrap();

    let mut fresh = ChunkCache::new(25);
    save.apply_chunks(&mut fresh).unwrap();

    assert_eq!(fresh.len(), cache.len());
    for (coord, planets) in cache.all_resident() {
        let restored = fresh.planets(coord).expect("chunk restored");
        assert_eq!(restored, planets, "chunk {coord:?} diverged");
    }
    // The overlay flag is part of the round trip.
    assert!(fresh.planets(ChunkCoord::new(0, 0)).unwrap()[0].show_overlay);

    let restored_state = save.ship_state();
    assert_eq!(restored_state.pos, state.pos);
    assert_eq!(restored_state.vel, state.vel);
    assert_eq!(restored_state.heading, state.heading);
    assert_eq!(save.ship, "Aurora");
    assert_eq!(save.zoom, 1.0);
    assert_eq!(save.seed, 42);
}

#[test]
fn generated_chunks_survive_verbatim() {
    // Snapshot generator output, not a hand-built cache: restored planets
    // must be exactly what generation produced at save time.
    let g = Galaxy::new(987_654, GalaxyGenConfig::default());
    let mut cache = ChunkCache::new(25);
    let mut state = ShipState::new();
    state.pos = Vec2::new(5_000.0, 5_000.0);
    orrery_chunk::stream::ensure_resident(&mut cache, &g, state.pos);

    let save = SaveGame::snapshot(g.seed(), &cache, "400i", &state, 2.0);
    let save = decode(&encode(&save).unwrap()).unwrap();

    let mut fresh = ChunkCache::new(25);
    save.apply_chunks(&mut fresh).unwrap();
    for (coord, planets) in cache.all_resident() {
        assert_eq!(fresh.planets(coord).unwrap(), planets);
    }
}

#[test]
fn file_round_trip_and_missing_file() {
    let (cache, state) = sample_state();
    let save = SaveGame::snapshot(7, &cache, "Gladius", &state, 0.5);

    let path = temp_path("roundtrip");
    write_file(&path, &save).unwrap();
    let restored = read_file(&path).unwrap();
    assert_eq!(restored, save);
    std::fs::remove_file(&path).ok();

    match read_file(&temp_path("missing")) {
        Err(SaveError::NoSave) => {}
        other => panic!("expected NoSave, got {other:?}"),
    }
}

#[test]
fn garbage_bytes_are_a_corrupt_save() {
    match decode(b"not a save file") {
        Err(SaveError::Corrupt(_)) => {}
        other => panic!("expected Corrupt, got {other:?}"),
    }
}

#[test]
fn bad_chunk_key_is_reported_not_panicked() {
    let mut chunks = BTreeMap::new();
    chunks.insert("nonsense".to_string(), Vec::new());
    let save = SaveGame {
        seed: 0,
        ship: "Gladius".into(),
        pos: [0.0, 0.0],
        vel: [0.0, 0.0],
        heading: 90.0,
        zoom: 1.0,
        chunks,
    };
    let mut cache = ChunkCache::new(4);
    match save.apply_chunks(&mut cache) {
        Err(SaveError::BadChunkKey(k)) => assert_eq!(k, "nonsense"),
        other => panic!("expected BadChunkKey, got {other:?}"),
    }
}
