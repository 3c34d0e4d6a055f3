//! # Streaming Integration Test
//!
//! Walks an observer around and checks what the chunk store builds, queues,
//! evicts and recycles.

use cgmath::Point3;
use voxel_terrain::{
    config::WorldConfig,
    engine_state::voxels::{chunk::ChunkPosition, chunk_store::ChunkStore},
};
use web_time::{Duration, Instant};

const INTERVAL: Duration = Duration::from_millis(50);

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn store(chunk_distance: i32) -> ChunkStore {
    ChunkStore::new(&WorldConfig {
        seed: 2024,
        chunk_distance,
        build_interval_ms: INTERVAL.as_millis() as u64,
        ..WorldConfig::default()
    })
}

/// World position in the middle of chunk `(i, j)`.
fn at_chunk(i: i32, j: i32) -> Point3<f32> {
    Point3::new(i as f32 * 16.0 + 8.0, 50.0, j as f32 * 16.0 + 8.0)
}

fn assert_disjoint(store: &ChunkStore) {
    for position in store.pending_positions() {
        assert!(!store.is_active(position), "{position} is both active and pending");
    }
}

#[test]
fn test_second_tick_at_same_position_does_nothing() {
    init_logger();
    let mut store = store(1);
    let now = Instant::now();

    let first = store.tick(at_chunk(0, 0), true, now).unwrap();
    assert_eq!(first.built, 9);
    let stats = store.stats();

    let second = store.tick(at_chunk(0, 0), true, now).unwrap();
    assert!(!second.recentered);
    assert_eq!(second.built + second.enqueued + second.evicted + second.dropped, 0);
    assert_eq!(store.stats(), stats);
    assert_eq!(store.active_count(), 9);
}

#[test]
fn test_queue_drains_at_paced_rate() {
    init_logger();
    let mut store = store(1);
    let start = Instant::now();

    let report = store.tick(at_chunk(0, 0), false, start).unwrap();
    assert_eq!(report.enqueued, 9);
    assert_eq!(store.active_count(), 0);

    let mut now = start;
    let mut steps = 0;
    while store.pending_count() > 0 {
        let built = store.process_pending(now).unwrap();
        assert_eq!(built, 1);
        // Nothing else is due until the interval passes.
        assert_eq!(store.process_pending(now).unwrap(), 0);
        assert_disjoint(&store);
        now += INTERVAL;
        steps += 1;
    }

    assert_eq!(steps, 9);
    assert_eq!(store.active_count(), 9);
    assert!(ChunkPosition::from_indices(0, 0)
        .square_around(1)
        .all(|position| store.is_active(position)));
}

#[test]
fn test_pending_builds_are_dropped_when_the_observer_leaves() {
    init_logger();
    let mut store = store(1);
    let now = Instant::now();

    store.tick(at_chunk(0, 0), false, now).unwrap();
    assert_eq!(store.pending_count(), 9);

    let report = store.tick(at_chunk(5, 0), false, now).unwrap();
    assert_eq!(report.enqueued, 9);
    assert_eq!(report.dropped, 9);
    assert_eq!(store.stats().dropped, 9);

    let center = ChunkPosition::from_indices(5, 0);
    assert!(store
        .pending_positions()
        .all(|position| position.ring_distance(center) <= 1));
    assert_disjoint(&store);
}

#[test]
fn test_eviction_keeps_a_margin_and_recycles_chunks() {
    init_logger();
    let mut store = store(1);
    let now = Instant::now();

    store.tick(at_chunk(0, 0), true, now).unwrap();

    // Column i = -1 is four rings away: still within the margin.
    let report = store.tick(at_chunk(3, 0), true, now).unwrap();
    assert_eq!(report.evicted, 0);
    assert_eq!(store.active_count(), 18);

    let report = store.tick(at_chunk(4, 0), true, now).unwrap();
    assert_eq!(report.built, 3);
    assert_eq!(report.evicted, 3);
    assert_eq!(store.pooled_count(), 3);
    assert!(!store.is_active(ChunkPosition::from_indices(-1, 0)));

    // The next column is built out of the pool.
    let report = store.tick(at_chunk(5, 0), true, now).unwrap();
    assert_eq!(report.built, 3);
    assert_eq!(report.evicted, 3);
    let stats = store.stats();
    assert_eq!(stats.recycled, 3);
    assert_eq!(stats.allocated, 21);
    assert_eq!(stats.built, stats.recycled + stats.allocated);
    assert_eq!(store.active_count() + store.pooled_count(), stats.allocated);
}

#[test]
fn test_recycled_chunk_matches_a_fresh_build() {
    init_logger();
    let now = Instant::now();

    let mut walker = store(0);
    walker.tick(at_chunk(0, 0), true, now).unwrap();
    walker.tick(at_chunk(4, 0), true, now).unwrap();
    walker.tick(at_chunk(8, 0), true, now).unwrap();
    assert_eq!(walker.stats().recycled, 1);

    let mut fresh = store(0);
    fresh.tick(at_chunk(8, 0), true, now).unwrap();

    let position = ChunkPosition::from_indices(8, 0);
    let recycled = walker.chunk(position).unwrap();
    let built = fresh.chunk(position).unwrap();
    assert_eq!(recycled.blocks(), built.blocks());
    assert_eq!(recycled.mesh().face_count(), built.mesh().face_count());
    assert_eq!(recycled.mesh(), built.mesh());
}
