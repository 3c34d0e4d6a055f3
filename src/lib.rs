#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Terrain
//!
//! Procedurally generated, infinitely streaming voxel terrain.
//!
//! The world is an endless horizontal plane of 16 x 64 x 16 chunks. Chunks are
//! filled from layered noise (surface, stone, caves), decorated with trees,
//! meshed by face culling, and streamed in and out around a moving observer.
//! Nothing is persisted; the same seed always produces the same world.
//!
//! ## Key Modules
//!
//! * `config` - world tunables loaded from JSON
//! * `error` - contract violations raised by the world
//! * `engine_state` - the chunk store, terrain generation, meshing and editing
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Point3;
//! use web_time::Instant;
//! use voxel_terrain::{config::WorldConfig, engine_state::voxels::chunk_store::ChunkStore};
//!
//! let config = WorldConfig { chunk_distance: 1, ..WorldConfig::default() };
//! let mut store = ChunkStore::new(&config);
//! store.tick(Point3::new(0.0, 40.0, 0.0), true, Instant::now()).unwrap();
//! assert_eq!(store.active_count(), 9);
//! ```

use cgmath::{Point3, Vector3};
use log::info;
use web_time::{Duration, Instant};

use engine_state::{
    voxels::{
        block::BlockType,
        chunk::ChunkPosition,
        edit::{EditAction, Inventory},
    },
    EngineState,
};

pub mod config;
pub mod engine_state;
pub mod error;

pub use config::WorldConfig;
pub use error::{ConfigError, WorldError};

/// Frames simulated by [`run`].
const DEMO_FRAMES: u32 = 600;
/// Simulated frame time.
const DEMO_FRAME_TIME: Duration = Duration::from_millis(16);

/// Counts blocks by type; any block held can be placed.
#[derive(Default)]
struct Satchel {
    counts: [u32; BlockType::ALL.len()],
    selected: Option<BlockType>,
}

impl Inventory for Satchel {
    fn add_block(&mut self, block_type: BlockType) {
        self.counts[block_type as usize] += 1;
        self.selected.get_or_insert(block_type);
    }

    fn can_place_current(&self) -> bool {
        self.selected
            .is_some_and(|block_type| self.counts[block_type as usize] > 0)
    }

    fn current_block(&self) -> BlockType {
        self.selected.unwrap_or_default()
    }

    fn reduce_current(&mut self) {
        if let Some(block_type) = self.selected {
            self.counts[block_type as usize] = self.counts[block_type as usize].saturating_sub(1);
        }
    }
}

/// Walks an observer across the world for a few simulated seconds.
///
/// Reads an optional JSON config path from the first command line argument and
/// logs streaming progress through `env_logger` (set `RUST_LOG=debug` for
/// per-chunk detail).
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => WorldConfig::from_path(path)?,
        None => WorldConfig::default(),
    };

    let mut engine_state = EngineState::new(&config);
    let mut satchel = Satchel::default();
    let mut observer = Point3::new(8.0f32, 48.0, 8.0);
    let mut now = Instant::now();

    let report = engine_state.start(observer, now)?;
    info!("Initial load built {} chunks", report.built);

    let down = Vector3::new(0.0, -1.0, 0.0);
    for frame in 0..DEMO_FRAMES {
        now += DEMO_FRAME_TIME;
        observer.x += 0.25;
        engine_state.update(observer, now);

        // Dig into the ground every second and put a block back every other second.
        let here = ChunkPosition::containing_point(observer.x, observer.z);
        if frame % 60 != 0 || !engine_state.store().is_active(here) {
            continue;
        }
        if let Some(ground) = ground_height(&engine_state, observer) {
            let hit = Point3::new(observer.x, ground, observer.z);
            let action = if frame % 120 == 0 {
                EditAction::Remove
            } else {
                EditAction::Place
            };
            if let Some(block_type) = engine_state.edit(hit, down, action, &mut satchel)? {
                info!("{:?} {} at ({:.1}, {:.1}, {:.1})", action, block_type, hit.x, hit.y, hit.z);
            }
        }
    }

    let store = engine_state.store();
    info!(
        "Finished: {} active, {} pending, {} pooled, {:?}",
        store.active_count(),
        store.pending_count(),
        store.pooled_count(),
        store.stats()
    );
    Ok(())
}

/// Top of the highest solid voxel below `observer`.
fn ground_height(engine_state: &EngineState, observer: Point3<f32>) -> Option<f32> {
    let (x, z) = (observer.x.floor() as i32, observer.z.floor() as i32);
    (0..observer.y as i32)
        .rev()
        .find(|&y| {
            engine_state
                .store()
                .get_block_at(Point3::new(x, y, z))
                .is_ok_and(|block_type| block_type.is_solid())
        })
        .map(|y| y as f32 + 1.0)
}
