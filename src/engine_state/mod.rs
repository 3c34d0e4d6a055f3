//! # Engine State Module
//!
//! Runtime glue around the voxel world.
//!
//! ## Key Components
//!
//! * `EngineState` - owns the chunk store and drives it once per frame
//! * `rendering` - surface meshes, texture mapping and liquid surfaces
//! * `task_management` - the paced cooperative work queue
//! * `voxels` - voxel data, terrain generation, streaming and editing
//!
//! ## Frame Loop
//!
//! ```rust
//! use cgmath::Point3;
//! use web_time::Instant;
//! use voxel_terrain::{config::WorldConfig, engine_state::EngineState};
//!
//! let config = WorldConfig { chunk_distance: 0, ..WorldConfig::default() };
//! let mut engine_state = EngineState::new(&config);
//! let observer = Point3::new(8.0, 40.0, 8.0);
//!
//! engine_state.start(observer, Instant::now()).unwrap();
//! // Each frame:
//! engine_state.update(observer, Instant::now());
//! assert_eq!(engine_state.store().active_count(), 1);
//! ```
//!
//! ## Failure Handling
//!
//! Generation and meshing are deterministic, so any error out of the store is a
//! tracking bug rather than a transient fault. The first one is logged and
//! streaming stops until [`EngineState::resume_streaming`] is called; the
//! existing chunks stay as they are.

use cgmath::{Point3, Vector3};
use log::{error, info};
use web_time::Instant;

use crate::{config::WorldConfig, error::WorldError};

use voxels::{
    block::BlockType,
    chunk_store::{ChunkStore, TickReport},
    edit::{BlockEditor, EditAction, Inventory},
};

pub mod rendering;
pub mod task_management;
pub mod voxels;

/// What one call to [`EngineState::update`] did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Result of the observer tick.
    pub tick: TickReport,
    /// Pending chunks built this frame.
    pub built: usize,
}

/// The main state container for the voxel world.
pub struct EngineState {
    /// The single owner of every chunk
    store: ChunkStore,
    /// Resolves picks into block edits
    editor: BlockEditor,
    /// Set once a contract error stops streaming
    streaming_halted: bool,
}

impl EngineState {
    /// Creates an engine state with an empty world.
    pub fn new(config: &WorldConfig) -> Self {
        info!(
            "Creating world with seed {} and chunk distance {}",
            config.seed, config.chunk_distance
        );
        EngineState {
            store: ChunkStore::new(config),
            editor: BlockEditor::default(),
            streaming_halted: false,
        }
    }

    /// Builds every chunk around `observer` synchronously.
    ///
    /// Used once before the first frame so the observer never starts in a void.
    pub fn start(&mut self, observer: Point3<f32>, now: Instant) -> Result<TickReport, WorldError> {
        let result = self.store.tick(observer, true, now);
        self.check(result)
    }

    /// Tracks the observer and builds whatever pending chunks are due.
    ///
    /// Returns an empty report while streaming is halted.
    pub fn update(&mut self, observer: Point3<f32>, now: Instant) -> FrameReport {
        if self.streaming_halted {
            return FrameReport::default();
        }

        let result = self.store.tick(observer, false, now).and_then(|tick| {
            let built = self.store.process_pending(now)?;
            Ok(FrameReport { tick, built })
        });
        self.check(result).unwrap_or_default()
    }

    /// Applies a block edit at a picked point.
    pub fn edit(
        &mut self,
        hit_point: Point3<f32>,
        forward: Vector3<f32>,
        action: EditAction,
        inventory: &mut dyn Inventory,
    ) -> Result<Option<BlockType>, WorldError> {
        let result = self
            .editor
            .apply(&mut self.store, hit_point, forward, action, inventory);
        self.check(result)
    }

    /// Lets streaming continue after a halt.
    pub fn resume_streaming(&mut self) {
        if self.streaming_halted {
            info!("Chunk streaming resumed");
        }
        self.streaming_halted = false;
    }

    /// `true` once a contract error stopped streaming.
    pub fn is_streaming_halted(&self) -> bool {
        self.streaming_halted
    }

    /// The chunk store.
    pub fn store(&self) -> &ChunkStore {
        &self.store
    }

    fn check<T>(&mut self, result: Result<T, WorldError>) -> Result<T, WorldError> {
        if let Err(error) = &result {
            error!("Chunk streaming halted: {}", error);
            self.streaming_halted = true;
        }
        result
    }
}
