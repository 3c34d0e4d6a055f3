//! # Chunk Generation Task
//!
//! This module defines the `ChunkGenerationTask`, one pending chunk build. It
//! is queued by the chunk store when the observer needs a chunk that is not
//! active yet, and processed when the store's paced drainer reaches it.

use crate::{
    engine_state::{
        task_management::task::Task,
        voxels::{chunk::ChunkPosition, chunk_store::ChunkStore},
    },
    error::WorldError,
};

/// A deferred build of the chunk at `position`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ChunkGenerationTask {
    /// The origin of the chunk to build
    position: ChunkPosition,
}

impl ChunkGenerationTask {
    /// Creates a new chunk generation task.
    pub fn new(position: ChunkPosition) -> Self {
        ChunkGenerationTask { position }
    }

    /// The origin of the chunk this task builds.
    pub fn position(&self) -> ChunkPosition {
        self.position
    }
}

impl Task for ChunkGenerationTask {
    type Context = ChunkStore;
    type Output = Result<(), WorldError>;

    /// Generates, meshes and registers the chunk.
    fn process(self, store: &mut ChunkStore) -> Self::Output {
        store.build_chunk(self.position)
    }
}
