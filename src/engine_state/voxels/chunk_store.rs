//! # Chunk Store
//!
//! Owns every chunk in the world and decides which ones exist.
//!
//! ## Streaming
//!
//! Each [`ChunkStore::tick`] looks at the observer's chunk. When it changes:
//!
//! 1. every coordinate within `chunk_distance` rings that is neither active nor
//!    pending is queued (or built on the spot when `immediate` is set),
//! 2. active chunks further than `chunk_distance + 3` rings are evicted to the pool,
//! 3. pending coordinates further than `chunk_distance + 1` rings are dropped,
//! 4. the paced drainer is re-armed.
//!
//! [`ChunkStore::process_pending`] is then called every frame and builds at most
//! one pacing step worth of chunks.
//!
//! ## Invariants
//!
//! - A coordinate is never both active and pending.
//! - A chunk object is either in the active map or in the pool, never both.
//! - Pooled chunks are fully overwritten before they are meshed again.
//!
//! ## Editing
//!
//! [`ChunkStore::set_block_at`] mutates one voxel of an active chunk and
//! rebuilds that chunk's mesh before returning. Edits never go through the queue.

use std::collections::HashMap;

use cgmath::Point3;
use log::{debug, info};
use web_time::Instant;

use crate::{
    config::WorldConfig,
    engine_state::{
        rendering::{ChunkMesher, LiquidSurface, TextureMapping, TileAtlas, WaterSurface},
        task_management::{task::Task, PacingPolicy, TaskManager},
        voxels::{
            block::BlockType,
            chunk::{Chunk, ChunkPosition, CHUNK_HEIGHT},
            tasks::ChunkGenerationTask,
            terrain::ChunkGenerator,
        },
    },
    error::WorldError,
};

/// Rings beyond `chunk_distance` an active chunk survives before eviction.
const EVICTION_MARGIN: i32 = 3;
/// Rings beyond `chunk_distance` a pending build survives before it is dropped.
const PENDING_MARGIN: i32 = 1;

/// What a single [`ChunkStore::tick`] did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The observer entered a new chunk, so streaming ran.
    pub recentered: bool,
    /// Coordinates added to the pending queue.
    pub enqueued: usize,
    /// Chunks built synchronously.
    pub built: usize,
    /// Active chunks moved to the pool.
    pub evicted: usize,
    /// Pending coordinates removed from the queue.
    pub dropped: usize,
}

/// Running totals since the store was created.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Chunks built and registered.
    pub built: usize,
    /// Builds that reused a pooled chunk.
    pub recycled: usize,
    /// Builds that had to allocate a new chunk.
    pub allocated: usize,
    /// Chunks evicted into the pool.
    pub evicted: usize,
    /// Pending builds dropped before they ran.
    pub dropped: usize,
    /// Mesh rebuilds caused by edits.
    pub rebuilt: usize,
}

/// The single owner of all chunks.
pub struct ChunkStore {
    /// Active chunks, meshed and visible
    chunks: HashMap<ChunkPosition, Chunk>,
    /// Inactive chunks whose grids are stale
    pool: Vec<Chunk>,
    /// Pending builds, drained at a paced rate
    task_manager: TaskManager<ChunkGenerationTask>,
    /// The observer's chunk as of the last tick
    current_chunk: Option<ChunkPosition>,
    chunk_distance: i32,
    water_level: i32,
    generator: ChunkGenerator,
    mesher: ChunkMesher,
    liquid: Box<dyn LiquidSurface>,
    stats: StoreStats,
}

impl ChunkStore {
    /// Creates a store using a tile atlas for UVs and flat water for liquid.
    pub fn new(config: &WorldConfig) -> Self {
        Self::with_collaborators(
            config,
            Box::new(TileAtlas::new(config.atlas_tiles_per_row)),
            Box::new(WaterSurface::new(config.water_level)),
        )
    }

    /// Creates a store with explicit texture and liquid collaborators.
    pub fn with_collaborators(
        config: &WorldConfig,
        textures: Box<dyn TextureMapping>,
        liquid: Box<dyn LiquidSurface>,
    ) -> Self {
        ChunkStore {
            chunks: HashMap::new(),
            pool: Vec::new(),
            task_manager: TaskManager::new(PacingPolicy::new(
                config.chunks_per_step,
                config.build_interval(),
            )),
            current_chunk: None,
            chunk_distance: config.chunk_distance,
            water_level: config.water_level,
            generator: ChunkGenerator::new(config),
            mesher: ChunkMesher::new(textures),
            liquid,
            stats: StoreStats::default(),
        }
    }

    /// Tracks the observer at world position `observer` (`y` is ignored).
    ///
    /// Does nothing unless the observer's chunk changed since the last
    /// successful tick. A tick that fails is retried in full by the next one;
    /// chunks it already built are kept.
    pub fn tick(
        &mut self,
        observer: Point3<f32>,
        immediate: bool,
        now: Instant,
    ) -> Result<TickReport, WorldError> {
        let center = ChunkPosition::containing_point(observer.x, observer.z);
        if self.current_chunk == Some(center) {
            return Ok(TickReport::default());
        }

        let mut report = TickReport {
            recentered: true,
            ..TickReport::default()
        };

        for position in center.square_around(self.chunk_distance) {
            if self.is_active(position) || self.is_pending(position) {
                continue;
            }
            if immediate {
                self.build_chunk(position)?;
                report.built += 1;
            } else {
                self.task_manager
                    .publish_task(ChunkGenerationTask::new(position));
                report.enqueued += 1;
            }
        }

        let evict_beyond = self.chunk_distance + EVICTION_MARGIN;
        let far_away: Vec<ChunkPosition> = self
            .chunks
            .keys()
            .filter(|position| position.ring_distance(center) > evict_beyond)
            .copied()
            .collect();
        for position in far_away {
            self.evict(position);
            report.evicted += 1;
        }

        let keep_within = self.chunk_distance + PENDING_MARGIN;
        report.dropped = self
            .task_manager
            .retain_tasks(|task| task.position().ring_distance(center) <= keep_within);
        self.stats.dropped += report.dropped;

        self.task_manager.restart(now);
        self.current_chunk = Some(center);

        info!(
            "Observer entered chunk {}: {} queued, {} built, {} evicted, {} dropped",
            center, report.enqueued, report.built, report.evicted, report.dropped
        );
        Ok(report)
    }

    /// Builds whatever pending chunks are due at `now`. Returns how many were built.
    ///
    /// On error the failed task and the rest of its step go back to the front
    /// of the queue, so nothing that was due is lost.
    pub fn process_pending(&mut self, now: Instant) -> Result<usize, WorldError> {
        let mut due = self.task_manager.take_due_tasks(now).into_iter();
        let mut built = 0;
        while let Some(task) = due.next() {
            if let Err(error) = task.process(self) {
                self.task_manager
                    .requeue_front(std::iter::once(task).chain(due), now);
                return Err(error);
            }
            built += 1;
        }
        Ok(built)
    }

    /// Generates, meshes and registers the chunk at `position`.
    ///
    /// Takes a chunk from the pool if one is available. A coordinate that is
    /// already active is left alone.
    pub fn build_chunk(&mut self, position: ChunkPosition) -> Result<(), WorldError> {
        if self.is_active(position) {
            debug!("Chunk {} is already active", position);
            return Ok(());
        }
        self.task_manager
            .retain_tasks(|task| task.position() != position);

        let mut chunk = match self.pool.pop() {
            Some(mut chunk) => {
                chunk.reset(position);
                self.stats.recycled += 1;
                chunk
            }
            None => {
                self.stats.allocated += 1;
                Chunk::new(position)
            }
        };

        let start = Instant::now();
        if let Err(error) = self.populate(&mut chunk) {
            chunk.deactivate();
            self.pool.push(chunk);
            return Err(error);
        }
        debug!("Built chunk {} in {:?}", position, start.elapsed());

        self.chunks.insert(position, chunk);
        self.stats.built += 1;
        Ok(())
    }

    fn populate(&mut self, chunk: &mut Chunk) -> Result<(), WorldError> {
        self.generator.generate(chunk)?;
        self.mesher.rebuild(chunk)?;
        self.liquid.rebuild(chunk.position(), chunk)
    }

    fn evict(&mut self, position: ChunkPosition) {
        if let Some(mut chunk) = self.chunks.remove(&position) {
            chunk.deactivate();
            self.liquid.release(position);
            self.pool.push(chunk);
            self.stats.evicted += 1;
            debug!("Evicted chunk {}", position);
        }
    }

    /// The active chunk at `position`.
    pub fn chunk(&self, position: ChunkPosition) -> Result<&Chunk, WorldError> {
        self.chunks
            .get(&position)
            .ok_or(WorldError::MissingChunk { position })
    }

    /// The chunk and grid coordinates holding world voxel `world`.
    pub fn resolve(world: Point3<i32>) -> (ChunkPosition, Point3<i32>) {
        let position = ChunkPosition::containing_voxel(world.x, world.z);
        let grid = Point3::new(world.x - position.x() + 1, world.y, world.z - position.z() + 1);
        (position, grid)
    }

    fn check_height(world: Point3<i32>) -> Result<(), WorldError> {
        if (0..CHUNK_HEIGHT as i32).contains(&world.y) {
            Ok(())
        } else {
            Err(WorldError::OutOfBounds {
                x: world.x.into(),
                y: world.y.into(),
                z: world.z.into(),
            })
        }
    }

    /// The block at world voxel `world`. Its chunk must be active.
    pub fn get_block_at(&self, world: Point3<i32>) -> Result<BlockType, WorldError> {
        Self::check_height(world)?;
        let (position, grid) = Self::resolve(world);
        self.chunk(position)?.get_block(grid.x, grid.y, grid.z)
    }

    /// Replaces the block at world voxel `world` and rebuilds its chunk's mesh.
    ///
    /// Returns the block that was there before.
    pub fn set_block_at(
        &mut self,
        world: Point3<i32>,
        block_type: BlockType,
    ) -> Result<BlockType, WorldError> {
        Self::check_height(world)?;
        let (position, grid) = Self::resolve(world);
        let chunk = self
            .chunks
            .get_mut(&position)
            .ok_or(WorldError::MissingChunk { position })?;

        let previous = chunk.set_block(grid.x, grid.y, grid.z, block_type)?;
        self.mesher.rebuild(chunk)?;
        if world.y <= self.water_level + 1 {
            self.liquid.rebuild(position, chunk)?;
        }
        self.stats.rebuilt += 1;

        debug!(
            "Set ({}, {}, {}) from {} to {}",
            world.x, world.y, world.z, previous, block_type
        );
        Ok(previous)
    }

    /// Number of active chunks.
    pub fn active_count(&self) -> usize {
        self.chunks.len()
    }

    /// Number of pending builds.
    pub fn pending_count(&self) -> usize {
        self.task_manager.len()
    }

    /// Number of chunks waiting in the pool.
    pub fn pooled_count(&self) -> usize {
        self.pool.len()
    }

    /// `true` if the chunk at `position` is active.
    pub fn is_active(&self, position: ChunkPosition) -> bool {
        self.chunks.contains_key(&position)
    }

    /// `true` if the chunk at `position` is queued for building.
    pub fn is_pending(&self, position: ChunkPosition) -> bool {
        self.task_manager
            .iter()
            .any(|task| task.position() == position)
    }

    /// Coordinates of all active chunks, in no particular order.
    pub fn active_positions(&self) -> impl Iterator<Item = ChunkPosition> + '_ {
        self.chunks.keys().copied()
    }

    /// Coordinates of all pending builds, in build order.
    pub fn pending_positions(&self) -> impl Iterator<Item = ChunkPosition> + '_ {
        self.task_manager.iter().map(|task| task.position())
    }

    /// The observer's chunk as of the last tick.
    pub fn current_chunk(&self) -> Option<ChunkPosition> {
        self.current_chunk
    }

    /// The generator used for every build.
    pub fn generator(&self) -> &ChunkGenerator {
        &self.generator
    }

    /// Running totals.
    pub fn stats(&self) -> StoreStats {
        self.stats
    }
}
