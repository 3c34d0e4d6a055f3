//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a 16 x 64 x 16 column of voxels plus
//! a one-voxel border on every horizontal side, and the surface mesh derived
//! from it.
//!
//! ## Border Voxels
//!
//! The grid is allocated as (W+2) x H x (W+2). The outer ring of columns holds
//! samples from the neighbouring chunks' space so that face culling at the
//! chunk edge never needs to look up a neighbour. Border voxels are written on
//! every generation pass but never meshed themselves.
//!
//! ## Lifecycle
//!
//! A chunk moves through [`ChunkPhase`]s in strict order:
//! `Filling -> Populated -> Meshed -> Pooled -> Filling -> ...`
//!
//! Pooled chunks keep their old voxel data. A bit per voxel (`written`) records
//! which voxels were overwritten since the last [`Chunk::reset`], and
//! [`Chunk::finish_fill`] refuses to leave `Filling` until every bit is set, so
//! stale data from a previous position can never reach the mesher.
//!
//! ### Memory Layout
//! Voxels are stored Y-plane major: `x + W2 * z + W2 * W2 * y`, with `x` and `z`
//! in `0..W+2` and `y` in `0..H`.

use bitvec::vec::BitVec;

use super::block::BlockType;
use crate::engine_state::rendering::meshing::SurfaceMesh;
use crate::error::WorldError;

pub mod chunk_iteration;
mod chunk_position;

pub use chunk_iteration::ChunkBlockIterator;
pub use chunk_position::ChunkPosition;

/// Horizontal edge length of a chunk, in voxels.
pub const CHUNK_WIDTH: usize = 16;
/// Fixed vertical extent of a chunk, in voxels.
pub const CHUNK_HEIGHT: usize = 64;
/// Horizontal edge length including the border on both sides.
pub const CHUNK_WIDTH_WRAPPED: usize = CHUNK_WIDTH + 2;
/// Number of voxels in one wrapped horizontal plane.
pub const CHUNK_PLANE_SIZE_WRAPPED: usize = CHUNK_WIDTH_WRAPPED * CHUNK_WIDTH_WRAPPED;
/// Total number of voxels in the wrapped grid.
pub const CHUNK_SIZE_WRAPPED: usize = CHUNK_PLANE_SIZE_WRAPPED * CHUNK_HEIGHT;

/// Where a chunk is in its generate / mesh / recycle cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChunkPhase {
    /// Sitting in the reuse pool; grid contents are stale.
    Pooled,
    /// Being overwritten by the terrain sampler.
    Filling,
    /// Every voxel written; ready for vegetation and meshing.
    Populated,
    /// The current mesh reflects the grid (edits aside, which rebuild at once).
    Meshed,
}

/// A column of voxels with its one-voxel border and derived surface mesh.
pub struct Chunk {
    /// The world-space origin of this chunk.
    position: ChunkPosition,
    /// The wrapped voxel grid.
    blocks: Vec<BlockType>,
    /// One bit per voxel, set once the voxel has been written since the last reset.
    written: BitVec,
    /// Current lifecycle phase.
    phase: ChunkPhase,
    /// The renderable surface, replaced wholesale on each rebuild.
    mesh: SurfaceMesh,
}

impl Chunk {
    /// Allocates a fresh chunk at `position`, ready to be filled.
    pub fn new(position: ChunkPosition) -> Self {
        Chunk {
            position,
            blocks: vec![BlockType::AIR; CHUNK_SIZE_WRAPPED],
            written: BitVec::repeat(false, CHUNK_SIZE_WRAPPED),
            phase: ChunkPhase::Filling,
            mesh: SurfaceMesh::default(),
        }
    }

    /// Re-targets a pooled chunk at `position`.
    ///
    /// Voxel data is left in place but marked stale; every voxel must be
    /// written again before [`Chunk::finish_fill`] succeeds.
    pub fn reset(&mut self, position: ChunkPosition) {
        self.position = position;
        self.written.fill(false);
        self.phase = ChunkPhase::Filling;
    }

    /// Moves the chunk into the pool, dropping its mesh.
    pub fn deactivate(&mut self) {
        self.phase = ChunkPhase::Pooled;
        self.mesh = SurfaceMesh::default();
    }

    /// Closes the fill pass. Fails if any voxel still holds stale data.
    pub fn finish_fill(&mut self) -> Result<(), WorldError> {
        if self.phase != ChunkPhase::Filling {
            return Err(self.phase_error("Filling"));
        }
        let stale = self.stale_voxels();
        if stale > 0 {
            return Err(WorldError::StaleGrid {
                position: self.position,
                stale,
            });
        }
        self.phase = ChunkPhase::Populated;
        Ok(())
    }

    /// Number of voxels not written since the last reset.
    pub fn stale_voxels(&self) -> usize {
        self.written.count_zeros()
    }

    /// The world-space origin of this chunk.
    #[inline]
    pub fn position(&self) -> ChunkPosition {
        self.position
    }

    /// The current lifecycle phase.
    #[inline]
    pub fn phase(&self) -> ChunkPhase {
        self.phase
    }

    /// `true` once the grid is fully written, whether or not it is meshed.
    pub fn is_populated(&self) -> bool {
        matches!(self.phase, ChunkPhase::Populated | ChunkPhase::Meshed)
    }

    /// The current surface mesh.
    pub fn mesh(&self) -> &SurfaceMesh {
        &self.mesh
    }

    /// Swaps in a freshly built mesh in one step.
    pub(crate) fn replace_mesh(&mut self, mesh: SurfaceMesh) {
        self.mesh = mesh;
        self.phase = ChunkPhase::Meshed;
    }

    /// Index into the wrapped grid, or `None` outside it.
    #[inline]
    pub fn grid_index(x: i32, y: i32, z: i32) -> Option<usize> {
        let in_range = (0..CHUNK_WIDTH_WRAPPED as i32).contains(&x)
            && (0..CHUNK_HEIGHT as i32).contains(&y)
            && (0..CHUNK_WIDTH_WRAPPED as i32).contains(&z);
        in_range.then(|| {
            x as usize + CHUNK_WIDTH_WRAPPED * z as usize + CHUNK_PLANE_SIZE_WRAPPED * y as usize
        })
    }

    /// `true` for grid columns that belong to this chunk rather than the border.
    #[inline]
    pub fn is_interior_column(x: i32, z: i32) -> bool {
        (1..=CHUNK_WIDTH as i32).contains(&x) && (1..=CHUNK_WIDTH as i32).contains(&z)
    }

    /// Reads the voxel at grid coordinates, or `None` outside the grid.
    #[inline]
    pub fn block_at(&self, x: i32, y: i32, z: i32) -> Option<BlockType> {
        Self::grid_index(x, y, z).map(|index| self.blocks[index])
    }

    /// Reads the voxel at grid coordinates, reporting out-of-range access.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> Result<BlockType, WorldError> {
        self.block_at(x, y, z).ok_or(WorldError::OutOfBounds {
            x: x.into(),
            y: y.into(),
            z: z.into(),
        })
    }

    /// Writes the voxel at grid coordinates and returns the block it replaced.
    pub fn set_block(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
        block_type: BlockType,
    ) -> Result<BlockType, WorldError> {
        let index = Self::grid_index(x, y, z).ok_or(WorldError::OutOfBounds {
            x: x.into(),
            y: y.into(),
            z: z.into(),
        })?;
        self.written.set(index, true);
        Ok(std::mem::replace(&mut self.blocks[index], block_type))
    }

    /// Iterates over every solid interior voxel.
    pub fn solid_blocks(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(self)
    }

    /// Raw grid storage, in the layout described at module level.
    pub fn blocks(&self) -> &[BlockType] {
        &self.blocks
    }

    /// Builds the error for a pass run in the wrong phase.
    pub(crate) fn phase_error(&self, expected: &'static str) -> WorldError {
        WorldError::InvalidPhase {
            position: self.position,
            phase: self.phase,
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_all(chunk: &mut Chunk, block_type: BlockType) {
        for y in 0..CHUNK_HEIGHT as i32 {
            for z in 0..CHUNK_WIDTH_WRAPPED as i32 {
                for x in 0..CHUNK_WIDTH_WRAPPED as i32 {
                    chunk.set_block(x, y, z, block_type).unwrap();
                }
            }
        }
    }

    #[test]
    fn test_grid_index_rejects_out_of_range() {
        assert_eq!(Chunk::grid_index(0, 0, 0), Some(0));
        assert_eq!(Chunk::grid_index(17, 63, 17), Some(CHUNK_SIZE_WRAPPED - 1));
        assert_eq!(Chunk::grid_index(18, 0, 0), None);
        assert_eq!(Chunk::grid_index(0, 64, 0), None);
        assert_eq!(Chunk::grid_index(0, 0, -1), None);
    }

    #[test]
    fn test_set_block_reports_out_of_bounds() {
        let mut chunk = Chunk::new(ChunkPosition::from_indices(0, 0));
        assert_eq!(
            chunk.set_block(0, -1, 0, BlockType::DIRT),
            Err(WorldError::OutOfBounds { x: 0, y: -1, z: 0 })
        );
    }

    #[test]
    fn test_finish_fill_requires_every_voxel() {
        let mut chunk = Chunk::new(ChunkPosition::from_indices(0, 0));
        chunk.set_block(1, 1, 1, BlockType::DIRT).unwrap();
        assert!(matches!(
            chunk.finish_fill(),
            Err(WorldError::StaleGrid { stale, .. }) if stale == CHUNK_SIZE_WRAPPED - 1
        ));

        fill_all(&mut chunk, BlockType::STONE);
        assert!(chunk.finish_fill().is_ok());
        assert_eq!(chunk.phase(), ChunkPhase::Populated);
    }

    #[test]
    fn test_recycled_chunk_is_stale_until_overwritten() {
        let mut chunk = Chunk::new(ChunkPosition::from_indices(0, 0));
        fill_all(&mut chunk, BlockType::STONE);
        chunk.finish_fill().unwrap();
        chunk.deactivate();
        assert_eq!(chunk.phase(), ChunkPhase::Pooled);

        chunk.reset(ChunkPosition::from_indices(5, 5));
        assert_eq!(chunk.stale_voxels(), CHUNK_SIZE_WRAPPED);
        assert!(chunk.finish_fill().is_err());
        // The old data is still there, just not trusted.
        assert_eq!(chunk.block_at(3, 3, 3), Some(BlockType::STONE));
    }
}
