//! Liquid surfaces.
//!
//! Water is not stored in the voxel grid. Instead a [`LiquidSurface`] derives
//! its own mesh from a finished chunk and a fixed liquid level, and is told
//! when that mesh is no longer needed.

use std::collections::HashMap;

use cgmath::Point3;
use log::trace;

use crate::engine_state::voxels::{
    block::{BlockSide, BlockType},
    chunk::{Chunk, ChunkPosition, CHUNK_WIDTH},
};
use crate::error::WorldError;

use super::meshing::{Face, SurfaceMesh};

/// Receives finished chunk grids and keeps a liquid mesh per chunk.
pub trait LiquidSurface {
    /// Re-derives the liquid surface of the chunk at `position`.
    ///
    /// An error aborts the build or edit that triggered it.
    fn rebuild(&mut self, position: ChunkPosition, chunk: &Chunk) -> Result<(), WorldError>;

    /// Drops whatever is kept for `position`.
    fn release(&mut self, position: ChunkPosition);
}

/// Flat water at a fixed level.
///
/// Every interior column that is open at the water level gets one upward quad
/// at the top of that voxel.
pub struct WaterSurface {
    water_level: i32,
    meshes: HashMap<ChunkPosition, SurfaceMesh>,
}

impl WaterSurface {
    /// Creates a surface for water filling everything up to `water_level`.
    pub fn new(water_level: i32) -> Self {
        WaterSurface {
            water_level,
            meshes: HashMap::new(),
        }
    }

    /// The water level, in voxels.
    pub fn water_level(&self) -> i32 {
        self.water_level
    }

    /// The water mesh of the chunk at `position`, if one is kept.
    pub fn mesh(&self, position: ChunkPosition) -> Option<&SurfaceMesh> {
        self.meshes.get(&position)
    }

    /// Number of chunks with a kept water mesh.
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// `true` if no water mesh is kept.
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    fn build(&self, chunk: &Chunk) -> SurfaceMesh {
        let mut mesh = SurfaceMesh::new();
        let uvs = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];
        let width = CHUNK_WIDTH as i32;

        for gz in 1..=width {
            for gx in 1..=width {
                if chunk.block_at(gx, self.water_level, gz) != Some(BlockType::AIR) {
                    continue;
                }
                // A TOP face of the voxel at the water level sits at water_level + 1.
                let local = Point3::new(gx - 1, self.water_level, gz - 1);
                mesh.push_face(&Face::new(local, BlockType::AIR, BlockSide::TOP), uvs);
            }
        }

        mesh.recalculate_normals();
        mesh
    }
}

impl LiquidSurface for WaterSurface {
    fn rebuild(&mut self, position: ChunkPosition, chunk: &Chunk) -> Result<(), WorldError> {
        if !chunk.is_populated() {
            return Err(chunk.phase_error("Populated or Meshed"));
        }
        let mesh = self.build(chunk);
        trace!("Water at {} covers {} columns", position, mesh.face_count());
        self.meshes.insert(position, mesh);
        Ok(())
    }

    fn release(&mut self, position: ChunkPosition) {
        self.meshes.remove(&position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::chunk::{CHUNK_HEIGHT, CHUNK_WIDTH_WRAPPED};

    /// Solid up to `ground` inclusive, air above.
    fn ground_chunk(ground: i32) -> Chunk {
        let mut chunk = Chunk::new(ChunkPosition::from_indices(0, 0));
        for y in 0..CHUNK_HEIGHT as i32 {
            let block_type = if y <= ground { BlockType::DIRT } else { BlockType::AIR };
            for z in 0..CHUNK_WIDTH_WRAPPED as i32 {
                for x in 0..CHUNK_WIDTH_WRAPPED as i32 {
                    chunk.set_block(x, y, z, block_type).unwrap();
                }
            }
        }
        chunk.finish_fill().unwrap();
        chunk
    }

    #[test]
    fn test_water_covers_open_columns() {
        let mut water = WaterSurface::new(30);
        let mut chunk = ground_chunk(20);
        chunk.set_block(3, 30, 3, BlockType::STONE).unwrap();
        let position = chunk.position();

        water.rebuild(position, &chunk).unwrap();
        let mesh = water.mesh(position).unwrap();
        assert_eq!(mesh.face_count(), CHUNK_WIDTH * CHUNK_WIDTH - 1);
        assert!(mesh.positions().all(|p| p[1] == 31.0));
    }

    #[test]
    fn test_dry_chunk_has_empty_surface_and_release_drops_it() {
        let mut water = WaterSurface::new(30);
        let chunk = ground_chunk(40);
        let position = chunk.position();

        water.rebuild(position, &chunk).unwrap();
        assert!(water.mesh(position).unwrap().is_empty());

        water.release(position);
        assert!(water.is_empty());
    }

    #[test]
    fn test_unfilled_chunk_is_rejected() {
        let mut water = WaterSurface::new(30);
        let chunk = Chunk::new(ChunkPosition::from_indices(2, 2));
        assert!(matches!(
            water.rebuild(chunk.position(), &chunk),
            Err(WorldError::InvalidPhase { .. })
        ));
        assert_eq!(water.len(), 0);
    }
}
