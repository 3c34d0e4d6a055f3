//! Surface extraction for chunks.
//!
//! Converts a populated voxel grid into a [`SurfaceMesh`] by face culling: a
//! quad is emitted for every face of a solid interior voxel whose neighbour is
//! air. Border voxels answer the neighbour test at chunk edges and are never
//! meshed themselves.
//!
//! # Vertical Limits
//! Faces that would look out of the grid vertically (the top of `y = H - 1`,
//! the bottom of `y = 0`) are not emitted. A chunk filled solid therefore
//! produces an empty mesh.
//!
//! # Performance Considerations
//! - One pass over the interior, O(voxels)
//! - No face merging; coplanar neighbours each get their own quad
//! - The new mesh is assembled off to the side and swapped in at the end

use cgmath::{Point3, Vector3};
use log::debug;
use web_time::Instant;

mod mesh;

pub use mesh::*;

use crate::engine_state::voxels::{
    block::{BlockSide, BlockType},
    chunk::Chunk,
};
use crate::error::WorldError;

use super::texture::TextureMapping;

/// Face-culling mesher.
pub struct ChunkMesher {
    textures: Box<dyn TextureMapping>,
}

impl ChunkMesher {
    /// Creates a mesher pulling UVs from `textures`.
    pub fn new(textures: Box<dyn TextureMapping>) -> Self {
        ChunkMesher { textures }
    }

    /// `true` if `side` of the voxel at grid position `position` must be drawn.
    ///
    /// Reads only inside the wrapped grid; a neighbour outside it counts as covered.
    pub fn is_face_exposed(chunk: &Chunk, position: Point3<i32>, side: BlockSide) -> bool {
        let neighbour = position + side.neighbour_offset();
        matches!(
            chunk.block_at(neighbour.x, neighbour.y, neighbour.z),
            Some(BlockType::AIR)
        )
    }

    /// Builds the surface of `chunk` without touching it.
    pub fn build(&self, chunk: &Chunk) -> SurfaceMesh {
        let mut mesh = SurfaceMesh::new();

        for (position, block_type) in chunk.solid_blocks() {
            let tiles = self.textures.tiles(block_type);
            // Grid column 1 is local coordinate 0.
            let local = position - Vector3::new(1, 0, 1);

            for side in BlockSide::all() {
                if Self::is_face_exposed(chunk, position, side) {
                    let face = Face::new(local, block_type, side);
                    mesh.push_face(&face, tiles.for_side(side).uvs());
                }
            }
        }

        mesh.recalculate_normals();
        mesh
    }

    /// Rebuilds the mesh of a populated chunk and installs it.
    ///
    /// The previous mesh stays in place until the new one is complete.
    pub fn rebuild<'c>(&self, chunk: &'c mut Chunk) -> Result<&'c SurfaceMesh, WorldError> {
        if !chunk.is_populated() {
            return Err(chunk.phase_error("Populated or Meshed"));
        }

        let start = Instant::now();
        let mesh = self.build(chunk);
        debug!(
            "Meshed chunk {} with {} faces in {:?}",
            chunk.position(),
            mesh.face_count(),
            start.elapsed()
        );

        chunk.replace_mesh(mesh);
        Ok(chunk.mesh())
    }
}
