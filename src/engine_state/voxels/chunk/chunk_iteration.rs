//! # Chunk Iteration Module
//!
//! This module provides an iterator for traversing all solid interior voxels of
//! a chunk while skipping the border ring.
//!
//! Iteration follows the storage order (X fastest, then Z, then Y) so that
//! consecutive reads hit consecutive memory.

use cgmath::Point3;

use crate::engine_state::voxels::block::BlockType;

use super::{Chunk, CHUNK_HEIGHT, CHUNK_WIDTH, CHUNK_WIDTH_WRAPPED};

/// An iterator over all non-air interior voxels in a chunk.
///
/// Yields grid coordinates, so `x` and `z` are in `1..=CHUNK_WIDTH` and `y` is
/// in `0..CHUNK_HEIGHT`.
pub struct ChunkBlockIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Current X position within the grid (1..CHUNK_WIDTH_WRAPPED-1)
    local_x: usize,
    /// Current Y position within the grid (0..CHUNK_HEIGHT)
    local_y: usize,
    /// Current Z position within the grid (1..CHUNK_WIDTH_WRAPPED-1)
    local_z: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` positioned at the first interior voxel.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            local_x: 1,
            local_y: 0,
            local_z: 1,
        }
    }

    /// Moves to the next interior voxel, wrapping rows and planes past the border.
    fn advance(&mut self) {
        self.local_x += 1;
        if self.local_x == CHUNK_WIDTH_WRAPPED - 1 {
            self.local_x = 1;
            self.local_z += 1;
            if self.local_z == CHUNK_WIDTH_WRAPPED - 1 {
                self.local_z = 1;
                self.local_y += 1;
            }
        }
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    type Item = (Point3<i32>, BlockType);

    fn next(&mut self) -> Option<Self::Item> {
        while self.local_y < CHUNK_HEIGHT {
            let position = Point3::new(
                self.local_x as i32,
                self.local_y as i32,
                self.local_z as i32,
            );
            self.advance();

            match self.chunk_ref.block_at(position.x, position.y, position.z) {
                Some(block_type) if block_type.is_solid() => return Some((position, block_type)),
                _ => continue,
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(CHUNK_WIDTH * CHUNK_WIDTH * CHUNK_HEIGHT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::chunk::ChunkPosition;

    #[test]
    fn test_skips_border_and_air() {
        let mut chunk = Chunk::new(ChunkPosition::from_indices(0, 0));
        chunk.set_block(0, 5, 5, BlockType::STONE).unwrap();
        chunk.set_block(17, 5, 5, BlockType::STONE).unwrap();
        chunk.set_block(1, 0, 1, BlockType::DIRT).unwrap();
        chunk.set_block(16, 63, 16, BlockType::LEAVES).unwrap();

        let solid: Vec<_> = chunk.solid_blocks().collect();
        assert_eq!(
            solid,
            vec![
                (Point3::new(1, 0, 1), BlockType::DIRT),
                (Point3::new(16, 63, 16), BlockType::LEAVES),
            ]
        );
    }
}
