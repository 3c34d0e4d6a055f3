//! # Vegetation Placer
//!
//! Scatters trees over a populated chunk. Tree count, positions, heights and
//! canopy shape all come from a pseudo-random stream seeded by the chunk
//! origin, so regenerating the same chunk always grows the same trees.
//!
//! Trees are confined to interior columns; border voxels are never touched.

use crate::engine_state::voxels::{
    block::BlockType,
    chunk::{Chunk, ChunkPosition, CHUNK_HEIGHT},
};
use crate::error::WorldError;

use super::NoiseField;

/// Highest tree count factor; the count is `floor(r * MAX_TREES_FACTOR * density)`.
const MAX_TREES_FACTOR: f64 = 5.0;
/// Chance that any single canopy voxel is filled.
const LEAF_CHANCE: f64 = 0.8;

/// Seed for the per-chunk random stream.
pub fn tree_seed(position: ChunkPosition) -> u64 {
    (i64::from(position.x()) * 10_000 + i64::from(position.z())) as u64
}

/// Deterministic tree scatterer.
#[derive(Clone)]
pub struct VegetationPlacer {
    noise: NoiseField,
}

impl VegetationPlacer {
    /// Creates a placer sampling tree density from `noise`.
    pub fn new(noise: NoiseField) -> Self {
        VegetationPlacer { noise }
    }

    /// Tree density at the chunk origin. Non-positive means no trees.
    pub fn density(&self, position: ChunkPosition) -> f64 {
        self.noise
            .sample_2d(position.x() as f64 * 0.8, position.z() as f64 * 0.8)
    }

    /// Grows trees into `chunk` and returns how many were placed.
    ///
    /// The chunk must be populated (terrain written) first.
    pub fn place(&self, chunk: &mut Chunk) -> Result<usize, WorldError> {
        if !chunk.is_populated() {
            return Err(chunk.phase_error("Populated or Meshed"));
        }

        let density = self.density(chunk.position());
        if density <= 0.0 {
            return Ok(0);
        }

        let mut rng = fastrand::Rng::with_seed(tree_seed(chunk.position()));
        let scaled = density * 2.0;
        let tree_count = (rng.f64() * MAX_TREES_FACTOR * scaled).floor() as usize;

        for _ in 0..tree_count {
            let x = (rng.f64() * 14.0) as i32 + 1;
            let z = (rng.f64() * 14.0) as i32 + 1;
            self.grow_tree(chunk, &mut rng, x, z)?;
        }

        Ok(tree_count)
    }

    /// Grows one tree rooted on the topmost solid voxel of grid column `(x, z)`.
    fn grow_tree(
        &self,
        chunk: &mut Chunk,
        rng: &mut fastrand::Rng,
        x: i32,
        z: i32,
    ) -> Result<(), WorldError> {
        let height_limit = CHUNK_HEIGHT as i32;

        let mut base = height_limit - 1;
        while base > 0 && chunk.block_at(x, base, z) == Some(BlockType::AIR) {
            base -= 1;
        }
        base += 1;

        let trunk_height = 4 + (rng.f64() * 4.0) as i32;
        for j in 0..trunk_height {
            if base + j < height_limit {
                chunk.set_block(x, base + j, z, BlockType::TRUNK)?;
            }
        }

        let half_width = (1 + (rng.f64() * 6.0) as i32) / 2;
        let canopy_bottom = base + trunk_height - 1;

        for (layer, m) in (canopy_bottom..=canopy_bottom + trunk_height).enumerate() {
            let reach = half_width - layer as i32 / 2;
            for k in x - reach..=x + reach {
                for l in z - reach..=z + reach {
                    if !Chunk::is_interior_column(k, l) || !(0..height_limit).contains(&m) {
                        continue;
                    }
                    if rng.f64() >= LEAF_CHANCE {
                        continue;
                    }
                    if chunk.block_at(k, m, l) != Some(BlockType::TRUNK) {
                        chunk.set_block(k, m, l, BlockType::LEAVES)?;
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::chunk::{CHUNK_SIZE_WRAPPED, CHUNK_WIDTH_WRAPPED};

    /// A flat world: stone up to and including `ground`.
    fn flat_chunk(position: ChunkPosition, ground: i32) -> Chunk {
        let mut chunk = Chunk::new(position);
        for y in 0..CHUNK_HEIGHT as i32 {
            let block_type = if y <= ground { BlockType::STONE } else { BlockType::AIR };
            for z in 0..CHUNK_WIDTH_WRAPPED as i32 {
                for x in 0..CHUNK_WIDTH_WRAPPED as i32 {
                    chunk.set_block(x, y, z, block_type).unwrap();
                }
            }
        }
        chunk.finish_fill().unwrap();
        chunk
    }

    /// First chunk origin, scanning outward, where trees are guaranteed to grow.
    fn forested_position(placer: &VegetationPlacer) -> ChunkPosition {
        (0..400)
            .map(|i| ChunkPosition::from_indices(i % 20, i / 20))
            .find(|&p| {
                let density = placer.density(p);
                let mut rng = fastrand::Rng::with_seed(tree_seed(p));
                density > 0.0 && (rng.f64() * MAX_TREES_FACTOR * density * 2.0).floor() >= 1.0
            })
            .expect("some chunk in a 20x20 area should have trees")
    }

    #[test]
    fn test_same_origin_same_trees() {
        let placer = VegetationPlacer::new(NoiseField::new(11));
        let position = forested_position(&placer);

        let mut first = flat_chunk(position, 20);
        let mut second = flat_chunk(position, 20);
        let count = placer.place(&mut first).unwrap();
        assert_eq!(placer.place(&mut second).unwrap(), count);
        assert!(count > 0);
        assert_eq!(first.blocks(), second.blocks());
    }

    #[test]
    fn test_trees_stay_inside_and_keep_their_trunk() {
        let placer = VegetationPlacer::new(NoiseField::new(11));
        let position = forested_position(&placer);
        let mut chunk = flat_chunk(position, 20);
        placer.place(&mut chunk).unwrap();

        let mut trunks = 0;
        for y in 0..CHUNK_HEIGHT as i32 {
            for z in 0..CHUNK_WIDTH_WRAPPED as i32 {
                for x in 0..CHUNK_WIDTH_WRAPPED as i32 {
                    let block_type = chunk.block_at(x, y, z).unwrap();
                    if !Chunk::is_interior_column(x, z) {
                        let expected = if y <= 20 { BlockType::STONE } else { BlockType::AIR };
                        assert_eq!(block_type, expected, "border touched at ({x}, {y}, {z})");
                    }
                    if block_type == BlockType::TRUNK {
                        trunks += 1;
                        // Trunks never float.
                        assert!(chunk.block_at(x, y - 1, z).unwrap().is_solid());
                    }
                }
            }
        }
        assert!(trunks >= 4);
    }

    #[test]
    fn test_trees_near_the_ceiling_are_clipped() {
        let placer = VegetationPlacer::new(NoiseField::new(11));
        let position = forested_position(&placer);
        let top = CHUNK_HEIGHT as i32 - 1;
        let mut chunk = flat_chunk(position, top - 2);
        assert!(placer.place(&mut chunk).unwrap() > 0);

        let mut trunk_columns = 0;
        for z in 0..CHUNK_WIDTH_WRAPPED as i32 {
            for x in 0..CHUNK_WIDTH_WRAPPED as i32 {
                for y in 0..=top - 2 {
                    assert_eq!(chunk.block_at(x, y, z), Some(BlockType::STONE));
                }
                // Trunks start at top - 1 and are cut off at the top voxel.
                if chunk.block_at(x, top - 1, z) == Some(BlockType::TRUNK) {
                    assert_eq!(chunk.block_at(x, top, z), Some(BlockType::TRUNK));
                    trunk_columns += 1;
                }
                // The canopy starts above the grid, so no leaves at all.
                for y in top - 1..=top {
                    assert_ne!(chunk.block_at(x, y, z), Some(BlockType::LEAVES));
                }
            }
        }
        assert!(trunk_columns > 0);
        assert_eq!(chunk.blocks().len(), CHUNK_SIZE_WRAPPED);
    }

    #[test]
    fn test_requires_populated_chunk() {
        let placer = VegetationPlacer::new(NoiseField::new(11));
        let mut chunk = Chunk::new(ChunkPosition::from_indices(0, 0));
        assert!(matches!(
            placer.place(&mut chunk),
            Err(WorldError::InvalidPhase { .. })
        ));
    }
}
