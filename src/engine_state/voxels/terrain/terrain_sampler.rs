//! # Terrain Sampler
//!
//! Classifies a single world voxel as a [`BlockType`] from layered noise:
//! a surface height field, a stone height field beneath it, and a fractal
//! cave density that carves air through both.
//!
//! `classify` depends only on `(x, y, z)` and the seed. That is what lets two
//! neighbouring chunks agree on their shared border and makes build order
//! irrelevant.

use crate::engine_state::voxels::{block::BlockType, chunk::CHUNK_HEIGHT};

use super::NoiseField;

/// Cave density must exceed at least this, however low the cave mask dips.
const MIN_CAVE_THRESHOLD: f64 = 0.2;

/// Per-column values shared by every voxel in that column.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ColumnSample {
    /// Height of the dirt/grass surface.
    pub surface_height: f64,
    /// Height below which dirt becomes stone.
    pub stone_height: f64,
    /// Threshold the cave density must exceed to carve a voxel.
    pub cave_threshold: f64,
}

/// Deterministic voxel classifier.
#[derive(Clone)]
pub struct TerrainSampler {
    noise: NoiseField,
    water_level: i32,
}

impl TerrainSampler {
    /// Creates a sampler over `noise` with grass forming near `water_level` and up.
    pub fn new(noise: NoiseField, water_level: i32) -> Self {
        TerrainSampler { noise, water_level }
    }

    /// The liquid level used for the grass line.
    pub fn water_level(&self) -> i32 {
        self.water_level
    }

    /// Height of the ground surface at column `(x, z)`.
    pub fn surface_height(&self, x: i32, z: i32) -> f64 {
        let (x, z) = (x as f64, z as f64);
        let n = &self.noise;
        let broad = n.sample_2d(x * 0.8, z * 0.8) * 10.0;
        let detail = n.sample_2d(x * 3.0, z * 3.0) * 10.0 * (n.sample_2d(x * 0.3, z * 0.3) + 0.5);
        CHUNK_HEIGHT as f64 * 0.5 + broad + detail
    }

    /// Height of the stone layer at column `(x, z)`.
    pub fn stone_height(&self, x: i32, z: i32) -> f64 {
        let (x, z) = (x as f64, z as f64);
        let n = &self.noise;
        let broad = n.sample_2d(x, z) * 10.0;
        let detail =
            (n.sample_2d(x * 5.0, z * 5.0) + 0.5) * 20.0 * (n.sample_2d(x * 0.3, z * 0.3) + 0.5);
        CHUNK_HEIGHT as f64 * 0.25 + broad + detail
    }

    /// Samples everything about column `(x, z)` that does not depend on `y`.
    pub fn sample_column(&self, x: i32, z: i32) -> ColumnSample {
        let cave_mask = self.noise.sample_2d(x as f64 * 0.3, z as f64 * 0.3) + 0.3;
        ColumnSample {
            surface_height: self.surface_height(x, z),
            stone_height: self.stone_height(x, z),
            cave_threshold: cave_mask.max(MIN_CAVE_THRESHOLD),
        }
    }

    /// Classifies world voxel `(x, y, z)`.
    pub fn classify(&self, x: i32, y: i32, z: i32) -> BlockType {
        self.classify_in_column(&self.sample_column(x, z), x, y, z)
    }

    /// Classifies world voxel `(x, y, z)` given the already sampled column at `(x, z)`.
    pub fn classify_in_column(&self, column: &ColumnSample, x: i32, y: i32, z: i32) -> BlockType {
        let height = y as f64;
        let mut block_type = BlockType::AIR;

        if height <= column.surface_height {
            block_type = BlockType::DIRT;

            if height > column.surface_height - 1.0 && y >= self.water_level - 2 {
                block_type = BlockType::GRASS;
            }

            if height <= column.stone_height {
                block_type = BlockType::STONE;
            }
        }

        // Air stays air, so the 3D lookup only runs for solid voxels.
        if block_type.is_solid() && self.cave_density(x, y, z) > column.cave_threshold {
            block_type = BlockType::AIR;
        }

        block_type
    }

    /// Fractal cave density at world voxel `(x, y, z)`.
    pub fn cave_density(&self, x: i32, y: i32, z: i32) -> f64 {
        self.noise
            .sample_fractal_3d(x as f64 * 5.0, y as f64 * 10.0, z as f64 * 5.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sampler(seed: u32) -> TerrainSampler {
        TerrainSampler::new(NoiseField::new(seed), 30)
    }

    #[test]
    fn test_classify_is_reproducible_across_instances() {
        let first = sampler(1234).classify(8, 30, 8);
        let second = sampler(1234).classify(8, 30, 8);
        assert_eq!(first, second);
    }

    #[test]
    fn test_classify_ignores_call_order() {
        let sampler = sampler(77);
        let coords: Vec<(i32, i32, i32)> = (0..200)
            .map(|i| ((i * 7) % 41 - 20, (i * 13) % 64, (i * 3) % 37 - 18))
            .collect();
        let forward: Vec<_> = coords.iter().map(|&(x, y, z)| sampler.classify(x, y, z)).collect();
        let backward: Vec<_> = coords
            .iter()
            .rev()
            .map(|&(x, y, z)| sampler.classify(x, y, z))
            .collect();
        assert_eq!(forward, backward.into_iter().rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_column_layers_are_ordered() {
        let sampler = sampler(3);
        for x in -30..30 {
            let z = x * 3;
            let column = sampler.sample_column(x, z);
            for y in (0..CHUNK_HEIGHT as i32).rev() {
                match sampler.classify_in_column(&column, x, y, z) {
                    BlockType::AIR => {}
                    BlockType::STONE => assert!(y as f64 <= column.stone_height),
                    BlockType::DIRT => {
                        assert!(y as f64 <= column.surface_height);
                        assert!(y as f64 > column.stone_height);
                    }
                    BlockType::GRASS => {
                        assert!(y as f64 > column.surface_height - 1.0);
                        assert!(y >= sampler.water_level() - 2);
                    }
                    other => panic!("terrain never produces {other}"),
                }
                if y as f64 > column.surface_height {
                    assert_eq!(sampler.classify_in_column(&column, x, y, z), BlockType::AIR);
                }
            }
        }
    }

    #[test]
    fn test_terrain_has_ground_and_sky() {
        let sampler = sampler(2024);
        let bottom = (0..64).filter(|&x| sampler.classify(x, 1, 0).is_solid()).count();
        let top = (0..64).filter(|&x| sampler.classify(x, 63, 0).is_solid()).count();
        assert!(bottom > 0, "expected solid ground near the bottom");
        assert_eq!(top, 0, "expected open sky at the top");
    }
}
