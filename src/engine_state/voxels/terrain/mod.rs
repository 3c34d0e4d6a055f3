//! # Terrain Generation
//!
//! Procedural filling of chunk grids.
//!
//! ## Passes
//!
//! A chunk is generated in two passes that must run in order:
//!
//! 1. **Terrain fill** ([`ChunkGenerator::fill_terrain`]): every voxel of the
//!    wrapped grid, border included, is classified by the [`TerrainSampler`]
//!    using global world coordinates. Border columns therefore hold exactly
//!    what the neighbouring chunk holds in its interior.
//! 2. **Vegetation** ([`VegetationPlacer::place`]): trees are grown on top of
//!    the filled terrain, inside interior columns only.
//!
//! Both passes are deterministic in the seed and the chunk origin, so the order
//! in which chunks are generated never changes what they contain.

use log::debug;

use crate::config::WorldConfig;
use crate::error::WorldError;

use super::chunk::{Chunk, ChunkPhase, CHUNK_HEIGHT, CHUNK_WIDTH_WRAPPED};

mod noise_field;
mod terrain_sampler;
mod vegetation;

pub use noise_field::{NoiseField, DEFAULT_FRACTAL_OCTAVES, DEFAULT_NOISE_FREQUENCY};
pub use terrain_sampler::{ColumnSample, TerrainSampler};
pub use vegetation::{tree_seed, VegetationPlacer};

/// Runs the terrain and vegetation passes over a chunk.
#[derive(Clone)]
pub struct ChunkGenerator {
    sampler: TerrainSampler,
    vegetation: VegetationPlacer,
}

impl ChunkGenerator {
    /// Builds the noise sources described by `config`.
    pub fn new(config: &WorldConfig) -> Self {
        let noise =
            NoiseField::with_settings(config.seed, config.noise_frequency, config.cave_octaves);
        ChunkGenerator {
            sampler: TerrainSampler::new(noise.clone(), config.water_level),
            vegetation: VegetationPlacer::new(noise),
        }
    }

    /// The voxel classifier used by the terrain pass.
    pub fn sampler(&self) -> &TerrainSampler {
        &self.sampler
    }

    /// Overwrites every voxel of a `Filling` chunk with sampled terrain and
    /// moves it to `Populated`.
    pub fn fill_terrain(&self, chunk: &mut Chunk) -> Result<(), WorldError> {
        if chunk.phase() != ChunkPhase::Filling {
            return Err(chunk.phase_error("Filling"));
        }

        let origin = chunk.position().origin();
        for gz in 0..CHUNK_WIDTH_WRAPPED as i32 {
            for gx in 0..CHUNK_WIDTH_WRAPPED as i32 {
                // Grid column 1 is the chunk's first world column.
                let wx = origin.x + gx - 1;
                let wz = origin.z + gz - 1;
                let column = self.sampler.sample_column(wx, wz);
                for y in 0..CHUNK_HEIGHT as i32 {
                    let block_type = self.sampler.classify_in_column(&column, wx, y, wz);
                    chunk.set_block(gx, y, gz, block_type)?;
                }
            }
        }

        chunk.finish_fill()
    }

    /// Fills terrain then grows vegetation. Returns the number of trees placed.
    pub fn generate(&self, chunk: &mut Chunk) -> Result<usize, WorldError> {
        self.fill_terrain(chunk)?;
        let trees = self.vegetation.place(chunk)?;
        debug!("Generated chunk {} with {} trees", chunk.position(), trees);
        Ok(trees)
    }
}
