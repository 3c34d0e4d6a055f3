//! # World Configuration
//!
//! Tunables for terrain generation and chunk streaming. Values are read once at
//! startup from JSON; any field left out falls back to its default.
//!
//! ```json
//! { "seed": 42, "chunk_distance": 3, "build_interval_ms": 100 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::engine_state::voxels::chunk::CHUNK_HEIGHT;
use crate::error::ConfigError;

/// Configuration for a single terrain world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for every noise source.
    pub seed: u32,
    /// Number of chunk rings kept around the observer.
    pub chunk_distance: i32,
    /// Height of the liquid surface, in voxels.
    pub water_level: i32,
    /// Base frequency applied to every noise lookup.
    pub noise_frequency: f64,
    /// Octaves summed by the fractal cave noise.
    pub cave_octaves: usize,
    /// Delay between paced background chunk builds.
    pub build_interval_ms: u64,
    /// Chunks built each time the pacing interval elapses.
    pub chunks_per_step: usize,
    /// Tiles per row (and column) in the square texture atlas.
    pub atlas_tiles_per_row: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            seed: 1337,
            chunk_distance: 5,
            water_level: 30,
            noise_frequency: 0.01,
            cave_octaves: 3,
            build_interval_ms: 200,
            chunks_per_step: 1,
            atlas_tiles_per_row: 16,
        }
    }
}

impl WorldConfig {
    /// Parses and validates a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Checks every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_distance < 0 {
            return Err(ConfigError::Invalid(format!(
                "chunk_distance must be >= 0, got {}",
                self.chunk_distance
            )));
        }
        if !(0..CHUNK_HEIGHT as i32).contains(&self.water_level) {
            return Err(ConfigError::Invalid(format!(
                "water_level must be within 0..{}, got {}",
                CHUNK_HEIGHT, self.water_level
            )));
        }
        if !self.noise_frequency.is_finite() || self.noise_frequency <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "noise_frequency must be finite and positive, got {}",
                self.noise_frequency
            )));
        }
        if !(1..=8).contains(&self.cave_octaves) {
            return Err(ConfigError::Invalid(format!(
                "cave_octaves must be within 1..=8, got {}",
                self.cave_octaves
            )));
        }
        if self.chunks_per_step == 0 {
            return Err(ConfigError::Invalid("chunks_per_step must be >= 1".into()));
        }
        if self.atlas_tiles_per_row == 0 {
            return Err(ConfigError::Invalid(
                "atlas_tiles_per_row must be >= 1".into(),
            ));
        }
        Ok(())
    }

    /// The pacing delay as a `Duration`.
    pub fn build_interval(&self) -> Duration {
        Duration::from_millis(self.build_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = WorldConfig::from_json_str(r#"{ "seed": 7 }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.chunk_distance, WorldConfig::default().chunk_distance);
        assert_eq!(config.build_interval(), Duration::from_millis(200));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert!(matches!(
            WorldConfig::from_json_str(r#"{ "water_level": 64 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            WorldConfig::from_json_str(r#"{ "chunks_per_step": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            WorldConfig::from_json_str(r#"{ "noise_frequency": -1.0 }"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            WorldConfig::from_json_str("{ seed: "),
            Err(ConfigError::Parse(_))
        ));
    }
}
