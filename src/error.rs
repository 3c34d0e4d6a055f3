//! # Errors
//!
//! Contract violations raised by the chunk store and the configuration loader.
//! None of these are transient: generation and meshing are deterministic, so an
//! error here means a tracking bug, never a condition worth retrying.

use thiserror::Error;

use crate::engine_state::voxels::chunk::{ChunkPhase, ChunkPosition};

/// Errors raised while generating, meshing, or editing chunks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    /// A chunk was looked up that should be active but is not in the map.
    #[error("chunk {position} is not active")]
    MissingChunk {
        /// The coordinate that was looked up.
        position: ChunkPosition,
    },

    /// A grid index fell outside the (W+2) x H x (W+2) allocation.
    #[error("voxel ({x}, {y}, {z}) lies outside the chunk grid")]
    OutOfBounds {
        /// Grid or world X.
        x: i64,
        /// Grid or world Y.
        y: i64,
        /// Grid or world Z.
        z: i64,
    },

    /// A recycled chunk was finalized before every voxel was overwritten.
    #[error("chunk {position} still holds {stale} stale voxels")]
    StaleGrid {
        /// The chunk being finalized.
        position: ChunkPosition,
        /// Number of voxels not written since the last reset.
        stale: usize,
    },

    /// A pass ran on a chunk in the wrong lifecycle phase.
    #[error("chunk {position} is {phase:?}, expected {expected}")]
    InvalidPhase {
        /// The chunk in question.
        position: ChunkPosition,
        /// The phase it was found in.
        phase: ChunkPhase,
        /// Human readable description of the acceptable phases.
        expected: &'static str,
    },
}

/// Errors raised while loading a [`WorldConfig`](crate::config::WorldConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration was not valid JSON for `WorldConfig`.
    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field held a value outside its allowed range.
    #[error("invalid config value: {0}")]
    Invalid(String),
}
