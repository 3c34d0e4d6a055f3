//! # Voxel Task System
//!
//! Deferred work on the voxel world. Tasks here are queued by the chunk store
//! and drained at a paced rate so bursts of newly required chunks spread over
//! several frames.

pub mod chunk_generation_task;

pub use chunk_generation_task::ChunkGenerationTask;
