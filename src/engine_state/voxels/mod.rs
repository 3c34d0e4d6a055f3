//! # Voxel World
//!
//! This module contains the voxel data and everything that fills, stores and
//! edits it.
//!
//! ## Architecture
//!
//! * **Block**: block types and the six faces of a voxel
//! * **Chunk**: a 16 x 64 x 16 column plus its one-voxel border and surface mesh
//! * **Terrain**: noise, voxel classification and tree placement
//! * **Chunk Store**: the single owner of all chunks, streaming them around the observer
//! * **Edit**: turns picked points into block edits
//! * **Tasks**: deferred chunk builds drained by the store
//!
//! ## Data Flow
//!
//! 1. The observer moves; the store works out which chunks must exist
//! 2. Missing chunks are queued, or built at once on the first tick
//! 3. A build fills the grid from noise, grows trees, then meshes it
//! 4. Far chunks are evicted into a pool and recycled by later builds
//! 5. Edits mutate one voxel and rebuild that chunk's mesh synchronously

pub mod block;
pub mod chunk;
pub mod chunk_store;
pub mod edit;
pub mod tasks;
pub mod terrain;
