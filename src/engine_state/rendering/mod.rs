//! Renderable output of the voxel world.
//!
//! Nothing here talks to a GPU. This module turns chunk grids into plain
//! vertex and index buffers that any renderer can upload:
//!
//! - [`meshing`]: face-culling surface extraction for solid blocks
//! - [`texture`]: per-block UV rectangles in a tile atlas
//! - [`liquid`]: water surfaces derived from the same grids

pub mod liquid;
pub mod meshing;
pub mod texture;
mod vertex;

// Re-export commonly used types
pub use liquid::{LiquidSurface, WaterSurface};
pub use meshing::{ChunkMesher, Face, SurfaceMesh};
pub use texture::{BlockTiles, TextureMapping, TileAtlas, TileRect};
pub use vertex::Vertex;
