//! Mesh data for voxel surfaces.
//!
//! This module provides the building blocks the chunk mesher assembles:
//!
//! # Architecture
//! - [`SurfaceMesh`]: a complete chunk surface, vertices plus triangle indices
//! - [`Face`]: a single exposed unit face with its four corners
//!
//! There is no face merging. Every exposed unit face becomes its own quad.

mod face;
#[allow(clippy::module_inception)]
mod mesh;

pub use face::Face;
pub use mesh::SurfaceMesh;
