//! Vertex data structures for chunk surface meshes.
//!
//! This module defines the vertex format emitted by the chunk mesher. The
//! layout is plain old data so a finished mesh can be handed to any renderer
//! as a byte slice without conversion.

use cgmath::{Point3, Vector3};

/// A vertex of a chunk surface mesh.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Normal: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 32 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in chunk-local space (origin at the chunk's first interior voxel)
    pub position: [f32; 3],
    /// Unit surface normal, zero until the mesh recalculates normals
    pub normal: [f32; 3],
    /// UV texture coordinates into the block atlas
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a vertex with a zero normal.
    ///
    /// # Arguments
    /// * `pos` - The position of the vertex in chunk-local space
    /// * `tex_coords` - Atlas UV coordinates
    pub fn new(pos: Point3<f32>, tex_coords: [f32; 2]) -> Self {
        Vertex {
            position: pos.into(),
            normal: [0.0; 3],
            tex_coords,
        }
    }

    /// The position as a point.
    pub fn point(&self) -> Point3<f32> {
        Point3::from(self.position)
    }

    /// The normal as a vector.
    pub fn normal_vector(&self) -> Vector3<f32> {
        Vector3::from(self.normal)
    }
}
