//! Surface mesh storage.
//!
//! A `SurfaceMesh` is the renderable output of one chunk: a quad list where
//! every face contributes four vertices and six indices. Normals are derived
//! from triangle winding once all faces are in.

use cgmath::{InnerSpace, Vector3, Zero};

use super::face::Face;
use crate::engine_state::rendering::Vertex;

/// Vertices and triangle indices of a chunk surface.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SurfaceMesh {
    /// Four vertices per face, in face order
    vertices: Vec<Vertex>,
    /// Six indices per face, two triangles
    indices: Vec<u32>,
}

impl SurfaceMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one face with its four UV coordinates.
    ///
    /// # Arguments
    /// * `face` - The face to append
    /// * `uvs` - Atlas coordinates for the face corners, in corner order
    pub fn push_face(&mut self, face: &Face, uvs: [[f32; 2]; 4]) {
        let faces_so_far = self.face_count() as u32;
        self.vertices.extend(
            face.corners
                .iter()
                .zip(uvs)
                .map(|(corner, uv)| Vertex::new(*corner, uv)),
        );
        self.indices.extend_from_slice(&Face::indices(faces_so_far));
    }

    /// Derives per-vertex normals from triangle winding.
    ///
    /// Each triangle adds its face normal to its three vertices; the sums are
    /// then normalized. Vertices are not shared between faces, so every normal
    /// ends up perpendicular to its own quad.
    pub fn recalculate_normals(&mut self) {
        let mut sums = vec![Vector3::<f32>::zero(); self.vertices.len()];

        for triangle in self.indices.chunks_exact(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
            let (pa, pb, pc) = (
                self.vertices[a].point(),
                self.vertices[b].point(),
                self.vertices[c].point(),
            );
            let normal = (pb - pa).cross(pc - pa);
            sums[a] += normal;
            sums[b] += normal;
            sums[c] += normal;
        }

        for (vertex, sum) in self.vertices.iter_mut().zip(sums) {
            if sum.magnitude2() > 0.0 {
                vertex.normal = sum.normalize().into();
            }
        }
    }

    /// Number of quads in the mesh.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// `true` if no face was emitted.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// All vertices.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All triangle indices.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Vertex positions, in order.
    pub fn positions(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.vertices.iter().map(|v| v.position)
    }

    /// Vertex UV coordinates, in order.
    pub fn uvs(&self) -> impl Iterator<Item = [f32; 2]> + '_ {
        self.vertices.iter().map(|v| v.tex_coords)
    }

    /// The vertex buffer as raw bytes, ready for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The index buffer as raw bytes, ready for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::{BlockSide, BlockType};
    use cgmath::Point3;

    #[test]
    fn test_push_face_offsets_indices() {
        let mut mesh = SurfaceMesh::new();
        let uvs = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];
        mesh.push_face(&Face::new(Point3::new(0, 0, 0), BlockType::DIRT, BlockSide::TOP), uvs);
        mesh.push_face(&Face::new(Point3::new(0, 0, 0), BlockType::DIRT, BlockSide::LEFT), uvs);

        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(&mesh.indices()[6..], &[4, 5, 6, 4, 6, 7]);
        assert_eq!(mesh.vertex_bytes().len(), 8 * std::mem::size_of::<Vertex>());
        assert_eq!(mesh.index_bytes().len(), 12 * std::mem::size_of::<u32>());
    }

    #[test]
    fn test_recalculate_normals_follows_winding() {
        let mut mesh = SurfaceMesh::new();
        let face = Face::new(Point3::new(2, 3, 4), BlockType::STONE, BlockSide::BOTTOM);
        mesh.push_face(&face, [[0.0; 2]; 4]);
        mesh.recalculate_normals();
        for vertex in mesh.vertices() {
            assert_eq!(vertex.normal, [0.0, -1.0, 0.0]);
        }
    }
}
