use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::block::{BlockSide, BlockType};

/// Represents a single exposed unit face of a voxel.
///
/// The four corners are stored in emission order. Triangles `(0, 1, 2)` and
/// `(0, 2, 3)` over these corners wind so that their normal points away from
/// the voxel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Corner positions in chunk-local space
    pub corners: [Point3<f32>; 4],
    /// The block type, used for texture lookup
    pub block_type: BlockType,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates the face on `block_side` of the voxel whose minimum corner is `position`.
    ///
    /// # Arguments
    /// * `position` - Minimum corner of the voxel in chunk-local space
    /// * `block_type` - The type of the block, used for texture mapping
    /// * `block_side` - Which side of the block this face represents
    pub fn new(position: Point3<i32>, block_type: BlockType, block_side: BlockSide) -> Self {
        let offsets: [[i32; 3]; 4] = match block_side {
            BlockSide::TOP => [[0, 1, 0], [0, 1, 1], [1, 1, 1], [1, 1, 0]],
            BlockSide::BOTTOM => [[0, 0, 0], [1, 0, 0], [1, 0, 1], [0, 0, 1]],
            BlockSide::FRONT => [[0, 0, 0], [0, 1, 0], [1, 1, 0], [1, 0, 0]],
            BlockSide::RIGHT => [[1, 0, 0], [1, 1, 0], [1, 1, 1], [1, 0, 1]],
            BlockSide::BACK => [[1, 0, 1], [1, 1, 1], [0, 1, 1], [0, 0, 1]],
            BlockSide::LEFT => [[0, 0, 1], [0, 1, 1], [0, 1, 0], [0, 0, 0]],
        };

        let base = position.cast::<f32>().unwrap_or(Point3::new(0.0, 0.0, 0.0));
        Face {
            corners: offsets.map(|[x, y, z]| base + Vector3::new(x as f32, y as f32, z as f32)),
            block_type,
            block_side,
        }
    }

    /// Indices of the two triangles of this face, given how many faces precede it.
    pub fn indices(num_faces_generated: u32) -> [u32; 6] {
        let base = num_faces_generated * 4;
        [base, base + 1, base + 2, base, base + 2, base + 3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    #[test]
    fn test_winding_points_outward() {
        for side in BlockSide::all() {
            let face = Face::new(Point3::new(0, 0, 0), BlockType::STONE, side);
            let [a, b, c, _] = face.corners;
            let normal = (b - a).cross(c - a).normalize();
            let expected = side.neighbour_offset().cast::<f32>().unwrap();
            assert!((normal - expected).magnitude() < 1e-6, "{side:?} winds inward");
        }
    }
}
