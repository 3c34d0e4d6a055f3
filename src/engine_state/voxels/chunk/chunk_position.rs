//! # Chunk Position
//!
//! Horizontal chunk coordinates. A `ChunkPosition` is always the world-space
//! origin of a chunk, i.e. a multiple of [`CHUNK_WIDTH`] on both axes; there is
//! no vertical chunking.

use std::fmt;

use cgmath::Point3;

use super::CHUNK_WIDTH;

const WIDTH: i32 = CHUNK_WIDTH as i32;

/// World-space origin `(x, z)` of a chunk column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPosition {
    x: i32,
    z: i32,
}

impl ChunkPosition {
    /// The chunk whose origin is `(i * W, j * W)`.
    pub fn from_indices(i: i32, j: i32) -> Self {
        ChunkPosition {
            x: i * WIDTH,
            z: j * WIDTH,
        }
    }

    /// The chunk containing the voxel column at integer world `(x, z)`.
    pub fn containing_voxel(x: i32, z: i32) -> Self {
        ChunkPosition {
            x: x.div_euclid(WIDTH) * WIDTH,
            z: z.div_euclid(WIDTH) * WIDTH,
        }
    }

    /// The chunk containing the world-space point `(x, z)`.
    ///
    /// Floors before dividing, so `-0.5` lands in the chunk at `-16`.
    pub fn containing_point(x: f32, z: f32) -> Self {
        Self::containing_voxel(x.floor() as i32, z.floor() as i32)
    }

    /// World X of the chunk origin.
    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    /// World Z of the chunk origin.
    #[inline]
    pub fn z(&self) -> i32 {
        self.z
    }

    /// The chunk origin as a world-space point at height zero.
    pub fn origin(&self) -> Point3<i32> {
        Point3::new(self.x, 0, self.z)
    }

    /// The chunk `di` rings along X and `dj` rings along Z from this one.
    pub fn offset(&self, di: i32, dj: i32) -> Self {
        ChunkPosition {
            x: self.x + di * WIDTH,
            z: self.z + dj * WIDTH,
        }
    }

    /// Chebyshev distance to `other`, measured in chunk rings.
    pub fn ring_distance(&self, other: ChunkPosition) -> i32 {
        let dx = (self.x - other.x).abs() / WIDTH;
        let dz = (self.z - other.z).abs() / WIDTH;
        dx.max(dz)
    }

    /// Every chunk within `rings` of this one, row by row along X.
    pub fn square_around(self, rings: i32) -> impl Iterator<Item = ChunkPosition> {
        (-rings..=rings).flat_map(move |di| (-rings..=rings).map(move |dj| self.offset(di, dj)))
    }
}

impl fmt::Display for ChunkPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}
