//! # Block Side Module
//!
//! This module defines the different faces/sides of a voxel block and the
//! neighbour each one is tested against during face culling.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// The discriminants give the order faces are emitted in for a single voxel:
/// [TOP, BOTTOM, FRONT, RIGHT, BACK, LEFT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The top face (facing positive Y)
    TOP = 0,

    /// The bottom face (facing negative Y)
    BOTTOM = 1,

    /// The front face (facing negative Z)
    FRONT = 2,

    /// The right face (facing positive X)
    RIGHT = 3,

    /// The back face (facing positive Z)
    BACK = 4,

    /// The left face (facing negative X)
    LEFT = 5,
}

/// Which of the three texture slots a side samples from.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum TextureSlot {
    /// Upward facing faces.
    Top,
    /// Downward facing faces.
    Bottom,
    /// The four horizontal faces.
    Side,
}

impl BlockSide {
    /// Returns an array containing all six block faces in emission order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::TOP,
            BlockSide::BOTTOM,
            BlockSide::FRONT,
            BlockSide::RIGHT,
            BlockSide::BACK,
            BlockSide::LEFT,
        ]
    }

    /// Offset from a voxel to the neighbour that hides this face.
    pub fn neighbour_offset(self) -> Vector3<i32> {
        match self {
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::FRONT => Vector3::new(0, 0, -1),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
            BlockSide::BACK => Vector3::new(0, 0, 1),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
        }
    }

    /// The texture slot used for this face. Horizontal faces share `Side`.
    pub fn texture_slot(self) -> TextureSlot {
        match self {
            BlockSide::TOP => TextureSlot::Top,
            BlockSide::BOTTOM => TextureSlot::Bottom,
            _ => TextureSlot::Side,
        }
    }
}
