//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! It provides functionality for block type identification and solidity checks.

use std::fmt;

/// Enumerates all possible block types in the voxel world.
///
/// `AIR` is the only empty kind. Every other variant is solid for the purposes
/// of terrain generation and face culling.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BlockType {
    /// An air block, which is non-solid and transparent.
    #[default]
    AIR,

    /// Plain dirt, found between the grass line and the stone layer.
    DIRT,

    /// A grass block with different textures on top and sides.
    /// Only forms at the surface near or above the water line.
    GRASS,

    /// Stone, which overrides dirt below the stone height field.
    STONE,

    /// The trunk of a tree placed by the vegetation pass.
    TRUNK,

    /// Tree canopy.
    LEAVES,
}

impl BlockType {
    /// Every block type, in declaration order.
    pub const ALL: [BlockType; 6] = [
        BlockType::AIR,
        BlockType::DIRT,
        BlockType::GRASS,
        BlockType::STONE,
        BlockType::TRUNK,
        BlockType::LEAVES,
    ];

    /// Returns `true` for every block type except `AIR`.
    #[inline]
    pub fn is_solid(self) -> bool {
        self != BlockType::AIR
    }

    /// The lowercase name used to key texture lookups.
    pub fn name(self) -> &'static str {
        match self {
            BlockType::AIR => "air",
            BlockType::DIRT => "dirt",
            BlockType::GRASS => "grass",
            BlockType::STONE => "stone",
            BlockType::TRUNK => "trunk",
            BlockType::LEAVES => "leaves",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_air_is_empty() {
        for block_type in BlockType::ALL {
            assert_eq!(block_type.is_solid(), block_type != BlockType::AIR);
        }
        assert_eq!(BlockType::default(), BlockType::AIR);
    }
}
