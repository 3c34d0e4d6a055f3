//! Texture mapping for block faces.
//!
//! The mesher does not know about atlases. It asks a [`TextureMapping`] for
//! the three tile rectangles (top, bottom, side) of a block type and copies
//! their corners into the mesh as UVs.

use phf::phf_map;

use crate::engine_state::voxels::block::{BlockSide, BlockType, TextureSlot};

/// Inset applied to every tile edge so neighbouring tiles never bleed in.
const TILE_INSET: f32 = 0.001;

/// Atlas cells `(column, row)` for the top, bottom and side of each block, keyed by block name.
static TILE_CELLS: phf::Map<&'static str, [(u32, u32); 3]> = phf_map! {
    "grass" => [(0, 0), (2, 0), (3, 0)],
    "dirt" => [(2, 0), (2, 0), (2, 0)],
    "stone" => [(1, 0), (1, 0), (1, 0)],
    "trunk" => [(5, 1), (5, 1), (4, 1)],
    "leaves" => [(4, 3), (4, 3), (4, 3)],
};

/// A UV rectangle within the atlas.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TileRect {
    /// Left edge
    pub u0: f32,
    /// Bottom edge
    pub v0: f32,
    /// Right edge
    pub u1: f32,
    /// Top edge
    pub v1: f32,
}

impl TileRect {
    /// Corner UVs in face corner order: `(u0,v0) (u0,v1) (u1,v1) (u1,v0)`.
    pub fn uvs(&self) -> [[f32; 2]; 4] {
        [
            [self.u0, self.v0],
            [self.u0, self.v1],
            [self.u1, self.v1],
            [self.u1, self.v0],
        ]
    }
}

/// The three tiles a block samples from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlockTiles {
    /// Tile for upward faces
    pub top: TileRect,
    /// Tile for downward faces
    pub bottom: TileRect,
    /// Tile shared by the four horizontal faces
    pub side: TileRect,
}

impl BlockTiles {
    /// The tile used by `side`.
    pub fn for_side(&self, side: BlockSide) -> TileRect {
        match side.texture_slot() {
            TextureSlot::Top => self.top,
            TextureSlot::Bottom => self.bottom,
            TextureSlot::Side => self.side,
        }
    }
}

/// Supplies per-block UV rectangles to the mesher.
pub trait TextureMapping {
    /// The top, bottom and side tiles of `block_type`.
    fn tiles(&self, block_type: BlockType) -> BlockTiles;
}

/// A square atlas of equally sized tiles.
#[derive(Copy, Clone, Debug)]
pub struct TileAtlas {
    tiles_per_row: u32,
}

impl TileAtlas {
    /// Creates an atlas with `tiles_per_row` tiles along each edge.
    pub fn new(tiles_per_row: u32) -> Self {
        TileAtlas {
            tiles_per_row: tiles_per_row.max(1),
        }
    }

    /// The inset UV rectangle of cell `(column, row)`.
    pub fn cell(&self, column: u32, row: u32) -> TileRect {
        let size = 1.0 / self.tiles_per_row as f32;
        let u0 = column as f32 * size;
        let v0 = row as f32 * size;
        TileRect {
            u0: u0 + TILE_INSET,
            v0: v0 + TILE_INSET,
            u1: u0 + size - TILE_INSET,
            v1: v0 + size - TILE_INSET,
        }
    }
}

impl TextureMapping for TileAtlas {
    fn tiles(&self, block_type: BlockType) -> BlockTiles {
        let [top, bottom, side] = TILE_CELLS
            .get(block_type.name())
            .copied()
            .unwrap_or([(0, 0); 3])
            .map(|(column, row)| self.cell(column, row));
        BlockTiles { top, bottom, side }
    }
}
