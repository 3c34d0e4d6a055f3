//! # Block Module
//!
//! This module provides the core block-related functionality for the terrain.
//! It includes block type definitions and block face handling.

pub mod block_side;
pub mod block_type;

pub use block_side::{BlockSide, TextureSlot};
pub use block_type::BlockType;
