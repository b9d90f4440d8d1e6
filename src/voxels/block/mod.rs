//! # Block Module
//!
//! This module provides the block-related types of the voxel world: block type
//! definitions, block faces, the per-type properties table and the `Block` value.

use block_type::{BlockType, BLOCK_TYPE_COUNT};
use cgmath::Point3;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// Presentation and behavior attached to a block type.
///
/// Identity lives in `BlockType`; everything a renderer or the removal rule
/// needs to know about a type lives here.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlockProperties {
    /// Name of the texture used for all faces of the block.
    pub texture: &'static str,
    /// RGBA tint applied on top of the texture.
    pub color: [f32; 4],
    /// Whether the block can be broken once placed.
    pub removable: bool,
}

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Maps each block type to its properties.
///
/// The array is indexed by `BlockType` as a `usize`.
pub static BLOCK_TYPE_TO_PROPERTIES: [BlockProperties; BLOCK_TYPE_COUNT] = [
    BlockProperties { texture: "groundEarth.png", color: WHITE, removable: true }, // GRASS
    BlockProperties { texture: "groundMud.png", color: WHITE, removable: true },   // DIRT
    BlockProperties { texture: "wallStone.png", color: WHITE, removable: true },   // STONE
    BlockProperties { texture: "stone07.png", color: WHITE, removable: false },    // BEDROCK
];

impl BlockType {
    /// Gets the properties table entry for this block type.
    pub fn properties(self) -> &'static BlockProperties {
        &BLOCK_TYPE_TO_PROPERTIES[self as usize]
    }
}

/// A single block in the world: a position paired with its type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    /// The integer coordinate of the block. Unique within a world.
    pub position: Point3<i32>,
    /// The type of this block.
    pub block_type: BlockType,
}

impl Block {
    /// Creates a new block of the specified type at `position`.
    pub fn new(position: Point3<i32>, block_type: BlockType) -> Self {
        Block {
            position,
            block_type,
        }
    }
}

impl From<(Point3<i32>, BlockType)> for Block {
    fn from((position, block_type): (Point3<i32>, BlockType)) -> Self {
        Block::new(position, block_type)
    }
}
