//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! It provides conversion from the compact discriminant and from block names,
//! which is how the hotbar and configuration refer to block types.

use std::fmt;

use num_derive::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// The discriminants follow hotbar order, so `BlockType::from_int(slot)` maps
/// a hotbar slot straight to its block type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// The surface layer of every generated column.
    Grass = 0,

    /// The one or two layers directly below the grass.
    Dirt = 1,

    /// Everything deeper than two layers below the surface.
    Stone = 2,

    /// The floor of the world. Bedrock can never be removed.
    Bedrock = 3,
}

/// Number of distinct block types.
pub const BLOCK_TYPE_COUNT: usize = 4;

/// Lookup from the lowercase block name to its type.
static BLOCK_TYPES_BY_NAME: phf::Map<&'static str, BlockType> = phf::phf_map! {
    "grass" => BlockType::Grass,
    "dirt" => BlockType::Dirt,
    "stone" => BlockType::Stone,
    "bedrock" => BlockType::Bedrock,
};

impl BlockType {
    /// All block types in discriminant (hotbar) order.
    pub const ALL: [BlockType; BLOCK_TYPE_COUNT] = [
        BlockType::Grass,
        BlockType::Dirt,
        BlockType::Stone,
        BlockType::Bedrock,
    ];

    /// Converts a `BlockTypeSize` to a `BlockType`.
    ///
    /// # Returns
    /// `None` if the value doesn't correspond to a block type.
    pub fn from_int(btype: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(btype)
    }

    /// Looks up a block type by its lowercase name (`"grass"`, `"dirt"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        BLOCK_TYPES_BY_NAME.get(name).copied()
    }

    /// The lowercase name of this block type.
    pub fn name(self) -> &'static str {
        match self {
            BlockType::Grass => "grass",
            BlockType::Dirt => "dirt",
            BlockType::Stone => "stone",
            BlockType::Bedrock => "bedrock",
        }
    }

    /// Whether a block of this type may ever be removed from the world.
    pub fn is_removable(self) -> bool {
        self.properties().removable
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
    fn names_resolve_to_their_type() {
        for block_type in BlockType::ALL {
            assert_eq!(BlockType::from_name(block_type.name()), Some(block_type));
        }
        assert_eq!(BlockType::from_name("air"), None);
        assert_eq!(BlockType::from_name("Grass"), None);
    }

    #[test]
    fn discriminants_follow_hotbar_order() {
        for (index, block_type) in BlockType::ALL.iter().enumerate() {
            assert_eq!(BlockType::from_int(index as BlockTypeSize), Some(*block_type));
        }
        assert_eq!(BlockType::from_int(BLOCK_TYPE_COUNT as BlockTypeSize), None);
    }

    #[test]
    fn only_bedrock_is_protected() {
        assert!(!BlockType::Bedrock.is_removable());
        assert!(BlockType::Grass.is_removable());
        assert!(BlockType::Dirt.is_removable());
        assert!(BlockType::Stone.is_removable());
    }
}
