//! # Hotbar
//!
//! The block selection bar. Selection state belongs to the input layer and is
//! handed to the world only as the block type of a placement.

use thiserror::Error;

use crate::voxels::block::{
    block_type::{BlockType, BLOCK_TYPE_COUNT},
    BlockTypeSize,
};

/// Errors raised when changing the hotbar selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HotbarError {
    #[error("hotbar slot {0} does not exist (expected 1-{count})", count = BLOCK_TYPE_COUNT)]
    InvalidSlot(usize),

    #[error("{0:?} is not a hotbar key")]
    InvalidKey(String),
}

/// Tracks which block type is placed on the next placement.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Hotbar {
    selected_index: usize,
}

impl Hotbar {
    /// Creates a hotbar with the first slot (grass) selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// The block types in slot order.
    pub fn slots(&self) -> [BlockType; BLOCK_TYPE_COUNT] {
        BlockType::ALL
    }

    /// Zero-based index of the selected slot.
    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// The block type in the selected slot.
    pub fn selected(&self) -> BlockType {
        BlockType::from_int(self.selected_index as BlockTypeSize).unwrap_or(BlockType::Grass)
    }

    /// Selects the zero-based slot `index`.
    ///
    /// An invalid index leaves the current selection untouched.
    pub fn select_slot(&mut self, index: usize) -> Result<BlockType, HotbarError> {
        if index >= BLOCK_TYPE_COUNT {
            return Err(HotbarError::InvalidSlot(index + 1));
        }
        self.selected_index = index;
        Ok(self.selected())
    }

    /// Selects a slot from its number key, `"1"` through `"4"`.
    pub fn select_key(&mut self, key: &str) -> Result<BlockType, HotbarError> {
        let number: usize = key
            .trim()
            .parse()
            .map_err(|_| HotbarError::InvalidKey(key.to_string()))?;
        if number == 0 {
            return Err(HotbarError::InvalidSlot(0));
        }
        self.select_slot(number - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_grass() {
        let hotbar = Hotbar::new();
        assert_eq!(hotbar.selected_index(), 0);
        assert_eq!(hotbar.selected(), BlockType::Grass);
    }

    #[test]
    fn number_keys_select_slots() {
        let mut hotbar = Hotbar::new();
        assert_eq!(hotbar.select_key("1"), Ok(BlockType::Grass));
        assert_eq!(hotbar.select_key("2"), Ok(BlockType::Dirt));
        assert_eq!(hotbar.select_key("3"), Ok(BlockType::Stone));
        assert_eq!(hotbar.select_key("4"), Ok(BlockType::Bedrock));
        assert_eq!(hotbar.selected(), BlockType::Bedrock);
    }

    #[test]
    fn bad_keys_keep_the_selection() {
        let mut hotbar = Hotbar::new();
        hotbar.select_key("3").unwrap();

        assert_eq!(hotbar.select_key("5"), Err(HotbarError::InvalidSlot(5)));
        assert_eq!(hotbar.select_key("0"), Err(HotbarError::InvalidSlot(0)));
        assert_eq!(hotbar.select_key("q"), Err(HotbarError::InvalidKey("q".into())));
        assert_eq!(hotbar.selected(), BlockType::Stone);
    }

    #[test]
    fn slots_follow_block_order() {
        assert_eq!(
            Hotbar::new().slots(),
            [BlockType::Grass, BlockType::Dirt, BlockType::Stone, BlockType::Bedrock]
        );
    }
}
