//! # World Module
//!
//! This module provides the `World` struct, the store of every placed block.
//!
//! ## Architecture
//!
//! The world is a sparse map from integer coordinate to block type. Only
//! occupied cells are stored, so lookups, placements and removals are O(1)
//! expected time and an empty cell costs nothing.
//!
//! ## Invariants
//!
//! - No two blocks share a coordinate.
//! - Bedrock blocks are never removed. The store accepts bedrock like any
//!   other type; the protection is enforced by [`World::remove`].

use std::collections::{hash_map::Entry, HashMap, HashSet};

use cgmath::{Point3, Vector3};
use thiserror::Error;

use super::block::{block_side::BlockSide, block_type::BlockType, Block};

/// Errors returned by operations that mutate the [`World`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorldError {
    /// Bulk population hit the same coordinate twice.
    #[error("duplicate block at {0:?}")]
    DuplicateCoordinate(Point3<i32>),

    /// A placement targeted an occupied cell.
    #[error("cell {0:?} is already occupied")]
    Occupied(Point3<i32>),

    /// A removal targeted an empty cell.
    #[error("no block at {0:?}")]
    NotFound(Point3<i32>),

    /// A removal targeted a block that can never be removed.
    #[error("{block_type} at {position:?} cannot be removed")]
    Protected {
        position: Point3<i32>,
        block_type: BlockType,
    },
}

impl WorldError {
    /// Whether the caller can carry on after this error.
    ///
    /// Only a duplicate during population is fatal, since it means the
    /// generator produced overlapping columns.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, WorldError::DuplicateCoordinate(_))
    }
}

/// The set of placed blocks.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_world::voxels::{block::block_type::BlockType, world::World};
///
/// let mut world = World::new();
/// world.place(Point3::new(5, 1, 5), BlockType::Dirt).unwrap();
/// assert_eq!(world.get(Point3::new(5, 1, 5)), Some(BlockType::Dirt));
/// ```
#[derive(Debug, Default, Clone)]
pub struct World {
    blocks: HashMap<Point3<i32>, BlockType>,
}

impl World {
    /// Creates a new, empty world.
    pub fn new() -> Self {
        World {
            blocks: HashMap::new(),
        }
    }

    /// Inserts every block produced by the terrain generator.
    ///
    /// The input is checked in full before anything is inserted, so on error
    /// the world is left exactly as it was.
    ///
    /// # Errors
    /// `DuplicateCoordinate` if two input blocks share a coordinate, or an
    /// input block lands on a cell that is already occupied.
    pub fn populate<I>(&mut self, blocks: I) -> Result<usize, WorldError>
    where
        I: IntoIterator,
        I::Item: Into<Block>,
    {
        let blocks: Vec<Block> = blocks.into_iter().map(Into::into).collect();

        let mut seen = HashSet::with_capacity(blocks.len());
        for block in &blocks {
            if self.blocks.contains_key(&block.position) || !seen.insert(block.position) {
                return Err(WorldError::DuplicateCoordinate(block.position));
            }
        }

        self.blocks.reserve(blocks.len());
        let inserted = blocks.len();
        self.blocks
            .extend(blocks.into_iter().map(|block| (block.position, block.block_type)));
        Ok(inserted)
    }

    /// Places a block of `block_type` at `position`.
    ///
    /// # Errors
    /// `Occupied` if a block already exists there; the world is unchanged.
    pub fn place(&mut self, position: Point3<i32>, block_type: BlockType) -> Result<(), WorldError> {
        match self.blocks.entry(position) {
            Entry::Occupied(_) => Err(WorldError::Occupied(position)),
            Entry::Vacant(entry) => {
                entry.insert(block_type);
                Ok(())
            }
        }
    }

    /// Removes the block at `position`.
    ///
    /// # Returns
    /// The type of the removed block.
    ///
    /// # Errors
    /// `NotFound` if the cell is empty, `Protected` if the block can never be
    /// removed. The world is unchanged in both cases.
    pub fn remove(&mut self, position: Point3<i32>) -> Result<BlockType, WorldError> {
        match self.blocks.entry(position) {
            Entry::Vacant(_) => Err(WorldError::NotFound(position)),
            Entry::Occupied(entry) => {
                let block_type = *entry.get();
                if !block_type.is_removable() {
                    return Err(WorldError::Protected {
                        position,
                        block_type,
                    });
                }
                entry.remove();
                Ok(block_type)
            }
        }
    }

    /// The type of the block at `position`, if any.
    pub fn get(&self, position: Point3<i32>) -> Option<BlockType> {
        self.blocks.get(&position).copied()
    }

    /// Whether a block exists at `position`.
    pub fn contains(&self, position: Point3<i32>) -> bool {
        self.blocks.contains_key(&position)
    }

    /// The coordinate adjacent to `position` across `side`.
    pub fn neighbor(position: Point3<i32>, side: BlockSide) -> Point3<i32> {
        position + side.offset()
    }

    /// Number of blocks in the world.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the world holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterates over all blocks in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = Block> + '_ {
        self.blocks
            .iter()
            .map(|(position, block_type)| Block::new(*position, *block_type))
    }

    /// The cell containing the point `point`.
    ///
    /// Cell `(x, y, z)` spans `[x, x + 1)` on every axis.
    pub fn cell_at(point: Point3<f32>) -> Point3<i32> {
        Point3::new(
            point.x.floor() as i32,
            point.y.floor() as i32,
            point.z.floor() as i32,
        )
    }

    /// Whether the point `point` lies inside an occupied cell.
    pub fn is_solid_at(&self, point: Point3<f32>) -> bool {
        self.contains(Self::cell_at(point))
    }

    /// The highest occupied cell in the column at `(x, z)`.
    pub fn highest_block(&self, x: i32, z: i32) -> Option<Block> {
        self.iter()
            .filter(|block| block.position.x == x && block.position.z == z)
            .max_by_key(|block| block.position.y)
    }

    /// The point directly above the highest block of the column at `(x, z)`.
    ///
    /// Used to drop a player onto the terrain.
    pub fn spawn_point_above(&self, x: i32, z: i32) -> Option<Point3<f32>> {
        self.highest_block(x, z).map(|block| {
            let top = block.position + Vector3::new(0, 1, 0);
            Point3::new(top.x as f32 + 0.5, top.y as f32, top.z as f32 + 0.5)
        })
    }
}
