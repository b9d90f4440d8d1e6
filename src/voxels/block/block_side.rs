//! # Block Side Module
//!
//! This module defines the six faces of a voxel block and the unit offset
//! that leads from a block to its neighbor across each face.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// Each variant is assigned a stable integer value. The order is:
/// [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    Front = 0,

    /// The back face (facing negative Z)
    Back = 1,

    /// The bottom face (facing negative Y)
    Bottom = 2,

    /// The top face (facing positive Y)
    Top = 3,

    /// The left face (facing negative X)
    Left = 4,

    /// The right face (facing positive X)
    Right = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    ///
    /// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::Front,
            BlockSide::Back,
            BlockSide::Bottom,
            BlockSide::Top,
            BlockSide::Left,
            BlockSide::Right,
        ]
    }

    /// The unit vector pointing out of this face.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            BlockSide::Front => Vector3::new(0, 0, 1),
            BlockSide::Back => Vector3::new(0, 0, -1),
            BlockSide::Bottom => Vector3::new(0, -1, 0),
            BlockSide::Top => Vector3::new(0, 1, 0),
            BlockSide::Left => Vector3::new(-1, 0, 0),
            BlockSide::Right => Vector3::new(1, 0, 0),
        }
    }

    /// The face on the other side of the block.
    pub fn opposite(self) -> BlockSide {
        match self {
            BlockSide::Front => BlockSide::Back,
            BlockSide::Back => BlockSide::Front,
            BlockSide::Bottom => BlockSide::Top,
            BlockSide::Top => BlockSide::Bottom,
            BlockSide::Left => BlockSide::Right,
            BlockSide::Right => BlockSide::Left,
        }
    }

    /// Finds the face whose outward unit vector equals `offset`.
    ///
    /// # Returns
    /// `None` unless `offset` is one of the six axis-aligned unit vectors.
    pub fn from_offset(offset: Vector3<i32>) -> Option<BlockSide> {
        BlockSide::all()
            .into_iter()
            .find(|side| side.offset() == offset)
    }
}
