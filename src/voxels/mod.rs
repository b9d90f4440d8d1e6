//! # Voxel World Core
//!
//! This module contains the voxel world itself: what a block is, how terrain
//! is generated, where blocks are stored, and how a ray finds a block.
//!
//! ## Architecture
//!
//! * **Block**: Block types, their properties table, and the six block faces
//! * **Terrain**: Seeded, deterministic column generation from coherent noise
//! * **World**: The sparse store of placed blocks
//! * **Raycast**: Hit-testing a ray against the world
//!
//! ## Data Flow
//!
//! 1. The terrain generator populates the world once at startup
//! 2. Callers hit-test against the world to find placement and removal targets
//! 3. Only placements and removals mutate the world afterwards
//!
//! ## Thread Safety
//!
//! Everything here is single-threaded and synchronous. A `World` is owned by
//! exactly one caller; sharing it across threads would need a lock around the
//! whole store.

pub mod block;
pub mod raycast;
pub mod terrain;
pub mod world;
