#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A deterministic voxel world core: seeded terrain generation, an in-memory
//! block store, and ray hit-testing for block placement and removal.
//!
//! ## Key Modules
//!
//! * `voxels` - Block types, terrain generation, the world store and raycasting
//! * `config` - World generation parameters, loadable from JSON
//! * `application_state` - A headless session that drives the world from text commands
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Point3;
//! use voxel_world::{
//!     config::WorldConfig,
//!     voxels::{block::block_type::BlockType, terrain::TerrainGenerator, world::World},
//! };
//!
//! let generator = TerrainGenerator::new(42, &WorldConfig::default());
//! let mut world = World::new();
//! world.populate(generator.generate_area(10)).unwrap();
//!
//! // Bedrock forms the floor of every column and can't be removed.
//! assert!(world.remove(Point3::new(0, -10, 0)).is_err());
//! ```
//!
//! Running the binary starts a session that reads commands from stdin:
//!
//! ```bash
//! echo "info" | cargo run --release -- world.json
//! ```

use std::io;

use log::info;

pub mod application_state;
pub mod config;
pub mod voxels;

use application_state::{ApplicationState, SessionError};
use config::WorldConfig;

/// Initializes logging, generates a world, and runs session commands from stdin.
///
/// The optional first command-line argument is a path to a JSON
/// [`WorldConfig`]. Without it the default configuration is used.
pub fn run() -> Result<(), SessionError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stderr)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading world config from {}", path);
            WorldConfig::load(path)?
        }
        None => WorldConfig::default(),
    };

    let mut state = ApplicationState::new(config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    state.run_commands(stdin.lock(), stdout.lock())
}
