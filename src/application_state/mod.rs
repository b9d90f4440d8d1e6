//! # Application State Management
//!
//! This module is the collaborator that drives the voxel world: it generates
//! the world at startup, owns the hotbar selection, and turns text commands
//! into world queries and mutations. It stands where a render/input loop
//! would stand in an interactive client.
//!
//! All logging happens here; the voxel core itself is silent.

pub mod command;
pub mod hotbar;

use std::{
    fmt,
    io::{BufRead, Write},
};

use cgmath::Point3;
use log::{debug, info, warn};
use thiserror::Error;

use command::{Command, CommandError};
use hotbar::{Hotbar, HotbarError};

use crate::{
    config::{ConfigError, WorldConfig},
    voxels::{
        block::{block_type::BlockType, Block},
        raycast::raycast,
        terrain::TerrainGenerator,
        world::{World, WorldError},
    },
};

/// Name of the stopwatch logged around world generation.
pub const WORLD_GENERATION_STOPWATCH: &str = "World Generation";

/// Errors surfaced by the session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Hotbar(#[from] HotbarError),

    #[error(transparent)]
    World(#[from] WorldError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl SessionError {
    /// Whether the session can keep running after this error.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SessionError::Command(_) | SessionError::Hotbar(_) => true,
            SessionError::World(err) => err.is_recoverable(),
            SessionError::Config(_) | SessionError::Io(_) => false,
        }
    }
}

/// The result of a successfully executed command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// The hotbar selection changed.
    Selected(BlockType),
    /// A block was placed.
    Placed(Block),
    /// A block was removed.
    Removed(Block),
    /// The ray hit nothing within reach.
    Missed,
    /// Result of a point query.
    Queried(Point3<i32>, Option<BlockType>),
    /// World statistics.
    Info {
        blocks: usize,
        seed: u32,
        selected: BlockType,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Selected(block_type) => write!(f, "selected {block_type}"),
            Outcome::Placed(block) => write!(
                f,
                "placed {} at {} {} {}",
                block.block_type, block.position.x, block.position.y, block.position.z
            ),
            Outcome::Removed(block) => write!(
                f,
                "removed {} at {} {} {}",
                block.block_type, block.position.x, block.position.y, block.position.z
            ),
            Outcome::Missed => f.write_str("nothing in reach"),
            Outcome::Queried(position, block_type) => write!(
                f,
                "{} {} {}: {}",
                position.x,
                position.y,
                position.z,
                block_type.map_or("empty", BlockType::name)
            ),
            Outcome::Info {
                blocks,
                seed,
                selected,
            } => write!(f, "blocks={blocks} seed={seed} selected={selected}"),
        }
    }
}

/// The running session: a generated world plus the player's selection.
pub struct ApplicationState {
    /// The voxel world, populated at startup.
    pub world: World,
    /// The player's block selection.
    pub hotbar: Hotbar,
    config: WorldConfig,
    seed: u32,
}

impl ApplicationState {
    /// Generates a world from `config` and starts a session on it.
    ///
    /// # Errors
    /// An invalid configuration, or overlapping generated columns. Either is
    /// a fatal startup fault.
    pub fn new(mut config: WorldConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let seed = config.resolve_seed();

        let stopwatch = web_time::Instant::now();
        let generator = TerrainGenerator::new(seed, &config);
        let mut world = World::new();
        let generated = world.populate(generator.generate_area(config.extent))?;
        info!(
            "{}: {} blocks for seed {} in {:?}",
            WORLD_GENERATION_STOPWATCH,
            generated,
            seed,
            stopwatch.elapsed()
        );

        let [spawn_x, _, spawn_z] = config.spawn_position;
        match world.spawn_point_above(spawn_x.floor() as i32, spawn_z.floor() as i32) {
            Some(spawn) => debug!("Spawn point above terrain: {:?}", spawn),
            None => debug!("No terrain under spawn position {:?}", config.spawn_position),
        }

        Ok(ApplicationState {
            world,
            hotbar: Hotbar::new(),
            config,
            seed,
        })
    }

    /// The seed the world was generated with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// The configuration the session was started with, seed resolved.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Executes a single command against the world.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, SessionError> {
        match command {
            Command::Select(key) => Ok(Outcome::Selected(self.hotbar.select_key(&key)?)),
            Command::Place { origin, direction } => {
                let Some(hit) = raycast(&self.world, origin, direction, self.config.reach) else {
                    return Ok(Outcome::Missed);
                };
                let Some(target) = hit.placement_target() else {
                    debug!("Ray starts inside the block at {:?}", hit.position);
                    return Ok(Outcome::Missed);
                };
                self.place(target)
            }
            Command::Break { origin, direction } => {
                match raycast(&self.world, origin, direction, self.config.reach) {
                    Some(hit) => self.remove(hit.position),
                    None => Ok(Outcome::Missed),
                }
            }
            Command::Set(position) => self.place(position),
            Command::Remove(position) => self.remove(position),
            Command::Get(position) => Ok(Outcome::Queried(position, self.world.get(position))),
            Command::Info => Ok(Outcome::Info {
                blocks: self.world.len(),
                seed: self.seed,
                selected: self.hotbar.selected(),
            }),
        }
    }

    fn place(&mut self, position: Point3<i32>) -> Result<Outcome, SessionError> {
        let block_type = self.hotbar.selected();
        self.world.place(position, block_type)?;
        Ok(Outcome::Placed(Block::new(position, block_type)))
    }

    fn remove(&mut self, position: Point3<i32>) -> Result<Outcome, SessionError> {
        let block_type = self.world.remove(position)?;
        Ok(Outcome::Removed(Block::new(position, block_type)))
    }

    /// Parses and executes one command line.
    pub fn handle_line(&mut self, line: &str) -> Result<Outcome, SessionError> {
        let command: Command = line.parse()?;
        let outcome = self.execute(command);
        match &outcome {
            Ok(outcome) => debug!("{} -> {}", line.trim(), outcome),
            Err(err) => warn!("{}: {}", line.trim(), err),
        }
        outcome
    }

    /// Runs commands from `input` until it is exhausted, writing one line per
    /// command to `output`.
    ///
    /// Blank lines and lines starting with `#` are skipped. Recoverable errors
    /// are reported and the session continues.
    pub fn run_commands<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
    ) -> Result<(), SessionError> {
        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            match self.handle_line(trimmed) {
                Ok(outcome) => writeln!(output, "{outcome}")?,
                Err(err) if err.is_recoverable() => writeln!(output, "error: {err}")?,
                Err(err) => return Err(err),
            }
        }
        output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    fn flat_session() -> ApplicationState {
        let config = WorldConfig {
            seed: Some(42),
            amplitude: 0.0,
            extent: 4,
            ..WorldConfig::default()
        };
        ApplicationState::new(config).unwrap()
    }

    #[test]
    fn generates_the_configured_area() {
        let session = flat_session();
        // 8 x 8 columns of 7 layers each.
        assert_eq!(session.world.len(), 8 * 8 * 7);
        assert_eq!(session.seed(), 42);
        assert_eq!(session.world.get(Point3::new(0, -5, 0)), Some(BlockType::Grass));
        assert_eq!(session.world.get(Point3::new(0, -11, 0)), Some(BlockType::Bedrock));
    }

    #[test]
    fn unseeded_config_gets_a_seed() {
        let session = ApplicationState::new(WorldConfig {
            extent: 1,
            ..WorldConfig::default()
        })
        .unwrap();
        assert_eq!(session.config().seed, Some(session.seed()));
    }

    #[test]
    fn place_against_the_ground_uses_the_selection() {
        let mut session = flat_session();
        session.execute(Command::Select("3".into())).unwrap();

        let outcome = session
            .execute(Command::Place {
                origin: Point3::new(0.5, 0.5, 0.5),
                direction: Vector3::new(0.0, -1.0, 0.0),
            })
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::Placed(Block::new(Point3::new(0, -4, 0), BlockType::Stone))
        );
        assert_eq!(session.world.get(Point3::new(0, -4, 0)), Some(BlockType::Stone));
    }

    #[test]
    fn break_removes_the_hit_block() {
        let mut session = flat_session();
        let before = session.world.len();
        let outcome = session
            .execute(Command::Break {
                origin: Point3::new(1.5, 0.5, 1.5),
                direction: Vector3::new(0.0, -1.0, 0.0),
            })
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::Removed(Block::new(Point3::new(1, -5, 1), BlockType::Grass))
        );
        assert_eq!(session.world.len(), before - 1);
    }

    #[test]
    fn looking_at_the_sky_misses() {
        let mut session = flat_session();
        let outcome = session
            .execute(Command::Place {
                origin: Point3::new(0.5, 0.5, 0.5),
                direction: Vector3::new(0.0, 1.0, 0.0),
            })
            .unwrap();
        assert_eq!(outcome, Outcome::Missed);
    }

    #[test]
    fn bedrock_cannot_be_broken() {
        let mut session = flat_session();
        let err = session.handle_line("remove 0 -10 0").unwrap_err();
        assert!(matches!(
            err,
            SessionError::World(WorldError::Protected {
                block_type: BlockType::Bedrock,
                ..
            })
        ));
        assert!(err.is_recoverable());
        assert_eq!(session.world.get(Point3::new(0, -10, 0)), Some(BlockType::Bedrock));
    }

    #[test]
    fn scripted_session_reports_each_command() {
        let mut session = flat_session();
        let script = "\
# build a small tower
select 2
set 5 1 5
select 3
set 5 1 5
get 5 1 5
remove 5 1 5
remove 5 1 5
bogus

info
";
        let mut output = Vec::new();
        session.run_commands(script.as_bytes(), &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "selected dirt");
        assert_eq!(lines[1], "placed dirt at 5 1 5");
        assert_eq!(lines[2], "selected stone");
        assert!(lines[3].starts_with("error: cell"));
        assert_eq!(lines[4], "5 1 5: dirt");
        assert_eq!(lines[5], "removed dirt at 5 1 5");
        assert!(lines[6].starts_with("error: no block"));
        assert!(lines[7].starts_with("error: unknown command"));
        assert_eq!(lines[8], format!("blocks={} seed=42 selected=stone", 8 * 8 * 7));
    }

    #[test]
    fn out_of_range_heights_fail_instead_of_overflowing() {
        for config in [
            WorldConfig {
                seed: Some(1),
                min_height: i32::MIN,
                extent: 1,
                ..WorldConfig::default()
            },
            WorldConfig {
                min_height: 2_147_483_000,
                amplitude: 0.0,
                extent: 1,
                ..WorldConfig::default()
            },
        ] {
            assert!(matches!(
                ApplicationState::new(config),
                Err(SessionError::Config(ConfigError::Invalid(_)))
            ));
        }
    }

    #[test]
    fn invalid_config_is_fatal() {
        let result = ApplicationState::new(WorldConfig {
            octaves: 0,
            ..WorldConfig::default()
        });
        assert!(matches!(result, Err(SessionError::Config(ConfigError::Invalid(_)))));
    }
}
