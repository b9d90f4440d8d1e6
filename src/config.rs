//! # World Configuration
//!
//! Parameters that shape a generated world. Every field has a default that
//! reproduces the reference sandbox, so an empty JSON object is a valid
//! configuration.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scaling factor applied to world coordinates when sampling terrain noise.
pub const DEFAULT_NOISE_SCALE: f64 = 0.02;
/// Multiplier turning a noise sample into a surface height.
pub const DEFAULT_AMPLITUDE: f64 = 7.5;
/// Number of fractal octaves summed for the height field.
pub const DEFAULT_OCTAVES: usize = 3;
/// Generator-space height of the bedrock floor.
pub const DEFAULT_MIN_HEIGHT: i32 = -5;
/// Half-width of the generated square, in blocks.
pub const DEFAULT_EXTENT: i32 = 10;
/// How far a player can reach when placing or breaking blocks.
pub const DEFAULT_REACH: f32 = 10.0;

/// Largest accepted `|min_height|`.
pub const MAX_ABS_MIN_HEIGHT: i32 = 1 << 20;
/// Largest accepted amplitude. Noise samples stay within [-1, 1], so surface
/// heights stay within this many blocks of zero.
pub const MAX_AMPLITUDE: f64 = (1 << 20) as f64;
/// Largest accepted reach, in blocks.
pub const MAX_REACH: f32 = 1024.0;

/// Errors raised while loading a [`WorldConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration of the terrain generator and the interaction layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Noise seed. `None` draws a random seed when the world is created.
    pub seed: Option<u32>,
    pub noise_scale: f64,
    pub amplitude: f64,
    pub octaves: usize,
    pub min_height: i32,
    /// Columns are generated for x and z in `[-extent, extent)`.
    pub extent: i32,
    pub reach: f32,
    pub spawn_position: [f32; 3],
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            seed: None,
            noise_scale: DEFAULT_NOISE_SCALE,
            amplitude: DEFAULT_AMPLITUDE,
            octaves: DEFAULT_OCTAVES,
            min_height: DEFAULT_MIN_HEIGHT,
            extent: DEFAULT_EXTENT,
            reach: DEFAULT_REACH,
            spawn_position: [0.0, 5.0, 0.0],
        }
    }
}

impl WorldConfig {
    /// Reads and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the numeric parameters can produce a world.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.noise_scale.is_finite() || self.noise_scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "noise_scale must be positive, got {}",
                self.noise_scale
            )));
        }
        if !self.amplitude.is_finite() || !(0.0..=MAX_AMPLITUDE).contains(&self.amplitude) {
            return Err(ConfigError::Invalid(format!(
                "amplitude must be between 0 and {}, got {}",
                MAX_AMPLITUDE, self.amplitude
            )));
        }
        if !(-MAX_ABS_MIN_HEIGHT..=MAX_ABS_MIN_HEIGHT).contains(&self.min_height) {
            return Err(ConfigError::Invalid(format!(
                "min_height must be within +/-{}, got {}",
                MAX_ABS_MIN_HEIGHT, self.min_height
            )));
        }
        if self.octaves == 0 {
            return Err(ConfigError::Invalid("octaves must be at least 1".into()));
        }
        if self.extent < 0 {
            return Err(ConfigError::Invalid(format!(
                "extent must be non-negative, got {}",
                self.extent
            )));
        }
        if !self.reach.is_finite() || self.reach <= 0.0 || self.reach > MAX_REACH {
            return Err(ConfigError::Invalid(format!(
                "reach must be in (0, {}], got {}",
                MAX_REACH, self.reach
            )));
        }
        Ok(())
    }

    /// Returns the configured seed, drawing and storing a random one if unset.
    ///
    /// Once resolved the seed stays fixed for the lifetime of the config.
    pub fn resolve_seed(&mut self) -> u32 {
        *self.seed.get_or_insert_with(|| fastrand::u32(1..=1000))
    }
}
