//! # Terrain Generation
//!
//! Maps a horizontal coordinate to a deterministic column of typed blocks.
//!
//! The height field is fractal Perlin noise sampled at `(x * scale, z * scale)`,
//! multiplied by an amplitude and floored. Each column runs from that surface
//! height down to one layer below the bedrock floor:
//!
//! * at or below `min_height` -> bedrock, regardless of anything else
//! * the surface layer -> grass
//! * more than two layers below the surface -> stone
//! * everything else -> dirt
//!
//! Column heights are in generator space; a column's blocks are placed in the
//! world at `y + min_height`.

use cgmath::Point3;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use crate::config::WorldConfig;

use super::block::{block_type::BlockType, Block};

/// A seeded terrain generator.
///
/// Holding the generator keeps the noise function alive between columns;
/// every query is still a pure function of the coordinate and the seed.
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    noise: Fbm<Perlin>,
    seed: u32,
    noise_scale: f64,
    amplitude: f64,
    min_height: i32,
}

impl TerrainGenerator {
    /// Creates a generator for `seed` using the shape parameters of `config`.
    ///
    /// The seed in `config` is ignored; callers resolve it beforehand.
    pub fn new(seed: u32, config: &WorldConfig) -> Self {
        TerrainGenerator {
            noise: Fbm::<Perlin>::new(seed).set_octaves(config.octaves),
            seed,
            noise_scale: config.noise_scale,
            amplitude: config.amplitude,
            min_height: config.min_height,
        }
    }

    /// The seed this generator was built with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// The generator-space height of the bedrock floor.
    pub fn min_height(&self) -> i32 {
        self.min_height
    }

    /// Samples the height field at `(x, z)`.
    ///
    /// Never lower than `min_height - 1`, so every column has at least one block.
    pub fn surface_height(&self, x: i32, z: i32) -> i32 {
        let sample = self.noise.get([
            x as f64 * self.noise_scale,
            z as f64 * self.noise_scale,
        ]);
        ((sample * self.amplitude).floor() as i32).max(self.min_height.saturating_sub(1))
    }

    /// Generates the column at `(x, z)` from the surface downwards.
    ///
    /// # Returns
    /// `(y, block_type)` pairs in generator space, topmost first. The last
    /// entry is always at `min_height - 1`.
    pub fn generate_column(&self, x: i32, z: i32) -> Vec<(i32, BlockType)> {
        let surface_height = self.surface_height(x, z);
        (self.min_height.saturating_sub(1)..=surface_height)
            .rev()
            .map(|y| (y, classify_layer(y, surface_height, self.min_height)))
            .collect()
    }

    /// The blocks of the column at `(x, z)`, positioned in world space.
    pub fn column_blocks(&self, x: i32, z: i32) -> impl Iterator<Item = Block> {
        let min_height = self.min_height;
        self.generate_column(x, z)
            .into_iter()
            .map(move |(y, block_type)| {
                Block::new(Point3::new(x, y.saturating_add(min_height), z), block_type)
            })
    }

    /// Every block of the square `[-extent, extent)` on both horizontal axes.
    pub fn generate_area(&self, extent: i32) -> impl Iterator<Item = Block> + '_ {
        (-extent..extent)
            .flat_map(move |x| (-extent..extent).map(move |z| (x, z)))
            .flat_map(move |(x, z)| self.column_blocks(x, z))
    }
}

/// Picks the block type of layer `y` in a column whose surface is at `surface_height`.
pub fn classify_layer(y: i32, surface_height: i32, min_height: i32) -> BlockType {
    if y <= min_height {
        BlockType::Bedrock
    } else if y == surface_height {
        BlockType::Grass
    } else if surface_height - y > 2 {
        BlockType::Stone
    } else {
        BlockType::Dirt
    }
}

/// Generates the column at `(x, z)` for `seed` with the default world shape.
///
/// Identical inputs always yield the identical column.
pub fn generate_column(x: i32, z: i32, seed: u32) -> Vec<(i32, BlockType)> {
    TerrainGenerator::new(seed, &WorldConfig::default()).generate_column(x, z)
}
