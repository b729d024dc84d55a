//! Procedural terrain and cave generation from layered noise.
//!
//! Fills chunks column by column: an unconditional bedrock floor, cave-carved
//! stone, a dirt band, grass topsoil, and guaranteed air headroom at the top.

use tracing::{debug, instrument};

use crate::block::{Block, BlockType};
use crate::chunk::{Chunk, CHUNK_HEIGHT, CHUNK_SIZE};
use crate::noise::{NoiseConfig, NoiseGenerator};

/// Horizontal noise scale for the surface heightmap.
const TERRAIN_SCALE: f64 = 0.01;
/// Noise scale for cave carving.
const CAVE_SCALE: f64 = 0.05;
/// Octave count for the surface heightmap.
const TERRAIN_OCTAVES: u32 = 4;
/// Octave count for cave density.
const CAVE_OCTAVES: u32 = 3;
/// Cave density above which stone is carved out.
const CAVE_THRESHOLD: f64 = 0.45;
/// Top layers kept clear of terrain so the surface never reaches the chunk ceiling.
const HEADROOM: i32 = 4;

/// Deterministic terrain generator.
///
/// Output is a pure function of (seed, animation time, global coordinate):
/// regenerating a chunk with an unchanged time yields a bit-identical voxel
/// grid. The animation-time scalar shifts the noise field without changing
/// the seed, producing evolved but still deterministic terrain.
pub struct TerrainGenerator {
    seed: u32,
    terrain_noise: NoiseGenerator,
    cave_noise: NoiseGenerator,
    time: f64,
}

impl TerrainGenerator {
    /// Create a generator for the given world seed, with time zero.
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            terrain_noise: NoiseGenerator::new(NoiseConfig {
                octaves: TERRAIN_OCTAVES,
                seed,
                ..Default::default()
            }),
            cave_noise: NoiseGenerator::new(NoiseConfig {
                octaves: CAVE_OCTAVES,
                seed,
                ..Default::default()
            }),
            time: 0.0,
        }
    }

    /// Seed supplied at construction.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Current animation time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Set the animation-time scalar that perturbs the noise field.
    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    /// Surface height for a global column, in [0, CHUNK_HEIGHT - HEADROOM].
    ///
    /// The raw noise value is clamped to [0, 1] before scaling.
    pub fn height(&self, x: f64, z: f64) -> f64 {
        let max_terrain = (CHUNK_HEIGHT - HEADROOM) as f64;
        let n = self
            .terrain_noise
            .sample_3d_unit(x * TERRAIN_SCALE, self.time * 0.2, z * TERRAIN_SCALE);
        n.clamp(0.0, 1.0) * max_terrain
    }

    /// Cave carving density for a global voxel; unclamped. Values above the
    /// carving threshold turn underground stone into open air.
    pub fn cave_density(&self, x: f64, y: f64, z: f64) -> f64 {
        self.cave_noise.sample_3d_unit(
            x * CAVE_SCALE,
            y * CAVE_SCALE + self.time * 0.3,
            z * CAVE_SCALE,
        )
    }

    /// Fill (or overwrite) the chunk's entire voxel grid.
    #[instrument(skip(self, chunk), fields(chunk_pos = %chunk.position(), seed = self.seed))]
    pub fn generate(&self, chunk: &mut Chunk) {
        debug!("generating chunk terrain");
        let (world_x, world_z) = chunk.position().origin();

        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                self.fill_column(chunk, x, z, (world_x + x) as f64, (world_z + z) as f64);
            }
        }
    }

    /// Fill one vertical column of the chunk.
    fn fill_column(&self, chunk: &mut Chunk, x: i32, z: i32, gx: f64, gz: f64) {
        let surface = self.height(gx, gz) as i32;

        for y in 0..CHUNK_HEIGHT {
            let kind = if y == 0 {
                // Bedrock
                BlockType::Stone
            } else if y < surface - 5 {
                // Underground stone with occasional caves
                if self.cave_density(gx, y as f64, gz) > CAVE_THRESHOLD {
                    BlockType::Air
                } else {
                    BlockType::Stone
                }
            } else if y < surface - 1 {
                // Dirt band near the surface
                BlockType::Dirt
            } else if y == surface - 1 && surface > 0 {
                // Topsoil
                BlockType::Grass
            } else {
                // Air above the surface and in the reserved top layers
                BlockType::Air
            };

            chunk.set(x, y, z, Block::new(kind));
        }
    }
}
