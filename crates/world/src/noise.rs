//! Octave noise sampling for terrain generation.
//!
//! Provides a deterministic multi-octave Perlin sampler; the caller scales
//! coordinates before sampling.

use ::noise::{NoiseFn, Perlin};

/// Configuration for multi-octave noise generation.
#[derive(Debug, Clone)]
pub struct NoiseConfig {
    /// Number of octaves (layers of detail)
    pub octaves: u32,
    /// Frequency multiplier between octaves
    pub lacunarity: f64,
    /// Amplitude multiplier between octaves (persistence)
    pub persistence: f64,
    /// Seed for deterministic generation
    pub seed: u32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 4,
            lacunarity: 2.0,
            persistence: 0.5,
            seed: 0,
        }
    }
}

/// Noise generator using Perlin noise.
pub struct NoiseGenerator {
    perlin: Perlin,
    config: NoiseConfig,
}

impl NoiseGenerator {
    /// Create a new noise generator with the given configuration.
    pub fn new(config: NoiseConfig) -> Self {
        Self {
            perlin: Perlin::new(config.seed),
            config,
        }
    }

    /// Generate noise value at 3D coordinates with multi-octave sampling.
    ///
    /// Returns value in range [-1.0, 1.0].
    pub fn sample_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_value = 0.0;

        for _ in 0..self.config.octaves {
            value += self
                .perlin
                .get([x * frequency, y * frequency, z * frequency])
                * amplitude;
            max_value += amplitude;

            amplitude *= self.config.persistence;
            frequency *= self.config.lacunarity;
        }

        // Normalize to [-1.0, 1.0]
        value / max_value
    }

    /// Sample 3D octave noise mapped to [0.0, 1.0].
    pub fn sample_3d_unit(&self, x: f64, y: f64, z: f64) -> f64 {
        (self.sample_3d(x, y, z) + 1.0) * 0.5
    }
}
