use serde::{Deserialize, Serialize};

use crate::errors::TerrainError;

// Hard cap on the subdivision exponent. 2^15 + 1 = 32769 nodes per side is
// the last size whose squared node count still fits a renderable index range.
pub const MAX_SUBDIVISIONS: u32 = 15;

// Everything the generator needs to produce a terrain. Serializable so a
// parameter set can be shared and replayed elsewhere; the height map itself
// is always recomputed from these values, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub seed: i64,
    // Each side of the grid is 2^n + 1 nodes.
    pub n: u32,
    pub min_corner_height: f32,
    pub max_corner_height: f32,
    pub min_noise_addition: f32,
    pub max_noise_addition: f32,
    // Multiplier applied to the noise bounds after every pass, in [0, 1].
    pub noise_decay_factor: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            seed: 2025,
            n: 7, // 129 nodes per side
            min_corner_height: 0.0,
            max_corner_height: 10.0,
            min_noise_addition: -4.0,
            max_noise_addition: 4.0,
            noise_decay_factor: 0.5,
        }
    }
}

impl GenerationParams {
    // Number of nodes along one side of the grid: 2^n + 1.
    pub fn nodes_per_side(&self) -> usize {
        (1usize << self.n) + 1
    }

    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.n < 1 || self.n > MAX_SUBDIVISIONS {
            return Err(TerrainError::InvalidParameters(format!(
                "n must be in 1..={MAX_SUBDIVISIONS}, got {}",
                self.n
            )));
        }
        if self.min_corner_height > self.max_corner_height {
            return Err(TerrainError::InvalidParameters(format!(
                "corner height bounds inverted: {} > {}",
                self.min_corner_height, self.max_corner_height
            )));
        }
        if self.min_noise_addition > self.max_noise_addition {
            return Err(TerrainError::InvalidParameters(format!(
                "noise addition bounds inverted: {} > {}",
                self.min_noise_addition, self.max_noise_addition
            )));
        }
        if !(0.0..=1.0).contains(&self.noise_decay_factor) {
            return Err(TerrainError::InvalidParameters(format!(
                "noise decay factor must be in [0, 1], got {}",
                self.noise_decay_factor
            )));
        }
        Ok(())
    }
}
