use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::errors::TerrainError;
use crate::params::GenerationParams;
use crate::utils::HeightMap2D;

// Which neighbors a subdivision step averages over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Diamond,
    Square,
}

// 2D terrain generator using the diamond-square algorithm.
// Four random corner heights are refined by alternating diamond and square
// passes, with a noise amplitude that decays each pass so the roughness is
// fractal rather than white.
pub struct DiamondSquare2D {
    params: GenerationParams,
}

impl DiamondSquare2D {
    pub fn new(params: GenerationParams) -> Result<Self, TerrainError> {
        params.validate()?;
        Ok(Self { params })
    }

    // Generate the full (2^n + 1) × (2^n + 1) height map.
    // Deterministic: the same parameters always produce the same map.
    pub fn generate(&self) -> HeightMap2D {
        let mut rng = ChaCha8Rng::seed_from_u64(self.params.seed as u64);
        self.generate_with(&mut rng)
    }

    // Same as generate(), but drawing randomness from a caller-owned source.
    // The source is borrowed exclusively for the whole run.
    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> HeightMap2D {
        let size = self.params.nodes_per_side();

        // Cells start as NaN so a cell written twice, or read before being
        // written, trips the debug assertions below.
        let mut map: HeightMap2D = vec![vec![f32::NAN; size]; size];

        // Seed the four corners. Draw order is part of the seed contract.
        let corners = self.params.min_corner_height..=self.params.max_corner_height;
        set_once(&mut map, 0, 0, rng.gen_range(corners.clone()));
        set_once(&mut map, 0, size - 1, rng.gen_range(corners.clone()));
        set_once(&mut map, size - 1, size - 1, rng.gen_range(corners.clone()));
        set_once(&mut map, size - 1, 0, rng.gen_range(corners));

        let mut min_noise = self.params.min_noise_addition;
        let mut max_noise = self.params.max_noise_addition;

        // grid_size is the side of the squares subdivided this pass. The
        // last pass has grid_size == 2; halving it to 1 ends the loop.
        let mut grid_size = size - 1;
        while grid_size > 1 {
            let jump = grid_size / 2;
            debug!(grid_size, jump, max_noise, "diamond-square pass");

            // Diamond step: the center of each square gets the average of
            // its four diagonal corners plus noise.
            for z in (jump..size - 1).step_by(grid_size) {
                for x in (jump..size - 1).step_by(grid_size) {
                    let avg = average_neighbors(&map, x, z, Step::Diamond, jump);
                    set_once(&mut map, x, z, avg + rng.gen_range(min_noise..=max_noise));
                }
            }

            // Square step: each edge midpoint gets the average of its 2-4
            // in-bounds axis-aligned neighbors plus a fresh noise draw.
            for z in (0..size).step_by(jump) {
                // Rows present before this pass already hold their cells at
                // even multiples of grid_size; start past them.
                let x_start = if z % grid_size == 0 { jump } else { 0 };
                for x in (x_start..size).step_by(grid_size) {
                    let avg = average_neighbors(&map, x, z, Step::Square, jump);
                    set_once(&mut map, x, z, avg + rng.gen_range(min_noise..=max_noise));
                }
            }

            // Dampen the noise for the next, finer pass.
            min_noise *= self.params.noise_decay_factor;
            max_noise *= self.params.noise_decay_factor;
            grid_size = jump;
        }

        map
    }
}

// The four offsets a step averages over at the given jump distance:
// diagonal corners for the diamond step, axis-aligned neighbors for the
// square step.
fn jump_offsets(step: Step, jump: isize) -> [(isize, isize); 4] {
    match step {
        Step::Diamond => [(jump, jump), (jump, -jump), (-jump, -jump), (-jump, jump)],
        Step::Square => [(jump, 0), (0, -jump), (-jump, 0), (0, jump)],
    }
}

// Average of the in-bounds neighbors at the given jump distance. Cells on
// the grid boundary see fewer neighbors and the divisor shrinks with them,
// so edges are not pulled toward zero.
fn average_neighbors(map: &HeightMap2D, x: usize, z: usize, step: Step, jump: usize) -> f32 {
    let size = map.len() as isize;
    let mut sum = 0.0;
    let mut count = 0;

    for (dx, dz) in jump_offsets(step, jump as isize) {
        let nx = x as isize + dx;
        let nz = z as isize + dz;
        if nx >= 0 && nx < size && nz >= 0 && nz < size {
            let height = map[nz as usize][nx as usize];
            debug_assert!(
                !height.is_nan(),
                "neighbor ({nx}, {nz}) read before initialization"
            );
            sum += height;
            count += 1;
        }
    }

    sum / count as f32
}

// Write a height exactly once. A second write means the step bookkeeping is
// wrong and is fatal in debug builds.
fn set_once(map: &mut HeightMap2D, x: usize, z: usize, height: f32) {
    debug_assert!(map[z][x].is_nan(), "cell ({x}, {z}) initialized twice");
    map[z][x] = height;
}
