// Headless terrain generation: parameters in, generation stats and a
// color-banded PNG preview out.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use terrain::{
    DiamondSquare2D, GenerationParams, extremes, flatten2, node_spacing, terrain_mesh,
    to_terrain_image, water_mesh,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Generate diamond-square terrain and save a color-banded preview.
#[derive(Parser)]
#[command(name = "terrain", about = "Diamond-square terrain generator")]
struct Cli {
    /// Seed for reproducible terrain. Paste the printed parameter line back
    /// in to reproduce someone else's terrain exactly.
    #[arg(long, default_value_t = 2025)]
    seed: i64,

    /// Subdivision exponent; the grid is 2^n + 1 nodes per side.
    #[arg(short, long, default_value_t = 7)]
    n: u32,

    /// Physical side length of the terrain.
    #[arg(long, default_value_t = 100.0)]
    side_length: f32,

    #[arg(long, default_value_t = 0.0)]
    min_corner_height: f32,

    #[arg(long, default_value_t = 10.0)]
    max_corner_height: f32,

    #[arg(long, default_value_t = -4.0)]
    min_noise: f32,

    #[arg(long, default_value_t = 4.0)]
    max_noise: f32,

    /// Noise bound multiplier per pass, in [0, 1].
    #[arg(long, default_value_t = 0.5)]
    noise_decay: f32,

    /// Water plane resolution in nodes per unit of side length.
    #[arg(long, default_value_t = 2)]
    water_resolution: usize,

    /// Output PNG path. Defaults to a seed-labeled filename.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let params = GenerationParams {
        seed: cli.seed,
        n: cli.n,
        min_corner_height: cli.min_corner_height,
        max_corner_height: cli.max_corner_height,
        min_noise_addition: cli.min_noise,
        max_noise_addition: cli.max_noise,
        noise_decay_factor: cli.noise_decay,
    };
    let size = params.nodes_per_side();

    let generator = DiamondSquare2D::new(params.clone())?;

    let start = Instant::now();
    let map = generator.generate();
    let ext = extremes(&map)?;
    let spacing = node_spacing(cli.side_length, size);
    let mesh = terrain_mesh(&map, spacing);
    let water = water_mesh(cli.side_length, cli.water_resolution, ext.water_level());
    let elapsed_ms = start.elapsed().as_secs_f32() * 1000.0;

    info!(
        nodes = size * size,
        vertices = mesh.vertices.len(),
        triangles = mesh.triangles.len() / 3,
        water_vertices = water.vertices.len(),
        min = ext.min,
        max = ext.max,
        water_level = ext.water_level(),
        elapsed_ms,
        "terrain generated"
    );

    let rgb = to_terrain_image(&flatten2(&map), &ext);
    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(format!("terrain_{}.png", cli.seed)));
    image::save_buffer(&output, &rgb, size as u32, size as u32, image::ColorType::Rgb8)
        .with_context(|| format!("saving {}", output.display()))?;
    info!(path = %output.display(), "preview saved");

    // One line a collaborator can use to reproduce this terrain.
    println!("{}", serde_json::to_string(&params)?);

    Ok(())
}
