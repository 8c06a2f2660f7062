// Generates and saves 257×257 terrain images:
// grayscale height maps at three noise decay factors,
// plus a color-banded render with the water line at the midpoint elevation.

use image::{GrayImage, Luma};
use std::path::Path;
use terrain::{DiamondSquare2D, GenerationParams, extremes, flatten2, to_terrain_image};

fn save_grayscale(grid: &[Vec<f32>], filename: &str) {
    let size = grid.len();
    // Find min/max
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for row in grid {
        for &v in row {
            min = min.min(v);
            max = max.max(v);
        }
    }
    let mut img = GrayImage::new(size as u32, size as u32);
    for z in 0..size {
        for x in 0..size {
            let v = grid[z][x];
            let norm = if (max - min).abs() < f32::EPSILON {
                0.5
            } else {
                (v - min) / (max - min)
            };
            let gray = (norm * 255.0).round() as u8;
            img.put_pixel(x as u32, z as u32, Luma([gray]));
        }
    }
    img.save(Path::new(filename)).unwrap();
    println!("Saved {}", filename);
}

fn main() {
    // The decay factor controls how quickly fine-scale noise fades:
    // low values give smooth hills, high values stay craggy.
    for &decay in &[0.3f32, 0.5, 0.8] {
        let params = GenerationParams {
            n: 8,
            noise_decay_factor: decay,
            ..Default::default()
        };
        let map = DiamondSquare2D::new(params).unwrap().generate();
        save_grayscale(&map, &format!("terrain_decay_{decay}.png"));
    }

    // Color-banded render of the default terrain.
    let params = GenerationParams { n: 8, ..Default::default() };
    let size = params.nodes_per_side();
    let map = DiamondSquare2D::new(params).unwrap().generate();
    let ext = extremes(&map).unwrap();
    let rgb = to_terrain_image(&flatten2(&map), &ext);
    image::save_buffer(
        "terrain_banded.png",
        &rgb,
        size as u32,
        size as u32,
        image::ColorType::Rgb8,
    )
    .unwrap();
    println!("Saved terrain_banded.png (water level {:.2})", ext.water_level());
}
