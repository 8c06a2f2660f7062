// Renders a 513×513 hillshaded terrain preview with the water plane
// flattening everything below the midpoint elevation.

use image::{Rgb, RgbImage};
use palette::{Gradient, LinSrgb};
use std::path::Path;
use terrain::utils::HeightMap2D;
use terrain::{DiamondSquare2D, GenerationParams, extremes};

// Compute simple hillshade for a height-map
// `z_scale` adjusts vertical exaggeration
fn hillshade(map: &HeightMap2D, z_scale: f32) -> Vec<Vec<f32>> {
    let size = map.len();
    let mut shade = vec![vec![0.0; size]; size];
    let azimuth = std::f32::consts::PI / 4.0; // 45°
    let altitude = std::f32::consts::PI / 4.0; // 45°
    let (sin_alt, cos_alt) = altitude.sin_cos();

    for z in 1..size - 1 {
        for x in 1..size - 1 {
            // 3×3 neighborhood finite differences
            let dydx = ((map[z][x + 1] - map[z][x - 1]) / 2.0) * z_scale;
            let dydz = ((map[z + 1][x] - map[z - 1][x]) / 2.0) * z_scale;
            // Surface normal
            let nx = -dydx;
            let nz = -dydz;
            let ny = 1.0;
            let len = (nx * nx + ny * ny + nz * nz).sqrt();
            let (nx, ny, nz) = (nx / len, ny / len, nz / len);
            // Light vector from azimuth/altitude
            let lx = azimuth.cos() * cos_alt;
            let lz = azimuth.sin() * cos_alt;
            let ly = sin_alt;
            // Lambertian dot
            shade[z][x] = (nx * lx + ny * ly + nz * lz).max(0.0);
        }
    }
    shade
}

fn main() {
    let params = GenerationParams {
        n: 9, // 2^9 + 1 = 513
        ..Default::default()
    };
    let size = params.nodes_per_side();
    let terrain = DiamondSquare2D::new(params).unwrap().generate();
    let ext = extremes(&terrain).unwrap();
    let water = ext.water_level();

    // Everything below the water line sits at the water level, the way the
    // water plane hides it in-engine.
    let mut leveled = terrain.clone();
    for row in leveled.iter_mut() {
        for v in row.iter_mut() {
            *v = v.max(water);
        }
    }

    let shade = hillshade(&leveled, 1.0);

    // Gradient over normalized heights. The water line lands exactly at
    // 0.5 because the plane sits at the midpoint elevation.
    let gradient = Gradient::with_domain(vec![
        (0.50, LinSrgb::new(0.1, 0.3, 0.6)),  // water surface
        (0.52, LinSrgb::new(0.8, 0.8, 0.5)),  // sand
        (0.65, LinSrgb::new(0.1, 0.6, 0.2)),  // green
        (0.85, LinSrgb::new(0.5, 0.4, 0.3)),  // rock
        (1.00, LinSrgb::new(1.0, 1.0, 1.0)),  // snow
    ]);

    // Build final image
    let mut img = RgbImage::new(size as u32, size as u32);
    for z in 0..size {
        for x in 0..size {
            let h = leveled[z][x];
            let norm = if (ext.max - ext.min).abs() < f32::EPSILON {
                0.5
            } else {
                (h - ext.min) / (ext.max - ext.min)
            };
            // Base color from gradient
            let col: LinSrgb = gradient.get(norm);
            let rgb = col.into_format::<u8>();
            // Apply hillshade
            let light = (shade[z][x] * 0.5 + 0.5).clamp(0.0, 1.0);
            let pixel = Rgb([
                (rgb.red as f32 * light) as u8,
                (rgb.green as f32 * light) as u8,
                (rgb.blue as f32 * light) as u8,
            ]);
            img.put_pixel(x as u32, z as u32, pixel);
        }
    }

    // Save
    let path = Path::new("terrain_preview.png");
    img.save(path).unwrap();
    println!("Saved terrain preview to {:?} (water level {:.2})", path, water);
}
