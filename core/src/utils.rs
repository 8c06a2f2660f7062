use crate::errors::TerrainError;

// Fraction of the above-water span where grass gives way to rock.
const MOUNTAIN_FRACTION: f32 = 0.55;
// Fraction of the above-water span where rock gives way to snow.
const SNOW_FRACTION: f32 = 0.85;

// 2D height map: row-major Vec<Vec<f32>> of size S×S
// access as `map[z][x]`.
pub type HeightMap2D = Vec<Vec<f32>>;

// flatten a 2D height map (row-major) into a single Vec<f32>
// For feeding the mesh builder and image buffers
pub fn flatten2(map: &HeightMap2D) -> Vec<f32> {
    map.iter().flat_map(|row| row.iter().cloned()).collect()
}

// Lowest and highest node of a terrain, found in one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremes {
    pub min: f32,
    pub max: f32,
}

impl Extremes {
    // The water plane sits halfway between the lowest and highest node.
    pub fn water_level(&self) -> f32 {
        (self.min + self.max) / 2.0
    }
}

// Scan the map once for its lowest and highest node.
pub fn extremes(map: &HeightMap2D) -> Result<Extremes, TerrainError> {
    let mut min = f32::MAX;
    let mut max = f32::MIN;
    let mut seen = false;

    for row in map.iter() {
        for &val in row.iter() {
            min = min.min(val);
            max = max.max(val);
            seen = true;
        }
    }

    if !seen {
        return Err(TerrainError::EmptyGrid);
    }
    Ok(Extremes { min, max })
}

// Linearly interpolate between two RGB triples
fn lerp_color(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    [
        (a[0] as f32 + (b[0] as f32 - a[0] as f32) * t) as u8,
        (a[1] as f32 + (b[1] as f32 - a[1] as f32) * t) as u8,
        (a[2] as f32 + (b[2] as f32 - a[2] as f32) * t) as u8,
    ]
}

// Map a height to a terrain color. Bands are anchored at the water line:
// submerged terrain is sand, then sand fades through grass and rock up to
// snow at the peaks.
pub fn height_to_rgb(h: f32, extremes: &Extremes) -> [u8; 3] {
    let water = extremes.water_level();
    let span = (extremes.max - water).max(f32::EPSILON);
    let mountain = water + span * MOUNTAIN_FRACTION;
    let snow = water + span * SNOW_FRACTION;

    if h < water {
        [194, 178, 128] // sea floor stays sand
    } else if h < mountain {
        let t = (mountain - h) / (mountain - water);
        lerp_color([34, 139, 34], [194, 178, 128], t) // grass toward the beach
    } else if h < snow {
        let t = (snow - h) / (snow - mountain);
        lerp_color([128, 128, 128], [34, 139, 34], t) // rock below the snow line
    } else {
        let t = ((extremes.max - h) / (extremes.max - snow).max(f32::EPSILON)).clamp(0.0, 1.0);
        lerp_color([240, 240, 240], [128, 128, 128], t) // snow caps
    }
}

// Convert a flat &[f32] height buffer into an RGB byte buffer
pub fn to_terrain_image(flat: &[f32], extremes: &Extremes) -> Vec<u8> {
    let mut buf = Vec::with_capacity(flat.len() * 3);
    for &h in flat {
        let [r, g, b] = height_to_rgb(h, extremes);
        buf.extend_from_slice(&[r, g, b]);
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::{Extremes, extremes, flatten2, height_to_rgb, to_terrain_image};
    use crate::errors::TerrainError;

    #[test]
    fn extremes_of_constant_grid() {
        let map = vec![vec![7.0f32; 4]; 4];
        let ext = extremes(&map).unwrap();
        assert_eq!(ext.min, 7.0);
        assert_eq!(ext.max, 7.0);
    }

    #[test]
    fn extremes_of_small_grid() {
        let map = vec![vec![1.0, 5.0], vec![3.0, 9.0]];
        let ext = extremes(&map).unwrap();
        assert_eq!(ext.min, 1.0);
        assert_eq!(ext.max, 9.0);
    }

    #[test]
    fn extremes_of_empty_grid_fails() {
        let empty: super::HeightMap2D = Vec::new();
        assert!(matches!(extremes(&empty), Err(TerrainError::EmptyGrid)));
    }

    #[test]
    fn water_level_is_the_midpoint() {
        let ext = Extremes { min: 2.0, max: 10.0 };
        assert_eq!(ext.water_level(), 6.0);
    }

    #[test]
    fn flatten2_is_row_major() {
        let map = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        assert_eq!(flatten2(&map), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn submerged_heights_are_sand() {
        let ext = Extremes { min: 0.0, max: 10.0 };
        // everything below the water line at 5.0
        assert_eq!(height_to_rgb(0.0, &ext), [194, 178, 128]);
        assert_eq!(height_to_rgb(4.9, &ext), [194, 178, 128]);
    }

    #[test]
    fn peaks_are_snow() {
        let ext = Extremes { min: 0.0, max: 10.0 };
        assert_eq!(height_to_rgb(10.0, &ext), [240, 240, 240]);
    }

    #[test]
    fn image_buffer_is_three_bytes_per_node() {
        let map = vec![vec![1.0, 5.0], vec![3.0, 9.0]];
        let ext = extremes(&map).unwrap();
        let buf = to_terrain_image(&flatten2(&map), &ext);
        assert_eq!(buf.len(), 4 * 3);
    }
}
