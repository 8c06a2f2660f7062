use crate::utils::HeightMap2D;

// Resolution cap for the water plane: 255 × 255 nodes keeps the vertex
// count under the 65534-vertex mesh ceiling.
const MAX_WATER_NODES_PER_SIDE: usize = 255;

// Flattened, renderer-ready buffers for a regular grid mesh. The consumer
// recalculates normals, tangents and bounds itself.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuffers {
    // Row-major vertex positions, (x, height, z).
    pub vertices: Vec<[f32; 3]>,
    // Vertex-index triples, two triangles per grid quad.
    pub triangles: Vec<u32>,
}

// Physical distance between adjacent nodes for a terrain spanning
// side_length: S nodes fence off S - 1 gaps.
pub fn node_spacing(side_length: f32, nodes_per_side: usize) -> f32 {
    side_length / (nodes_per_side - 1) as f32
}

// Flatten a height map into row-major vertex positions,
// (x * spacing, map[z][x], z * spacing).
pub fn build_vertices(map: &HeightMap2D, node_spacing: f32) -> Vec<[f32; 3]> {
    let size = map.len();
    let mut vertices = Vec::with_capacity(size * size);
    for z in 0..size {
        for x in 0..size {
            vertices.push([x as f32 * node_spacing, map[z][x], z as f32 * node_spacing]);
        }
    }
    vertices
}

// Index buffer for an S×S grid: each of the (S-1)×(S-1) quads splits into
// two triangles sharing the v+1 / v+S edge, wound consistently so the
// surface faces up. A pure function of S, independent of the heights.
pub fn build_triangles(nodes_per_side: usize) -> Vec<u32> {
    let quads = nodes_per_side - 1;
    let s = nodes_per_side as u32;
    let mut triangles = Vec::with_capacity(6 * quads * quads);

    for z in 0..quads {
        for x in 0..quads {
            // v is the quad's bottom-left vertex in row-major order.
            let v = (z * nodes_per_side + x) as u32;
            triangles.extend_from_slice(&[v, v + 1, v + s]);
            triangles.extend_from_slice(&[v + 1, v + s + 1, v + s]);
        }
    }

    triangles
}

// Vertex and index buffers for a generated terrain.
pub fn terrain_mesh(map: &HeightMap2D, node_spacing: f32) -> MeshBuffers {
    MeshBuffers {
        vertices: build_vertices(map, node_spacing),
        triangles: build_triangles(map.len()),
    }
}

// A flat plane at the water elevation spanning the whole terrain.
// nodes_per_unit is the plane's resolution per unit of side length.
pub fn water_mesh(side_length: f32, nodes_per_unit: usize, level: f32) -> MeshBuffers {
    let nodes_per_side =
        ((side_length * nodes_per_unit as f32) as usize).clamp(2, MAX_WATER_NODES_PER_SIDE);
    let spacing = node_spacing(side_length, nodes_per_side);

    let mut vertices = Vec::with_capacity(nodes_per_side * nodes_per_side);
    for z in 0..nodes_per_side {
        for x in 0..nodes_per_side {
            vertices.push([x as f32 * spacing, level, z as f32 * spacing]);
        }
    }

    MeshBuffers {
        vertices,
        triangles: build_triangles(nodes_per_side),
    }
}

#[cfg(test)]
mod tests {
    use super::{build_triangles, build_vertices, node_spacing, terrain_mesh, water_mesh};

    #[test]
    fn vertex_and_triangle_counts_for_a_5x5_grid() {
        let map = vec![vec![0.0f32; 5]; 5];
        let vertices = build_vertices(&map, 1.0);
        let triangles = build_triangles(5);
        assert_eq!(vertices.len(), 25);
        assert_eq!(triangles.len(), 96); // 6 indices per quad, 4×4 quads
        assert!(triangles.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn quads_share_their_diagonal_edge() {
        // Each 6-index block is one quad; its two triangles must reference
        // the same v+1 / v+S diagonal.
        for block in build_triangles(5).chunks(6) {
            assert_eq!(block[1], block[3]);
            assert_eq!(block[2], block[5]);
        }
    }

    #[test]
    fn triangles_are_wound_consistently() {
        // Both triangles of every quad must have the same orientation in
        // the x-z plane.
        let s = 4usize;
        let triangles = build_triangles(s);
        let pos = |v: u32| ((v as usize % s) as f32, (v as usize / s) as f32);
        for tri in triangles.chunks(3) {
            let (ax, az) = pos(tri[0]);
            let (bx, bz) = pos(tri[1]);
            let (cx, cz) = pos(tri[2]);
            let area2 = (bx - ax) * (cz - az) - (cx - ax) * (bz - az);
            assert!(area2 > 0.0);
        }
    }

    #[test]
    fn vertices_are_row_major_with_spacing() {
        let map = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let vertices = build_vertices(&map, 2.0);
        assert_eq!(
            vertices,
            vec![
                [0.0, 1.0, 0.0],
                [2.0, 2.0, 0.0],
                [0.0, 3.0, 2.0],
                [2.0, 4.0, 2.0],
            ]
        );
    }

    #[test]
    fn spacing_divides_by_the_gap_count() {
        // 5 nodes span 4 gaps, so a side of 100 gives 25 between nodes.
        assert_eq!(node_spacing(100.0, 5), 25.0);
    }

    #[test]
    fn terrain_mesh_spans_the_full_side_length() {
        let map = vec![vec![0.0f32; 5]; 5];
        let mesh = terrain_mesh(&map, node_spacing(100.0, 5));
        let last = mesh.vertices.last().unwrap();
        assert_eq!(last[0], 100.0);
        assert_eq!(last[2], 100.0);
    }

    #[test]
    fn water_plane_is_flat_at_the_given_level() {
        let plane = water_mesh(30.0, 2, 4.5);
        assert!(plane.vertices.iter().all(|v| v[1] == 4.5));
        assert!(plane.triangles.iter().all(|&i| (i as usize) < plane.vertices.len()));
    }

    #[test]
    fn water_plane_resolution_is_capped() {
        let plane = water_mesh(1000.0, 4, 0.0);
        assert_eq!(plane.vertices.len(), 255 * 255);
        // The capped plane still spans the full side length.
        assert!((plane.vertices.last().unwrap()[0] - 1000.0).abs() < 1e-3);
    }
}
