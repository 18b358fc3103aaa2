//! Deterministic triangulated-grid mesh
//!
//! A concrete `MeshGraph` for the demo binary and tests: interior points on a
//! jittered grid, boundary points pinned to the map edge, and a single ghost
//! region fanned around the hull so every directed side has an opposite. The
//! jitter is driven by a seeded ChaCha8 stream, so the same (dimensions, seed)
//! always produces the same mesh.

use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::mesh::MeshGraph;

/// How far an interior point may move from its grid position, as a fraction
/// of the grid spacing. Kept below 0.5 so cells never fold over each other.
const JITTER: f32 = 0.35;

pub struct GridMesh {
    size: f32,
    cols: usize,
    rows: usize,
    /// Per-region position; the ghost region is last.
    region_pos: Vec<(f32, f32)>,
    /// Per-corner member regions; side `3t+k` begins at `triangles[t][k]`.
    triangles: Vec<[usize; 3]>,
    corner_pos: Vec<(f32, f32)>,
    opposite: Vec<usize>,
    /// Outgoing sides per region, ascending side id.
    region_sides: Vec<Vec<usize>>,
    num_solid_corners: usize,
}

impl GridMesh {
    /// Build a `cols` x `rows` point grid spanning a square map of the given
    /// side length. Needs at least a 2x2 grid to form any triangle.
    pub fn new(cols: usize, rows: usize, size: f32, seed: u64) -> Self {
        assert!(cols >= 2 && rows >= 2, "grid mesh needs at least 2x2 points");

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let dx = size / (cols - 1) as f32;
        let dy = size / (rows - 1) as f32;

        let num_solid_regions = cols * rows;
        let ghost = num_solid_regions;

        let mut region_pos = Vec::with_capacity(num_solid_regions + 1);
        for j in 0..rows {
            for i in 0..cols {
                let on_edge = i == 0 || j == 0 || i == cols - 1 || j == rows - 1;
                let (jx, jy) = if on_edge {
                    // Boundary ring stays exactly on the map edge
                    (0.0, 0.0)
                } else {
                    (
                        rng.gen_range(-JITTER..JITTER) * dx,
                        rng.gen_range(-JITTER..JITTER) * dy,
                    )
                };
                region_pos.push((i as f32 * dx + jx, j as f32 * dy + jy));
            }
        }
        // The ghost region has no meaningful position; nothing renders it
        region_pos.push((size * 0.5, size * 0.5));

        // Two triangles per grid square, consistently wound so that shared
        // edges run in opposite directions
        let mut triangles = Vec::with_capacity(2 * (cols - 1) * (rows - 1));
        let idx = |i: usize, j: usize| j * cols + i;
        for j in 0..rows - 1 {
            for i in 0..cols - 1 {
                let p00 = idx(i, j);
                let p10 = idx(i + 1, j);
                let p01 = idx(i, j + 1);
                let p11 = idx(i + 1, j + 1);
                triangles.push([p00, p11, p10]);
                triangles.push([p00, p01, p11]);
            }
        }
        let num_solid_corners = triangles.len();

        // Hull edges are the directed sides whose reverse is missing; wrap
        // each with a ghost triangle so the mesh closes
        let side_regions = |triangles: &[[usize; 3]], s: usize| {
            let t = s / 3;
            let k = s % 3;
            (triangles[t][k], triangles[t][(k + 1) % 3])
        };
        let mut edge_of: HashMap<(usize, usize), usize> = HashMap::new();
        for s in 0..3 * triangles.len() {
            edge_of.insert(side_regions(&triangles, s), s);
        }
        let hull: Vec<(usize, usize)> = (0..3 * triangles.len())
            .map(|s| side_regions(&triangles, s))
            .filter(|&(a, b)| !edge_of.contains_key(&(b, a)))
            .collect();
        for &(u, v) in &hull {
            triangles.push([v, u, ghost]);
        }

        // Pair up opposites now that every edge appears in both directions
        let num_sides = 3 * triangles.len();
        edge_of.clear();
        for s in 0..num_sides {
            edge_of.insert(side_regions(&triangles, s), s);
        }
        let mut opposite = vec![0usize; num_sides];
        for s in 0..num_sides {
            let (a, b) = side_regions(&triangles, s);
            opposite[s] = edge_of[&(b, a)];
        }

        // Corner positions: centroid of the member regions, ghost excluded
        let mut corner_pos = Vec::with_capacity(triangles.len());
        for tri in &triangles {
            let mut x = 0.0;
            let mut y = 0.0;
            let mut n = 0;
            for &r in tri {
                if r != ghost {
                    x += region_pos[r].0;
                    y += region_pos[r].1;
                    n += 1;
                }
            }
            corner_pos.push((x / n as f32, y / n as f32));
        }

        let mut region_sides = vec![Vec::new(); num_solid_regions + 1];
        for s in 0..num_sides {
            region_sides[side_regions(&triangles, s).0].push(s);
        }

        Self {
            size,
            cols,
            rows,
            region_pos,
            triangles,
            corner_pos,
            opposite,
            region_sides,
            num_solid_corners,
        }
    }
}

impl MeshGraph for GridMesh {
    fn num_regions(&self) -> usize {
        self.region_pos.len()
    }

    fn num_corners(&self) -> usize {
        self.triangles.len()
    }

    fn num_sides(&self) -> usize {
        3 * self.triangles.len()
    }

    fn num_solid_regions(&self) -> usize {
        self.region_pos.len() - 1
    }

    fn num_solid_corners(&self) -> usize {
        self.num_solid_corners
    }

    fn num_solid_sides(&self) -> usize {
        3 * self.num_solid_corners
    }

    fn map_size(&self) -> f32 {
        self.size
    }

    fn region_x(&self, r: usize) -> f32 {
        self.region_pos[r].0
    }

    fn region_y(&self, r: usize) -> f32 {
        self.region_pos[r].1
    }

    fn corner_x(&self, t: usize) -> f32 {
        self.corner_pos[t].0
    }

    fn corner_y(&self, t: usize) -> f32 {
        self.corner_pos[t].1
    }

    fn regions_around_region(&self, r: usize, out: &mut Vec<usize>) {
        out.clear();
        out.extend(self.region_sides[r].iter().map(|&s| self.side_end_region(s)));
    }

    fn corners_around_region(&self, r: usize, out: &mut Vec<usize>) {
        out.clear();
        out.extend(self.region_sides[r].iter().map(|&s| s / 3));
    }

    fn sides_around_corner(&self, t: usize, out: &mut Vec<usize>) {
        out.clear();
        out.extend([3 * t, 3 * t + 1, 3 * t + 2]);
    }

    fn side_begin_region(&self, s: usize) -> usize {
        self.triangles[s / 3][s % 3]
    }

    fn side_end_region(&self, s: usize) -> usize {
        self.triangles[s / 3][(s % 3 + 1) % 3]
    }

    fn side_inner_corner(&self, s: usize) -> usize {
        s / 3
    }

    fn side_outer_corner(&self, s: usize) -> usize {
        self.opposite[s] / 3
    }

    fn side_opposite(&self, s: usize) -> usize {
        self.opposite[s]
    }

    fn is_boundary_region(&self, r: usize) -> bool {
        if r >= self.cols * self.rows {
            return false;
        }
        let i = r % self.cols;
        let j = r / self.cols;
        i == 0 || j == 0 || i == self.cols - 1 || j == self.rows - 1
    }

    fn is_ghost_region(&self, r: usize) -> bool {
        r == self.cols * self.rows
    }

    fn ghost_region(&self) -> usize {
        self.cols * self.rows
    }
}
