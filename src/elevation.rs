//! Corner elevation from coastline distance
//!
//! Elevation is a breadth-first search from the coastline corners. The search
//! also records parent pointers, which double as the downslope graph rivers
//! follow later. Lakes need all their corners at one elevation, so the search
//! deviates from plain BFS in two ways: a step across a lake-crossing side
//! costs 0 and jumps to the front of the queue, and a corner is revisited
//! whenever a strictly shorter distance shows up (one lake corner may be
//! found at distance 3 before its shore is found at distance 2).

use std::cmp::Ordering;
use std::collections::VecDeque;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::mesh::MeshGraph;

/// Ocean region elevations are clamped below this so a region ringed by
/// zero-elevation coastline corners never averages to exactly 0.
const MAX_OCEAN_ELEVATION: f32 = -0.01;

/// Target hypsometry scale for redistribution. Slightly above 1 so the
/// highest corner can still reach elevation 1.0 after remapping.
const SCALE_FACTOR: f32 = 1.1;

/// Coastline corners: corners on a side with ocean on the begin region and
/// land on the end region.
///
/// Each corner shows up in four directed sides around its coastline edge, so
/// testing this single orientation is enough to list every corner once.
pub fn find_coast_corners(mesh: &impl MeshGraph, ocean: &[bool]) -> Vec<usize> {
    let mut coasts = Vec::new();
    for s in 0..mesh.num_sides() {
        let r0 = mesh.side_begin_region(s);
        let r1 = mesh.side_end_region(s);
        if ocean[r0] && !ocean[r1] {
            coasts.push(mesh.side_inner_corner(s));
        }
    }
    coasts
}

/// Assign per-corner coastline distance, downslope pointers and elevation.
///
/// Ocean corners end up negative (deeper is more negative), land corners in
/// [0, 1]. The traversal order of each corner's sides is rotated by a random
/// offset from the drainage RNG so slopes show no directional bias.
pub fn assign_corner_elevation(
    elevation: &mut Vec<f32>,
    coast_distance: &mut Vec<Option<u32>>,
    downslope: &mut Vec<Option<usize>>,
    mesh: &impl MeshGraph,
    ocean: &[bool],
    water: &[bool],
    rng: &mut ChaCha8Rng,
) {
    let num_corners = mesh.num_corners();
    elevation.clear();
    elevation.resize(num_corners, 0.0);
    coast_distance.clear();
    coast_distance.resize(num_corners, None);
    downslope.clear();
    downslope.resize(num_corners, None);

    // A corner is an ocean corner when its first member region is ocean
    let mut out_s = Vec::new();
    let mut corner_ocean = vec![false; num_corners];
    for (t, is_ocean) in corner_ocean.iter_mut().enumerate() {
        mesh.sides_around_corner(t, &mut out_s);
        *is_ocean = ocean[mesh.side_begin_region(out_s[0])];
    }

    let lake_r = |r: usize| water[r] && !ocean[r];
    let lake_s = |s: usize| lake_r(mesh.side_begin_region(s)) || lake_r(mesh.side_end_region(s));

    let mut queue: VecDeque<usize> = find_coast_corners(mesh, ocean).into();
    for &t in &queue {
        coast_distance[t] = Some(0);
    }

    let mut ocean_max = 1u32;
    let mut land_max = 1u32;

    while let Some(current) = queue.pop_front() {
        mesh.sides_around_corner(current, &mut out_s);
        let offset = rng.gen_range(0..out_s.len());
        for i in 0..out_s.len() {
            let s = out_s[(i + offset) % out_s.len()];
            let lake = lake_s(s);
            let neighbor = mesh.side_outer_corner(s);
            let new_distance =
                coast_distance[current].unwrap_or(0) + if lake { 0 } else { 1 };
            if coast_distance[neighbor].map_or(true, |d| new_distance < d) {
                downslope[neighbor] = Some(mesh.side_opposite(s));
                coast_distance[neighbor] = Some(new_distance);
                if corner_ocean[neighbor] && new_distance > ocean_max {
                    ocean_max = new_distance;
                }
                if !corner_ocean[neighbor] && new_distance > land_max {
                    land_max = new_distance;
                }
                if lake {
                    // Same-elevation propagation across the lake interior
                    // happens before any further shore expansion
                    queue.push_front(neighbor);
                } else {
                    queue.push_back(neighbor);
                }
            }
        }
    }

    for t in 0..num_corners {
        let d = coast_distance[t].unwrap_or(0) as f32;
        elevation[t] = if corner_ocean[t] {
            -d / ocean_max as f32
        } else {
            d / land_max as f32
        };
    }
}

/// Remap land corner elevations so land area shrinks with altitude.
///
/// Corners keep their rank order; the value at normalized rank `y` becomes
/// the solution of `y = (2x - x^2) / scale`, i.e. mostly lowland and a thin
/// tail of mountains. Lake corners are remapped individually like any other
/// land corner, so a lake's interior is no longer guaranteed perfectly flat
/// after this pass; known limitation, left as is.
pub fn redistribute_corner_elevation(elevation: &mut [f32], mesh: &impl MeshGraph) {
    let mut land: Vec<usize> = (0..mesh.num_solid_corners())
        .filter(|&t| elevation[t] > 0.0)
        .collect();
    land.sort_by(|&a, &b| {
        elevation[a]
            .partial_cmp(&elevation[b])
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });

    let denominator = (land.len().saturating_sub(1)).max(1) as f32;
    for (i, &t) in land.iter().enumerate() {
        let y = i as f32 / denominator;
        let x = SCALE_FACTOR.sqrt() - (SCALE_FACTOR * (1.0 - y)).sqrt();
        elevation[t] = x.min(1.0);
    }
}

/// Region elevation is the mean of its incident corner elevations, with
/// ocean regions clamped below `MAX_OCEAN_ELEVATION`.
pub fn assign_region_elevation(
    region_elevation: &mut Vec<f32>,
    mesh: &impl MeshGraph,
    corner_elevation: &[f32],
    ocean: &[bool],
) {
    region_elevation.clear();
    region_elevation.resize(mesh.num_regions(), 0.0);

    let mut out_t = Vec::new();
    for r in 0..mesh.num_regions() {
        mesh.corners_around_region(r, &mut out_t);
        let sum: f32 = out_t.iter().map(|&t| corner_elevation[t]).sum();
        region_elevation[r] = sum / out_t.len() as f32;
        if ocean[r] && region_elevation[r] > MAX_OCEAN_ELEVATION {
            region_elevation[r] = MAX_OCEAN_ELEVATION;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid_mesh::GridMesh;
    use crate::water::assign_ocean;
    use rand::SeedableRng;

    /// Boundary ring + ghost water, everything else land.
    fn ring_ocean(mesh: &GridMesh) -> (Vec<bool>, Vec<bool>) {
        let mut water = vec![false; mesh.num_regions()];
        water[mesh.ghost_region()] = true;
        for r in 0..mesh.num_solid_regions() {
            if mesh.is_boundary_region(r) {
                water[r] = true;
            }
        }
        let mut ocean = Vec::new();
        assign_ocean(&mut ocean, mesh, &water);
        (water, ocean)
    }

    fn run_elevation(
        mesh: &GridMesh,
        ocean: &[bool],
        water: &[bool],
    ) -> (Vec<f32>, Vec<Option<u32>>, Vec<Option<usize>>) {
        let mut elevation = Vec::new();
        let mut coast_distance = Vec::new();
        let mut downslope = Vec::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assign_corner_elevation(
            &mut elevation,
            &mut coast_distance,
            &mut downslope,
            mesh,
            ocean,
            water,
            &mut rng,
        );
        (elevation, coast_distance, downslope)
    }

    #[test]
    fn test_downslope_strictly_descends_to_the_coast() {
        let mesh = GridMesh::new(8, 8, 1000.0, 21);
        let (water, ocean) = ring_ocean(&mesh);
        let (_, coast_distance, downslope) = run_elevation(&mesh, &ocean, &water);

        for t in 0..mesh.num_corners() {
            let mut current = t;
            let mut steps = 0;
            while let Some(s) = downslope[current] {
                let next = mesh.side_outer_corner(s);
                if next == current {
                    break;
                }
                assert!(
                    coast_distance[next].unwrap() < coast_distance[current].unwrap(),
                    "downslope step must lower coast distance"
                );
                current = next;
                steps += 1;
                assert!(steps <= mesh.num_corners(), "downslope chain cycled");
            }
            assert_eq!(coast_distance[current], Some(0));
        }
    }

    #[test]
    fn test_land_positive_ocean_negative() {
        let mesh = GridMesh::new(8, 8, 1000.0, 4);
        let (water, ocean) = ring_ocean(&mesh);
        let (elevation, coast_distance, _) = run_elevation(&mesh, &ocean, &water);

        for t in 0..mesh.num_corners() {
            assert!(coast_distance[t].is_some(), "every corner is reachable");
            assert!(elevation[t] >= -1.0 && elevation[t] <= 1.0);
        }
        // Some land corner away from the coast must rise above 0
        assert!(elevation.iter().any(|&e| e > 0.0));
        // Ocean corners sit at or below sea level
        assert!(elevation.iter().any(|&e| e < 0.0));
    }

    #[test]
    fn test_lake_corners_share_one_coast_distance() {
        let mesh = GridMesh::new(9, 9, 1000.0, 2);
        let (mut water, _) = ring_ocean(&mesh);
        // A 2x2 lake block in the interior
        let lake_regions = [3 * 9 + 3, 3 * 9 + 4, 4 * 9 + 3, 4 * 9 + 4];
        for &r in &lake_regions {
            water[r] = true;
        }
        let mut ocean = Vec::new();
        assign_ocean(&mut ocean, &mesh, &water);
        for &r in &lake_regions {
            assert!(!ocean[r], "interior lake must not join the ocean");
        }
        let (_, coast_distance, _) = run_elevation(&mesh, &ocean, &water);

        // Every corner incident to the lake sits on the same plateau
        let mut lake_distances = Vec::new();
        let mut out_t = Vec::new();
        for &r in &lake_regions {
            mesh.corners_around_region(r, &mut out_t);
            for &t in &out_t {
                lake_distances.push(coast_distance[t].unwrap());
            }
        }
        let first = lake_distances[0];
        assert!(lake_distances.iter().all(|&d| d == first));
    }

    #[test]
    fn test_redistribution_preserves_rank_order() {
        let mesh = GridMesh::new(8, 8, 1000.0, 5);
        let (water, ocean) = ring_ocean(&mesh);
        let (mut elevation, _, _) = run_elevation(&mesh, &ocean, &water);
        let before = elevation.clone();

        redistribute_corner_elevation(&mut elevation, &mesh);

        for t in 0..mesh.num_solid_corners() {
            if before[t] > 0.0 {
                assert!(elevation[t] > 0.0 && elevation[t] <= 1.0);
            } else {
                assert_eq!(elevation[t], before[t], "ocean corners are untouched");
            }
        }
        for a in 0..mesh.num_solid_corners() {
            for b in 0..mesh.num_solid_corners() {
                if before[a] > 0.0 && before[b] > 0.0 && before[a] < before[b] {
                    assert!(elevation[a] <= elevation[b]);
                }
            }
        }
    }

    #[test]
    fn test_ocean_regions_never_reach_zero_elevation() {
        let mesh = GridMesh::new(8, 8, 1000.0, 6);
        let (water, ocean) = ring_ocean(&mesh);
        let (mut elevation, _, _) = run_elevation(&mesh, &ocean, &water);
        redistribute_corner_elevation(&mut elevation, &mesh);

        let mut region_elevation = Vec::new();
        assign_region_elevation(&mut region_elevation, &mesh, &elevation, &ocean);

        for r in 0..mesh.num_regions() {
            if ocean[r] {
                assert!(region_elevation[r] <= MAX_OCEAN_ELEVATION);
            }
        }
    }
}
