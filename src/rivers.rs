//! River sources and flow accumulation
//!
//! Springs are picked from a mid-elevation band of dry corners, shuffled with
//! a seeded Fisher-Yates pass, and the chosen ones each send one unit of flow
//! down their downslope chain to the coast. Confluences accumulate, so flow
//! on a side counts the rivers routed through it.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::mesh::MeshGraph;

const MIN_SPRING_ELEVATION: f32 = 0.3;
const MAX_SPRING_ELEVATION: f32 = 0.9;

/// Corners eligible as river sources: inside the spring elevation band, with
/// no water region among the three the corner touches. Returned in ascending
/// corner order so selection is reproducible.
pub fn find_spring_corners(
    mesh: &impl MeshGraph,
    water: &[bool],
    corner_elevation: &[f32],
) -> Vec<usize> {
    let mut springs = Vec::new();
    let mut out_s = Vec::new();
    for t in 0..mesh.num_solid_corners() {
        if corner_elevation[t] < MIN_SPRING_ELEVATION
            || corner_elevation[t] > MAX_SPRING_ELEVATION
        {
            continue;
        }
        mesh.sides_around_corner(t, &mut out_s);
        let touches_water = out_s
            .iter()
            .any(|&s| water[mesh.side_begin_region(s)]);
        if !touches_water {
            springs.push(t);
        }
    }
    springs
}

/// Seeded Fisher-Yates shuffle; the caller takes the first N entries as the
/// actual river sources.
pub fn shuffle_springs(springs: &mut [usize], rng: &mut ChaCha8Rng) {
    for i in (1..springs.len()).rev() {
        let j = rng.gen_range(0..=i);
        springs.swap(i, j);
    }
}

/// Route one unit of flow from each river source down its downslope chain.
///
/// A walk stops when the downslope pointer is unset (the coast), when the
/// next corner would repeat the current one, or after `num_corners` steps.
/// The step bound truncates a river caught in a degenerate cycle at an
/// elevation minimum the coast search never flagged; the rest of the map is
/// unaffected.
pub fn assign_side_flow(
    flow: &mut Vec<u32>,
    mesh: &impl MeshGraph,
    downslope: &[Option<usize>],
    rivers: &[usize],
) {
    flow.clear();
    flow.resize(mesh.num_sides(), 0);

    let max_steps = mesh.num_corners();
    for &source in rivers {
        let mut t = source;
        let mut steps = 0;
        while let Some(s) = downslope[t] {
            flow[s] += 1;
            let next = mesh.side_outer_corner(s);
            if next == t {
                break;
            }
            t = next;
            steps += 1;
            if steps >= max_steps {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elevation::{assign_corner_elevation, redistribute_corner_elevation};
    use crate::grid_mesh::GridMesh;
    use crate::water::assign_ocean;
    use rand::SeedableRng;

    fn land_map(cols: usize, rows: usize, seed: u64) -> (GridMesh, Vec<bool>, Vec<bool>) {
        let mesh = GridMesh::new(cols, rows, 1000.0, seed);
        let mut water = vec![false; mesh.num_regions()];
        water[mesh.ghost_region()] = true;
        for r in 0..mesh.num_solid_regions() {
            if mesh.is_boundary_region(r) {
                water[r] = true;
            }
        }
        let mut ocean = Vec::new();
        assign_ocean(&mut ocean, &mesh, &water);
        (mesh, water, ocean)
    }

    fn elevation_for(
        mesh: &GridMesh,
        ocean: &[bool],
        water: &[bool],
    ) -> (Vec<f32>, Vec<Option<usize>>) {
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
        redistribute_corner_elevation(&mut elevation, mesh);
        (elevation, downslope)
    }

    #[test]
    fn test_springs_stay_inside_the_band_and_off_the_water() {
        let (mesh, water, ocean) = land_map(10, 10, 17);
        let (elevation, _) = elevation_for(&mesh, &ocean, &water);
        let springs = find_spring_corners(&mesh, &water, &elevation);

        let mut out_s = Vec::new();
        for &t in &springs {
            assert!(elevation[t] >= MIN_SPRING_ELEVATION);
            assert!(elevation[t] <= MAX_SPRING_ELEVATION);
            mesh.sides_around_corner(t, &mut out_s);
            for &s in &out_s {
                assert!(!water[mesh.side_begin_region(s)]);
            }
        }
        // Ascending order makes the shuffle reproducible
        assert!(springs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_shuffle_is_a_seeded_permutation() {
        let mut a: Vec<usize> = (0..50).collect();
        let mut b = a.clone();
        let mut rng_a = ChaCha8Rng::seed_from_u64(99);
        let mut rng_b = ChaCha8Rng::seed_from_u64(99);
        shuffle_springs(&mut a, &mut rng_a);
        shuffle_springs(&mut b, &mut rng_b);
        assert_eq!(a, b);

        let mut sorted = a.clone();
        sorted.sort();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_flow_grows_downstream_along_each_river() {
        let (mesh, water, ocean) = land_map(12, 12, 3);
        let (elevation, downslope) = elevation_for(&mesh, &ocean, &water);
        let mut springs = find_spring_corners(&mesh, &water, &elevation);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        shuffle_springs(&mut springs, &mut rng);
        let rivers: Vec<usize> = springs.iter().copied().take(10).collect();

        let mut flow = Vec::new();
        assign_side_flow(&mut flow, &mesh, &downslope, &rivers);

        if rivers.is_empty() {
            assert!(flow.iter().all(|&f| f == 0));
            return;
        }
        assert!(flow.iter().any(|&f| f > 0));

        for &source in &rivers {
            let mut t = source;
            let mut previous = 0u32;
            while let Some(s) = downslope[t] {
                assert!(flow[s] >= 1);
                assert!(flow[s] >= previous, "confluences only add flow");
                previous = flow[s];
                let next = mesh.side_outer_corner(s);
                if next == t {
                    break;
                }
                t = next;
            }
        }
    }

    #[test]
    fn test_degenerate_cycle_is_truncated() {
        let (mesh, _, _) = land_map(6, 6, 1);
        // Wire two corners into a loop that never reaches the coast
        let s = 0;
        let a = mesh.side_inner_corner(s);
        let b = mesh.side_outer_corner(s);
        let mut downslope = vec![None; mesh.num_corners()];
        downslope[a] = Some(s);
        downslope[b] = Some(mesh.side_opposite(s));

        let mut flow = Vec::new();
        assign_side_flow(&mut flow, &mesh, &downslope, &[a]);

        let total: u32 = flow.iter().sum();
        assert!(total > 0);
        assert!(total <= mesh.num_corners() as u32 + 1, "walk must be bounded");
    }
}
