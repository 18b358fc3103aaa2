//! Moisture from fresh water
//!
//! Riverbanks and lakeshores are the wettest places on the map; moisture
//! falls off with graph distance from them. Oceans and lakes are pegged at
//! full moisture. A final redistribution pass spreads land moisture evenly
//! across a configurable band so the biome thresholds always see the full
//! range.

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::mesh::MeshGraph;

/// Regions touching a side that carries river flow in either direction.
pub fn find_riverbank_regions(seeds: &mut Vec<usize>, mesh: &impl MeshGraph, flow: &[u32]) {
    for s in 0..mesh.num_solid_sides() {
        if flow[s] > 0 {
            seeds.push(mesh.side_begin_region(s));
            seeds.push(mesh.side_end_region(s));
        }
    }
}

/// Lake regions and their cross-side neighbors.
pub fn find_lakeshore_regions(
    seeds: &mut Vec<usize>,
    mesh: &impl MeshGraph,
    ocean: &[bool],
    water: &[bool],
) {
    for s in 0..mesh.num_solid_sides() {
        let r0 = mesh.side_begin_region(s);
        let r1 = mesh.side_end_region(s);
        if water[r0] && !ocean[r0] {
            seeds.push(r0);
            seeds.push(r1);
        }
    }
}

/// The full moisture seed set, as a sorted deduplicated vector so the BFS
/// visits seeds in the same order on every run and platform.
pub fn find_moisture_seeds(
    mesh: &impl MeshGraph,
    flow: &[u32],
    ocean: &[bool],
    water: &[bool],
) -> Vec<usize> {
    let mut seeds = Vec::new();
    find_riverbank_regions(&mut seeds, mesh, flow);
    find_lakeshore_regions(&mut seeds, mesh, ocean, water);
    seeds.sort_unstable();
    seeds.dedup();
    seeds
}

/// Assign per-region moisture from distance to the nearest seed.
///
/// Multi-source BFS over land regions only; the fill never expands into
/// water. Land moisture is `1 - sqrt(d / max_distance)`; water regions get
/// 1.0 outright. With an empty seed set every land region keeps distance
/// None and reads as fully moist, which the redistribution pass then
/// flattens by rank.
pub fn assign_moisture(
    moisture: &mut Vec<f32>,
    water_distance: &mut Vec<Option<u32>>,
    mesh: &impl MeshGraph,
    water: &[bool],
    seeds: &[usize],
) {
    let num_regions = mesh.num_regions();
    moisture.clear();
    moisture.resize(num_regions, 0.0);
    water_distance.clear();
    water_distance.resize(num_regions, None);

    let mut queue: VecDeque<usize> = seeds.iter().copied().collect();
    for &r in seeds {
        water_distance[r] = Some(0);
    }

    let mut max_distance = 1u32;
    let mut out_r = Vec::new();
    while let Some(current) = queue.pop_front() {
        mesh.regions_around_region(current, &mut out_r);
        for &neighbor in &out_r {
            if !water[neighbor] && water_distance[neighbor].is_none() {
                let new_distance = 1 + water_distance[current].unwrap_or(0);
                water_distance[neighbor] = Some(new_distance);
                if new_distance > max_distance {
                    max_distance = new_distance;
                }
                queue.push_back(neighbor);
            }
        }
    }

    for r in 0..num_regions {
        moisture[r] = if water[r] {
            1.0
        } else {
            let d = water_distance[r].unwrap_or(0) as f32;
            1.0 - (d / max_distance as f32).sqrt()
        };
    }
}

/// Spread land moisture evenly between `min_moisture` and `max_moisture`,
/// keeping rank order.
pub fn redistribute_moisture(
    moisture: &mut [f32],
    mesh: &impl MeshGraph,
    water: &[bool],
    min_moisture: f32,
    max_moisture: f32,
) {
    let mut land: Vec<usize> = (0..mesh.num_solid_regions())
        .filter(|&r| !water[r])
        .collect();
    land.sort_by(|&a, &b| {
        moisture[a]
            .partial_cmp(&moisture[b])
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });

    let denominator = (land.len().saturating_sub(1)).max(1) as f32;
    for (i, &r) in land.iter().enumerate() {
        moisture[r] = min_moisture + (max_moisture - min_moisture) * i as f32 / denominator;
    }
}
