//! Map data container and the generation pipeline
//!
//! Bundles every per-element array the pipeline produces and runs the stages
//! in their fixed dependency order: water, ocean, elevation, rivers,
//! moisture, coast, temperature, biome. Each stage reads only the outputs of
//! earlier stages plus the mesh.

use std::collections::HashMap;

use noise::NoiseFn;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::biomes::{self, Biome};
use crate::config::MapConfig;
use crate::elevation;
use crate::mesh::MeshGraph;
use crate::moisture;
use crate::rivers;
use crate::water;

/// All generated terrain data over one mesh.
///
/// Arrays are indexed by mesh element id and sized from the mesh's counts at
/// the start of every `calculate` call, so a run never observes a previous
/// run's values. Re-running with the same noise and config produces
/// identical arrays.
pub struct TerrainMap<M: MeshGraph> {
    pub mesh: M,
    /// Region is water (ocean or lake)
    pub water: Vec<bool>,
    /// Region is water and reachable from the map boundary
    pub ocean: Vec<bool>,
    /// Non-ocean region adjacent to an ocean region
    pub coast: Vec<bool>,
    /// Per-corner BFS distance to the nearest coastline corner
    pub coast_distance: Vec<Option<u32>>,
    /// Per-corner elevation, negative under the ocean
    pub corner_elevation: Vec<f32>,
    /// Per-corner side leading toward the coast
    pub downslope: Vec<Option<usize>>,
    /// Per-region elevation (mean of incident corners)
    pub elevation: Vec<f32>,
    /// Corners eligible as river sources, shuffled by the river seed
    pub spring_corners: Vec<usize>,
    /// The springs actually producing flow
    pub river_corners: Vec<usize>,
    /// River flow units routed through each directed side
    pub flow: Vec<u32>,
    /// Per-region BFS distance to the nearest moisture seed
    pub water_distance: Vec<Option<u32>>,
    /// Per-region moisture in the configured band
    pub moisture: Vec<f32>,
    /// Per-region temperature (0 cold .. 1 hot, bias can exceed)
    pub temperature: Vec<f32>,
    /// Final classification
    pub biome: Vec<Biome>,
}

impl<M: MeshGraph> TerrainMap<M> {
    pub fn new(mesh: M) -> Self {
        Self {
            mesh,
            water: Vec::new(),
            ocean: Vec::new(),
            coast: Vec::new(),
            coast_distance: Vec::new(),
            corner_elevation: Vec::new(),
            downslope: Vec::new(),
            elevation: Vec::new(),
            spring_corners: Vec::new(),
            river_corners: Vec::new(),
            flow: Vec::new(),
            water_distance: Vec::new(),
            moisture: Vec::new(),
            temperature: Vec::new(),
            biome: Vec::new(),
        }
    }

    /// Run the full pipeline, overwriting every output array.
    pub fn calculate(&mut self, noise: &impl NoiseFn<f64, 2>, config: &MapConfig) {
        water::assign_water(&mut self.water, &self.mesh, noise, &config.shape);
        water::assign_ocean(&mut self.ocean, &self.mesh, &self.water);

        let mut drainage_rng = ChaCha8Rng::seed_from_u64(config.drainage_seed);
        elevation::assign_corner_elevation(
            &mut self.corner_elevation,
            &mut self.coast_distance,
            &mut self.downslope,
            &self.mesh,
            &self.ocean,
            &self.water,
            &mut drainage_rng,
        );
        elevation::redistribute_corner_elevation(&mut self.corner_elevation, &self.mesh);
        elevation::assign_region_elevation(
            &mut self.elevation,
            &self.mesh,
            &self.corner_elevation,
            &self.ocean,
        );

        self.spring_corners =
            rivers::find_spring_corners(&self.mesh, &self.water, &self.corner_elevation);
        let mut river_rng = ChaCha8Rng::seed_from_u64(config.river_seed);
        rivers::shuffle_springs(&mut self.spring_corners, &mut river_rng);
        self.river_corners = self
            .spring_corners
            .iter()
            .copied()
            .take(config.num_rivers)
            .collect();
        rivers::assign_side_flow(&mut self.flow, &self.mesh, &self.downslope, &self.river_corners);

        let seeds = moisture::find_moisture_seeds(&self.mesh, &self.flow, &self.ocean, &self.water);
        moisture::assign_moisture(
            &mut self.moisture,
            &mut self.water_distance,
            &self.mesh,
            &self.water,
            &seeds,
        );
        moisture::redistribute_moisture(
            &mut self.moisture,
            &self.mesh,
            &self.water,
            config.biome_bias.moisture,
            1.0 + config.biome_bias.moisture,
        );

        biomes::assign_coast(&mut self.coast, &self.mesh, &self.ocean);
        biomes::assign_temperature(
            &mut self.temperature,
            &self.mesh,
            &self.elevation,
            config.biome_bias.north_temperature,
            config.biome_bias.south_temperature,
        );
        biomes::assign_biome(
            &mut self.biome,
            &self.mesh,
            &self.ocean,
            &self.water,
            &self.coast,
            &self.temperature,
            &self.moisture,
        );
    }

    /// Summary counts over the solid regions and sides.
    pub fn stats(&self) -> MapStats {
        let solid = self.mesh.num_solid_regions();
        let land = (0..solid).filter(|&r| !self.water[r]).count();
        let ocean = (0..solid).filter(|&r| self.ocean[r]).count();
        let lakes = (0..solid).filter(|&r| self.water[r] && !self.ocean[r]).count();
        let coast = (0..solid).filter(|&r| self.coast[r]).count();
        let river_sides = (0..self.mesh.num_solid_sides())
            .filter(|&s| self.flow[s] > 0)
            .count();

        let mut biome_counts = HashMap::new();
        for r in 0..solid {
            *biome_counts.entry(self.biome[r]).or_insert(0) += 1;
        }

        MapStats {
            total_regions: solid,
            land_regions: land,
            ocean_regions: ocean,
            lake_regions: lakes,
            coast_regions: coast,
            spring_corners: self.spring_corners.len(),
            river_sides,
            biome_counts,
        }
    }
}

/// Counts reported after generation.
#[derive(Clone, Debug)]
pub struct MapStats {
    pub total_regions: usize,
    pub land_regions: usize,
    pub ocean_regions: usize,
    pub lake_regions: usize,
    pub coast_regions: usize,
    pub spring_corners: usize,
    pub river_sides: usize,
    pub biome_counts: HashMap<Biome, usize>,
}

impl MapStats {
    pub fn land_percentage(&self) -> f64 {
        100.0 * self.land_regions as f64 / self.total_regions.max(1) as f64
    }
}
