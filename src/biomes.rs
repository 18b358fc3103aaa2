//! Biome classification
//!
//! The final stage: a pure decision tree over (ocean, water, coast,
//! temperature, moisture), plus the coast and temperature fields it reads.
//! Temperature blends a north/south bias by latitude on top of elevation,
//! so the same island can read as arctic at one pole and tropical at the
//! other.

use serde::{Deserialize, Serialize};

use crate::mesh::MeshGraph;
use crate::water::mix;

/// Discrete terrain label for a region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    #[default]
    Ocean,
    Marsh,
    Ice,
    Lake,
    Beach,
    Snow,
    Tundra,
    Bare,
    Scorched,
    Taiga,
    Shrubland,
    TemperateDesert,
    TemperateRainForest,
    TemperateDeciduousForest,
    Grassland,
    TropicalRainForest,
    TropicalSeasonalForest,
    SubtropicalDesert,
}

impl Biome {
    /// Render color (RGB).
    pub fn color(&self) -> [u8; 3] {
        match self {
            Biome::Ocean => [68, 68, 122],
            Biome::Marsh => [47, 102, 102],
            Biome::Ice => [153, 255, 255],
            Biome::Lake => [51, 102, 153],
            Biome::Beach => [160, 144, 119],
            Biome::Snow => [255, 255, 255],
            Biome::Tundra => [187, 187, 170],
            Biome::Bare => [136, 136, 136],
            Biome::Scorched => [85, 85, 85],
            Biome::Taiga => [153, 170, 119],
            Biome::Shrubland => [136, 153, 119],
            Biome::TemperateDesert => [201, 210, 155],
            Biome::TemperateRainForest => [68, 136, 85],
            Biome::TemperateDeciduousForest => [103, 148, 89],
            Biome::Grassland => [136, 170, 85],
            Biome::TropicalRainForest => [51, 119, 85],
            Biome::TropicalSeasonalForest => [85, 153, 68],
            Biome::SubtropicalDesert => [210, 185, 139],
        }
    }

    /// Single-character glyph for terminal previews.
    pub fn glyph(&self) -> char {
        match self {
            Biome::Ocean => '~',
            Biome::Marsh => '&',
            Biome::Ice => '#',
            Biome::Lake => 'o',
            Biome::Beach => '.',
            Biome::Snow => '*',
            Biome::Tundra => '-',
            Biome::Bare => ':',
            Biome::Scorched => '_',
            Biome::Taiga => 'T',
            Biome::Shrubland => 's',
            Biome::TemperateDesert => 'd',
            Biome::TemperateRainForest => 'R',
            Biome::TemperateDeciduousForest => 'F',
            Biome::Grassland => '"',
            Biome::TropicalRainForest => 'J',
            Biome::TropicalSeasonalForest => 'j',
            Biome::SubtropicalDesert => 'D',
        }
    }
}

/// Classify one region. Pure function of its five inputs, evaluated in a
/// fixed order: ocean wins outright, then non-ocean water splits by
/// temperature, then coast, then the temperature/moisture table.
pub fn classify(ocean: bool, water: bool, coast: bool, temperature: f32, moisture: f32) -> Biome {
    if ocean {
        Biome::Ocean
    } else if water {
        if temperature > 0.9 {
            Biome::Marsh
        } else if temperature < 0.2 {
            Biome::Ice
        } else {
            Biome::Lake
        }
    } else if coast {
        Biome::Beach
    } else if temperature < 0.2 {
        if moisture > 0.50 {
            Biome::Snow
        } else if moisture > 0.33 {
            Biome::Tundra
        } else if moisture > 0.16 {
            Biome::Bare
        } else {
            Biome::Scorched
        }
    } else if temperature < 0.4 {
        if moisture > 0.66 {
            Biome::Taiga
        } else if moisture > 0.33 {
            Biome::Shrubland
        } else {
            Biome::TemperateDesert
        }
    } else if temperature < 0.7 {
        if moisture > 0.83 {
            Biome::TemperateRainForest
        } else if moisture > 0.50 {
            Biome::TemperateDeciduousForest
        } else if moisture > 0.16 {
            Biome::Grassland
        } else {
            Biome::TemperateDesert
        }
    } else if moisture > 0.66 {
        Biome::TropicalRainForest
    } else if moisture > 0.33 {
        Biome::TropicalSeasonalForest
    } else if moisture > 0.16 {
        Biome::Grassland
    } else {
        Biome::SubtropicalDesert
    }
}

/// A coast region is a non-ocean region with at least one ocean neighbor.
pub fn assign_coast(coast: &mut Vec<bool>, mesh: &impl MeshGraph, ocean: &[bool]) {
    coast.clear();
    coast.resize(mesh.num_regions(), false);

    let mut out_r = Vec::new();
    for r1 in 0..mesh.num_regions() {
        if ocean[r1] {
            continue;
        }
        mesh.regions_around_region(r1, &mut out_r);
        if out_r.iter().any(|&r2| ocean[r2]) {
            coast[r1] = true;
        }
    }
}

/// Temperature from elevation and latitude.
///
/// The nominal range is 0.0 = cold to 1.0 = hot, but bias can push past it.
/// The north edge of the map gets `bias_north` added, the south edge
/// `bias_south`, blended linearly in between.
pub fn assign_temperature(
    temperature: &mut Vec<f32>,
    mesh: &impl MeshGraph,
    region_elevation: &[f32],
    bias_north: f32,
    bias_south: f32,
) {
    temperature.clear();
    temperature.resize(mesh.num_regions(), 0.0);

    for r in 0..mesh.num_regions() {
        let latitude = mesh.region_y(r) / mesh.map_size();
        let bias = mix(bias_north, bias_south, latitude);
        temperature[r] = 1.0 - region_elevation[r] + bias;
    }
}

/// Apply `classify` to every region.
pub fn assign_biome(
    biome: &mut Vec<Biome>,
    mesh: &impl MeshGraph,
    ocean: &[bool],
    water: &[bool],
    coast: &[bool],
    temperature: &[f32],
    moisture: &[f32],
) {
    biome.clear();
    biome.resize(mesh.num_regions(), Biome::Ocean);
    for r in 0..mesh.num_regions() {
        biome[r] = classify(ocean[r], water[r], coast[r], temperature[r], moisture[r]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid_mesh::GridMesh;
    use crate::water::assign_ocean;

    #[test]
    fn test_ocean_wins_regardless_of_other_inputs() {
        assert_eq!(classify(true, true, true, 0.95, 0.95), Biome::Ocean);
        assert_eq!(classify(true, false, false, 0.0, 0.0), Biome::Ocean);
    }

    #[test]
    fn test_beach_and_ocean_scenario() {
        // One ocean region next to one coastal land region
        assert_eq!(classify(true, true, false, 0.5, 0.5), Biome::Ocean);
        assert_eq!(classify(false, false, true, 0.5, 0.5), Biome::Beach);
    }

    #[test]
    fn test_lake_splits_by_temperature() {
        assert_eq!(classify(false, true, false, 0.95, 0.5), Biome::Marsh);
        assert_eq!(classify(false, true, false, 0.1, 0.5), Biome::Ice);
        assert_eq!(classify(false, true, false, 0.5, 0.5), Biome::Lake);
    }

    #[test]
    fn test_cold_band_moisture_thresholds() {
        assert_eq!(classify(false, false, false, 0.1, 0.6), Biome::Snow);
        assert_eq!(classify(false, false, false, 0.1, 0.40), Biome::Tundra);
        assert_eq!(classify(false, false, false, 0.1, 0.2), Biome::Bare);
        assert_eq!(classify(false, false, false, 0.1, 0.1), Biome::Scorched);
    }

    #[test]
    fn test_warm_bands() {
        assert_eq!(classify(false, false, false, 0.3, 0.7), Biome::Taiga);
        assert_eq!(classify(false, false, false, 0.3, 0.4), Biome::Shrubland);
        assert_eq!(classify(false, false, false, 0.3, 0.1), Biome::TemperateDesert);
        assert_eq!(
            classify(false, false, false, 0.5, 0.9),
            Biome::TemperateRainForest
        );
        assert_eq!(
            classify(false, false, false, 0.5, 0.6),
            Biome::TemperateDeciduousForest
        );
        assert_eq!(classify(false, false, false, 0.5, 0.2), Biome::Grassland);
        assert_eq!(classify(false, false, false, 0.8, 0.7), Biome::TropicalRainForest);
        assert_eq!(
            classify(false, false, false, 0.8, 0.4),
            Biome::TropicalSeasonalForest
        );
        assert_eq!(classify(false, false, false, 0.8, 0.1), Biome::SubtropicalDesert);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let a = classify(false, false, false, 0.42, 0.58);
        let b = classify(false, false, false, 0.42, 0.58);
        assert_eq!(a, b);
    }

    #[test]
    fn test_coast_regions_border_the_ocean() {
        let mesh = GridMesh::new(7, 7, 1000.0, 8);
        let mut water = vec![false; mesh.num_regions()];
        water[mesh.ghost_region()] = true;
        for r in 0..mesh.num_solid_regions() {
            if mesh.is_boundary_region(r) {
                water[r] = true;
            }
        }
        let mut ocean = Vec::new();
        assign_ocean(&mut ocean, &mesh, &water);

        let mut coast = Vec::new();
        assign_coast(&mut coast, &mesh, &ocean);

        let mut out_r = Vec::new();
        for r in 0..mesh.num_regions() {
            if coast[r] {
                assert!(!ocean[r]);
                mesh.regions_around_region(r, &mut out_r);
                assert!(out_r.iter().any(|&n| ocean[n]));
            }
        }
        assert!(coast.iter().any(|&c| c));
    }

    #[test]
    fn test_temperature_blends_bias_by_latitude() {
        let mesh = GridMesh::new(5, 5, 1000.0, 1);
        let elevation = vec![0.0; mesh.num_regions()];
        let mut temperature = Vec::new();
        assign_temperature(&mut temperature, &mesh, &elevation, 0.5, -0.5);

        // North edge (y = 0) gets the full north bias
        assert!((temperature[0] - 1.5).abs() < 1e-6);
        // South edge gets the full south bias
        let south = 4 * 5;
        assert!((temperature[south] - 0.5).abs() < 1e-6);
    }
}
