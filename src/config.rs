//! Generation options
//!
//! Every knob the pipeline recognizes lives here as an explicit struct with
//! documented defaults, filled in at the call boundary. `calculate` never
//! merges option bags at runtime.

use serde::{Deserialize, Serialize};

/// Controls the overall shape of the landmass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeConfig {
    /// How strongly the noise is pulled toward a neutral 0.5, rounding the
    /// island outline. 0.0 = raw noise, 1.0 = a plain disc.
    pub round: f32,
    /// How much of the square the landmass fills. Higher values push the
    /// coastline toward the map edges.
    pub inflate: f32,
    /// Octave weights for the fractal noise; octave `i` samples the noise at
    /// frequency `2^i`.
    pub amplitudes: Vec<f32>,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            round: 0.5,
            inflate: 0.4,
            amplitudes: vec![1.0 / 2.0, 1.0 / 4.0, 1.0 / 8.0, 1.0 / 16.0],
        }
    }
}

/// Climate bias knobs applied during temperature and moisture assignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BiomeBias {
    /// Added to temperature at the north edge of the map.
    pub north_temperature: f32,
    /// Added to temperature at the south edge of the map.
    pub south_temperature: f32,
    /// Shifts the moisture band: land moisture is redistributed into
    /// `[moisture, 1 + moisture]`.
    pub moisture: f32,
}

/// All options for one `calculate` run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub shape: ShapeConfig,
    /// How many spring candidates actually become rivers.
    pub num_rivers: usize,
    /// Seed for the drainage RNG (elevation BFS traversal-order rotation).
    pub drainage_seed: u64,
    /// Seed for the river RNG (spring shuffle).
    pub river_seed: u64,
    pub biome_bias: BiomeBias,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            shape: ShapeConfig::default(),
            num_rivers: 30,
            drainage_seed: 0,
            river_seed: 0,
            biome_bias: BiomeBias::default(),
        }
    }
}
