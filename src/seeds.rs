//! Seed management for map generation
//!
//! Each generation system gets its own seed, derived from a master seed by
//! default, so one system can be re-rolled while the others stay fixed.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Seeds for every randomized system in the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Mesh point jitter
    pub mesh: u64,
    /// Noise function construction (landmass shape)
    pub noise: u64,
    /// Drainage BFS traversal-order rotation
    pub drainage: u64,
    /// River spring selection shuffle
    pub rivers: u64,
}

impl MapSeeds {
    /// Derive all system seeds deterministically from one master seed.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            mesh: derive_seed(master, "mesh"),
            noise: derive_seed(master, "noise"),
            drainage: derive_seed(master, "drainage"),
            rivers: derive_seed(master, "rivers"),
        }
    }

    /// Create with explicit seeds for each system.
    pub fn explicit(mesh: u64, noise: u64, drainage: u64, rivers: u64) -> Self {
        Self {
            master: mesh,
            mesh,
            noise,
            drainage,
            rivers,
        }
    }
}

/// Derive a sub-seed from a master seed and a system name.
fn derive_seed(master: u64, system: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    system.hash(&mut hasher);
    hasher.finish()
}

impl std::fmt::Display for MapSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MapSeeds {{ master: {}, mesh: {}, noise: {}, drainage: {}, rivers: {} }}",
            self.master, self.mesh, self.noise, self.drainage, self.rivers,
        )
    }
}
