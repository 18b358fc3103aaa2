//! ASCII rendering and export
//!
//! Renders the generated map as a glyph grid for quick terminal inspection,
//! and writes the same view to a text file with a small header.

use std::fs::File;
use std::io::{self, Write};

use chrono::Local;

use crate::map::TerrainMap;
use crate::mesh::MeshGraph;

/// Which field the glyph grid shows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AsciiMode {
    /// Biome glyphs
    Biome,
    /// Elevation gradient
    Elevation,
    /// Moisture gradient
    Moisture,
}

impl AsciiMode {
    pub fn name(&self) -> &'static str {
        match self {
            AsciiMode::Biome => "Biome",
            AsciiMode::Elevation => "Elevation",
            AsciiMode::Moisture => "Moisture",
        }
    }
}

/// Map a 0..1 value onto a density ramp.
fn gradient_char(value: f32) -> char {
    const RAMP: [char; 8] = [' ', '.', ':', '-', '=', '+', '*', '#'];
    let idx = (value.clamp(0.0, 1.0) * (RAMP.len() - 1) as f32).round() as usize;
    RAMP[idx]
}

/// Render the map as a `cols` x `rows` character grid. Each cell samples the
/// nearest solid region to its center; the mesh is small enough that a
/// brute-force scan is fine at preview resolution.
pub fn render<M: MeshGraph>(map: &TerrainMap<M>, mode: AsciiMode, cols: usize, rows: usize) -> String {
    let mesh = &map.mesh;
    let size = mesh.map_size();
    let mut out = String::with_capacity((cols + 1) * rows);

    for row in 0..rows {
        for col in 0..cols {
            let x = (col as f32 + 0.5) / cols as f32 * size;
            let y = (row as f32 + 0.5) / rows as f32 * size;
            let r = nearest_region(mesh, x, y);
            let c = match mode {
                AsciiMode::Biome => map.biome[r].glyph(),
                AsciiMode::Elevation => {
                    if map.water[r] {
                        '~'
                    } else {
                        gradient_char(map.elevation[r])
                    }
                }
                AsciiMode::Moisture => {
                    if map.water[r] {
                        '~'
                    } else {
                        gradient_char(map.moisture[r])
                    }
                }
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}

fn nearest_region(mesh: &impl MeshGraph, x: f32, y: f32) -> usize {
    let mut best = 0;
    let mut best_distance = f32::MAX;
    for r in 0..mesh.num_solid_regions() {
        let dx = mesh.region_x(r) - x;
        let dy = mesh.region_y(r) - y;
        let d = dx * dx + dy * dy;
        if d < best_distance {
            best_distance = d;
            best = r;
        }
    }
    best
}

/// Write an ASCII rendering to a text file.
pub fn export_ascii<M: MeshGraph>(
    map: &TerrainMap<M>,
    path: &str,
    mode: AsciiMode,
    cols: usize,
    rows: usize,
) -> io::Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "{} map ({}x{})", mode.name(), cols, rows)?;
    writeln!(file, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file)?;
    file.write_all(render(map, mode, cols, rows).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;
    use crate::grid_mesh::GridMesh;
    use noise::Simplex;

    #[test]
    fn test_render_has_requested_dimensions() {
        let mesh = GridMesh::new(10, 10, 1000.0, 5);
        let mut map = TerrainMap::new(mesh);
        map.calculate(&Simplex::new(1), &MapConfig::default());

        let grid = render(&map, AsciiMode::Biome, 20, 8);
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines.iter().all(|line| line.chars().count() == 20));
    }

    #[test]
    fn test_map_corners_render_as_ocean() {
        let mesh = GridMesh::new(10, 10, 1000.0, 5);
        let mut map = TerrainMap::new(mesh);
        map.calculate(&Simplex::new(1), &MapConfig::default());

        // The boundary ring is always ocean, so the frame of the preview is
        // ocean glyphs
        let grid = render(&map, AsciiMode::Biome, 10, 10);
        let first_line = grid.lines().next().unwrap();
        assert!(first_line.chars().all(|c| c == '~'));
    }
}
