//! PNG and JSON export
//!
//! Rasterizes the generated map for inspection: region polygons filled with
//! their biome color with rivers drawn on top, an elevation colormap view,
//! and a JSON dump of the raw arrays for downstream consumers.

use std::fs::File;
use std::io::{self, BufWriter};

use image::{ImageBuffer, Rgb, RgbImage};
use serde::Serialize;

use crate::biomes::Biome;
use crate::map::TerrainMap;
use crate::mesh::MeshGraph;

/// River stroke color.
const RIVER_COLOR: [u8; 3] = [34, 85, 136];

/// Export the biome map as a PNG of the given pixel size, rivers included.
pub fn export_biomes<M: MeshGraph>(
    map: &TerrainMap<M>,
    path: &str,
    pixels: u32,
) -> Result<(), image::ImageError> {
    let mesh = &map.mesh;
    let scale = pixels as f32 / mesh.map_size();
    let mut img: RgbImage = ImageBuffer::from_pixel(pixels, pixels, Rgb(Biome::Ocean.color()));

    let mut out_t = Vec::new();
    for r in 0..mesh.num_solid_regions() {
        mesh.corners_around_region(r, &mut out_t);
        let polygon = polygon_pixels(mesh, r, &out_t, scale);
        fill_polygon(&mut img, &polygon, Rgb(map.biome[r].color()));
    }

    // River width grows with accumulated flow
    for s in 0..mesh.num_solid_sides() {
        if map.flow[s] == 0 {
            continue;
        }
        let t0 = mesh.side_inner_corner(s);
        let t1 = mesh.side_outer_corner(s);
        let width = 2.0 * (map.flow[s] as f32).sqrt() * scale;
        draw_stroke(
            &mut img,
            (mesh.corner_x(t0) * scale, mesh.corner_y(t0) * scale),
            (mesh.corner_x(t1) * scale, mesh.corner_y(t1) * scale),
            width.max(1.0),
            Rgb(RIVER_COLOR),
        );
    }

    img.save(path)
}

/// Export region elevation as a PNG using a sea-to-summit colormap.
pub fn export_elevation<M: MeshGraph>(
    map: &TerrainMap<M>,
    path: &str,
    pixels: u32,
) -> Result<(), image::ImageError> {
    let mesh = &map.mesh;
    let scale = pixels as f32 / mesh.map_size();
    let mut img: RgbImage = ImageBuffer::from_pixel(pixels, pixels, Rgb([10, 10, 40]));

    let mut out_t = Vec::new();
    for r in 0..mesh.num_solid_regions() {
        mesh.corners_around_region(r, &mut out_t);
        let polygon = polygon_pixels(mesh, r, &out_t, scale);
        fill_polygon(&mut img, &polygon, Rgb(elevation_colormap(map.elevation[r])));
    }

    img.save(path)
}

/// Colormap over elevation in [-1, 1]: deep blue under the sea, green
/// lowlands through brown highlands to white peaks.
fn elevation_colormap(elevation: f32) -> [u8; 3] {
    let stops: [(f32, [f32; 3]); 6] = [
        (-1.0, [0.05, 0.05, 0.30]),
        (0.0, [0.25, 0.45, 0.70]),
        (0.01, [0.35, 0.55, 0.30]),
        (0.4, [0.55, 0.50, 0.30]),
        (0.7, [0.55, 0.40, 0.30]),
        (1.0, [1.00, 1.00, 1.00]),
    ];

    let e = elevation.clamp(-1.0, 1.0);
    let mut lower = stops[0];
    let mut upper = stops[stops.len() - 1];
    for window in stops.windows(2) {
        if e >= window[0].0 && e <= window[1].0 {
            lower = window[0];
            upper = window[1];
            break;
        }
    }
    let span = (upper.0 - lower.0).max(1e-6);
    let t = (e - lower.0) / span;
    [
        ((lower.1[0] + (upper.1[0] - lower.1[0]) * t) * 255.0) as u8,
        ((lower.1[1] + (upper.1[1] - lower.1[1]) * t) * 255.0) as u8,
        ((lower.1[2] + (upper.1[2] - lower.1[2]) * t) * 255.0) as u8,
    ]
}

/// Region polygon in pixel space, corners sorted by angle around the region
/// so the scanline fill sees a simple closed outline.
fn polygon_pixels(
    mesh: &impl MeshGraph,
    r: usize,
    corners: &[usize],
    scale: f32,
) -> Vec<(f32, f32)> {
    let cx = mesh.region_x(r);
    let cy = mesh.region_y(r);
    let mut points: Vec<(f32, f32)> = corners
        .iter()
        .map(|&t| (mesh.corner_x(t), mesh.corner_y(t)))
        .collect();
    points.sort_by(|a, b| {
        let angle_a = (a.1 - cy).atan2(a.0 - cx);
        let angle_b = (b.1 - cy).atan2(b.0 - cx);
        angle_a.partial_cmp(&angle_b).unwrap_or(std::cmp::Ordering::Equal)
    });
    points
        .into_iter()
        .map(|(x, y)| (x * scale, y * scale))
        .collect()
}

/// Even-odd scanline fill.
fn fill_polygon(img: &mut RgbImage, polygon: &[(f32, f32)], color: Rgb<u8>) {
    if polygon.len() < 3 {
        return;
    }
    let y_min = polygon.iter().map(|p| p.1).fold(f32::MAX, f32::min).floor() as i64;
    let y_max = polygon.iter().map(|p| p.1).fold(f32::MIN, f32::max).ceil() as i64;

    let mut crossings = Vec::new();
    for y in y_min.max(0)..=y_max.min(img.height() as i64 - 1) {
        let scan = y as f32 + 0.5;
        crossings.clear();
        for i in 0..polygon.len() {
            let (x0, y0) = polygon[i];
            let (x1, y1) = polygon[(i + 1) % polygon.len()];
            if (y0 <= scan && y1 > scan) || (y1 <= scan && y0 > scan) {
                crossings.push(x0 + (scan - y0) / (y1 - y0) * (x1 - x0));
            }
        }
        crossings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        for pair in crossings.chunks(2) {
            if let [x_enter, x_exit] = pair {
                let start = x_enter.round().max(0.0) as i64;
                let end = (x_exit.round() as i64).min(img.width() as i64 - 1);
                for x in start..=end {
                    img.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }
}

/// Stroke a segment by stamping discs along it.
fn draw_stroke(img: &mut RgbImage, from: (f32, f32), to: (f32, f32), width: f32, color: Rgb<u8>) {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let length = (dx * dx + dy * dy).sqrt();
    let steps = (length.ceil() as u32).max(1);
    let radius = width * 0.5;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let cx = from.0 + dx * t;
        let cy = from.1 + dy * t;
        let r = radius.ceil() as i64;
        for oy in -r..=r {
            for ox in -r..=r {
                if (ox * ox + oy * oy) as f32 > radius * radius {
                    continue;
                }
                let px = cx as i64 + ox;
                let py = cy as i64 + oy;
                if px >= 0 && py >= 0 && (px as u32) < img.width() && (py as u32) < img.height() {
                    img.put_pixel(px as u32, py as u32, color);
                }
            }
        }
    }
}

/// Flat view of the generated arrays for serialization.
#[derive(Serialize)]
struct MapDump<'a> {
    water: &'a [bool],
    ocean: &'a [bool],
    coast: &'a [bool],
    elevation: &'a [f32],
    moisture: &'a [f32],
    temperature: &'a [f32],
    biome: &'a [Biome],
    corner_elevation: &'a [f32],
    flow: &'a [u32],
}

/// Dump the per-element arrays as JSON.
pub fn export_json<M: MeshGraph>(map: &TerrainMap<M>, path: &str) -> io::Result<()> {
    let dump = MapDump {
        water: &map.water,
        ocean: &map.ocean,
        coast: &map.coast,
        elevation: &map.elevation,
        moisture: &map.moisture,
        temperature: &map.temperature,
        biome: &map.biome,
        corner_elevation: &map.corner_elevation,
        flow: &map.flow,
    };
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elevation_colormap_endpoints() {
        assert_eq!(elevation_colormap(-1.0), [12, 12, 76]);
        assert_eq!(elevation_colormap(1.0), [255, 255, 255]);
    }

    #[test]
    fn test_fill_polygon_stays_in_bounds() {
        let mut img: RgbImage = ImageBuffer::new(16, 16);
        let polygon = vec![(-4.0, -4.0), (20.0, -4.0), (20.0, 20.0), (-4.0, 20.0)];
        fill_polygon(&mut img, &polygon, Rgb([255, 0, 0]));
        assert_eq!(*img.get_pixel(8, 8), Rgb([255, 0, 0]));
    }

    #[test]
    fn test_stroke_marks_the_segment() {
        let mut img: RgbImage = ImageBuffer::new(16, 16);
        draw_stroke(&mut img, (2.0, 8.0), (14.0, 8.0), 1.0, Rgb([1, 2, 3]));
        assert_eq!(*img.get_pixel(8, 8), Rgb([1, 2, 3]));
    }
}
