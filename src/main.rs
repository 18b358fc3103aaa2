use clap::Parser;
use noise::Simplex;

use island_generator::ascii::{self, AsciiMode};
use island_generator::config::{BiomeBias, MapConfig, ShapeConfig};
use island_generator::export;
use island_generator::grid_mesh::GridMesh;
use island_generator::map::TerrainMap;
use island_generator::seeds::MapSeeds;

#[derive(Parser, Debug)]
#[command(name = "island_generator")]
#[command(about = "Generate procedural island maps over a dual mesh")]
struct Args {
    /// Grid points per map side (mesh resolution)
    #[arg(short = 'n', long, default_value = "48")]
    points: usize,

    /// Random seed (uses a random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of rivers
    #[arg(short, long, default_value = "30")]
    rivers: usize,

    /// Island roundness (0 = raw noise, 1 = disc)
    #[arg(long, default_value = "0.5")]
    round: f32,

    /// Landmass inflation (how much of the map the island fills)
    #[arg(long, default_value = "0.4")]
    inflate: f32,

    /// Temperature bias at the north edge
    #[arg(long, default_value = "0.0")]
    north_bias: f32,

    /// Temperature bias at the south edge
    #[arg(long, default_value = "0.0")]
    south_bias: f32,

    /// Moisture bias (shifts the whole moisture band)
    #[arg(long, default_value = "0.0")]
    moisture_bias: f32,

    /// Export the biome map to a PNG (specify output path)
    #[arg(long)]
    export_biomes: Option<String>,

    /// Export the elevation map to a PNG
    #[arg(long)]
    export_elevation: Option<String>,

    /// Export the raw arrays as JSON
    #[arg(long)]
    export_json: Option<String>,

    /// Export an ASCII rendering to a text file
    #[arg(long)]
    export_ascii: Option<String>,

    /// PNG size in pixels
    #[arg(long, default_value = "1000")]
    image_size: u32,

    /// Print an ASCII preview to the terminal
    #[arg(long)]
    preview: bool,
}

fn main() {
    let args = Args::parse();

    let master = args.seed.unwrap_or_else(rand::random);
    let seeds = MapSeeds::from_master(master);
    println!("Generating island with seed: {}", master);
    println!("{}", seeds);

    println!("Building mesh ({0}x{0} points)...", args.points);
    let mesh = GridMesh::new(args.points, args.points, 1000.0, seeds.mesh);
    let mut map = TerrainMap::new(mesh);

    let noise = Simplex::new(seeds.noise as u32);
    let config = MapConfig {
        shape: ShapeConfig {
            round: args.round,
            inflate: args.inflate,
            ..Default::default()
        },
        num_rivers: args.rivers,
        drainage_seed: seeds.drainage,
        river_seed: seeds.rivers,
        biome_bias: BiomeBias {
            north_temperature: args.north_bias,
            south_temperature: args.south_bias,
            moisture: args.moisture_bias,
        },
    };

    println!("Calculating terrain...");
    map.calculate(&noise, &config);

    let stats = map.stats();
    println!("Regions: {} total", stats.total_regions);
    println!(
        "  - Land: {} ({:.1}%)",
        stats.land_regions,
        stats.land_percentage()
    );
    println!("  - Ocean: {}", stats.ocean_regions);
    println!("  - Lakes: {}", stats.lake_regions);
    println!("  - Coast: {}", stats.coast_regions);
    println!(
        "Rivers: {} sources from {} springs, {} flowing sides",
        map.river_corners.len(),
        stats.spring_corners,
        stats.river_sides
    );

    println!("Biome distribution:");
    let mut biomes: Vec<_> = stats.biome_counts.iter().collect();
    biomes.sort_by(|a, b| b.1.cmp(a.1));
    for (biome, count) in biomes {
        let pct = 100.0 * *count as f64 / stats.total_regions as f64;
        println!("  - {:?}: {} ({:.1}%)", biome, count, pct);
    }

    if let Some(ref path) = args.export_biomes {
        match export::export_biomes(&map, path, args.image_size) {
            Ok(()) => println!("Exported biome map to: {}", path),
            Err(e) => eprintln!("Failed to export biome map: {}", e),
        }
    }

    if let Some(ref path) = args.export_elevation {
        match export::export_elevation(&map, path, args.image_size) {
            Ok(()) => println!("Exported elevation map to: {}", path),
            Err(e) => eprintln!("Failed to export elevation map: {}", e),
        }
    }

    if let Some(ref path) = args.export_json {
        match export::export_json(&map, path) {
            Ok(()) => println!("Exported JSON to: {}", path),
            Err(e) => eprintln!("Failed to export JSON: {}", e),
        }
    }

    if let Some(ref path) = args.export_ascii {
        match ascii::export_ascii(&map, path, AsciiMode::Biome, 100, 50) {
            Ok(()) => println!("Exported ASCII map to: {}", path),
            Err(e) => eprintln!("Failed to export ASCII map: {}", e),
        }
    }

    if args.preview {
        println!();
        print!("{}", ascii::render(&map, AsciiMode::Biome, 80, 40));
    }
}
