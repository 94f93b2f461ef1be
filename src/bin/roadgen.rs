use clap::Parser;
use roadnet::config::load_config;
use roadnet::errors::{RoadnetError, RoadnetResult};
use roadnet::{
    FrontierGenerator, GenerationConfig, GridCoord, GridMap, Side, TileCatalog, catalog_preset,
    derive_spawn_points,
};

#[derive(Parser, Clone)]
#[command(name = "roadgen")]
#[command(about = "Generate road-network levels for the tower defense game")]
struct Args {
    /// Random seed for reproducible generation (default: from config or random)
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of road tiles placed beyond the base tile
    #[arg(long)]
    budget: Option<u32>,

    /// Catalog preset name (standard, corridors, dense) or path to a catalog
    /// TOML file
    #[arg(long)]
    catalog: Option<String>,

    /// World units per grid cell for spawn-point projection
    #[arg(long)]
    tile_size: Option<f32>,

    /// Output file path relative to the levels/ directory (e.g. "level1.bin")
    #[arg(long)]
    output: Option<String>,

    /// Print an ASCII preview of the generated network
    #[arg(long)]
    preview: bool,
}

fn validate_output_path(filename: &str) -> RoadnetResult<()> {
    use std::path::Path;

    let path = Path::new(filename);
    if path.is_absolute() {
        return Err(RoadnetError::InvalidLevelData {
            reason: format!(
                "Output path must be relative to the levels/ directory, got absolute path: {}",
                filename
            ),
        });
    }

    if filename.contains("..") {
        return Err(RoadnetError::InvalidLevelData {
            reason: "Output path cannot contain '..' for security reasons".to_string(),
        });
    }

    Ok(())
}

fn resolve_catalog(source: &str) -> RoadnetResult<TileCatalog> {
    if source.ends_with(".toml") {
        return TileCatalog::load_from_file(source);
    }
    catalog_preset(source).ok_or_else(|| RoadnetError::InvalidCatalogData {
        reason: format!(
            "unknown catalog preset '{source}' (expected standard, corridors, dense, or a .toml path)"
        ),
    })
}

fn main() -> RoadnetResult<()> {
    let args = Args::parse();
    let defaults = load_config();

    let seed = args
        .seed
        .or(defaults.default_seed)
        .unwrap_or_else(rand::random);
    let budget = args.budget.unwrap_or(defaults.tile_budget);
    let tile_size = args.tile_size.unwrap_or(defaults.tile_world_size);
    let catalog_source = args.catalog.unwrap_or(defaults.catalog);

    if let Some(filename) = &args.output {
        validate_output_path(filename)?;
    }

    let catalog = resolve_catalog(&catalog_source)?;

    let config = GenerationConfig {
        tile_budget: budget,
        ..Default::default()
    };
    let map = FrontierGenerator::new(config, seed).generate(&catalog)?;

    if let Some(filename) = &args.output {
        map.save_to_file(filename)?;
        let full_path = GridMap::get_levels_dir()?.join(filename);
        println!("Level saved to: {}", full_path.display());
    }

    print_map_summary(&map, seed, budget, &catalog_source, tile_size);

    if args.preview {
        println!("\nPreview:");
        print!("{}", render_preview(&map));
    }

    Ok(())
}

fn print_map_summary(map: &GridMap, seed: u64, budget: u32, catalog_source: &str, tile_size: f32) {
    let (min, max) = map.bounds();
    let spawn_points = derive_spawn_points(map, tile_size);

    println!("\nLevel summary:");
    println!("  Seed: {seed}");
    println!("  Catalog: {catalog_source}");
    println!(
        "  Tiles placed: {} of {} budget (plus the base tile)",
        map.len() - 1,
        budget
    );
    println!("  Bounds: {min} to {max}");
    println!("  Fully connected: {}", map.is_fully_connected());
    println!("  Spawn points: {}", spawn_points.len());

    for point in &spawn_points {
        println!(
            "    {} opening {} -> world ({:.1}, {:.1})",
            point.coord, point.open_side, point.world_pos.x, point.world_pos.z
        );
    }
}

/// Box-drawing glyph for a tile's effective connection mask
fn mask_glyph(north: bool, east: bool, south: bool, west: bool) -> char {
    match (north, east, south, west) {
        (true, true, true, true) => '╋',
        (true, true, true, false) => '┣',
        (false, true, true, true) => '┳',
        (true, false, true, true) => '┫',
        (true, true, false, true) => '┻',
        (true, false, true, false) => '┃',
        (false, true, false, true) => '━',
        (true, true, false, false) => '┗',
        (false, true, true, false) => '┏',
        (false, false, true, true) => '┓',
        (true, false, false, true) => '┛',
        (true, false, false, false) => '╵',
        (false, true, false, false) => '╶',
        (false, false, true, false) => '╷',
        (false, false, false, true) => '╴',
        (false, false, false, false) => '·',
    }
}

fn render_preview(map: &GridMap) -> String {
    let (min, max) = map.bounds();
    let mut out = String::new();

    // Row order is top-down: +y (north) first
    for y in (min.y..=max.y).rev() {
        for x in min.x..=max.x {
            let glyph = match map.effective_mask_at(GridCoord::new(x, y)) {
                Some(mask) => mask_glyph(
                    mask.has(Side::North),
                    mask.has(Side::East),
                    mask.has(Side::South),
                    mask.has(Side::West),
                ),
                None => ' ',
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadnet::TileTemplate;
    use roadnet::config::ToolConfig;

    #[test]
    fn test_output_path_validation() {
        assert!(validate_output_path("level1.bin").is_ok());
        assert!(validate_output_path("campaign/level1.bin").is_ok());
        assert!(validate_output_path("/etc/level1.bin").is_err());
        assert!(validate_output_path("../level1.bin").is_err());
    }

    #[test]
    fn test_resolve_catalog_presets() {
        assert!(resolve_catalog("standard").is_ok());
        assert!(resolve_catalog("nonsense").is_err());
    }

    #[test]
    fn test_preview_rendering() {
        let catalog = catalog_preset("standard").unwrap();
        let config = GenerationConfig {
            tile_budget: 10,
            ..Default::default()
        };
        let map = FrontierGenerator::new(config, 21).generate(&catalog).unwrap();

        let preview = render_preview(&map);
        assert!(!preview.is_empty());
        // One line per grid row in the bounds
        let (min, max) = map.bounds();
        assert_eq!(preview.lines().count() as i32, max.y - min.y + 1);
    }

    #[test]
    fn test_preview_base_tile_glyph() {
        let map = GridMap::with_base_tile(GridCoord::ORIGIN, TileTemplate::base());
        assert_eq!(render_preview(&map), "╋\n");
    }

    #[test]
    fn test_config_defaults_fill_missing_args() {
        let defaults = ToolConfig::default();
        assert_eq!(defaults.catalog, "standard");
        assert!(resolve_catalog(&defaults.catalog).is_ok());
    }
}
