use crate::connections::Side;
use crate::grid::{GridCoord, GridMap};
use serde::{Deserialize, Serialize};

/// World units per grid cell when projecting tiles for the rendering and
/// gameplay layers
pub const DEFAULT_TILE_WORLD_SIZE: f32 = 4.0;

/// World-space coordinates on the ground plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldCoord {
    pub x: f32,
    pub z: f32,
}

impl WorldCoord {
    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }
}

/// An open road edge where enemies may enter the level: the tile holding the
/// open connection, the side it opens on, and its projected world position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub coord: GridCoord,
    pub open_side: Side,
    pub world_pos: WorldCoord,
}

/// Project a grid coordinate to world space
pub fn grid_to_world(coord: GridCoord, tile_world_size: f32) -> WorldCoord {
    WorldCoord::new(
        coord.x as f32 * tile_world_size,
        coord.y as f32 * tile_world_size,
    )
}

/// Derive spawn-point candidates from a frozen map: every placed tile with a
/// connection opening onto an unoccupied cell. Ordering is stable (by
/// coordinate, then side) so downstream wave scheduling is reproducible.
pub fn derive_spawn_points(map: &GridMap, tile_world_size: f32) -> Vec<SpawnPoint> {
    map.open_edges()
        .into_iter()
        .map(|(coord, open_side)| SpawnPoint {
            coord,
            open_side,
            world_pos: grid_to_world(coord, tile_world_size),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connections::{ConnectionMask, Rotation};
    use crate::generation::{FrontierGenerator, GenerationConfig};
    use crate::tiles::{TileTemplate, catalog_preset};

    #[test]
    fn test_grid_to_world_projection() {
        let world = grid_to_world(GridCoord::new(3, -2), 4.0);
        assert_eq!(world, WorldCoord::new(12.0, -8.0));

        let world = grid_to_world(GridCoord::ORIGIN, 10.0);
        assert_eq!(world, WorldCoord::new(0.0, 0.0));
    }

    #[test]
    fn test_spawn_points_from_open_edges() {
        let mut map = GridMap::with_base_tile(GridCoord::ORIGIN, TileTemplate::base());
        let straight =
            TileTemplate::new("straight", ConnectionMask::of(&[Side::North, Side::South]));
        map.place(GridCoord::new(0, 1), straight, Rotation::NONE);

        let points = derive_spawn_points(&map, 4.0);

        // Base: east, south, west open; straight tile: north open
        assert_eq!(points.len(), 4);
        let far_end = points
            .iter()
            .find(|p| p.coord == GridCoord::new(0, 1))
            .unwrap();
        assert_eq!(far_end.open_side, Side::North);
        assert_eq!(far_end.world_pos, WorldCoord::new(0.0, 4.0));
    }

    #[test]
    fn test_generated_map_yields_spawn_points() {
        let catalog = catalog_preset("standard").unwrap();
        let config = GenerationConfig {
            tile_budget: 20,
            ..Default::default()
        };
        let map = FrontierGenerator::new(config, 77).generate(&catalog).unwrap();

        let points = derive_spawn_points(&map, DEFAULT_TILE_WORLD_SIZE);

        // Every spawn point must sit on a placed tile with that side open
        // and the neighbor cell unoccupied
        assert!(!points.is_empty());
        for point in &points {
            let mask = map.effective_mask_at(point.coord).unwrap();
            assert!(mask.has(point.open_side));
            assert!(map.get(point.coord.neighbor(point.open_side)).is_none());
        }
    }

    #[test]
    fn test_spawn_points_are_deterministic() {
        let catalog = catalog_preset("standard").unwrap();
        let config = GenerationConfig {
            tile_budget: 15,
            ..Default::default()
        };
        let first_map = FrontierGenerator::new(config.clone(), 5)
            .generate(&catalog)
            .unwrap();
        let second_map = FrontierGenerator::new(config, 5).generate(&catalog).unwrap();

        assert_eq!(
            derive_spawn_points(&first_map, 4.0),
            derive_spawn_points(&second_map, 4.0)
        );
    }
}
