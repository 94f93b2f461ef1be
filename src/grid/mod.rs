use crate::connections::{ConnectionMask, Rotation, Side};
use crate::errors::{RoadnetError, RoadnetResult};
use crate::tiles::TileTemplate;
use derive_more::{Add, Display, From};
use pathfinding::prelude::bfs_reach;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Signed grid coordinates; North is +y, East is +x
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Add,
    Display,
    From,
    Serialize,
    Deserialize,
)]
#[display("({x}, {y})")]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const ORIGIN: GridCoord = GridCoord { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent coordinate on the given side
    pub fn neighbor(self, side: Side) -> Self {
        let (dx, dy) = side.offset();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A tile committed to the grid: the template it was stamped from plus the
/// rotation it was placed with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedTile {
    pub template: TileTemplate,
    pub rotation: Rotation,
}

impl PlacedTile {
    /// The template's base mask after applying the placement rotation
    pub fn effective_mask(&self) -> ConnectionMask {
        self.template.mask.rotate(self.rotation)
    }
}

/// The placed-tile store: at most one tile per coordinate, with a fixed
/// four-way base tile at the origin for the lifetime of a generation run.
///
/// Mutated only during generation (and by level-reset `remove` calls);
/// afterwards it is read through shared references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridMap {
    origin: GridCoord,
    tiles: HashMap<GridCoord, PlacedTile>,
}

impl GridMap {
    /// Create a map seeded with the base tile at `origin`, rotation fixed at 0
    pub fn with_base_tile(origin: GridCoord, template: TileTemplate) -> Self {
        let mut tiles = HashMap::new();
        tiles.insert(
            origin,
            PlacedTile {
                template,
                rotation: Rotation::NONE,
            },
        );
        Self { origin, tiles }
    }

    /// Record a tile at `coord`.
    ///
    /// Callers must have checked `PlacementValidator::can_place` first; this
    /// hot path does not re-validate. Placing onto an occupied coordinate is
    /// a caller defect.
    pub fn place(&mut self, coord: GridCoord, template: TileTemplate, rotation: Rotation) {
        debug_assert!(
            !self.tiles.contains_key(&coord),
            "place() called on occupied coordinate {coord}"
        );
        self.tiles.insert(coord, PlacedTile { template, rotation });
    }

    /// Delete the tile at `coord`; used by level-reset flows, not generation
    pub fn remove(&mut self, coord: GridCoord) -> Option<PlacedTile> {
        self.tiles.remove(&coord)
    }

    pub fn get(&self, coord: GridCoord) -> Option<&PlacedTile> {
        self.tiles.get(&coord)
    }

    /// Rotation of the tile at `coord`, or rotation 0 if the cell is empty
    pub fn rotation_at(&self, coord: GridCoord) -> Rotation {
        self.tiles
            .get(&coord)
            .map(|tile| tile.rotation)
            .unwrap_or(Rotation::NONE)
    }

    /// Effective (rotated) mask of the tile at `coord`, if any
    pub fn effective_mask_at(&self, coord: GridCoord) -> Option<ConnectionMask> {
        self.tiles.get(&coord).map(PlacedTile::effective_mask)
    }

    /// Read-only view of all placed tiles; iteration order is arbitrary
    pub fn iter(&self) -> impl Iterator<Item = (&GridCoord, &PlacedTile)> {
        self.tiles.iter()
    }

    /// Number of placed tiles, including the base tile
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn origin(&self) -> GridCoord {
        self.origin
    }

    /// Placed neighbors of `coord` whose shared edge is open on both sides
    pub fn connected_neighbors(&self, coord: GridCoord) -> Vec<GridCoord> {
        let Some(mask) = self.effective_mask_at(coord) else {
            return Vec::new();
        };

        Side::ALL
            .into_iter()
            .filter_map(|side| {
                let neighbor = coord.neighbor(side);
                let neighbor_mask = self.effective_mask_at(neighbor)?;
                ConnectionMask::can_connect(mask, neighbor_mask, side).then_some(neighbor)
            })
            .collect()
    }

    /// Coordinates reachable from the origin through mutually open edges
    pub fn connected_to_origin(&self) -> HashSet<GridCoord> {
        bfs_reach(self.origin, |&coord| self.connected_neighbors(coord)).collect()
    }

    /// Whether every placed tile is road-reachable from the origin
    pub fn is_fully_connected(&self) -> bool {
        self.connected_to_origin().len() == self.tiles.len()
    }

    /// Open connections facing unoccupied neighbor cells, sorted by
    /// coordinate then side so consumers see a stable order
    pub fn open_edges(&self) -> Vec<(GridCoord, Side)> {
        let mut edges: Vec<(GridCoord, Side)> = self
            .tiles
            .iter()
            .flat_map(|(&coord, tile)| {
                let mask = tile.effective_mask();
                mask.sides()
                    .filter(move |&side| !self.tiles.contains_key(&coord.neighbor(side)))
                    .map(move |side| (coord, side))
            })
            .collect();
        edges.sort();
        edges
    }

    /// Inclusive (min, max) coordinate bounds of the placed tiles
    pub fn bounds(&self) -> (GridCoord, GridCoord) {
        let mut min = self.origin;
        let mut max = self.origin;
        for coord in self.tiles.keys() {
            min.x = min.x.min(coord.x);
            min.y = min.y.min(coord.y);
            max.x = max.x.max(coord.x);
            max.y = max.y.max(coord.y);
        }
        (min, max)
    }

    /// Get the levels directory path
    pub fn get_levels_dir() -> RoadnetResult<PathBuf> {
        std::env::current_dir()
            .map_err(RoadnetError::IoFailed)
            .map(|dir| dir.join("levels"))
    }

    /// Serialize the map to a binary snapshot
    pub fn to_bytes(&self) -> RoadnetResult<Vec<u8>> {
        bincode::serde::encode_to_vec(self, bincode::config::standard()).map_err(|e| {
            RoadnetError::InvalidLevelData {
                reason: format!("Failed to serialize level: {e}"),
            }
        })
    }

    /// Deserialize a map from a binary snapshot, checking its integrity
    pub fn from_bytes(data: &[u8]) -> RoadnetResult<Self> {
        let (map, _): (GridMap, usize) =
            bincode::serde::decode_from_slice(data, bincode::config::standard()).map_err(|e| {
                RoadnetError::CorruptedLevelFile {
                    reason: format!("Failed to deserialize level data: {e}"),
                }
            })?;

        map.validate_integrity()?;
        Ok(map)
    }

    /// Save the map to the levels directory
    pub fn save_to_file<P: AsRef<Path>>(&self, filename: P) -> RoadnetResult<()> {
        let levels_dir = Self::get_levels_dir()?;
        let file_path = levels_dir.join(filename);

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).map_err(RoadnetError::IoFailed)?;
        }

        let data = self.to_bytes()?;
        std::fs::write(&file_path, data).map_err(RoadnetError::IoFailed)?;

        Ok(())
    }

    /// Load a map from the levels directory
    pub fn load_from_file<P: AsRef<Path>>(filename: P) -> RoadnetResult<Self> {
        let levels_dir = Self::get_levels_dir()?;
        let file_path = levels_dir.join(filename);

        if !file_path.exists() {
            return Err(RoadnetError::LevelFileNotFound { path: file_path });
        }

        let data = std::fs::read(&file_path).map_err(RoadnetError::IoFailed)?;
        Self::from_bytes(&data)
    }

    /// Structural checks applied to snapshots loaded from disk
    fn validate_integrity(&self) -> RoadnetResult<()> {
        let Some(base) = self.tiles.get(&self.origin) else {
            return Err(RoadnetError::InvalidLevelData {
                reason: format!("no base tile at origin {}", self.origin),
            });
        };

        if base.effective_mask() != ConnectionMask::ALL {
            return Err(RoadnetError::InvalidLevelData {
                reason: format!(
                    "base tile at {} is not four-way open (mask {})",
                    self.origin,
                    base.effective_mask()
                ),
            });
        }

        for (coord, tile) in &self.tiles {
            if tile.template.id.is_empty() {
                return Err(RoadnetError::InvalidLevelData {
                    reason: format!("tile at {coord} has an empty template id"),
                });
            }
        }

        Ok(())
    }
}
