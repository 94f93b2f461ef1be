pub mod config;
pub mod connections;
pub mod errors;
pub mod generation;
pub mod grid;
pub mod placement;
pub mod spawning;
pub mod tiles;

// Selective re-exports for external consumers

// The pure connection-mask function library
pub use connections::{ConnectionMask, Rotation, Side};

// Errors - consumers need the error type and result alias
pub use errors::{RoadnetError, RoadnetResult};

// Generation - the main entry point
pub use generation::{DEFAULT_TILE_BUDGET, FrontierGenerator, GenerationConfig};

// Grid - the generated level state
pub use grid::{GridCoord, GridMap, PlacedTile};

// Placement - for callers running their own placement attempts
pub use placement::{PlacementResult, PlacementValidator};

// Spawning - wave schedulers need spawn-point derivation
pub use spawning::{DEFAULT_TILE_WORLD_SIZE, SpawnPoint, WorldCoord, derive_spawn_points};

// Tiles - catalog construction and presets
pub use tiles::{TileCatalog, TileTemplate, catalog_preset};
