use crate::connections::{Rotation, Side};
use crate::errors::{RoadnetError, RoadnetResult};
use crate::grid::{GridCoord, GridMap};
use crate::placement::PlacementValidator;
use crate::tiles::{TileCatalog, TileTemplate};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use validator::Validate;

pub const DEFAULT_TILE_BUDGET: u32 = 32;

/// A frontier position adjacent to an already-placed open connection, tagged
/// with the side a new tile must open to connect back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierEntry {
    coord: GridCoord,
    required_side: Side,
}

/// Tuning knobs for a generation run
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerationConfig {
    /// Maximum number of tiles placed beyond the base tile. The frontier can
    /// dead-end early, so treat the final count as "at most", not exact.
    #[validate(range(min = 0, max = 100_000))]
    pub tile_budget: u32,
    /// Where the fixed four-way base tile is seeded
    pub base_coord: GridCoord,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            tile_budget: DEFAULT_TILE_BUDGET,
            base_coord: GridCoord::ORIGIN,
        }
    }
}

/// Frontier-expansion road network generator.
///
/// Seeds a base tile, then grows outward breadth-first: each open edge
/// becomes a frontier entry, and the first catalog template and rotation
/// that validates at an entry is committed. No backtracking; entries with no
/// fitting tile are skipped and that branch stops growing.
///
/// Owns a seeded `Pcg64` so the same seed, catalog, and budget always
/// reproduce the same map.
pub struct FrontierGenerator {
    config: GenerationConfig,
    rng: Pcg64,
}

impl FrontierGenerator {
    pub fn new(config: GenerationConfig, seed: u64) -> Self {
        Self {
            config,
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Run a full generation pass and return the resulting map
    pub fn generate(&mut self, catalog: &TileCatalog) -> RoadnetResult<GridMap> {
        self.config.validate().map_err(|validation_errors| {
            RoadnetError::InvalidGenerationConfig {
                reason: validation_errors.to_string(),
            }
        })?;

        let mut map = GridMap::with_base_tile(self.config.base_coord, TileTemplate::base());

        if !catalog.has_valid_road_tile() {
            log::error!(
                "catalog has no template with two or more connections; \
                 only the base tile will be placed"
            );
        }

        let mut queue: VecDeque<FrontierEntry> = VecDeque::new();
        let mut processed: HashSet<GridCoord> = HashSet::new();
        let mut placed: u32 = 0;

        // The base tile is four-way open, so all four neighbors start on the
        // frontier, each required to connect back toward the base.
        let base_coord = self.config.base_coord;
        for side in Side::ALL {
            queue.push_back(FrontierEntry {
                coord: base_coord.neighbor(side),
                required_side: side.opposite(),
            });
        }

        let mut shuffled: Vec<&TileTemplate> = catalog.templates().iter().collect();

        while placed < self.config.tile_budget {
            let Some(entry) = queue.pop_front() else {
                break;
            };

            if processed.contains(&entry.coord) || map.get(entry.coord).is_some() {
                continue;
            }
            processed.insert(entry.coord);

            // Re-shuffling the same buffer each pop keeps template order
            // unbiased without reallocating.
            shuffled.shuffle(&mut self.rng);

            let mut fitted = false;
            'search: for template in &shuffled {
                for rotation in Rotation::ALL {
                    let rotated = template.mask.rotate(rotation);
                    if !rotated.has(entry.required_side) {
                        continue;
                    }

                    let result =
                        PlacementValidator::can_place(&map, entry.coord, template, rotation);
                    if !result.is_valid {
                        continue;
                    }

                    map.place(entry.coord, (*template).clone(), rotation);
                    placed += 1;

                    for side in rotated.sides() {
                        let neighbor = entry.coord.neighbor(side);
                        if map.get(neighbor).is_none() && !processed.contains(&neighbor) {
                            queue.push_back(FrontierEntry {
                                coord: neighbor,
                                required_side: side.opposite(),
                            });
                        }
                    }

                    fitted = true;
                    break 'search;
                }
            }

            if !fitted {
                // Best-effort: the branch stops growing and the cell stays
                // empty.
                log::warn!(
                    "no catalog template fits at {} (must open {})",
                    entry.coord,
                    entry.required_side
                );
            }
        }

        Ok(map)
    }
}
