use crate::connections::{Rotation, Side};
use crate::grid::{GridCoord, GridMap};
use crate::tiles::TileTemplate;

/// Outcome of a placement legality check. Rejections are expected and
/// frequent during search, so they travel as data rather than errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementResult {
    pub is_valid: bool,
    pub reason: Option<String>,
}

impl PlacementResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            reason: None,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            reason: Some(reason.into()),
        }
    }
}

/// Pure legality query over a `GridMap`: may the given template, at the
/// given rotation, occupy the given coordinate?
pub struct PlacementValidator;

impl PlacementValidator {
    /// Decide whether `template` rotated by `rotation` may be placed at
    /// `coord`.
    ///
    /// Checks, in order: a usable template, the dead-end rule (at least two
    /// open sides after rotation), cell occupancy, and symmetric agreement
    /// with every placed neighbor. A side facing an empty cell imposes no
    /// constraint; a side facing a placed tile must match it exactly (both
    /// open or both closed).
    ///
    /// Deterministic: identical map state and arguments always yield the
    /// identical result.
    pub fn can_place(
        map: &GridMap,
        coord: GridCoord,
        template: &TileTemplate,
        rotation: Rotation,
    ) -> PlacementResult {
        if template.id.is_empty() {
            return PlacementResult::rejected("tile template has an empty id");
        }

        let rotated = template.mask.rotate(rotation);
        if !rotated.is_valid_road_tile() {
            return PlacementResult::rejected(format!(
                "dead end: mask {rotated} has fewer than two connections"
            ));
        }

        if map.get(coord).is_some() {
            return PlacementResult::rejected(format!("already placed: tile exists at {coord}"));
        }

        for side in Side::ALL {
            let neighbor_coord = coord.neighbor(side);
            let has_connection = rotated.has(side);

            if let Some(neighbor_mask) = map.effective_mask_at(neighbor_coord) {
                let neighbor_has_connection = neighbor_mask.has(side.opposite());
                if has_connection != neighbor_has_connection {
                    return PlacementResult::rejected(format!(
                        "connection mismatch on {side}: candidate {} but neighbor at {neighbor_coord} {}",
                        if has_connection { "open" } else { "closed" },
                        if neighbor_has_connection {
                            "open"
                        } else {
                            "closed"
                        },
                    ));
                }
            }
        }

        PlacementResult::valid()
    }
}
