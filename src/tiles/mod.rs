use crate::connections::{ConnectionMask, Side};
use crate::errors::{RoadnetError, RoadnetResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use validator::Validate;

/// An immutable road tile definition: an identifier plus the connection mask
/// of the tile in its unrotated orientation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileTemplate {
    pub id: String,
    pub mask: ConnectionMask,
}

impl TileTemplate {
    pub fn new(id: impl Into<String>, mask: ConnectionMask) -> Self {
        Self {
            id: id.into(),
            mask,
        }
    }

    /// The fixed four-way-open tile seeded at the origin before generation
    pub fn base() -> Self {
        Self::new("base", ConnectionMask::ALL)
    }
}

/// One entry of a catalog TOML file
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TileEntry {
    #[validate(length(min = 1, max = 64))]
    pub id: String,
    pub connections: Vec<Side>,
}

/// On-disk catalog format: a list of `[[tiles]]` tables
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CatalogFile {
    #[validate(nested)]
    pub tiles: Vec<TileEntry>,
}

/// An ordered list of tile templates available to the generator.
///
/// Ordering matters only as the pre-shuffle baseline; the generator shuffles
/// it per frontier entry with its own seeded RNG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileCatalog {
    templates: Vec<TileTemplate>,
}

impl TileCatalog {
    /// Create a catalog, rejecting empty or duplicate template ids
    pub fn new(templates: Vec<TileTemplate>) -> RoadnetResult<Self> {
        let mut seen = HashSet::new();
        for template in &templates {
            if template.id.is_empty() {
                return Err(RoadnetError::InvalidCatalogData {
                    reason: "tile template with empty id".to_string(),
                });
            }
            if !seen.insert(template.id.as_str()) {
                return Err(RoadnetError::InvalidCatalogData {
                    reason: format!("duplicate tile id '{}'", template.id),
                });
            }
        }
        Ok(Self { templates })
    }

    /// Parse a catalog from TOML text with field validation
    pub fn from_toml_str(text: &str) -> RoadnetResult<Self> {
        let file: CatalogFile = toml::from_str(text)?;

        file.validate().map_err(|validation_errors| {
            let error_details = validation_errors
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                    format!("{field}: {}", error_msgs.join(", "))
                })
                .collect::<Vec<String>>()
                .join("; ");

            RoadnetError::InvalidCatalogData {
                reason: format!("Catalog validation failed: {error_details}"),
            }
        })?;

        let templates = file
            .tiles
            .into_iter()
            .map(|entry| TileTemplate::new(entry.id, ConnectionMask::of(&entry.connections)))
            .collect();

        Self::new(templates)
    }

    /// Load a catalog from a TOML file on disk
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> RoadnetResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RoadnetError::CatalogFileNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn templates(&self) -> &[TileTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Whether any template can ever pass the dead-end rule. Connection count
    /// is rotation-invariant, so a single check per template suffices.
    pub fn has_valid_road_tile(&self) -> bool {
        self.templates
            .iter()
            .any(|template| template.mask.is_valid_road_tile())
    }
}

/// Get a predefined tile catalog
pub fn catalog_preset(name: &str) -> Option<TileCatalog> {
    let straight = TileTemplate::new("straight", ConnectionMask::of(&[Side::North, Side::South]));
    let corner = TileTemplate::new("corner", ConnectionMask::of(&[Side::North, Side::East]));
    let tee = TileTemplate::new(
        "tee",
        ConnectionMask::of(&[Side::North, Side::East, Side::South]),
    );
    let cross = TileTemplate::new("cross", ConnectionMask::ALL);

    let templates = match name {
        "standard" => vec![straight, corner, tee, cross],
        "corridors" => vec![straight, corner],
        "dense" => vec![tee, cross],
        _ => return None,
    };

    // Preset ids are distinct by construction
    TileCatalog::new(templates).ok()
}
