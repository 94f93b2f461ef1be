use crate::errors::RoadnetResult;
use crate::generation::DEFAULT_TILE_BUDGET;
use crate::spawning::DEFAULT_TILE_WORLD_SIZE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// User defaults for the roadgen tool, stored under the platform config dir
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Seed used when none is passed on the command line; a missing value
    /// means "pick a random seed per run"
    pub default_seed: Option<u64>,
    pub tile_budget: u32,
    pub tile_world_size: f32,
    /// Preset name or path to a catalog TOML file
    pub catalog: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            default_seed: None,
            tile_budget: DEFAULT_TILE_BUDGET,
            tile_world_size: DEFAULT_TILE_WORLD_SIZE,
            catalog: "standard".to_string(),
        }
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|mut path| {
            path.push("roadnet");
            fs::create_dir_all(&path).ok()?;
            path.push("config.toml");
            Some(path)
        })
        .flatten()
}

pub fn load_config() -> ToolConfig {
    if let Some(config_path) = get_config_path() {
        if let Ok(contents) = fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<ToolConfig>(&contents) {
                return config;
            }
        }
    }
    ToolConfig::default()
}

pub fn save_config(config: &ToolConfig) -> RoadnetResult<()> {
    if let Some(config_path) = get_config_path() {
        let contents = toml::to_string_pretty(config)?;
        fs::write(config_path, contents)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ToolConfig::default();
        assert_eq!(config.default_seed, None);
        assert_eq!(config.tile_budget, DEFAULT_TILE_BUDGET);
        assert_eq!(config.catalog, "standard");
    }

    #[test]
    fn test_config_toml_round_trip() {
        let config = ToolConfig {
            default_seed: Some(99),
            tile_budget: 64,
            tile_world_size: 2.5,
            catalog: "corridors".to_string(),
        };

        let text = toml::to_string_pretty(&config).unwrap();
        let restored: ToolConfig = toml::from_str(&text).unwrap();
        assert_eq!(restored.default_seed, Some(99));
        assert_eq!(restored.tile_budget, 64);
        assert_eq!(restored.catalog, "corridors");
    }
}
