use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoadnetError {
    // Config-related errors
    #[error("Failed to get config directory")]
    ConfigDirNotFound,

    #[error("I/O operation failed: {0}")]
    IoFailed(#[from] std::io::Error),

    #[error("Failed to serialize TOML: {0}")]
    TomlSerializationFailed(#[from] toml::ser::Error),

    #[error("Failed to deserialize TOML: {0}")]
    TomlDeserializationFailed(#[from] toml::de::Error),

    // Catalog-related errors
    #[error("Catalog file not found at path: {path}")]
    CatalogFileNotFound { path: PathBuf },

    #[error("Invalid catalog data: {reason}")]
    InvalidCatalogData { reason: String },

    // Level snapshot errors
    #[error("Level file not found at path: {path}")]
    LevelFileNotFound { path: PathBuf },

    #[error("Corrupted level file: {reason}")]
    CorruptedLevelFile { reason: String },

    #[error("Invalid level data: {reason}")]
    InvalidLevelData { reason: String },

    // Generation errors
    #[error("Invalid generation config: {reason}")]
    InvalidGenerationConfig { reason: String },
}

/// Result type alias for all operations
pub type RoadnetResult<T> = Result<T, RoadnetError>;
