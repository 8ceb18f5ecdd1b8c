//! Error types for Pebble

use thiserror::Error;

/// The main error type for Pebble operations
#[derive(Debug, Error)]
pub enum PebbleError {
    #[error("Config validation error: {0}")]
    ConfigValidation(String),

    #[error("Level parse error: {0}")]
    LevelParse(String),

    #[error("Unknown entity type: {value} is not one of {allowed:?}")]
    UnknownEntityType {
        value: String,
        allowed: Vec<String>,
    },

    #[error("Entity not found: {0}")]
    EntityNotFound(u64),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("Physics error: {0}")]
    Physics(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Pebble operations
pub type Result<T> = std::result::Result<T, PebbleError>;
