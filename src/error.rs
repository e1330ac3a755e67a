//! Error types for loading block packs and configuration.
//!
//! The orientation engine itself never fails; errors only come from the
//! edges that read data from disk or archives.

use thiserror::Error;

/// Result type alias using OrientationError.
pub type Result<T> = std::result::Result<T, OrientationError>;

/// Main error type for pack and config loading.
#[derive(Error, Debug)]
pub enum OrientationError {
    /// Failed to read or parse a ZIP archive.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Failed to parse JSON data.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid block pack structure.
    #[error("Invalid block pack: {0}")]
    InvalidBlockPack(String),

    /// Configuration was readable but not usable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
