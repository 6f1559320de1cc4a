//! Error types for ffdpost.

use thiserror::Error;

/// The main error type for ffdpost operations.
///
/// The original scripts let every failure propagate as an uncaught engine
/// fault; here each failure class is explicit so callers can react (skip a
/// field, abort the batch, retry with another path).
#[derive(Error, Debug)]
pub enum PostError {
    /// A dataset could not be loaded by the engine.
    #[error("load error: {0}")]
    Load(String),

    /// A geometric spec is degenerate (zero-length normal, coincident seed
    /// points, coincident probe endpoints).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A field name does not exist on the dataset.
    #[error("unknown field '{field}' on dataset '{dataset}'")]
    UnknownField { field: String, dataset: String },

    /// The engine failed to render or a render-side call was rejected.
    #[error("render error: {0}")]
    Render(String),

    /// An output file (image, table, script) could not be written, or a
    /// screenshot spec is unwritable (zero-sized viewport).
    #[error("write error: {0}")]
    Write(String),

    /// The pipeline configuration is invalid or could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A specialized Result type for ffdpost operations.
pub type Result<T> = std::result::Result<T, PostError>;
