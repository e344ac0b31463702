//! Error types for the gridstream crate

use thiserror::Error;

/// Main error type for the crate
///
/// Streaming itself never fails: configuration problems are clamped or
/// skipped at the point of use. Only loading configuration can error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
