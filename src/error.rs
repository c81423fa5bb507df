//! Unified error type for claude-code-sounds.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SoundsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("theme not found: {0}")]
    ThemeNotFound(String),

    #[error("missing dependency: {0}")]
    MissingDependency(String),

    #[error("download failed: {0}")]
    Download(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SoundsError>;
