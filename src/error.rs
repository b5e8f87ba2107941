//! Error types for quire operations.
//!
//! Decoding and command application never fail; invalid input degrades to a
//! fallback document or a rejected command. Errors cover the surfaces around
//! them: reading files, parsing configuration and naming formats.

use thiserror::Error;

/// Errors that can occur while loading content or configuration.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "serde")]
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("unknown format: {0}")]
    UnknownFormat(String),

    #[error("invalid hotkey: {0}")]
    InvalidHotkey(String),
}

pub type Result<T> = std::result::Result<T, Error>;
