// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! Error types for site maintenance operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sitekit operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while reading or writing a specific file.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Image decoding or encoding failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// None of the external converters could rasterise the logo.
    #[error("Could not rasterise {}: {reason}", path.display())]
    Rasterise { path: PathBuf, reason: String },

    #[error("Invalid colour '{0}'")]
    InvalidColour(String),

    #[error("Invalid font {}: {reason}", path.display())]
    InvalidFont { path: PathBuf, reason: String },

    #[error("Invalid regular expression: {0}")]
    Regex(#[from] regex::Error),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl Error {
    /// Wraps an `io::Error` with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
