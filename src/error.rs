//! Error types
//!
//! Asset and config failures are fatal at startup; platform failures end the
//! loop. Logic invariant violations panic instead (see the constructors in
//! `sim`).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to load an image asset
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
}

impl LoadError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::Io { path, .. } | LoadError::Decode { path, .. } => path,
        }
    }
}

/// Failure to read or validate settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Failure in the window/terminal collaborator
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// Top-level error returned by the driver
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),
}
