//! Error types for configuration loading
//!
//! Errors are `Clone` so that a single failed computation can be handed to
//! every caller that was waiting on it. Underlying sources are kept behind
//! `Arc` for that reason.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main error type for configuration loading
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// A resolved configuration file could not be read or parsed
    #[error("Failed to parse oxfmt configuration file at {}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoadFailure,
    },

    /// The process working directory could not be determined
    #[error("Failed to determine working directory")]
    WorkingDirectory {
        #[source]
        source: Arc<std::io::Error>,
    },
}

/// The underlying cause of a [`ConfigError::Load`]
///
/// Displays as the wrapped error. The cause is reported once, through
/// [`std::error::Error::source`] on the outer error.
#[derive(Debug, Clone, Error)]
pub enum LoadFailure {
    #[error(transparent)]
    Read(Arc<std::io::Error>),

    #[error(transparent)]
    Json(Arc<serde_json::Error>),

    #[error(transparent)]
    Jsonc(Arc<json5::Error>),
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Read,
    Parse,
    WorkingDirectory,
}

impl ConfigError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::Load {
                source: LoadFailure::Read(_),
                ..
            } => ErrorKind::Read,
            ConfigError::Load { .. } => ErrorKind::Parse,
            ConfigError::WorkingDirectory { .. } => ErrorKind::WorkingDirectory,
        }
    }

    /// Path of the configuration file involved, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::Load { path, .. } => Some(path.as_path()),
            ConfigError::WorkingDirectory { .. } => None,
        }
    }

    /// Wrap a read or parse failure for the file at `path`
    pub fn load(path: impl Into<PathBuf>, source: LoadFailure) -> Self {
        Self::Load {
            path: path.into(),
            source,
        }
    }

    /// Create a working directory error
    pub fn working_directory(source: std::io::Error) -> Self {
        Self::WorkingDirectory {
            source: Arc::new(source),
        }
    }
}

impl From<std::io::Error> for LoadFailure {
    fn from(err: std::io::Error) -> Self {
        LoadFailure::Read(Arc::new(err))
    }
}

impl From<serde_json::Error> for LoadFailure {
    fn from(err: serde_json::Error) -> Self {
        LoadFailure::Json(Arc::new(err))
    }
}

impl From<json5::Error> for LoadFailure {
    fn from(err: json5::Error) -> Self {
        LoadFailure::Jsonc(Arc::new(err))
    }
}
