//! Error types for coursechef.
//!
//! Library crates use [`ChefError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all coursechef operations.
#[derive(Debug, thiserror::Error)]
pub enum ChefError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Course manifest loading or shape error.
    #[error("manifest error: {message}")]
    Manifest { message: String },

    /// Network/HTTP error while staging source archives.
    #[error("network error: {0}")]
    Network(String),

    /// Zip archive read or write error.
    #[error("archive error: {message}")]
    Archive { message: String },

    /// Channel tree construction error (unmet precondition).
    #[error("assembly error: {message}")]
    Assembly { message: String },

    /// Publishing error (missing payload, tree write failure).
    #[error("publish error: {0}")]
    Publish(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ChefError>;

impl ChefError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a manifest error from any displayable message.
    pub fn manifest(msg: impl Into<String>) -> Self {
        Self::Manifest {
            message: msg.into(),
        }
    }

    /// Create an archive error from any displayable message.
    pub fn archive(msg: impl Into<String>) -> Self {
        Self::Archive {
            message: msg.into(),
        }
    }

    /// Create an assembly error from any displayable message.
    pub fn assembly(msg: impl Into<String>) -> Self {
        Self::Assembly {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = ChefError::manifest("missing course_data.json");
        assert_eq!(err.to_string(), "manifest error: missing course_data.json");

        let err = ChefError::assembly("lesson 'Lesson 1' in course 'Digital Marketing' not prepared");
        assert!(err.to_string().contains("not prepared"));
    }
}
