//! Domain error types
//!
//! This module defines the error hierarchy for AutoVtex. Validation problems
//! are aggregated into a single [`ValidationReport`] instead of failing on the
//! first one; everything after validation fails with a dedicated variant so the
//! caller can tell a missing toolchain from a compile or staging failure.

use crate::core::validation::ValidationReport;
use std::path::PathBuf;
use thiserror::Error;

/// Main AutoVtex error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum AutoVtexError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Project file errors (unreadable, malformed)
    #[error("Project error: {0}")]
    Project(String),

    /// Sequence model errors (unknown id, index out of range)
    #[error("Sequence model error: {0}")]
    Model(String),

    /// One or more problems found before anything was written
    #[error("{0}")]
    Validation(ValidationReport),

    /// The engine install directory lacks the external compiler executables
    #[error("Texture tools not found under {}: missing {}", install_dir.display(), missing.join(", "))]
    ToolingMissing {
        /// Install root that was searched
        install_dir: PathBuf,
        /// Executable names that were not found
        missing: Vec<String>,
    },

    /// An external tool failed to launch or exited unsuccessfully
    #[error("{tool} failed: {reason}")]
    Compile {
        /// Tool file name (e.g. `vtex.exe`)
        tool: String,
        /// Exit status or launch failure description
        reason: String,
    },

    /// Moving or writing an output artifact failed
    #[error("Staging failed for {}: {message}", path.display())]
    Staging {
        /// Path being written, moved or removed
        path: PathBuf,
        /// Underlying failure
        message: String,
    },

    /// Image header could not be read
    #[error("Image header error: {0}")]
    HeaderRead(#[from] HeaderReadError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl AutoVtexError {
    /// Creates a staging error for `path` from any displayable cause
    pub fn staging(path: impl Into<PathBuf>, cause: impl std::fmt::Display) -> Self {
        AutoVtexError::Staging {
            path: path.into(),
            message: cause.to_string(),
        }
    }

    /// Returns true if the error happened before any filesystem mutation
    pub fn is_recoverable_input(&self) -> bool {
        matches!(
            self,
            AutoVtexError::Validation(_)
                | AutoVtexError::ToolingMissing { .. }
                | AutoVtexError::Configuration(_)
                | AutoVtexError::Project(_)
        )
    }
}

/// Errors raised while reading an image file header
#[derive(Debug, Error)]
pub enum HeaderReadError {
    /// File could not be opened or read
    #[error("Cannot read {}: {source}", path.display())]
    Open {
        /// Image path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// File ended before the fixed header did
    #[error("{} is truncated: header needs {expected} bytes, file has {actual}", path.display())]
    Truncated {
        /// Image path
        path: PathBuf,
        /// Bytes required
        expected: usize,
        /// Bytes available
        actual: usize,
    },
}

// Conversion from std::io::Error
impl From<std::io::Error> for AutoVtexError {
    fn from(err: std::io::Error) -> Self {
        AutoVtexError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for AutoVtexError {
    fn from(err: serde_json::Error) -> Self {
        AutoVtexError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for AutoVtexError {
    fn from(err: toml::de::Error) -> Self {
        AutoVtexError::Configuration(format!("TOML parse error: {err}"))
    }
}
