//! Error types for Prefstore core operations.
//!
//! Library code returns [`PrefError`] through the [`Result`] alias. The CLI
//! wraps these in `anyhow` at the top level.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using PrefError
pub type Result<T> = std::result::Result<T, PrefError>;

/// Core error types for settings operations.
///
/// A missing key is never an error; lookups return `Option` for that.
#[derive(Error, Debug)]
pub enum PrefError {
    // === Settings File Errors ===
    /// The settings file exists but is not a valid settings document
    #[error("settings file {path} is corrupted: {reason}")]
    CorruptSettings { path: PathBuf, reason: String },

    /// A namespaced lookup named a parameter that was never set
    #[error("parameter '{parameter}' is not set in {path}")]
    MissingParameter { parameter: String, path: PathBuf },

    /// A user name or settings type does not form a single path component
    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    // === Configuration Errors ===
    /// Configuration file parsing failed
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    // === I/O Errors ===
    /// I/O failure tied to a specific path
    #[error("{operation} failed for {path}: {source}")]
    IoAt {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// Serializing a document for writing failed
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl PrefError {
    /// Returns true if this is a missing-parameter lookup failure.
    ///
    /// Callers typically recover from this by seeding the parameter with
    /// `setdefault`.
    pub fn is_missing_parameter(&self) -> bool {
        matches!(self, PrefError::MissingParameter { .. })
    }

    /// Returns true if the on-disk data could not be understood
    pub fn is_corrupt(&self) -> bool {
        matches!(self, PrefError::CorruptSettings { .. })
    }

    /// Returns true for any I/O failure
    pub fn is_io(&self) -> bool {
        matches!(self, PrefError::Io(_) | PrefError::IoAt { .. })
    }

    /// Create an I/O error annotated with the operation and path
    pub fn io_at(operation: &'static str, path: &Path, source: std::io::Error) -> Self {
        PrefError::IoAt {
            operation,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create a corrupt-settings error
    pub fn corrupt(path: &Path, reason: impl Into<String>) -> Self {
        PrefError::CorruptSettings {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for PrefError {
    fn from(err: serde_json::Error) -> Self {
        PrefError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let err = PrefError::MissingParameter {
            parameter: "temperature".to_string(),
            path: PathBuf::from("/tmp/range.json"),
        };
        assert!(err.is_missing_parameter());
        assert!(!err.is_corrupt());

        let err = PrefError::corrupt(Path::new("/tmp/x.json"), "expected value");
        assert!(err.is_corrupt());
        assert!(!err.is_io());

        let err = PrefError::io_at(
            "create directory",
            Path::new("/nope/alice"),
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(err.is_io());
        assert!(!err.is_missing_parameter());
    }

    #[test]
    fn test_display_names_path() {
        let err = PrefError::MissingParameter {
            parameter: "salinity".to_string(),
            path: PathBuf::from("range.json"),
        };
        assert_eq!(err.to_string(), "parameter 'salinity' is not set in range.json");
    }
}
