//! Backing file for a settings store.
//!
//! Every store mirrors one JSON object to `<directory>/<settings_type>.json`.
//! This module owns the file lifecycle the stores share:
//!
//! - Path derivation from a directory and a settings type label
//! - Lazy creation of the directory (non-recursive) and of an empty file
//! - Full-document load and full-document save
//!
//! Files are opened and closed inside each call; nothing is held between
//! calls. Saves replace the file contents in place, there is no temp file or
//! rename.

use crate::error::{PrefError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Extension used for settings files
pub const SETTINGS_EXTENSION: &str = "json";

/// A settings document: string keys mapped to arbitrary JSON values.
pub type Document = Map<String, Value>;

/// How documents are written to disk. Both forms load identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Single-line JSON
    #[default]
    Compact,
    /// Indented JSON
    Pretty,
}

/// Location and write format of one settings file.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    directory: PathBuf,
    settings_type: String,
    path: PathBuf,
    format: Format,
}

impl SettingsFile {
    /// Describe the file for `settings_type` inside `directory`.
    ///
    /// Performs no I/O. Fails if `settings_type` is not a usable file stem.
    pub fn new(directory: impl AsRef<Path>, settings_type: &str, format: Format) -> Result<Self> {
        validate_name(settings_type)?;
        let directory = directory.as_ref().to_path_buf();
        let path = directory.join(format!("{}.{}", settings_type, SETTINGS_EXTENSION));
        Ok(SettingsFile {
            directory,
            settings_type: settings_type.to_string(),
            path,
            format,
        })
    }

    /// Path of the JSON file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the file
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Settings type label the file is named after
    pub fn settings_type(&self) -> &str {
        &self.settings_type
    }

    /// Create the directory and an empty document if either is missing.
    pub fn ensure(&self) -> Result<()> {
        ensure_dir(&self.directory)?;
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Initializing empty settings file");
            self.save(&Document::new())?;
        }
        Ok(())
    }

    /// Read and parse the whole file.
    ///
    /// The top level must be a JSON object. A malformed file is reported as
    /// [`PrefError::CorruptSettings`] and left on disk as is.
    pub fn load(&self) -> Result<Document> {
        let bytes =
            fs::read(&self.path).map_err(|e| PrefError::io_at("read settings", &self.path, e))?;

        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| PrefError::corrupt(&self.path, e.to_string()))?;

        match value {
            Value::Object(doc) => {
                debug!(
                    path = %self.path.display(),
                    keys = doc.len(),
                    "Loaded settings file"
                );
                Ok(doc)
            }
            other => Err(PrefError::corrupt(
                &self.path,
                format!("expected a JSON object at the top level, found {}", kind(&other)),
            )),
        }
    }

    /// Serialize `doc` and replace the file contents with it.
    pub fn save(&self, doc: &Document) -> Result<()> {
        let contents = match self.format {
            Format::Compact => serde_json::to_string(doc)?,
            Format::Pretty => serde_json::to_string_pretty(doc)?,
        };
        fs::write(&self.path, contents)
            .map_err(|e| PrefError::io_at("write settings", &self.path, e))?;
        debug!(path = %self.path.display(), keys = doc.len(), "Saved settings file");
        Ok(())
    }
}

/// Create `dir` if it does not exist. The parent must already exist.
pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        info!(path = %dir.display(), "Creating settings directory");
        fs::create_dir(dir).map_err(|e| PrefError::io_at("create directory", dir, e))?;
    }
    Ok(())
}

/// Check that `name` is a single, ordinary path component.
pub(crate) fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("must not be empty")
    } else if name == "." || name == ".." {
        Some("must not be a relative directory reference")
    } else if name.contains(['/', '\\']) {
        Some("must not contain path separators")
    } else if name.contains('\0') {
        Some("must not contain NUL bytes")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(PrefError::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// Short name of a JSON value's type, for error messages.
pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_path_derivation() {
        let file = SettingsFile::new("/data/alice", "flag_color", Format::Compact).unwrap();
        assert_eq!(file.path(), Path::new("/data/alice/flag_color.json"));
        assert_eq!(file.settings_type(), "flag_color");
        assert_eq!(file.directory(), Path::new("/data/alice"));
    }

    #[test]
    fn test_ensure_creates_directory_and_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("shared");
        let file = SettingsFile::new(&dir, "range", Format::Compact).unwrap();

        file.ensure().unwrap();

        assert!(dir.is_dir());
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "{}");
        assert!(file.load().unwrap().is_empty());
    }

    #[test]
    fn test_ensure_is_not_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("missing").join("nested");
        let file = SettingsFile::new(&dir, "range", Format::Compact).unwrap();

        let err = file.ensure().unwrap_err();
        assert!(err.is_io());
        assert!(!dir.exists());
    }

    #[test]
    fn test_ensure_keeps_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = SettingsFile::new(temp_dir.path(), "settingsfile", Format::Compact).unwrap();
        fs::write(file.path(), r#"{"last":"cruise_7.txt"}"#).unwrap();

        file.ensure().unwrap();

        assert_eq!(file.load().unwrap()["last"], json!("cruise_7.txt"));
    }

    #[test]
    fn test_pretty_and_compact_load_the_same() {
        let temp_dir = TempDir::new().unwrap();
        let mut doc = Document::new();
        doc.insert("marker".to_string(), json!("red"));
        doc.insert("sizes".to_string(), json!([4, 6]));

        let compact = SettingsFile::new(temp_dir.path(), "a", Format::Compact).unwrap();
        let pretty = SettingsFile::new(temp_dir.path(), "b", Format::Pretty).unwrap();
        compact.save(&doc).unwrap();
        pretty.save(&doc).unwrap();

        assert!(fs::read_to_string(pretty.path()).unwrap().contains('\n'));
        assert!(!fs::read_to_string(compact.path()).unwrap().contains('\n'));
        assert_eq!(compact.load().unwrap(), pretty.load().unwrap());
    }

    #[test]
    fn test_corrupted_file_left_intact() {
        let temp_dir = TempDir::new().unwrap();
        let file = SettingsFile::new(temp_dir.path(), "flag_color", Format::Compact).unwrap();
        fs::write(file.path(), b"not json at all").unwrap();

        let err = file.load().unwrap_err();
        assert!(err.is_corrupt());
        assert_eq!(fs::read(file.path()).unwrap(), b"not json at all");
    }

    #[test]
    fn test_non_object_top_level_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let file = SettingsFile::new(temp_dir.path(), "flag_color", Format::Compact).unwrap();
        fs::write(file.path(), "[1, 2, 3]").unwrap();

        assert!(file.load().unwrap_err().is_corrupt());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("flag_markersize").is_ok());
        assert!(validate_name("alice.smith").is_ok());

        for bad in ["", ".", "..", "a/b", "a\\b", "nul\0"] {
            let err = validate_name(bad).unwrap_err();
            assert!(matches!(err, PrefError::InvalidName { .. }), "{bad:?}");
        }
    }
}
