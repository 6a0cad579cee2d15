//! Single-level settings store.
//!
//! A [`SettingsStore`] keeps a flat mapping of string keys to JSON values in
//! memory and writes the whole mapping to its backing file after every
//! mutation.
//!
//! ## Example
//!
//! ```rust,ignore
//! use prefstore_core::SettingsStore;
//! use serde_json::json;
//!
//! let mut colors = SettingsStore::open("/data/alice", "flag_color")?;
//! colors.set("marker", json!("red"))?;
//! assert_eq!(colors.get("marker"), Some(&json!("red")));
//! ```

use crate::error::Result;
use crate::file::{Document, Format, SettingsFile};
use crate::value::is_truthy;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Flat key/value settings backed by one JSON file.
#[derive(Debug)]
pub struct SettingsStore {
    file: SettingsFile,
    data: Document,
}

impl SettingsStore {
    /// Open the store for `settings_type` in `directory`, writing compact JSON.
    ///
    /// This performs I/O: the directory is created if missing (its parent must
    /// exist), an empty file is written if missing, and the file is then
    /// loaded.
    pub fn open(directory: impl AsRef<Path>, settings_type: &str) -> Result<Self> {
        Self::open_with(directory, settings_type, Format::default())
    }

    /// Open the store with an explicit write format.
    pub fn open_with(
        directory: impl AsRef<Path>,
        settings_type: &str,
        format: Format,
    ) -> Result<Self> {
        let file = SettingsFile::new(directory, settings_type, format)?;
        file.ensure()?;
        let data = file.load()?;

        debug!(
            path = %file.path().display(),
            keys = data.len(),
            "Opened settings store"
        );

        Ok(SettingsStore { file, data })
    }

    /// Look up `key`. A missing key is `None`, never an error.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Store `value` under `key`, replacing any previous value, and persist.
    pub fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let mut next = self.data.clone();
        next.insert(key.to_string(), value);
        self.commit(next)?;
        debug!(settings_type = self.file.settings_type(), key, "Set value");
        Ok(())
    }

    /// Return the stored value if it is truthy, otherwise seed `key`.
    ///
    /// When the current value is truthy nothing is written. Otherwise `value`
    /// is inserted only when `key` is absent: a present but falsy value (for
    /// example `""` or `0`) is kept and returned. In both of those cases the
    /// document is written before returning.
    pub fn setdefault(&mut self, key: &str, value: Value) -> Result<Value> {
        if let Some(existing) = self.data.get(key) {
            if is_truthy(existing) {
                return Ok(existing.clone());
            }
        }

        let mut next = self.data.clone();
        let stored = next.entry(key.to_string()).or_insert(value).clone();
        self.commit(next)?;
        debug!(settings_type = self.file.settings_type(), key, "Seeded default");
        Ok(stored)
    }

    /// Returns true if `key` is present, whatever its value
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.data.keys().map(String::as_str)
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if no keys are stored
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The whole in-memory document
    pub fn document(&self) -> &Document {
        &self.data
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Settings type label
    pub fn settings_type(&self) -> &str {
        self.file.settings_type()
    }

    /// Replace the in-memory document with the current file contents.
    ///
    /// On failure the in-memory document is left unchanged.
    pub fn reload(&mut self) -> Result<()> {
        self.data = self.file.load()?;
        Ok(())
    }

    /// Write `next` and adopt it as the in-memory document. A failed write
    /// leaves memory untouched.
    fn commit(&mut self, next: Document) -> Result<()> {
        self.file.save(&next)?;
        self.data = next;
        Ok(())
    }
}
