//! Two-level settings store.
//!
//! A [`NamespacedSettingsStore`] groups ordinary settings keys under an outer
//! parameter name, e.g. `{"TEMP": {"min": -2, "max": 40}}`. The file lifecycle
//! and write-through behavior are the same as for
//! [`SettingsStore`](crate::SettingsStore).
//!
//! Unlike the flat store, reading from a parameter that was never created is
//! an error ([`PrefError::MissingParameter`]), and `setdefault` always writes.

use crate::error::{PrefError, Result};
use crate::file::{kind, Document, Format, SettingsFile};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// Parameter → key → value settings backed by one JSON file.
#[derive(Debug)]
pub struct NamespacedSettingsStore {
    file: SettingsFile,
    data: Map<String, Value>,
}

impl NamespacedSettingsStore {
    /// Open the store for `settings_type` in `directory`, writing compact JSON.
    ///
    /// Same I/O as [`SettingsStore::open`](crate::SettingsStore::open). In
    /// addition every top-level value in an existing file must be an object.
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
        let data = load_checked(&file)?;

        debug!(
            path = %file.path().display(),
            parameters = data.len(),
            "Opened namespaced settings store"
        );

        Ok(NamespacedSettingsStore { file, data })
    }

    /// Look up `key` under `parameter`.
    ///
    /// Fails with [`PrefError::MissingParameter`] if `parameter` was never
    /// set. Returns `Ok(None)` if only `key` is absent.
    pub fn get(&self, parameter: &str, key: &str) -> Result<Option<&Value>> {
        let values = self
            .parameter(parameter)
            .ok_or_else(|| PrefError::MissingParameter {
                parameter: parameter.to_string(),
                path: self.file.path().to_path_buf(),
            })?;
        Ok(values.get(key))
    }

    /// Store `value` under `parameter`/`key`, replacing any previous value,
    /// and persist.
    pub fn set(&mut self, parameter: &str, key: &str, value: Value) -> Result<()> {
        let mut next = self.data.clone();
        values_mut(&mut next, parameter, self.file.path())?.insert(key.to_string(), value);
        self.commit(next)?;
        debug!(
            settings_type = self.file.settings_type(),
            parameter, key, "Set value"
        );
        Ok(())
    }

    /// Insert `value` under `parameter`/`key` unless the key already exists,
    /// then persist and return the stored value.
    ///
    /// The document is written on every call, including when the key was
    /// already present.
    pub fn setdefault(&mut self, parameter: &str, key: &str, value: Value) -> Result<Value> {
        let mut next = self.data.clone();
        let stored = values_mut(&mut next, parameter, self.file.path())?
            .entry(key.to_string())
            .or_insert(value)
            .clone();
        self.commit(next)?;
        debug!(
            settings_type = self.file.settings_type(),
            parameter, key, "Seeded default"
        );
        Ok(stored)
    }

    /// Returns true if `parameter` has been created
    pub fn contains_parameter(&self, parameter: &str) -> bool {
        self.data.contains_key(parameter)
    }

    /// Parameter names in insertion order
    pub fn parameters(&self) -> impl Iterator<Item = &str> + '_ {
        self.data.keys().map(String::as_str)
    }

    /// All keys stored under `parameter`, if it exists
    pub fn parameter(&self, parameter: &str) -> Option<&Document> {
        self.data.get(parameter).and_then(Value::as_object)
    }

    /// The whole in-memory document
    pub fn document(&self) -> &Map<String, Value> {
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
        self.data = load_checked(&self.file)?;
        Ok(())
    }

    /// Write `next` and adopt it as the in-memory document. A failed write
    /// leaves memory untouched.
    fn commit(&mut self, next: Map<String, Value>) -> Result<()> {
        self.file.save(&next)?;
        self.data = next;
        Ok(())
    }
}

/// The key map under `parameter`, created empty if missing.
fn values_mut<'a>(
    data: &'a mut Map<String, Value>,
    parameter: &str,
    path: &Path,
) -> Result<&'a mut Document> {
    match data
        .entry(parameter.to_string())
        .or_insert_with(|| Value::Object(Map::new()))
    {
        Value::Object(values) => Ok(values),
        other => Err(not_an_object(path, parameter, other)),
    }
}

fn not_an_object(path: &Path, parameter: &str, value: &Value) -> PrefError {
    PrefError::corrupt(
        path,
        format!(
            "parameter '{}' must be an object, found {}",
            parameter,
            kind(value)
        ),
    )
}

fn load_checked(file: &SettingsFile) -> Result<Map<String, Value>> {
    let data = file.load()?;
    if let Some((parameter, value)) = data.iter().find(|(_, v)| !v.is_object()) {
        return Err(not_an_object(file.path(), parameter, value));
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn on_disk(store: &NamespacedSettingsStore) -> Value {
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap()
    }

    #[test]
    fn test_open_creates_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = NamespacedSettingsStore::open(temp_dir.path(), "range").unwrap();

        assert_eq!(store.parameters().count(), 0);
        assert_eq!(on_disk(&store), json!({}));
    }

    #[test]
    fn test_get_missing_parameter() {
        let temp_dir = TempDir::new().unwrap();
        let store = NamespacedSettingsStore::open(temp_dir.path(), "range").unwrap();

        let err = store.get("TEMP_CTD", "min").unwrap_err();
        assert!(err.is_missing_parameter());
        match err {
            PrefError::MissingParameter { parameter, path } => {
                assert_eq!(parameter, "TEMP_CTD");
                assert_eq!(path, temp_dir.path().join("range.json"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_get_missing_key_in_existing_parameter() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = NamespacedSettingsStore::open(temp_dir.path(), "range").unwrap();
        store.set("TEMP_CTD", "min", json!(-2)).unwrap();

        assert_eq!(store.get("TEMP_CTD", "max").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = NamespacedSettingsStore::open(temp_dir.path(), "range").unwrap();

        store.set("TEMP_CTD", "min", json!(-2)).unwrap();
        store.set("TEMP_CTD", "max", json!(40)).unwrap();
        store.set("TEMP_CTD", "min", json!(-1.5)).unwrap();

        assert_eq!(store.get("TEMP_CTD", "min").unwrap(), Some(&json!(-1.5)));
        assert_eq!(store.get("TEMP_CTD", "max").unwrap(), Some(&json!(40)));
        assert_eq!(
            on_disk(&store),
            json!({"TEMP_CTD": {"min": -1.5, "max": 40}})
        );
    }

    #[test]
    fn test_setdefault_keeps_first_and_always_writes() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = NamespacedSettingsStore::open(temp_dir.path(), "range").unwrap();

        assert_eq!(store.setdefault("SALT", "min", json!(0)).unwrap(), json!(0));

        // Remove the file contents; the second call must write them back.
        fs::write(store.path(), "{}").unwrap();
        assert_eq!(store.setdefault("SALT", "min", json!(5)).unwrap(), json!(0));
        assert_eq!(on_disk(&store), json!({"SALT": {"min": 0}}));
    }

    #[test]
    fn test_setdefault_creates_parameter() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = NamespacedSettingsStore::open(temp_dir.path(), "range").unwrap();

        store.setdefault("DOXY", "max", json!(12)).unwrap();
        assert!(store.contains_parameter("DOXY"));
        assert_eq!(store.parameter("DOXY"), json!({"max": 12}).as_object());
    }

    #[test]
    fn test_state_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let before = {
            let mut store = NamespacedSettingsStore::open(temp_dir.path(), "range").unwrap();
            store.set("TEMP_CTD", "min", json!(-2)).unwrap();
            store.setdefault("SALT_CTD", "max", json!(38.5)).unwrap();
            store.document().clone()
        };

        let reopened = NamespacedSettingsStore::open(temp_dir.path(), "range").unwrap();
        assert_eq!(reopened.document(), &before);
        assert_eq!(
            reopened.parameters().collect::<Vec<_>>(),
            vec!["TEMP_CTD", "SALT_CTD"]
        );
    }

    #[test]
    fn test_non_object_parameter_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("range.json");
        fs::write(&path, r#"{"TEMP_CTD": [1, 2]}"#).unwrap();

        let err = NamespacedSettingsStore::open(temp_dir.path(), "range").unwrap_err();
        assert!(err.is_corrupt());
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"TEMP_CTD": [1, 2]}"#);
    }

    #[test]
    fn test_failed_set_keeps_memory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("u");
        let mut store = NamespacedSettingsStore::open(&dir, "range").unwrap();
        store.set("TEMP_CTD", "min", json!(-2)).unwrap();

        fs::remove_dir_all(&dir).unwrap();

        assert!(store.set("TEMP_CTD", "min", json!(0)).unwrap_err().is_io());
        assert_eq!(store.get("TEMP_CTD", "min").unwrap(), Some(&json!(-2)));

        assert!(store.set("PRES", "max", json!(6000)).unwrap_err().is_io());
        assert!(!store.contains_parameter("PRES"));
        assert!(store.get("PRES", "max").unwrap_err().is_missing_parameter());
    }

    #[test]
    fn test_failed_setdefault_keeps_memory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("u");
        let mut store = NamespacedSettingsStore::open(&dir, "range").unwrap();

        fs::remove_dir_all(&dir).unwrap();

        assert!(store.setdefault("SALT", "min", json!(0)).unwrap_err().is_io());
        assert!(!store.contains_parameter("SALT"));
        assert_eq!(store.parameters().count(), 0);
    }

    #[test]
    fn test_values_mut_rejects_non_object() {
        let mut data = Map::new();
        data.insert("TEMP_CTD".to_string(), json!([1, 2]));

        let err = values_mut(&mut data, "TEMP_CTD", Path::new("range.json")).unwrap_err();
        assert!(err.is_corrupt());

        values_mut(&mut data, "PRES", Path::new("range.json"))
            .unwrap()
            .insert("max".to_string(), json!(6000));
        assert_eq!(data["PRES"], json!({"max": 6000}));
    }

    #[test]
    fn test_reload() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = NamespacedSettingsStore::open(temp_dir.path(), "range").unwrap();
        store.set("TEMP_CTD", "min", json!(-2)).unwrap();

        fs::write(store.path(), r#"{"PRES": {"max": 6000}}"#).unwrap();
        store.reload().unwrap();

        assert!(store.get("TEMP_CTD", "min").unwrap_err().is_missing_parameter());
        assert_eq!(store.get("PRES", "max").unwrap(), Some(&json!(6000)));
    }
}
