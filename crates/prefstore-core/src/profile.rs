//! Per-user bundle of settings stores.
//!
//! A [`UserProfile`] owns the directory `<root>/<name>` and the four stores
//! kept inside it:
//!
//! ```text
//! <root>/<name>/
//!   range.json            NamespacedSettingsStore
//!   settingsfile.json     SettingsStore
//!   flag_color.json       SettingsStore
//!   flag_markersize.json  SettingsStore
//! ```

use crate::error::{PrefError, Result};
use crate::file::{ensure_dir, validate_name, Format};
use crate::namespaced::NamespacedSettingsStore;
use crate::store::SettingsStore;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// Label of the namespaced range store
pub const RANGE: &str = "range";

/// Selects one of a profile's flat settings stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsGroup {
    Settingsfile,
    FlagColor,
    FlagMarkersize,
}

impl SettingsGroup {
    /// Every flat group, in file creation order
    pub const ALL: [SettingsGroup; 3] = [
        SettingsGroup::Settingsfile,
        SettingsGroup::FlagColor,
        SettingsGroup::FlagMarkersize,
    ];

    /// Settings type label, also the file stem
    pub fn label(&self) -> &'static str {
        match self {
            SettingsGroup::Settingsfile => "settingsfile",
            SettingsGroup::FlagColor => "flag_color",
            SettingsGroup::FlagMarkersize => "flag_markersize",
        }
    }
}

impl fmt::Display for SettingsGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for SettingsGroup {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        SettingsGroup::ALL
            .into_iter()
            .find(|group| group.label() == s)
            .ok_or_else(|| format!("Unknown settings group: {}", s))
    }
}

/// One user's settings stores, sharing a directory.
#[derive(Debug)]
pub struct UserProfile {
    name: String,
    directory: PathBuf,

    /// Value ranges, grouped by parameter
    pub range: NamespacedSettingsStore,

    /// General settings
    pub settingsfile: SettingsStore,

    /// Flag → color mapping
    pub flag_color: SettingsStore,

    /// Flag → marker size mapping
    pub flag_markersize: SettingsStore,
}

impl UserProfile {
    /// Open (creating if needed) the profile for `name` under `root`.
    ///
    /// `root` must already exist; `<root>/<name>` is created if it does not.
    /// Each store then creates and loads its own file.
    pub fn open(name: &str, root: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(name, root, Format::default())
    }

    /// Open the profile with an explicit write format for all stores.
    pub fn open_with(name: &str, root: impl AsRef<Path>, format: Format) -> Result<Self> {
        validate_name(name).map_err(|e| match e {
            PrefError::InvalidName { reason, .. } => PrefError::InvalidName {
                name: name.to_string(),
                reason: format!("user name {}", reason),
            },
            other => other,
        })?;

        let directory = root.as_ref().join(name);
        ensure_dir(&directory)?;

        let range = NamespacedSettingsStore::open_with(&directory, RANGE, format)?;
        let settingsfile =
            SettingsStore::open_with(&directory, SettingsGroup::Settingsfile.label(), format)?;
        let flag_color =
            SettingsStore::open_with(&directory, SettingsGroup::FlagColor.label(), format)?;
        let flag_markersize =
            SettingsStore::open_with(&directory, SettingsGroup::FlagMarkersize.label(), format)?;

        info!(user = name, path = %directory.display(), "Opened user profile");

        Ok(UserProfile {
            name: name.to_string(),
            directory,
            range,
            settingsfile,
            flag_color,
            flag_markersize,
        })
    }

    /// User name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The user's settings directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Borrow a flat store by group
    pub fn group(&self, group: SettingsGroup) -> &SettingsStore {
        match group {
            SettingsGroup::Settingsfile => &self.settingsfile,
            SettingsGroup::FlagColor => &self.flag_color,
            SettingsGroup::FlagMarkersize => &self.flag_markersize,
        }
    }

    /// Mutably borrow a flat store by group
    pub fn group_mut(&mut self, group: SettingsGroup) -> &mut SettingsStore {
        match group {
            SettingsGroup::Settingsfile => &mut self.settingsfile,
            SettingsGroup::FlagColor => &mut self.flag_color,
            SettingsGroup::FlagMarkersize => &mut self.flag_markersize,
        }
    }
}
