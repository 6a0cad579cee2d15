//! # Prefstore Core Library
//!
//! Per-user key/value settings persisted to disk as JSON. Each settings group
//! is one JSON object in one file; stores load the file on open, keep it in
//! memory and write the whole document back after every mutation.
//!
//! ## Architecture
//!
//! - **File** (`file`): Path derivation, lazy creation, load and save
//! - **Store** (`store`): Flat key → value settings
//! - **Namespaced** (`namespaced`): Parameter → key → value settings
//! - **Profile** (`profile`): A user's directory and its four stores
//! - **Value** (`value`): JSON truthiness used by `setdefault`
//! - **Config** (`config`): Configuration management
//!
//! ## Example
//!
//! ```rust,ignore
//! use prefstore_core::UserProfile;
//! use serde_json::json;
//!
//! let mut alice = UserProfile::open("alice", "/srv/qc/users")?;
//! alice.flag_color.set("marker", json!("red"))?;
//! alice.range.setdefault("TEMP_CTD", "min", json!(-2))?;
//! ```

pub mod config;
pub mod error;
pub mod file;
pub mod namespaced;
pub mod profile;
pub mod store;
pub mod value;

// Re-export commonly used types
pub use config::Config;
pub use error::{PrefError, Result};
pub use file::{Document, Format, SettingsFile};
pub use namespaced::NamespacedSettingsStore;
pub use profile::{SettingsGroup, UserProfile};
pub use store::SettingsStore;
pub use value::is_truthy;
