//! Application state management.

use prefstore_core::{Config, UserProfile};
use std::fs;
use tracing::info;

/// Shared application state.
pub struct App {
    /// The selected user's settings
    pub profile: UserProfile,
}

impl App {
    /// Open the profile for `user` under the configured root directory.
    ///
    /// The root directory itself is created (with parents) if missing; the
    /// per-user directory is left to [`UserProfile::open_with`].
    pub fn new(config: Config, user: &str) -> anyhow::Result<Self> {
        let root = config.root_dir()?;
        fs::create_dir_all(&root)?;

        let profile = UserProfile::open_with(user, &root, config.format())?;

        info!(
            root = %root.display(),
            user = profile.name(),
            "Application initialized"
        );

        Ok(App { profile })
    }
}
