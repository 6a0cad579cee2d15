//! Get, set and setdefault on a flat settings group.

use super::{parse_value, render};
use crate::app::App;
use prefstore_core::{Config, SettingsGroup};

/// Run the get command.
pub fn get(config: Config, user: &str, group: SettingsGroup, key: &str) -> anyhow::Result<()> {
    let app = App::new(config, user)?;
    println!("{}", render(app.profile.group(group).get(key))?);
    Ok(())
}

/// Run the set command.
pub fn set(
    config: Config,
    user: &str,
    group: SettingsGroup,
    key: &str,
    value: &str,
) -> anyhow::Result<()> {
    let mut app = App::new(config, user)?;
    app.profile.group_mut(group).set(key, parse_value(value))?;
    Ok(())
}

/// Run the setdefault command, printing the effective value.
pub fn setdefault(
    config: Config,
    user: &str,
    group: SettingsGroup,
    key: &str,
    value: &str,
) -> anyhow::Result<()> {
    let mut app = App::new(config, user)?;
    let stored = app
        .profile
        .group_mut(group)
        .setdefault(key, parse_value(value))?;
    println!("{}", render(Some(&stored))?);
    Ok(())
}
