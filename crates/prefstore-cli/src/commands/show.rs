//! Show command - print whole settings documents.

use crate::app::App;
use prefstore_core::profile::RANGE;
use prefstore_core::{Config, SettingsGroup, UserProfile};
use serde_json::{Map, Value};

/// Run the show command.
pub fn run(config: Config, user: &str, target: Option<&str>) -> anyhow::Result<()> {
    let app = App::new(config, user)?;
    let output = collect(&app.profile, target)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Gather the documents selected by `target`.
///
/// `None` yields an object keyed by settings type covering every store.
fn collect(profile: &UserProfile, target: Option<&str>) -> anyhow::Result<Value> {
    match target {
        Some(RANGE) => Ok(Value::Object(profile.range.document().clone())),
        Some(name) => {
            let group: SettingsGroup = name.parse().map_err(anyhow::Error::msg)?;
            Ok(Value::Object(profile.group(group).document().clone()))
        }
        None => {
            let mut all = Map::new();
            all.insert(
                RANGE.to_string(),
                Value::Object(profile.range.document().clone()),
            );
            for group in SettingsGroup::ALL {
                all.insert(
                    group.label().to_string(),
                    Value::Object(profile.group(group).document().clone()),
                );
            }
            Ok(Value::Object(all))
        }
    }
}
