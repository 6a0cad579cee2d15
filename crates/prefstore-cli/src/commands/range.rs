//! Range command - per-parameter settings.

use super::{parse_value, render};
use crate::app::App;
use crate::RangeCommands;
use prefstore_core::Config;

/// Run a range subcommand.
pub fn run(config: Config, user: &str, action: RangeCommands) -> anyhow::Result<()> {
    let mut app = App::new(config, user)?;
    let range = &mut app.profile.range;

    match action {
        RangeCommands::Get { parameter, key } => {
            let value = range.get(&parameter, &key)?;
            println!("{}", render(value)?);
        }
        RangeCommands::Set {
            parameter,
            key,
            value,
        } => {
            range.set(&parameter, &key, parse_value(&value))?;
        }
        RangeCommands::Setdefault {
            parameter,
            key,
            value,
        } => {
            let stored = range.setdefault(&parameter, &key, parse_value(&value))?;
            println!("{}", render(Some(&stored))?);
        }
    }

    Ok(())
}
