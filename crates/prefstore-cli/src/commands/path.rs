//! Path command - print the user's settings directory.

use crate::app::App;
use prefstore_core::Config;

/// Run the path command.
pub fn run(config: Config, user: &str) -> anyhow::Result<()> {
    let app = App::new(config, user)?;
    println!("{}", app.profile.directory().display());
    Ok(())
}
