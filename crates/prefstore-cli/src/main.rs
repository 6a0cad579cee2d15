//! # Prefstore CLI
//!
//! Command-line access to a user's settings stores.
//!
//! ## Commands
//!
//! - `prefs -u <user> get <group> <key>` - Print a stored value
//! - `prefs -u <user> set <group> <key> <value>` - Store a value
//! - `prefs -u <user> setdefault <group> <key> <value>` - Seed a value
//! - `prefs -u <user> range get|set|setdefault <parameter> <key> [value]`
//! - `prefs -u <user> show [group|range]` - Print whole documents
//! - `prefs -u <user> path` - Print the user's settings directory
//!
//! ## Example Usage
//!
//! ```bash
//! prefs -u alice set flag_color marker red
//! prefs -u alice range setdefault TEMP_CTD min -- -2
//! prefs -u alice show
//! ```

mod app;
mod commands;

use clap::{Parser, Subcommand};
use prefstore_core::{Config, SettingsGroup};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Prefstore - per-user JSON settings
#[derive(Parser)]
#[command(name = "prefs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding one settings directory per user
    #[arg(short, long, global = true, env = "PREFSTORE_ROOT")]
    root: Option<PathBuf>,

    /// User whose settings are read or written
    #[arg(short, long, env = "PREFSTORE_USER")]
    user: String,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value stored under a key
    Get {
        /// Settings group (settingsfile, flag_color, flag_markersize)
        group: SettingsGroup,

        /// Key to look up
        key: String,
    },

    /// Store a value under a key, replacing any previous value
    Set {
        /// Settings group (settingsfile, flag_color, flag_markersize)
        group: SettingsGroup,

        /// Key to write
        key: String,

        /// JSON value (anything that is not valid JSON is stored as a string)
        value: String,
    },

    /// Store a value only if the current one is unset or falsy
    Setdefault {
        /// Settings group (settingsfile, flag_color, flag_markersize)
        group: SettingsGroup,

        /// Key to seed
        key: String,

        /// JSON value (anything that is not valid JSON is stored as a string)
        value: String,
    },

    /// Read or write the per-parameter range settings
    Range {
        #[command(subcommand)]
        action: RangeCommands,
    },

    /// Print whole settings documents
    Show {
        /// Settings group or "range" (default: all stores)
        target: Option<String>,
    },

    /// Print the user's settings directory
    Path,
}

#[derive(Subcommand)]
pub enum RangeCommands {
    /// Print the value stored under a parameter and key
    Get { parameter: String, key: String },

    /// Store a value under a parameter and key
    Set {
        parameter: String,
        key: String,
        value: String,
    },

    /// Store a value under a parameter and key unless the key exists
    Setdefault {
        parameter: String,
        key: String,
        value: String,
    },
}

/// Resolve the configuration, then apply `--root` on top.
///
/// When no default config location can be determined (e.g. no home
/// directory), an explicit root is enough to run with defaults.
fn load_config(
    explicit: Option<&Path>,
    default_path: prefstore_core::Result<PathBuf>,
    root: Option<PathBuf>,
) -> anyhow::Result<Config> {
    let mut config = match (explicit, default_path) {
        (Some(path), _) => Config::load_from(path)?,
        (None, Ok(path)) => Config::load_from(&path)?,
        (None, Err(e)) if root.is_some() => {
            debug!(error = %e, "No config location, using defaults");
            Config::default()
        }
        (None, Err(e)) => return Err(e.into()),
    };
    if let Some(root) = root {
        config.general.root_directory = Some(root);
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = load_config(
        cli.config.as_deref(),
        Config::default_config_path(),
        cli.root,
    )?;

    // Setup logging
    let log_level = if cli.quiet {
        "error".to_string()
    } else {
        match cli.verbose {
            0 => config.general.log_level.clone(),
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .init();

    // Execute command
    match cli.command {
        Commands::Get { group, key } => commands::entry::get(config, &cli.user, group, &key),
        Commands::Set { group, key, value } => {
            commands::entry::set(config, &cli.user, group, &key, &value)
        }
        Commands::Setdefault { group, key, value } => {
            commands::entry::setdefault(config, &cli.user, group, &key, &value)
        }
        Commands::Range { action } => commands::range::run(config, &cli.user, action),
        Commands::Show { target } => commands::show::run(config, &cli.user, target.as_deref()),
        Commands::Path => commands::path::run(config, &cli.user),
    }
}
