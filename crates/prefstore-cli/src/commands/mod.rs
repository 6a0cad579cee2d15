//! Subcommand implementations.

pub mod entry;
pub mod path;
pub mod range;
pub mod show;

use serde_json::Value;

/// Interpret a command-line value as JSON, falling back to a plain string.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Render a looked-up value; a missing key prints as `null`.
pub fn render(value: Option<&Value>) -> anyhow::Result<String> {
    Ok(match value {
        Some(value) => serde_json::to_string(value)?,
        None => "null".to_string(),
    })
}
