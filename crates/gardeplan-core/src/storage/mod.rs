mod config;
mod rules;

pub use config::{CalendarConfig, CalendarZone, Config};
pub use rules::{decode_rules, encode_rules, load_rules, save_rules, rules_path, RuleRecord};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/gardeplan[-dev]/` based on GARDEPLAN_ENV.
///
/// Set GARDEPLAN_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("GARDEPLAN_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("gardeplan-dev")
    } else {
        base_dir.join("gardeplan")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
