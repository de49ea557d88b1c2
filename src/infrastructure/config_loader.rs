use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::domain::settings::MutationSettings;

/// Loads mutation settings from a TOML file. Missing keys keep their defaults.
pub fn load_settings(path: &Path) -> Result<MutationSettings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Cannot read settings file {}", path.display()))?;
    parse_settings(&content).with_context(|| format!("Invalid settings in {}", path.display()))
}

pub fn parse_settings(content: &str) -> Result<MutationSettings> {
    let settings: MutationSettings = toml::from_str(content)?;
    settings.validate()?;
    Ok(settings)
}
