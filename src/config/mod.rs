mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

use crate::darken::DarknessLevel;
use facetprep_common::Error;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./facetprep.toml", "~/.config/facetprep/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
///
/// Failures are reported as [`Error::Config`].
pub fn validate_config(config: &Config) -> Result<()> {
    if config.darken.levels.is_empty() {
        return Err(Error::config("darken.levels must contain at least one level").into());
    }

    for &level in &config.darken.levels {
        DarknessLevel::new(level)
            .map_err(|e| Error::config(format!("invalid entry in darken.levels: {}", e)))?;
    }

    if !(1..=100).contains(&config.darken.jpeg_quality) {
        return Err(Error::config(format!(
            "darken.jpeg_quality must be between 1 and 100, got {}",
            config.darken.jpeg_quality
        ))
        .into());
    }

    for (key, value) in [
        ("partition.input", &config.partition.input),
        ("darken.source_dir", &config.darken.source_dir),
    ] {
        if let Some(path) = value {
            if !path.exists() {
                tracing::warn!("{} does not exist: {:?}", key, path);
            }
        }
    }

    Ok(())
}
