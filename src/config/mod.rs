mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    tracing::debug!("Loaded config from {:?}", path);
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./scenename.toml", "~/.config/scenename/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    config
        .naming
        .validate()
        .context("Invalid [naming] configuration")?;
    config
        .parsing
        .validate()
        .context("Invalid [parsing] configuration")?;

    if config.naming.release_separator.is_empty() {
        tracing::warn!("Empty release separator: release names will not parse back");
    }
    for token in config.parsing.extra_languages.keys() {
        if config.parsing.extra_tags.iter().any(|tag| tag.eq_ignore_ascii_case(token)) {
            tracing::warn!("Language token {:?} is also listed as a release tag", token);
        }
    }

    Ok(())
}
