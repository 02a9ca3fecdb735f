mod schema;

pub use schema::{CacheSettings, CardDefaults, Config};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/pr-stats-card/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("pr-stats-card"))
}

/// Get the default config file path (~/.config/pr-stats-card/config.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// An explicit `path` must exist. Without one, the default location is used
/// when present and built-in defaults otherwise.
///
/// # Errors
///
/// Returns an error if:
/// - An explicit config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path
        }
        None => match get_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(Config::default()),
        },
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    // Surface a bad ttl at load time rather than on first cache use
    config.cache.ttl()?;

    tracing::debug!(path = %config_path.display(), "Loaded config");
    Ok(config)
}
