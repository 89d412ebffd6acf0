//! Default paths for fairway components
//!
//! Paths are user-writable by default:
//! - Config: `$XDG_CONFIG_HOME/fairway/config.toml` or `~/.config/fairway/config.toml`
//! - Data: `$XDG_DATA_HOME/fairway` or `~/.local/share/fairway`

use std::path::PathBuf;

/// Environment variable for overriding the data directory
pub const FAIRWAY_DATA_DIR_ENV: &str = "FAIRWAY_DATA_DIR";

/// Environment variable for overriding the config file
pub const FAIRWAY_CONFIG_ENV: &str = "FAIRWAY_CONFIG";

/// Application subdirectory name
const APP_DIR: &str = "fairway";

/// Config filename within the config directory
const CONFIG_FILENAME: &str = "config.toml";

/// Database filename within the data directory
pub const DATABASE_FILENAME: &str = "fairway.db";

/// Get the default config file path.
///
/// Order of precedence:
/// 1. `$FAIRWAY_CONFIG` environment variable (if set)
/// 2. `$XDG_CONFIG_HOME/fairway/config.toml` (if XDG_CONFIG_HOME is set)
/// 3. `~/.config/fairway/config.toml` (fallback)
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(FAIRWAY_CONFIG_ENV) {
        return PathBuf::from(path);
    }

    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR).join(CONFIG_FILENAME);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join(CONFIG_FILENAME);
    }

    PathBuf::from("/etc").join(APP_DIR).join(CONFIG_FILENAME)
}

/// Get the default data directory.
///
/// Order of precedence:
/// 1. `$FAIRWAY_DATA_DIR` environment variable (if set)
/// 2. `$XDG_DATA_HOME/fairway` (if XDG_DATA_HOME is set)
/// 3. `~/.local/share/fairway` (fallback)
pub fn default_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var(FAIRWAY_DATA_DIR_ENV) {
        return PathBuf::from(path);
    }

    data_dir_without_env()
}

/// Get the data directory without checking FAIRWAY_DATA_DIR.
/// Used for config defaults where the env var is checked separately.
pub fn data_dir_without_env() -> PathBuf {
    if let Ok(data_home) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(data_home).join(APP_DIR);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR);
    }

    // Last resort
    PathBuf::from("/tmp").join(APP_DIR).join("data")
}
