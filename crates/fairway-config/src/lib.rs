//! Configuration parsing and validation for fairway
//!
//! Supports TOML configuration with:
//! - Versioned schema
//! - Storage location
//! - Daily analysis limit and content length limits
//! - Shot tracker defaults and the forum link detector
//! - AI service endpoint
//!
//! Every section is optional; omitted values fall back to the built-in defaults.

mod schema;
mod settings;
mod validation;

pub use schema::*;
pub use settings::*;
pub use validation::*;

use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Current supported config version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Load and validate configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Settings> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Load configuration if the file exists, otherwise use defaults
pub fn load_config_or_default(path: impl AsRef<Path>) -> ConfigResult<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        return Ok(Settings::default());
    }
    load_config(path)
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<Settings> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    let errors = validate_config(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    Ok(Settings::from_raw(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn parse_minimal_config() {
        let settings = parse_config("config_version = 1").unwrap();
        assert_eq!(settings.limits.daily_analysis_limit, 5);
        assert_eq!(settings.limits.name_max_chars, 30);
        assert_eq!(settings.limits.message_max_chars, 500);
        assert_eq!(settings.tracker.default_par, 4);
        assert_eq!(settings.forum.link_pattern, DEFAULT_LINK_PATTERN);
    }

    #[test]
    fn parse_full_config() {
        let config = r#"
            config_version = 1

            [storage]
            data_dir = "/var/lib/fairway"

            [limits]
            daily_analysis_limit = 3
            message_max_chars = 280

            [tracker]
            default_par = 5

            [ai]
            proxy_url = "https://golf.example/api/proxy"
            timeout_secs = 15
        "#;

        let settings = parse_config(config).unwrap();
        assert_eq!(settings.storage.data_dir.to_string_lossy(), "/var/lib/fairway");
        assert_eq!(settings.limits.daily_analysis_limit, 3);
        assert_eq!(settings.limits.name_max_chars, 30);
        assert_eq!(settings.limits.message_max_chars, 280);
        assert_eq!(settings.tracker.default_par, 5);
        assert_eq!(settings.ai.timeout, Duration::from_secs(15));
    }

    #[test]
    fn reject_wrong_version() {
        let result = parse_config("config_version = 99");
        assert!(matches!(result, Err(ConfigError::UnsupportedVersion(99))));
    }

    #[test]
    fn reject_invalid_values() {
        let config = r#"
            config_version = 1
            [limits]
            daily_analysis_limit = 0
        "#;
        let result = parse_config(config);
        assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));
    }

    #[test]
    fn default_link_pattern_compiles() {
        assert!(regex_lite::Regex::new(DEFAULT_LINK_PATTERN).is_ok());
    }

    #[test]
    fn load_from_file_and_missing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "config_version = 1\n[limits]\nname_max_chars = 12").unwrap();

        let settings = load_config(file.path()).unwrap();
        assert_eq!(settings.limits.name_max_chars, 12);

        let dir = tempfile::tempdir().unwrap();
        let settings = load_config_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings.limits, Limits::default());
    }
}
