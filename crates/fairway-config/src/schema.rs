//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    #[serde(default)]
    pub storage: RawStorageConfig,

    #[serde(default)]
    pub limits: RawLimits,

    #[serde(default)]
    pub tracker: RawTrackerConfig,

    #[serde(default)]
    pub forum: RawForumConfig,

    #[serde(default)]
    pub ai: RawAiConfig,
}

/// Where records are persisted
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawStorageConfig {
    /// Directory holding the record database
    pub data_dir: Option<PathBuf>,
}

/// Usage and content limits
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawLimits {
    /// AI swing analyses allowed per calendar day
    pub daily_analysis_limit: Option<u32>,

    /// Maximum display-name length, in characters
    pub name_max_chars: Option<usize>,

    /// Maximum post/reply length, in characters
    pub message_max_chars: Option<usize>,
}

/// Shot tracker settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawTrackerConfig {
    /// Par prefilled for the next hole once a hole is finished
    pub default_par: Option<u32>,
}

/// Discussion forum settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawForumConfig {
    /// Regex overriding the built-in link detector
    pub link_pattern: Option<String>,
}

/// AI service settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawAiConfig {
    /// Endpoint accepting `{action, payload}` requests
    pub proxy_url: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}
