//! Validated settings structures

use crate::schema::{RawAiConfig, RawConfig, RawLimits, RawStorageConfig};
use fairway_util::default_data_dir;
use std::path::PathBuf;
use std::time::Duration;

/// AI swing analyses allowed per calendar day
pub const DEFAULT_DAILY_ANALYSIS_LIMIT: u32 = 5;

/// Maximum display-name length, in characters
pub const DEFAULT_NAME_MAX_CHARS: usize = 30;

/// Maximum post/reply length, in characters
pub const DEFAULT_MESSAGE_MAX_CHARS: usize = 500;

/// Par prefilled for a new hole
pub const DEFAULT_PAR: u32 = 4;

/// Conservative link detector: an optional scheme followed by anything
/// that looks like `word.word`. Any match rejects the message.
pub const DEFAULT_LINK_PATTERN: &str = r"(?:(?:https?|ftp)://)?[\w/?=%.-]+\.[\w/?=%.-]+";

pub const DEFAULT_AI_PROXY_URL: &str = "http://localhost:3000/api/proxy";

pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 60;

/// Validated settings ready for use by the core components
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub limits: Limits,
    pub tracker: TrackerSettings,
    pub forum: ForumSettings,
    pub ai: AiSettings,
}

impl Settings {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        Self {
            storage: StorageSettings::from_raw(raw.storage),
            limits: Limits::from_raw(&raw.limits),
            tracker: TrackerSettings {
                default_par: raw.tracker.default_par.unwrap_or(DEFAULT_PAR),
            },
            forum: ForumSettings {
                link_pattern: raw
                    .forum
                    .link_pattern
                    .unwrap_or_else(|| DEFAULT_LINK_PATTERN.to_string()),
            },
            ai: AiSettings::from_raw(raw.ai),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub data_dir: PathBuf,
}

impl StorageSettings {
    fn from_raw(raw: RawStorageConfig) -> Self {
        Self {
            data_dir: raw.data_dir.unwrap_or_else(default_data_dir),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Limits applied to usage and submitted content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub daily_analysis_limit: u32,
    pub name_max_chars: usize,
    pub message_max_chars: usize,
}

impl Limits {
    fn from_raw(raw: &RawLimits) -> Self {
        Self {
            daily_analysis_limit: raw
                .daily_analysis_limit
                .unwrap_or(DEFAULT_DAILY_ANALYSIS_LIMIT),
            name_max_chars: raw.name_max_chars.unwrap_or(DEFAULT_NAME_MAX_CHARS),
            message_max_chars: raw.message_max_chars.unwrap_or(DEFAULT_MESSAGE_MAX_CHARS),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            daily_analysis_limit: DEFAULT_DAILY_ANALYSIS_LIMIT,
            name_max_chars: DEFAULT_NAME_MAX_CHARS,
            message_max_chars: DEFAULT_MESSAGE_MAX_CHARS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerSettings {
    pub default_par: u32,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            default_par: DEFAULT_PAR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumSettings {
    pub link_pattern: String,
}

impl Default for ForumSettings {
    fn default() -> Self {
        Self {
            link_pattern: DEFAULT_LINK_PATTERN.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiSettings {
    pub proxy_url: String,
    pub timeout: Duration,
}

impl AiSettings {
    fn from_raw(raw: RawAiConfig) -> Self {
        Self {
            proxy_url: raw
                .proxy_url
                .unwrap_or_else(|| DEFAULT_AI_PROXY_URL.to_string()),
            timeout: Duration::from_secs(raw.timeout_secs.unwrap_or(DEFAULT_AI_TIMEOUT_SECS)),
        }
    }
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            proxy_url: DEFAULT_AI_PROXY_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_AI_TIMEOUT_SECS),
        }
    }
}
