//! Configuration validation

use crate::schema::RawConfig;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("limits.{field} must be greater than zero")]
    ZeroLimit { field: &'static str },

    #[error("tracker.default_par {0} is outside 3..=6")]
    ParOutOfRange(u32),

    #[error("forum.link_pattern '{pattern}' does not compile: {message}")]
    InvalidLinkPattern { pattern: String, message: String },

    #[error("ai.proxy_url '{0}' must be an http:// or https:// URL")]
    InvalidProxyUrl(String),

    #[error("ai.timeout_secs must be greater than zero")]
    ZeroTimeout,
}

/// Validate a raw configuration, collecting every problem
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let limits = &config.limits;
    if limits.daily_analysis_limit == Some(0) {
        errors.push(ValidationError::ZeroLimit {
            field: "daily_analysis_limit",
        });
    }
    if limits.name_max_chars == Some(0) {
        errors.push(ValidationError::ZeroLimit {
            field: "name_max_chars",
        });
    }
    if limits.message_max_chars == Some(0) {
        errors.push(ValidationError::ZeroLimit {
            field: "message_max_chars",
        });
    }

    if let Some(par) = config.tracker.default_par
        && !(3..=6).contains(&par)
    {
        errors.push(ValidationError::ParOutOfRange(par));
    }

    if let Some(pattern) = &config.forum.link_pattern
        && let Err(e) = regex_lite::Regex::new(pattern)
    {
        errors.push(ValidationError::InvalidLinkPattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        });
    }

    if let Some(url) = &config.ai.proxy_url
        && !is_http_url(url)
    {
        errors.push(ValidationError::InvalidProxyUrl(url.clone()));
    }

    if config.ai.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    errors
}

fn is_http_url(url: &str) -> bool {
    ["http://", "https://"]
        .iter()
        .any(|scheme| url.len() > scheme.len() && url.starts_with(scheme))
}
