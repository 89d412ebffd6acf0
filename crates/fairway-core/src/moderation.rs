//! Content moderation predicates

use fairway_config::DEFAULT_LINK_PATTERN;
use regex_lite::Regex;

/// Decides whether a message may be posted
pub trait ContentFilter: Send + Sync {
    fn is_disallowed_content(&self, message: &str) -> bool;
}

/// Rejects anything that looks like a link or bare domain.
///
/// The match is deliberately loose: any `word.word` sequence counts, so
/// abbreviations such as "e.g." and decimals are rejected too.
#[derive(Debug, Clone)]
pub struct LinkFilter {
    pattern: Regex,
}

impl LinkFilter {
    pub fn new(pattern: &str) -> Result<Self, regex_lite::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl Default for LinkFilter {
    fn default() -> Self {
        Self::new(DEFAULT_LINK_PATTERN).expect("default link pattern is valid")
    }
}

impl ContentFilter for LinkFilter {
    fn is_disallowed_content(&self, message: &str) -> bool {
        self.pattern.is_match(message)
    }
}
