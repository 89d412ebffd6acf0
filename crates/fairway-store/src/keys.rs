//! Record keys

use std::fmt;

/// Every record the core persists. Each maps to one namespaced key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKey {
    /// The current round (ordered shots)
    Round,
    /// All discussion posts, newest first
    Posts,
    /// The local viewer's likes/unlikes
    Interactions,
    /// The remembered local display name
    DisplayName,
    /// The daily analysis usage counter
    Usage,
}

impl RecordKey {
    pub const ALL: [RecordKey; 5] = [
        RecordKey::Round,
        RecordKey::Posts,
        RecordKey::Interactions,
        RecordKey::DisplayName,
        RecordKey::Usage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKey::Round => "fairway.tracker.round",
            RecordKey::Posts => "fairway.forum.posts",
            RecordKey::Interactions => "fairway.forum.interactions",
            RecordKey::DisplayName => "fairway.forum.display_name",
            RecordKey::Usage => "fairway.usage.analysis",
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
