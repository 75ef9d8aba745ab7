use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who uttered a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

/// One captured, attributed utterance.
///
/// `content` is always non-empty after trimming; the normalizers suppress
/// whitespace-only input before a `Turn` is ever built. A turn is immutable
/// once appended to a session record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,

    /// Normalized utterance text (leading/trailing whitespace stripped)
    pub content: String,

    /// When the capture adapter observed completion (RFC 3339)
    pub timestamp: DateTime<Utc>,

    /// Provenance tag naming the capture adapter that produced this turn
    pub source: String,
}

impl Turn {
    /// Build a turn stamped with the current instant. Returns `None` for
    /// whitespace-only content so empty turns can never be recorded.
    pub fn now(role: Role, content: &str, source: &str) -> Option<Self> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }

        Some(Self {
            role,
            content: content.to_string(),
            timestamp: Utc::now(),
            source: source.to_string(),
        })
    }
}

/// The persisted per-session document: an ordered, append-only list of turns.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub conversation: Vec<Turn>,
}
