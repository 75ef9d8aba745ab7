use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

pub const CONVERSATIONS_DIR: &str = "conversations";

/// Directory holding all session records under `base`.
#[must_use]
pub fn conversations_root(base: &Path) -> PathBuf {
    base.join(CONVERSATIONS_DIR)
}

/// Session id derived from the creation instant, second granularity.
#[must_use]
pub fn session_id(created_at: DateTime<Utc>) -> String {
    created_at.format("%Y%m%d_%H%M%S").to_string()
}

/// Record file name for a session id, with an optional numeric
/// disambiguator for sessions created within the same second.
#[must_use]
pub fn record_file_name(session_id: &str, attempt: u32) -> String {
    if attempt == 0 {
        format!("conversation_{}.json", session_id)
    } else {
        format!("conversation_{}_{}.json", session_id, attempt + 1)
    }
}
