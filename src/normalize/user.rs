use super::context::{ContextTurn, MessageRole};
use crate::session::{Role, Turn};

/// Extract the newest actionable user utterance from the model context.
///
/// Scans from the most recent message backward and takes the first
/// user-tagged message that carries non-empty text; only that message's
/// first non-empty part is used (trimmed). Earlier user messages belong to
/// previous inference requests and are already recorded. Returns `None`
/// when the context holds no user content at all.
pub fn normalize_user(context: &[ContextTurn], source: &str) -> Option<Turn> {
    context
        .iter()
        .rev()
        .filter(|turn| turn.role == MessageRole::User)
        .find_map(|turn| turn.first_text())
        .and_then(|text| Turn::now(Role::User, text, source))
}
