use serde::{Deserialize, Serialize};

/// Role tag on a message in the language-model context window.
///
/// Wider than [`Role`](crate::session::Role): the model context also carries
/// system messages, which are never captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Agent,
    System,
}

/// One message in the language-model context: a role tag plus its ordered
/// text parts. This is the only shape the capture layer needs from the
/// model interface; vendor request structures are not depended on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextTurn {
    pub role: MessageRole,
    pub parts: Vec<String>,
}

impl ContextTurn {
    pub fn new(role: MessageRole, parts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            role,
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// First part with non-whitespace content, trimmed.
    pub fn first_text(&self) -> Option<&str> {
        self.parts
            .iter()
            .map(|part| part.trim())
            .find(|part| !part.is_empty())
    }
}
