use tracing::warn;

use crate::session::{Role, Turn};

/// Upper bound on accumulated streamed text per synthesis stream. Past the
/// cap, fragments are dropped and the finished turn is truncated.
pub const MAX_STREAM_BYTES: usize = 1024 * 1024;

/// Normalize one complete (non-streamed) synthesis input into an agent turn.
/// Whitespace-only input yields no turn.
pub fn normalize_agent_chunk(full_text: &str, source: &str) -> Option<Turn> {
    Turn::now(Role::Agent, full_text, source)
}

/// Per-stream fragment buffer for streaming synthesis.
///
/// Fragments are appended until the end-of-input signal; only then is a
/// single turn emitted from the full accumulated text. Partial-sentence
/// fragments are never recorded on their own.
#[derive(Debug, Default)]
pub struct StreamAccumulator {
    buffer: String,
    truncated: bool,
}

impl StreamAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one fragment. Input past [`MAX_STREAM_BYTES`] is dropped.
    pub fn push(&mut self, fragment: &str) {
        let remaining = MAX_STREAM_BYTES.saturating_sub(self.buffer.len());
        if fragment.len() <= remaining {
            self.buffer.push_str(fragment);
            return;
        }

        if !self.truncated {
            warn!(
                "Synthesis stream exceeded {} bytes; truncating turn",
                MAX_STREAM_BYTES
            );
            self.truncated = true;
        }

        let mut cut = remaining;
        while cut > 0 && !fragment.is_char_boundary(cut) {
            cut -= 1;
        }
        self.buffer.push_str(&fragment[..cut]);
    }

    /// End-of-input: emit at most one turn from the accumulated text.
    /// Whitespace-only accumulation yields no turn.
    pub fn finish(self, source: &str) -> Option<Turn> {
        Turn::now(Role::Agent, &self.buffer, source)
    }
}
