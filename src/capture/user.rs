use std::sync::Arc;

use async_trait::async_trait;

use super::append_isolated;
use super::hooks::InferenceObserver;
use crate::normalize::{normalize_user, ContextTurn};
use crate::session::SessionLog;

/// Captures user utterances at the language-model boundary.
///
/// Observing the inference request (rather than the speech-to-text stream)
/// means voice-transcribed and directly-typed input are both captured at a
/// single point: whatever user text reaches the model is what gets logged.
pub struct UserCapture {
    session: Arc<SessionLog>,
    source: String,
}

impl UserCapture {
    pub fn new(session: Arc<SessionLog>) -> Self {
        Self::with_source(session, "llm-request")
    }

    pub fn with_source(session: Arc<SessionLog>, source: impl Into<String>) -> Self {
        Self {
            session,
            source: source.into(),
        }
    }
}

#[async_trait]
impl InferenceObserver for UserCapture {
    async fn on_request(&self, context: &[ContextTurn]) {
        if let Some(turn) = normalize_user(context, &self.source) {
            append_isolated(&self.session, turn).await;
        }
    }
}
