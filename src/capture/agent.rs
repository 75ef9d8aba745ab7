use std::sync::Arc;

use async_trait::async_trait;
use futures::{pin_mut, Stream, StreamExt};

use super::append_isolated;
use super::hooks::{SynthesisObserver, SynthesisStreamObserver};
use crate::normalize::{normalize_agent_chunk, StreamAccumulator};
use crate::session::SessionLog;

/// Captures agent utterances at the speech-synthesis boundary.
///
/// By the time text reaches synthesis the language model has finished
/// producing it, so only complete responses are recorded here, never
/// intermediate generation deltas. Non-streaming synthesis logs the block
/// directly; streaming synthesis accumulates fragments per stream and logs
/// once at end-of-input.
pub struct AgentCapture {
    session: Arc<SessionLog>,
    source: String,
}

impl AgentCapture {
    pub fn new(session: Arc<SessionLog>) -> Self {
        Self::with_source(session, "tts")
    }

    pub fn with_source(session: Arc<SessionLog>, source: impl Into<String>) -> Self {
        Self {
            session,
            source: source.into(),
        }
    }

    /// Drain a fragment stream to completion through a stream observer.
    /// Convenience over `begin_stream` for producers that expose their
    /// fragments as a `Stream`.
    pub async fn capture_stream<S>(&self, fragments: S)
    where
        S: Stream<Item = String> + Send,
    {
        let mut observer = self.begin_stream();
        pin_mut!(fragments);

        while let Some(fragment) = fragments.next().await {
            observer.on_fragment(&fragment);
        }

        observer.on_end().await;
    }
}

#[async_trait]
impl SynthesisObserver for AgentCapture {
    async fn on_text(&self, text: &str) {
        if let Some(turn) = normalize_agent_chunk(text, &self.source) {
            append_isolated(&self.session, turn).await;
        }
    }

    fn begin_stream(&self) -> Box<dyn SynthesisStreamObserver> {
        Box::new(AgentStreamCapture {
            session: Arc::clone(&self.session),
            source: format!("{}-stream", self.source),
            accumulator: StreamAccumulator::new(),
        })
    }
}

/// One streaming synthesis call's capture state. Owns its accumulator, so
/// concurrent streams never mix fragments.
struct AgentStreamCapture {
    session: Arc<SessionLog>,
    source: String,
    accumulator: StreamAccumulator,
}

#[async_trait]
impl SynthesisStreamObserver for AgentStreamCapture {
    fn on_fragment(&mut self, fragment: &str) {
        self.accumulator.push(fragment);
    }

    async fn on_end(self: Box<Self>) {
        if let Some(turn) = self.accumulator.finish(&self.source) {
            append_isolated(&self.session, turn).await;
        }
    }
}
