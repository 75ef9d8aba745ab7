use async_trait::async_trait;

use crate::normalize::ContextTurn;

/// Injection point at the language-model boundary.
///
/// The hosting pipeline invokes this once per inference request, immediately
/// before dispatch, with the current context window. Implementations must
/// never fail into the caller; capture problems stay on the capture side.
#[async_trait]
pub trait InferenceObserver: Send + Sync {
    async fn on_request(&self, context: &[ContextTurn]);
}

/// Observer for one streaming synthesis call.
///
/// The synthesis boundary feeds each text fragment through `on_fragment`
/// and signals end-of-input exactly once with `on_end`, which consumes the
/// observer. Dropping the observer without `on_end` discards the stream.
#[async_trait]
pub trait SynthesisStreamObserver: Send {
    fn on_fragment(&mut self, fragment: &str);
    async fn on_end(self: Box<Self>);
}

/// Injection point at the speech-synthesis boundary.
///
/// `on_text` mirrors the non-streaming synthesis entry point (one complete
/// text block); `begin_stream` opens an observer for one streaming call.
/// Both must never fail into the caller.
#[async_trait]
pub trait SynthesisObserver: Send + Sync {
    async fn on_text(&self, text: &str);
    fn begin_stream(&self) -> Box<dyn SynthesisStreamObserver>;
}
