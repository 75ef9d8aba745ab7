//! Capture adapters
//!
//! The two observation points that turn producer events into recorded
//! turns, plus the failure-isolation policy shared by both:
//! - `UserCapture` observes language-model requests (voice and typed input
//!   funnel through the same point)
//! - `AgentCapture` observes synthesis input (chunk and streaming modes)
//!
//! A failed capture never reaches the conversation pipeline. The turn
//! content still goes to the tracing output, so a persistence outage costs
//! at most a gap in the record, never a broken conversation turn.

mod agent;
mod hooks;
mod user;

pub use agent::AgentCapture;
pub use hooks::{InferenceObserver, SynthesisObserver, SynthesisStreamObserver};
pub use user::UserCapture;

use tracing::warn;

use crate::session::{SessionLog, Turn};

/// Append with the failure-isolation policy: on error, emit a best-effort
/// record of the turn content to the tracing channel and swallow the error.
pub(crate) async fn append_isolated(session: &SessionLog, turn: Turn) {
    let preserved = turn.clone();

    if let Err(e) = session.append(turn).await {
        warn!(
            "Failed to persist {:?} turn from {} (continuing): {}; content: {:?}",
            preserved.role, preserved.source, e, preserved.content
        );
    }
}
