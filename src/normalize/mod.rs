//! Turn normalization
//!
//! Converts heterogeneous producer payloads (model context windows,
//! complete synthesis blocks, streamed fragments) into canonical [`Turn`]s,
//! applying the role-specific completion rules:
//! - user: only the newest user message in the context is actionable
//! - agent: only complete, de-chunked synthesis text is recorded
//!
//! [`Turn`]: crate::session::Turn

mod agent;
mod context;
mod user;

pub use agent::{normalize_agent_chunk, StreamAccumulator, MAX_STREAM_BYTES};
pub use context::{ContextTurn, MessageRole};
pub use user::normalize_user;
