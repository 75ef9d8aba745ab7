//! Durable per-session conversation records
//!
//! This module provides the `SessionLog` abstraction that manages:
//! - Record creation under a `conversations/` directory
//! - Deterministic, timestamp-derived record naming
//! - Serialized whole-document appends (no lost updates)
//! - Read-back of the ordered turn sequence

mod paths;
mod record;
mod store;

pub use paths::{conversations_root, CONVERSATIONS_DIR};
pub use record::{ConversationRecord, Role, Turn};
pub use store::{SessionHandle, SessionLog};
