pub mod capture;
pub mod config;
pub mod error;
pub mod normalize;
pub mod session;

pub use capture::{
    AgentCapture, InferenceObserver, SynthesisObserver, SynthesisStreamObserver, UserCapture,
};
pub use config::Config;
pub use error::SessionLogError;
pub use normalize::{
    normalize_agent_chunk, normalize_user, ContextTurn, MessageRole, StreamAccumulator,
};
pub use session::{ConversationRecord, Role, SessionHandle, SessionLog, Turn};
