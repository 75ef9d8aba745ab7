use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::info;

use super::paths;
use super::record::{ConversationRecord, Turn};
use crate::error::SessionLogError;

/// The durable record of one conversation session.
///
/// A `SessionLog` owns exactly one JSON document on disk (an ordered list of
/// turns) plus the writer lock that serializes appends to it. Both capture
/// adapters share the log through an `Arc`; there is no process-global state.
///
/// Appends are whole-document read-modify-write cycles: the record is small
/// (human conversation pace), and rewriting the full document keeps the file
/// valid JSON at every point in time.
#[derive(Debug)]
pub struct SessionLog {
    /// Identifier derived from the creation instant, unique per process
    id: String,

    /// Resolved record location, fixed at creation
    path: PathBuf,

    /// Serializes the read-modify-write append cycle across adapters and
    /// carries the timestamp of the last appended turn, so append order and
    /// timestamp order can never diverge
    write_lock: Mutex<Option<DateTime<Utc>>>,
}

impl SessionLog {
    /// Create a fresh session record under `<base_dir>/conversations/`.
    ///
    /// The directory is created on demand and an empty
    /// `{"conversation": []}` document is written before this returns, so a
    /// session always starts from a valid record. Creating a second session
    /// within the same second yields a distinct file (numeric suffix); a new
    /// session never resets an old one.
    pub async fn create(base_dir: impl AsRef<Path>) -> Result<Self, SessionLogError> {
        let root = paths::conversations_root(base_dir.as_ref());
        fs::create_dir_all(&root)
            .await
            .map_err(|source| SessionLogError::init(&root, source))?;

        let created_at = Utc::now();
        let base_id = paths::session_id(created_at);

        let initial = serde_json::to_string_pretty(&ConversationRecord::default())
            .map_err(|source| SessionLogError::InitSerialize {
                path: root.clone(),
                source,
            })?;

        // Create-new semantics: bump the suffix until an unclaimed file name
        // is found, so same-second sessions stay distinct.
        let mut attempt = 0u32;
        loop {
            let path = root.join(paths::record_file_name(&base_id, attempt));

            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    attempt += 1;
                    continue;
                }
                Err(source) => return Err(SessionLogError::init(&path, source)),
            };

            file.write_all(initial.as_bytes())
                .await
                .map_err(|source| SessionLogError::init(&path, source))?;
            file.flush()
                .await
                .map_err(|source| SessionLogError::init(&path, source))?;

            let id = if attempt == 0 {
                base_id.clone()
            } else {
                format!("{}_{}", base_id, attempt + 1)
            };

            info!("Created session record: {} ({})", id, path.display());

            return Ok(Self {
                id,
                path,
                write_lock: Mutex::new(None),
            });
        }
    }

    /// Durably append one turn to the record.
    ///
    /// The full document is re-read, mutated in memory, and rewritten while
    /// the session's writer lock is held, so concurrent user/agent appends
    /// never lose an update. The I/O completes (or fails) before the lock is
    /// released; failures are not retried here. Callers on the conversation
    /// path must treat an error as non-fatal (see the capture adapters).
    ///
    /// Turns are stamped at normalize time, before the lock is taken, so a
    /// turn stamped earlier can lose the race for the lock to a
    /// later-stamped one. Timestamps are clamped to the last appended turn's
    /// here, keeping them non-decreasing in append order.
    pub async fn append(&self, mut turn: Turn) -> Result<(), SessionLogError> {
        let mut last_timestamp = self.write_lock.lock().await;

        if let Some(last) = *last_timestamp {
            turn.timestamp = turn.timestamp.max(last);
        }
        let appended_at = turn.timestamp;

        let role = turn.role;
        let origin = turn.source.clone();
        let preview: String = turn.content.chars().take(80).collect();

        let mut record = self.read_record().await?;
        record.conversation.push(turn);

        let serialized = serde_json::to_string_pretty(&record).map_err(|source| {
            SessionLogError::Serialize {
                path: self.path.clone(),
                source,
            }
        })?;

        fs::write(&self.path, serialized.as_bytes())
            .await
            .map_err(|source| SessionLogError::append("writing session record", &self.path, source))?;

        *last_timestamp = Some(appended_at);
        info!("Recorded {:?} turn from {}: {}", role, origin, preview);

        Ok(())
    }

    /// Read back the turns currently in the record.
    pub async fn turns(&self) -> Result<Vec<Turn>, SessionLogError> {
        let _guard = self.write_lock.lock().await;
        Ok(self.read_record().await?.conversation)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    async fn read_record(&self) -> Result<ConversationRecord, SessionLogError> {
        let bytes = fs::read(&self.path)
            .await
            .map_err(|source| SessionLogError::append("reading session record", &self.path, source))?;

        serde_json::from_slice(&bytes).map_err(|source| SessionLogError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

/// An explicit slot for the session a host process is currently logging to.
///
/// Replaces the hidden process-wide "current log path": the host creates the
/// handle at startup, installs the session once it exists, and components
/// that are handed the slot before installation get a typed
/// `NotInitialized` error instead of silently missing turns.
#[derive(Default)]
pub struct SessionHandle {
    slot: OnceLock<Arc<SessionLog>>,
}

impl SessionHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the session. Returns `false` if one was already installed
    /// (the original is kept; a handle binds to exactly one session).
    pub fn install(&self, log: Arc<SessionLog>) -> bool {
        self.slot.set(log).is_ok()
    }

    pub fn get(&self) -> Result<Arc<SessionLog>, SessionLogError> {
        self.slot
            .get()
            .cloned()
            .ok_or(SessionLogError::NotInitialized)
    }

    /// Resolved record location of the installed session.
    pub fn current_path(&self) -> Result<PathBuf, SessionLogError> {
        Ok(self.get()?.path().to_path_buf())
    }
}
