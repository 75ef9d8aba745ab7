use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the session log and its capture paths.
///
/// Variants fall into three classes with different handling policies:
/// - init errors (`Init`, `InitSerialize`) are fatal to startup and
///   propagate out of [`SessionLog::create`](crate::session::SessionLog::create);
/// - append errors (`Append`, `Parse`, `Serialize`) are recovered locally by
///   the capture adapters and never reach the conversation pipeline;
/// - `NotInitialized` is a contract violation and always fatal.
#[derive(Debug, Error)]
pub enum SessionLogError {
    #[error("failed to initialize session record at {path}: {source}")]
    Init {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize initial session record for {path}: {source}")]
    InitSerialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error while {operation} at {path}: {source}")]
    Append {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("session record at {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize session record for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("session log accessed before initialization")]
    NotInitialized,
}

impl SessionLogError {
    #[must_use]
    pub fn init(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Init {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn append(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Append {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Whether this error belongs to the append class, i.e. it is recovered
    /// by failure isolation instead of propagating.
    #[must_use]
    pub fn is_append_error(&self) -> bool {
        matches!(
            self,
            Self::Append { .. } | Self::Parse { .. } | Self::Serialize { .. }
        )
    }
}
