use dirmirror_core::{DiscoveryError, FailureReason, SourceError};

use crate::{FetchError, StorageError};

/// Errors that cross the engine boundary. Per-file and per-directory
/// failures never surface here; they become skips or empty results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MirrorError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    InvalidSource(#[from] SourceError),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("cancelled")]
    Cancelled,
}

impl From<StorageError> for MirrorError {
    fn from(err: StorageError) -> Self {
        MirrorError::Storage(err.to_string())
    }
}

impl MirrorError {
    pub fn failure_reason(&self) -> FailureReason {
        match self {
            MirrorError::Discovery(DiscoveryError::NoListing { .. }) => FailureReason::NoListing,
            MirrorError::Discovery(DiscoveryError::EmptyList { .. }) => FailureReason::EmptyList,
            MirrorError::Cancelled => FailureReason::Cancelled,
            other => FailureReason::Other(other.to_string()),
        }
    }
}

/// Failure to bring up an [`crate::EngineHandle`].
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("http client: {0}")]
    Client(#[from] FetchError),
    #[error("async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
