use std::fmt;

use bytes::Bytes;
use dirmirror_core::MirrorResult;

use crate::MirrorError;

pub type JobId = u64;

/// What a directory response holds, judged by its declared content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Html,
    Json,
    Other,
}

impl ContentKind {
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let Some(raw) = content_type else {
            return ContentKind::Other;
        };
        let mime = raw.split(';').next().unwrap_or(raw).trim().to_ascii_lowercase();
        match mime.as_str() {
            "text/html" | "application/xhtml+xml" => ContentKind::Html,
            "application/json" | "text/json" => ContentKind::Json,
            other if other.ends_with("+json") => ContentKind::Json,
            _ => ContentKind::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ScanStarted {
        source: String,
    },
    DirectoryScanned {
        url: String,
        depth: usize,
        entries: usize,
    },
    ScanCompleted {
        count: usize,
    },
    FileMirrored {
        path: String,
        bytes: u64,
    },
    FileSkipped {
        path: String,
        reason: String,
    },
    MirrorCompleted(MirrorResult),
    /// Terminal event for a job submitted through [`crate::EngineHandle`].
    MirrorFinished {
        job_id: JobId,
        result: Result<MirrorResult, MirrorError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Bytes,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

impl FetchMetadata {
    pub fn content_kind(&self) -> ContentKind {
        ContentKind::from_content_type(self.content_type.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ContentKind;

    #[test]
    fn content_types_select_listing_strategy() {
        assert_eq!(
            ContentKind::from_content_type(Some("text/html; charset=utf-8")),
            ContentKind::Html
        );
        assert_eq!(
            ContentKind::from_content_type(Some("Application/XHTML+XML")),
            ContentKind::Html
        );
        assert_eq!(
            ContentKind::from_content_type(Some("application/json")),
            ContentKind::Json
        );
        assert_eq!(
            ContentKind::from_content_type(Some("application/vnd.listing+json")),
            ContentKind::Json
        );
        assert_eq!(
            ContentKind::from_content_type(Some("text/plain")),
            ContentKind::Other
        );
        assert_eq!(ContentKind::from_content_type(None), ContentKind::Other);
    }
}
