//! Dirmirror engine: HTTP discovery, mirroring and storage IO.
mod crawler;
mod decode;
mod engine;
mod error;
mod fetch;
mod mirror;
mod progress;
mod storage;
pub mod strategy;
mod types;

pub use crawler::{CrawlSettings, Crawler};
pub use decode::{decode_text, DecodeError, DecodedText};
pub use engine::{EngineConfig, EngineHandle, MirrorRequest};
pub use error::{EngineError, MirrorError};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use mirror::Mirror;
pub use progress::{ChannelProgressSink, NullProgressSink, ProgressSink};
pub use storage::{
    ensure_output_dir, DirectoryHandle, EntryKind, LocalStorage, StorageAdapter, StorageEntry,
    StorageError,
};
pub use strategy::Discovery;
pub use types::{ContentKind, EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, JobId};
