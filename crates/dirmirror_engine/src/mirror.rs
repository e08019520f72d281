use std::sync::Arc;

use dirmirror_core::{DiscoveryError, MirrorResult, SourceError, SourceLocation};
use mirror_logging::{mirror_debug, mirror_info, mirror_warn};
use tokio_util::sync::CancellationToken;

use crate::{
    CrawlSettings, Crawler, DirectoryHandle, EngineEvent, FetchError, Fetcher, MirrorError,
    ProgressSink, StorageAdapter, StorageError,
};

/// Why one entry was skipped. Never escapes [`Mirror::mirror`].
#[derive(Debug, thiserror::Error)]
enum EntryFailure {
    #[error(transparent)]
    Url(#[from] SourceError),
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("write failed: {0}")]
    Write(#[from] StorageError),
}

/// Copies everything discovered under a source into a storage directory.
pub struct Mirror {
    crawler: Crawler,
    fetcher: Arc<dyn Fetcher>,
    storage: Arc<dyn StorageAdapter>,
    cancel: CancellationToken,
}

impl Mirror {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        storage: Arc<dyn StorageAdapter>,
        settings: CrawlSettings,
    ) -> Self {
        Self {
            crawler: Crawler::new(fetcher.clone(), settings),
            fetcher,
            storage,
            cancel: CancellationToken::new(),
        }
    }

    /// Stops discovery and mirroring at the next directory or file boundary
    /// once `cancel` fires.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.crawler = self.crawler.with_cancellation(cancel.clone());
        self.cancel = cancel;
        self
    }

    /// Discovers `source`, then replaces `target_dir` with a fresh copy.
    ///
    /// The target is only touched once discovery has produced at least one
    /// entry. Entries that fail to download or write are counted as skipped.
    pub async fn mirror(
        &self,
        source: &SourceLocation,
        target_dir: &str,
        sink: &dyn ProgressSink,
    ) -> Result<MirrorResult, MirrorError> {
        let entries = self.crawler.discover(source, sink).await?;
        if entries.is_empty() {
            return Err(DiscoveryError::EmptyList {
                url: source.directory_url().to_string(),
            }
            .into());
        }

        self.storage.reset_directory(target_dir)?;
        let handle = self.storage.get_or_create_directory(target_dir)?;
        mirror_info!(
            "Mirroring {} entries from {} into {}",
            entries.len(),
            source.base(),
            handle.id()
        );

        let mut result = MirrorResult::new(target_dir, entries.len());
        for entry in &entries {
            if self.cancel.is_cancelled() {
                mirror_info!(
                    "Mirror into {} cancelled after {} of {} entries",
                    target_dir,
                    result.processed(),
                    result.total
                );
                return Err(MirrorError::Cancelled);
            }
            match self.mirror_entry(source, &handle, entry).await {
                Ok(bytes) => {
                    mirror_debug!("Mirrored {} ({} bytes)", entry, bytes);
                    result.record_ok();
                    sink.emit(EngineEvent::FileMirrored {
                        path: entry.clone(),
                        bytes,
                    });
                }
                Err(failure) => {
                    let reason = failure.to_string();
                    mirror_warn!("Skipping {}: {}", entry, reason);
                    result.record_skipped(entry.clone(), reason.clone());
                    sink.emit(EngineEvent::FileSkipped {
                        path: entry.clone(),
                        reason,
                    });
                }
            }
        }

        debug_assert!(result.is_complete());
        mirror_info!("{}", result);
        sink.emit(EngineEvent::MirrorCompleted(result.clone()));
        Ok(result)
    }

    async fn mirror_entry(
        &self,
        source: &SourceLocation,
        handle: &DirectoryHandle,
        entry: &str,
    ) -> Result<u64, EntryFailure> {
        let url = source.file_url(entry)?;
        let output = self.fetcher.fetch(&url).await?;
        self.storage.write_file(handle, entry, &output.bytes)?;
        Ok(output.metadata.byte_len)
    }
}
