use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use dirmirror_core::{MirrorResult, SourceLocation};
use mirror_logging::{mirror_error, mirror_info};
use tokio_util::sync::CancellationToken;

use crate::progress::ChannelProgressSink;
use crate::{
    CrawlSettings, EngineError, EngineEvent, FetchSettings, Fetcher, JobId, LocalStorage, Mirror,
    MirrorError, ReqwestFetcher, StorageAdapter,
};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub fetch: FetchSettings,
    pub crawl: CrawlSettings,
    pub storage_root: PathBuf,
}

impl EngineConfig {
    pub fn default_with_storage(storage_root: PathBuf) -> Self {
        Self {
            fetch: FetchSettings::default(),
            crawl: CrawlSettings::default(),
            storage_root,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::default_with_storage(PathBuf::from("./mirror"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorRequest {
    pub job_id: JobId,
    pub source: String,
    pub target: String,
}

enum EngineCommand {
    Mirror {
        request: MirrorRequest,
        cancel: CancellationToken,
    },
}

/// Runs mirror jobs one after another on a background thread.
///
/// Progress and the terminal [`EngineEvent::MirrorFinished`] of each job are
/// delivered through [`EngineHandle::try_recv`] / [`EngineHandle::recv_timeout`].
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    cancel: Mutex<CancellationToken>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let fetcher: Arc<dyn Fetcher> = Arc::new(ReqwestFetcher::new(config.fetch.clone())?);
        let storage: Arc<dyn StorageAdapter> = Arc::new(LocalStorage::new(config.storage_root));
        Self::with_parts(fetcher, storage, config.crawl)
    }

    /// Builds a handle around caller-supplied fetcher and storage.
    pub fn with_parts(
        fetcher: Arc<dyn Fetcher>,
        storage: Arc<dyn StorageAdapter>,
        crawl: CrawlSettings,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Mirror { request, cancel } => {
                        let mirror = Mirror::new(fetcher.clone(), storage.clone(), crawl.clone())
                            .with_cancellation(cancel);
                        let sink = ChannelProgressSink::new(event_tx.clone());
                        let result = runtime.block_on(run_job(&mirror, &request, &sink));
                        if let Err(err) = &result {
                            mirror_error!("Job {} failed: {}", request.job_id, err);
                        }
                        let _ = event_tx.send(EngineEvent::MirrorFinished {
                            job_id: request.job_id,
                            result,
                        });
                    }
                }
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx,
            cancel: Mutex::new(CancellationToken::new()),
        })
    }

    pub fn enqueue(&self, request: MirrorRequest) {
        let cancel = match self.cancel.lock() {
            Ok(current) => current.child_token(),
            Err(poisoned) => poisoned.into_inner().child_token(),
        };
        let _ = self.cmd_tx.send(EngineCommand::Mirror { request, cancel });
    }

    /// Cancels every job enqueued so far. Later jobs are unaffected.
    pub fn cancel(&self) {
        let mut current = match self.cancel.lock() {
            Ok(current) => current,
            Err(poisoned) => poisoned.into_inner(),
        };
        current.cancel();
        *current = CancellationToken::new();
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn run_job(
    mirror: &Mirror,
    request: &MirrorRequest,
    sink: &ChannelProgressSink,
) -> Result<MirrorResult, MirrorError> {
    mirror_info!(
        "Job {} mirror {} -> {}",
        request.job_id,
        request.source,
        request.target
    );
    let source = SourceLocation::parse(&request.source)?;
    mirror.mirror(&source, &request.target, sink).await
}
