use std::sync::Arc;

use dirmirror_core::{dedupe_entries, CapTracker, CrawlContext, DiscoveryError, SourceLocation};
use futures_util::future::{BoxFuture, FutureExt};
use mirror_logging::{mirror_debug, mirror_info};
use tokio_util::sync::CancellationToken;

use crate::decode::decode_text;
use crate::strategy::{
    extract_link_targets, parse_json_listing, probe_manifest, resolve_targets, Discovery,
    ListingTarget, DEFAULT_MANIFEST_NAMES,
};
use crate::{ContentKind, EngineEvent, Fetcher, MirrorError, ProgressSink};

#[derive(Debug, Clone)]
pub struct CrawlSettings {
    /// Deepest directory level visited; the source root is level 0.
    pub max_depth: usize,
    /// Upper bound on entries returned by one scan.
    pub max_entries: usize,
    /// Manifest filenames probed in each directory, in order.
    pub manifest_names: Vec<String>,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            max_depth: 5,
            max_entries: 5_000,
            manifest_names: DEFAULT_MANIFEST_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Discovers every file below a source location.
///
/// Each directory is tried with a manifest first, then with its own listing.
/// Subdirectories found in an HTML listing are visited one at a time, and all
/// visits share one [`CapTracker`].
pub struct Crawler {
    fetcher: Arc<dyn Fetcher>,
    settings: CrawlSettings,
    cancel: CancellationToken,
}

impl Crawler {
    pub fn new(fetcher: Arc<dyn Fetcher>, settings: CrawlSettings) -> Self {
        Self {
            fetcher,
            settings,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns the normalized, deduplicated root-relative file paths found
    /// under `source`, in discovery order.
    ///
    /// Fails with `NoListing` only when the root itself has neither a
    /// manifest nor a recognizable listing.
    pub async fn discover(
        &self,
        source: &SourceLocation,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<String>, MirrorError> {
        sink.emit(EngineEvent::ScanStarted {
            source: source.directory_url().to_string(),
        });
        mirror_info!("Scanning {}", source.directory_url());

        let cap = CapTracker::new(self.settings.max_entries);
        let ctx = CrawlContext::root(self.settings.max_depth);
        let discovery = self.discover_dir(source.clone(), ctx, &cap, sink).await?;
        if !discovery.is_found() {
            return Err(DiscoveryError::NoListing {
                url: source.directory_url().to_string(),
            }
            .into());
        }
        let entries = dedupe_entries(discovery.into_entries());

        mirror_info!(
            "Scan of {} found {} entries (cap {})",
            source.directory_url(),
            entries.len(),
            cap.max()
        );
        sink.emit(EngineEvent::ScanCompleted {
            count: entries.len(),
        });
        Ok(entries)
    }

    fn discover_dir<'a>(
        &'a self,
        location: SourceLocation,
        ctx: CrawlContext,
        cap: &'a CapTracker,
        sink: &'a dyn ProgressSink,
    ) -> BoxFuture<'a, Result<Discovery, MirrorError>> {
        async move {
            if ctx.is_exhausted() {
                mirror_debug!("Depth limit reached at {}", location.directory_url());
                return Ok(Discovery::Empty);
            }
            if self.cancel.is_cancelled() {
                return Err(MirrorError::Cancelled);
            }

            let manifest = probe_manifest(
                self.fetcher.as_ref(),
                &location,
                &self.settings.manifest_names,
            )
            .await;
            let discovery = match manifest {
                Some(entries) if !entries.is_empty() => Discovery::Manifest(admit(cap, entries)),
                manifest => match self.read_listing(&location, ctx, cap, sink).await? {
                    // An empty manifest still counts as something found.
                    Discovery::Empty if manifest.is_some() => Discovery::Manifest(Vec::new()),
                    listing => listing,
                },
            };

            sink.emit(EngineEvent::DirectoryScanned {
                url: location.directory_url().to_string(),
                depth: ctx.depth,
                entries: discovery.entries().len(),
            });
            Ok(discovery)
        }
        .boxed()
    }

    async fn read_listing(
        &self,
        location: &SourceLocation,
        ctx: CrawlContext,
        cap: &CapTracker,
        sink: &dyn ProgressSink,
    ) -> Result<Discovery, MirrorError> {
        let output = match self.fetcher.fetch(location.directory_url()).await {
            Ok(output) => output,
            Err(err) => {
                mirror_debug!("Listing {} unavailable: {}", location.directory_url(), err);
                return Ok(Discovery::Empty);
            }
        };

        let kind = output.metadata.content_kind();
        if kind == ContentKind::Other {
            mirror_debug!(
                "Listing {} has unsupported content type {:?}",
                location.directory_url(),
                output.metadata.content_type
            );
            return Ok(Discovery::Empty);
        }

        let text = match decode_text(&output.bytes, output.metadata.content_type.as_deref()) {
            Ok(decoded) => decoded.text,
            Err(err) => {
                mirror_debug!("Listing {} undecodable: {}", location.directory_url(), err);
                return Ok(Discovery::Empty);
            }
        };

        match kind {
            ContentKind::Html => {
                let hrefs = extract_link_targets(&text);
                let targets = resolve_targets(location, &hrefs);
                let entries = self.walk_html(location, targets, ctx, cap, sink).await?;
                Ok(Discovery::Listing(entries))
            }
            ContentKind::Json => match parse_json_listing(&text) {
                Some(names) => {
                    let entries = names.iter().map(|name| location.entry_path(name)).collect();
                    Ok(Discovery::Listing(admit(cap, entries)))
                }
                None => {
                    mirror_debug!("Listing {} is not a known JSON shape", location.directory_url());
                    Ok(Discovery::Empty)
                }
            },
            ContentKind::Other => Ok(Discovery::Empty),
        }
    }

    /// Collects files in page order, descending into each subdirectory as it
    /// is met.
    async fn walk_html(
        &self,
        location: &SourceLocation,
        targets: Vec<ListingTarget>,
        ctx: CrawlContext,
        cap: &CapTracker,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<String>, MirrorError> {
        let mut entries = Vec::new();
        for target in targets {
            if self.cancel.is_cancelled() {
                return Err(MirrorError::Cancelled);
            }
            match target {
                ListingTarget::File(path) => {
                    if cap.try_admit() {
                        entries.push(location.entry_path(&path));
                    }
                }
                ListingTarget::Directory(path) => {
                    if cap.is_full() {
                        continue;
                    }
                    let Some(child) = location.child(&path) else {
                        continue;
                    };
                    let nested = self.discover_dir(child, ctx.descend(), cap, sink).await?;
                    entries.extend(nested.into_entries());
                }
            }
        }
        Ok(entries)
    }
}

fn admit(cap: &CapTracker, entries: Vec<String>) -> Vec<String> {
    entries
        .into_iter()
        .take_while(|_| cap.try_admit())
        .collect()
}
