use std::fmt;

/// Failures that end a discovery or mirror run with nothing to show.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiscoveryError {
    /// The root had no manifest and no readable listing.
    #[error("no manifest or directory listing found at {url}")]
    NoListing { url: String },
    /// The root was readable but listed no files.
    #[error("listing at {url} contains no files")]
    EmptyList { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub path: String,
    pub reason: String,
}

/// Tally of one mirror run. Once every entry has been recorded,
/// `ok + skipped == total`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorResult {
    pub target_dir: String,
    pub ok: usize,
    pub skipped: usize,
    pub total: usize,
    pub skipped_entries: Vec<SkippedEntry>,
}

impl MirrorResult {
    pub fn new(target_dir: impl Into<String>, total: usize) -> Self {
        Self {
            target_dir: target_dir.into(),
            ok: 0,
            skipped: 0,
            total,
            skipped_entries: Vec::new(),
        }
    }

    pub fn record_ok(&mut self) {
        self.ok += 1;
    }

    pub fn record_skipped(&mut self, path: impl Into<String>, reason: impl Into<String>) {
        self.skipped += 1;
        self.skipped_entries.push(SkippedEntry {
            path: path.into(),
            reason: reason.into(),
        });
    }

    pub fn processed(&self) -> usize {
        self.ok + self.skipped
    }

    pub fn is_complete(&self) -> bool {
        self.processed() == self.total
    }
}

impl fmt::Display for MirrorResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} of {} files mirrored, {} skipped",
            self.target_dir, self.ok, self.total, self.skipped
        )
    }
}

#[cfg(test)]
mod tests {
    use super::MirrorResult;

    #[test]
    fn tally_completes_when_every_entry_recorded() {
        let mut result = MirrorResult::new("site", 3);
        result.record_ok();
        result.record_skipped("b.txt", "http status 404");
        assert!(!result.is_complete());
        result.record_ok();
        assert!(result.is_complete());
        assert_eq!((result.ok, result.skipped, result.total), (2, 1, 3));
        assert_eq!(result.skipped_entries[0].path, "b.txt");
        assert_eq!(result.to_string(), "site: 2 of 3 files mirrored, 1 skipped");
    }
}
