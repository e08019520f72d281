use crate::view_model::AppViewModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Scanning,
    Mirroring,
    Finished,
    Failed,
}

impl Phase {
    pub fn is_active(self) -> bool {
        matches!(self, Phase::Scanning | Phase::Mirroring)
    }
}

/// Why a run ended without a completion summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Nothing scannable was found at the source root.
    NoListing,
    /// The source was scanned but holds no files.
    EmptyList,
    Cancelled,
    Other(String),
}

/// The single user-facing notice the surrounding UI should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Scanning { source: String },
    Failed { source: String, reason: FailureReason },
    Completed { ok: usize, skipped: usize, total: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    phase: Phase,
    source: Option<String>,
    target: Option<String>,
    discovered: Option<usize>,
    ok: usize,
    skipped: usize,
    notification: Option<Notification>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            phase: self.phase,
            source: self.source.clone(),
            target: self.target.clone(),
            discovered: self.discovered,
            processed: self.ok + self.skipped,
            ok: self.ok,
            skipped: self.skipped,
            notification: self.notification.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether the view changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn start_run(&mut self, source: String, target: String) {
        self.phase = Phase::Scanning;
        self.notification = Some(Notification::Scanning {
            source: source.clone(),
        });
        self.source = Some(source);
        self.target = Some(target);
        self.discovered = None;
        self.ok = 0;
        self.skipped = 0;
        self.dirty = true;
    }

    pub(crate) fn mark_scanning(&mut self) {
        if self.phase != Phase::Scanning {
            return;
        }
        let source = self.source.clone().unwrap_or_default();
        let notification = Some(Notification::Scanning { source });
        if self.notification != notification {
            self.notification = notification;
            self.dirty = true;
        }
    }

    pub(crate) fn set_discovered(&mut self, count: usize) {
        if self.phase != Phase::Scanning {
            return;
        }
        self.discovered = Some(count);
        self.phase = Phase::Mirroring;
        self.dirty = true;
    }

    pub(crate) fn apply_file_finished(&mut self, ok: bool) {
        if self.phase != Phase::Mirroring {
            return;
        }
        if ok {
            self.ok += 1;
        } else {
            self.skipped += 1;
        }
        self.dirty = true;
    }

    pub(crate) fn finish(&mut self, ok: usize, skipped: usize, total: usize) {
        if !self.phase.is_active() {
            return;
        }
        self.phase = Phase::Finished;
        self.discovered = Some(total);
        self.ok = ok;
        self.skipped = skipped;
        self.notification = Some(Notification::Completed { ok, skipped, total });
        self.dirty = true;
    }

    pub(crate) fn fail(&mut self, reason: FailureReason) {
        if !self.phase.is_active() {
            return;
        }
        self.phase = Phase::Failed;
        self.notification = Some(Notification::Failed {
            source: self.source.clone().unwrap_or_default(),
            reason,
        });
        self.dirty = true;
    }
}
