use crate::FailureReason;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User asked to mirror `source` into the storage directory `target`.
    MirrorRequested { source: String, target: String },
    /// Engine began scanning the source.
    ScanStarted,
    /// Engine finished discovery with `count` entries to mirror.
    ScanCompleted { count: usize },
    /// Engine finished one file, successfully or not.
    FileFinished { ok: bool },
    /// Engine finished the whole mirror run.
    MirrorCompleted {
        ok: usize,
        skipped: usize,
        total: usize,
    },
    /// Engine aborted the run.
    MirrorFailed(FailureReason),
    /// User asked to stop the active run.
    CancelClicked,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
