use crate::{Notification, Phase};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    pub source: Option<String>,
    pub target: Option<String>,
    /// Entries found by discovery, once scanning is over.
    pub discovered: Option<usize>,
    pub processed: usize,
    pub ok: usize,
    pub skipped: usize,
    pub notification: Option<Notification>,
    pub dirty: bool,
}
