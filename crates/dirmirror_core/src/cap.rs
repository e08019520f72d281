use std::sync::atomic::{AtomicUsize, Ordering};

/// Bounds the total number of entries admitted across one recursive scan.
///
/// A single tracker is shared by reference between every directory visited
/// during a scan. Admission is check-then-increment, so `count` never
/// exceeds `max` even if several visits race on it.
#[derive(Debug)]
pub struct CapTracker {
    count: AtomicUsize,
    max: usize,
}

impl CapTracker {
    pub fn new(max: usize) -> Self {
        Self {
            count: AtomicUsize::new(0),
            max,
        }
    }

    /// Claims one slot. Returns `false` once the cap has been reached.
    pub fn try_admit(&self) -> bool {
        self.count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| {
                (count < self.max).then_some(count + 1)
            })
            .is_ok()
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn is_full(&self) -> bool {
        self.count() >= self.max
    }
}
