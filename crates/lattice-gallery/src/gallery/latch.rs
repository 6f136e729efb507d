//! Re-entrancy latches.

use std::sync::atomic::{AtomicBool, Ordering};

/// A flag marking an in-progress commit.
///
/// Coordinators take the latch for the duration of a commit. A request that
/// arrives while the latch is held (typically from a slot reacting to the
/// commit's own side effects) is ignored instead of recursing.
#[derive(Debug, Default)]
pub(crate) struct Latch {
    held: AtomicBool,
}

impl Latch {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Takes the latch, or returns `None` if it is already held.
    pub(crate) fn try_enter(&self) -> Option<LatchGuard<'_>> {
        self.held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LatchGuard { latch: self })
    }

    pub(crate) fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }
}

/// Releases its [`Latch`] when dropped.
#[must_use = "the latch is released as soon as the guard is dropped"]
pub(crate) struct LatchGuard<'a> {
    latch: &'a Latch,
}

impl Drop for LatchGuard<'_> {
    fn drop(&mut self) {
        self.latch.held.store(false, Ordering::Release);
    }
}
