//! One-shot broadcast cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A stop signal shared by every unit of one search run.
///
/// Clones observe the same state. Once fired it stays fired.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires the signal. Returns `true` only for the call that fired it.
    pub fn fire(&self) -> bool {
        !self.0.swap(true, Ordering::AcqRel)
    }

    #[inline]
    pub fn is_fired(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
