//! Cooperative cancellation

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// One-way cancellation flag shared between a caller and a hashing worker.
///
/// The flag only ever goes from unset to set. The worker polls it before each
/// read, so a request takes effect after at most one buffer of I/O.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    raised: Arc<AtomicBool>,
}

impl CancellationFlag {
    /// Create an unset flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Calling it again has no further effect.
    pub fn cancel(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}
