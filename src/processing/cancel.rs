use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Samples processed per channel between cancellation checks.
pub const CANCEL_CHECK_INTERVAL: usize = 4096;

/// Shared stop flag. Clones observe the same flag, so a token handed to
/// another thread can abort a running apply.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
