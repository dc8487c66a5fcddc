//! Cooperative cancellation for the driver loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag a host flips to stop the driver loop cleanly.
///
/// The loop is intentionally infinite; without a token it only ends via
/// resource exhaustion or process termination. The engine checks the token
/// between segments, never inside one, so a fired token still lets the
/// in-flight segment finish and emit.
///
/// Clones share the same flag, so a token can be handed to another thread
/// (for example a signal handler) while the engine keeps its own copy.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent; there is no way to un-cancel.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}
