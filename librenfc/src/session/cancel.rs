// librenfc/src/session/cancel.rs

//! Cooperative scan cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cancellation flag shared between the scanning task and whoever may
/// abort it. Clones observe the same flag.
///
/// The flag stays set once cancelled: every later scan using the token
/// fails with [`Error::Cancelled`](crate::Error::Cancelled) until
/// [`reset`](Self::reset) is called.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the running and all following scans.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether [`cancel`](Self::cancel) was called since the last reset.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clear the flag so the token can be used for a new scan.
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
