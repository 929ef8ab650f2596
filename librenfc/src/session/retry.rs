// librenfc/src/session/retry.rs

//! Retry accounting for one scan step.

/// Per-phase failure counter. A phase may fail `max - 1` times; the
/// `max`-th consecutive failure exhausts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryCounter {
    failures: u32,
    max: u32,
}

impl RetryCounter {
    /// A counter for `max` attempts. Zero is treated as one.
    pub fn new(max: u32) -> Self {
        Self {
            failures: 0,
            max: max.max(1),
        }
    }

    /// Count one failure. Returns true when the phase is exhausted.
    pub fn record_failure(&mut self) -> bool {
        self.failures += 1;
        self.is_exhausted()
    }

    /// Whether the `max`-th failure was recorded.
    pub fn is_exhausted(&self) -> bool {
        self.failures >= self.max
    }

    /// Failures recorded so far.
    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// Attempts allowed, at least one.
    pub fn max(&self) -> u32 {
        self.max
    }
}
