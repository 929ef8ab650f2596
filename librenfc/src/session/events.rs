// librenfc/src/session/events.rs

//! Progress events of a scan, for applications that want to show more than
//! the final outcome.

use derive_more::Display;
use log::{debug, info, warn};

/// Scan state machine phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScanPhase {
    /// Not started.
    #[display(fmt = "idle")]
    Idle,
    /// Opening the tag session.
    #[display(fmt = "connecting")]
    Connecting,
    /// Patch info and system info.
    #[display(fmt = "info retrieval")]
    InfoRetrieval,
    /// FRAM read.
    #[display(fmt = "bulk read")]
    BulkRead,
    /// Sensor type and serial number.
    #[display(fmt = "identify")]
    Identify,
    /// Sending the enable-streaming command.
    #[display(fmt = "streaming enable")]
    StreamingEnable,
    /// Scan succeeded.
    #[display(fmt = "done")]
    Done,
    /// Scan failed.
    #[display(fmt = "failed")]
    Failed,
}

/// Events emitted by a [`Scanner`](crate::session::Scanner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// The scan moved from one phase to the next.
    PhaseChanged { from: ScanPhase, to: ScanPhase },
    /// A retryable failure; `attempt` failures of `max` so far.
    Retrying {
        /// Phase that failed.
        phase: ScanPhase,
        /// Failures so far.
        attempt: u32,
        /// Failure that ends the phase.
        max: u32,
    },
    /// `done` of `total` FRAM blocks read so far.
    BlocksRead { done: usize, total: usize },
    /// Outcome of the enable-streaming command.
    StreamingEnabled { success: bool },
}

/// Observer trait for receiving scan events.
pub trait ScanObserver: Send + Sync {
    /// Called synchronously from the scanning task.
    fn on_event(&self, event: &ScanEvent);
}

/// Discards all events.
pub struct NullObserver;

impl ScanObserver for NullObserver {
    fn on_event(&self, _event: &ScanEvent) {}
}

/// Writes events to the `log` facade.
pub struct LogObserver;

impl ScanObserver for LogObserver {
    fn on_event(&self, event: &ScanEvent) {
        match event {
            ScanEvent::PhaseChanged { from, to } => info!("NFC: {} -> {}", from, to),
            ScanEvent::Retrying {
                phase,
                attempt,
                max,
            } => info!("NFC: {} failed, attempt {} of {}", phase, attempt, max),
            ScanEvent::BlocksRead { done, total } => debug!("NFC: read {}/{} blocks", done, total),
            ScanEvent::StreamingEnabled { success: true } => info!("NFC: BLE streaming enabled"),
            ScanEvent::StreamingEnabled { success: false } => {
                warn!("NFC: could not enable BLE streaming")
            }
        }
    }
}
