// librenfc/src/prelude.rs

//! Convenience re-exports.

pub use crate::memory::{read_raw, write_raw};
pub use crate::protocol::{Command, NfcCommand, Subcommand};
pub use crate::sensor::SensorType;
pub use crate::session::{
    CancelToken, LogObserver, ScanConfig, ScanEvent, ScanObserver, ScanPhase, ScanResult,
    Scanner, SessionOutcome,
};
pub use crate::transport::TagTransport;
pub use crate::{
    BlockRange, Error, MemoryImage, PatchInfo, Result, SensorUid, SystemInfo, TagUid,
    TransportError,
};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, hex_dump, ms, parse_hex};
