// librenfc/src/lib.rs

//! librenfc
//!
//! Pure Rust NFC protocol for Libre CGM sensors: reads the sensor memory,
//! identifies the sensor and enables its BLE streaming.

#![warn(missing_docs)]

pub mod constants;
pub mod error;
pub mod memory;
pub mod prelude;
pub mod protocol;
pub mod sensor;
pub mod session;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
