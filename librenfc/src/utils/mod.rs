// librenfc/src/utils/mod.rs

//! Small helpers shared across the crate: hex formatting for logs and
//! retry backoff.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
