// librenfc/src/protocol/mod.rs

//! Libre custom commands.

pub mod commands;
pub mod crypto;

pub use commands::*;
pub use crypto::obfuscate;
