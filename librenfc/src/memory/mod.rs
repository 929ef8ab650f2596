// librenfc/src/memory/mod.rs

//! Block-addressed access to tag memory.
//!
//! `read_raw` / `write_raw` work on arbitrary byte ranges of the 16-bit
//! address space; `read_blocks` performs the FRAM bulk read of a scan.

pub mod read;
pub mod write;

pub use read::{read_blocks, read_raw};
pub use write::write_raw;

use crate::{Error, Result};

const ADDRESS_SPACE: usize = 0x10000;

/// Reject byte ranges that run past the end of the 16-bit address space.
fn check_range(address: u16, length: usize) -> Result<()> {
    if address as usize + length > ADDRESS_SPACE {
        return Err(Error::AddressOutOfRange { address, length });
    }
    Ok(())
}
