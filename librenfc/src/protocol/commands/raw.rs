// librenfc/src/protocol/commands/raw.rs

//! Raw memory read (`0xB3`) and the backdoor lock/unlock.

use crate::constants::{BACKDOOR, MAX_WORDS_PER_READ};

/// Encode read-raw parameters (command 0xB3)
/// Layout: address_lo(1) + address_hi(1) + words(1)
pub fn encode_read_raw(address: u16, words: u8) -> Vec<u8> {
    let [lo, hi] = address.to_le_bytes();
    vec![lo, hi, words]
}

/// Number of 16-bit words to request for `remaining` bytes at `address`.
///
/// Memory is fetched in whole words from an even address, so an odd byte
/// count or an odd start address costs one extra word.
pub fn read_raw_words(address: u16, remaining: usize) -> u8 {
    let mut words = remaining / 2;
    if remaining % 2 == 1 || address % 2 == 1 {
        words += 1;
    }
    words.min(MAX_WORDS_PER_READ) as u8
}

/// Parameters of the backdoor unlock command (0xA4).
pub fn encode_unlock() -> Vec<u8> {
    BACKDOOR.to_vec()
}

/// Parameters of the backdoor lock command (0xA2).
pub fn encode_lock() -> Vec<u8> {
    BACKDOOR.to_vec()
}
