// librenfc/src/constants.rs
//! Wire-format constants of the Libre NFC protocol

/// Size in bytes of one addressable tag block
pub const BLOCK_SIZE: usize = 8;

/// Vendor custom command: patch info, activate and enable-streaming
pub const CMD_PATCH_INFO: u8 = 0xA1;

/// Vendor custom command: re-lock raw memory after a write
pub const CMD_LOCK: u8 = 0xA2;

/// Vendor custom command: unlock raw memory before a write
pub const CMD_UNLOCK: u8 = 0xA4;

/// Vendor custom command: read raw memory words (Libre 2 only)
pub const CMD_READ_RAW: u8 = 0xB3;

/// Parameter bytes of the lock/unlock commands ("deadbeef" as ASCII)
pub const BACKDOOR: &[u8; 8] = b"deadbeef";

/// Fixed nonce input used by the activate subcommand
pub const ACTIVATE_NONCE: u16 = 0x1b6a;

/// Maximum words requested per read-raw command. The tag accepts 15.
pub const MAX_WORDS_PER_READ: usize = 12;

/// Maximum bytes returned per read-raw command
pub const MAX_BYTES_PER_READ: usize = MAX_WORDS_PER_READ * 2;

/// Blocks per read-multiple-blocks request during the FRAM bulk read
pub const BLOCKS_PER_READ: usize = 3;

/// Blocks per write-multiple-blocks request into FRAM. 3 fails on real tags.
pub const BLOCKS_PER_FRAM_WRITE: usize = 2;

/// Number of FRAM blocks holding the sensor readings
pub const FRAM_BLOCKS: usize = 43;

/// First byte address of the FRAM region
pub const FRAM_ADDRESS: u16 = 0xF860;

/// First byte address of the config RAM (patch UID at +8)
pub const CONFIG_RAM_ADDRESS: u16 = 0x1A00;

/// Bytes of config RAM dumped during diagnostics
pub const CONFIG_RAM_LEN: usize = 64;

/// First byte address of the patch table for the A0-A4/E0-E2 commands
pub const PATCH_TABLE_ADDRESS: u16 = 0xFFAC;

/// Bytes of the patch table dumped during diagnostics
pub const PATCH_TABLE_LEN: usize = 36;

/// Minimum patch info length accepted by the protocol
pub const PATCH_INFO_MIN_LEN: usize = 6;

/// Expected enable-streaming response length (the radio address)
pub const STREAMING_RESPONSE_LEN: usize = 6;

/// Expected activate response length
pub const ACTIVATE_RESPONSE_LEN: usize = 4;

/// Default unlock code presented to the sensor and later to the BLE login
pub const DEFAULT_UNLOCK_CODE: u32 = 42;

/// Default bound on attempts per retry phase
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Default delay between retry attempts (ms)
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 200;

/// ISO15693 UID prefix byte
pub const ISO15693_UID_PREFIX: u8 = 0xE0;

/// IC manufacturer code of Texas Instruments
pub const MANUFACTURER_TEXAS_INSTRUMENTS: u8 = 0x07;
