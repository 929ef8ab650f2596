// librenfc/src/session/config.rs

//! Scan configuration.

use std::time::Duration;

use crate::constants::{
    BLOCKS_PER_READ, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_BACKOFF_MS, DEFAULT_UNLOCK_CODE,
    FRAM_BLOCKS,
};

/// Configuration for a scan session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScanConfig {
    /// Attempts allowed per retry phase (connect, info retrieval).
    pub max_retries: u32,
    /// Fixed delay before each retry.
    pub retry_backoff: Duration,
    /// Unlock code presented in the enable-streaming command.
    pub unlock_code: u32,
    /// FRAM blocks read during the bulk read.
    pub fram_blocks: usize,
    /// Blocks per read-multiple-blocks request.
    pub blocks_per_read: usize,
    /// Send the enable-streaming command after the bulk read.
    pub enable_streaming: bool,
    /// Read and hexdump FRAM, config RAM and patch table via read-raw.
    pub dump_raw_memory: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
            unlock_code: DEFAULT_UNLOCK_CODE,
            fram_blocks: FRAM_BLOCKS,
            blocks_per_read: BLOCKS_PER_READ,
            enable_streaming: true,
            dump_raw_memory: false,
        }
    }
}

impl ScanConfig {
    /// Attempts per retryable step. Zero counts as one.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Pause between attempts.
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Unlock code sent with enable-streaming.
    pub fn with_unlock_code(mut self, unlock_code: u32) -> Self {
        self.unlock_code = unlock_code;
        self
    }

    /// Number of FRAM blocks to bulk read.
    pub fn with_fram_blocks(mut self, fram_blocks: usize) -> Self {
        self.fram_blocks = fram_blocks;
        self
    }

    /// Blocks per read-multiple-blocks request.
    pub fn with_blocks_per_read(mut self, blocks_per_read: usize) -> Self {
        self.blocks_per_read = blocks_per_read.max(1);
        self
    }

    /// Whether to send enable-streaming after identify.
    pub fn with_enable_streaming(mut self, enable: bool) -> Self {
        self.enable_streaming = enable;
        self
    }

    /// Hexdump FRAM, config RAM and the patch table after identify.
    pub fn with_dump_raw_memory(mut self, dump: bool) -> Self {
        self.dump_raw_memory = dump;
        self
    }
}
