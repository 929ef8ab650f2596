// librenfc/src/transport/mock.rs

//! In-memory Libre tag.

use std::collections::VecDeque;

use async_trait::async_trait;

use crate::constants::{
    BLOCK_SIZE, CMD_LOCK, CMD_PATCH_INFO, CMD_READ_RAW, CMD_UNLOCK, FRAM_ADDRESS, FRAM_BLOCKS,
};
use crate::error::TransportError;
use crate::protocol::{Subcommand, build_enable_streaming_command};
use crate::transport::traits::TagTransport;
use crate::types::{BlockRange, PatchInfo, SystemInfo, TagUid};

/// Size of the simulated 16-bit address space.
pub const MEMORY_SIZE: usize = 0x10000;

/// ISO15693 "command not supported" error code.
const ERR_NOT_SUPPORTED: u8 = 0x01;
/// ISO15693 "block locked" error code, used for writes without unlock.
const ERR_BLOCK_LOCKED: u8 = 0x12;
/// ISO15693 "block not available" error code.
const ERR_OUT_OF_RANGE: u8 = 0x10;

/// A transport call recorded by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// `connect`
    Connect,
    /// `system_info`
    SystemInfo,
    /// Custom command with its parameters.
    Custom { code: u8, parameters: Vec<u8> },
    /// FRAM-relative multi-block read.
    ReadBlocks(BlockRange),
    /// Single-block write at an absolute block number.
    WriteBlock(u16),
    /// FRAM-relative multi-block write.
    WriteBlocks(BlockRange),
    /// `invalidate` with its error message.
    Invalidate(Option<String>),
}

/// Mock transport for unit tests. Simulates a Libre tag backed by an
/// in-memory 64 KiB address space, records every call and fails on demand.
///
/// Block addressing follows the real tag: read/write-multiple-blocks use
/// FRAM-relative block numbers (block 0 at `0xF860`), the extended
/// single-block write uses absolute block numbers (`address / 8`).
#[derive(Debug)]
pub struct MockTransport {
    /// Tag UID in wire order
    pub uid: [u8; 8],
    /// Simulated 64 KiB address space
    pub memory: Vec<u8>,
    /// System info returned by `system_info`
    pub system_info: SystemInfo,
    /// Default `0xA1` response once `patch_info_script` is drained
    pub patch_info: Vec<u8>,
    /// Scripted `0xA1` patch-info responses, consumed front to back
    pub patch_info_script: VecDeque<Result<Vec<u8>, TransportError>>,
    /// Response to the enable-streaming subcommand
    pub streaming_response: Vec<u8>,
    /// Response to the activate subcommand
    pub activate_response: Vec<u8>,
    /// Testing hook: the enable-streaming call fails at transport level
    pub streaming_failure: bool,
    /// Answer a wrong nonce with a plausible 4-byte response, like a real sensor
    pub verify_streaming_nonce: bool,
    /// Testing hook: number of connect calls that should fail
    pub connect_failures: u32,
    /// Testing hook: number of system_info calls that should fail
    pub system_info_failures: u32,
    /// Testing hook: indices of the system_info calls that fail
    pub fail_system_info_at: Vec<usize>,
    /// Testing hook: index of the read_multiple_blocks call that fails
    pub fail_read_at: Option<usize>,
    /// Testing hook: index of the read-raw (0xB3) call that fails
    pub fail_raw_read_at: Option<usize>,
    /// Testing hook: index of the block write call (single or multi) that fails
    pub fail_write_at: Option<usize>,
    /// Set by the backdoor unlock, cleared by lock
    pub unlocked: bool,
    /// Every call in order
    pub calls: Vec<Call>,
    system_info_calls: usize,
    read_calls: usize,
    raw_read_calls: usize,
    write_calls: usize,
}

impl MockTransport {
    /// A zeroed tag with Libre 2 system info and empty responses.
    pub fn new(uid: [u8; 8]) -> Self {
        Self {
            uid,
            memory: vec![0; MEMORY_SIZE],
            system_info: SystemInfo::new(0xA4, FRAM_BLOCKS as u16, BLOCK_SIZE),
            patch_info: Vec::new(),
            patch_info_script: VecDeque::new(),
            streaming_response: Vec::new(),
            activate_response: Vec::new(),
            streaming_failure: false,
            verify_streaming_nonce: false,
            connect_failures: 0,
            system_info_failures: 0,
            fail_system_info_at: Vec::new(),
            fail_read_at: None,
            fail_raw_read_at: None,
            fail_write_at: None,
            unlocked: false,
            calls: Vec::new(),
            system_info_calls: 0,
            read_calls: 0,
            raw_read_calls: 0,
            write_calls: 0,
        }
    }

    /// Queue a scripted patch-info response.
    pub fn push_patch_info(&mut self, resp: Result<Vec<u8>, TransportError>) {
        self.patch_info_script.push_back(resp);
    }

    /// Copy `bytes` into simulated memory at `address`.
    pub fn load(&mut self, address: u16, bytes: &[u8]) {
        let start = address as usize;
        self.memory[start..start + bytes.len()].copy_from_slice(bytes);
    }

    /// `len` bytes of simulated memory at `address`.
    pub fn memory_at(&self, address: u16, len: usize) -> &[u8] {
        let start = address as usize;
        &self.memory[start..start + len]
    }

    /// The FRAM region covered by the bulk read.
    pub fn fram(&self) -> &[u8] {
        self.memory_at(FRAM_ADDRESS, FRAM_BLOCKS * BLOCK_SIZE)
    }

    /// Whether the session was invalidated.
    pub fn is_invalidated(&self) -> bool {
        self.calls.iter().any(|c| matches!(c, Call::Invalidate(_)))
    }

    /// Number of recorded calls matching `pred`.
    pub fn count_calls(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    fn fram_offset(block: u16) -> usize {
        FRAM_ADDRESS as usize + block as usize * BLOCK_SIZE
    }

    fn check_range(start: usize, len: usize) -> Result<(), TransportError> {
        if start + len > MEMORY_SIZE {
            return Err(TransportError::TagResponse {
                code: ERR_OUT_OF_RANGE,
            });
        }
        Ok(())
    }

    fn next_write(&mut self) -> Result<(), TransportError> {
        let index = self.write_calls;
        self.write_calls += 1;
        if self.fail_write_at == Some(index) {
            return Err(TransportError::TagLost);
        }
        if !self.unlocked {
            return Err(TransportError::TagResponse {
                code: ERR_BLOCK_LOCKED,
            });
        }
        Ok(())
    }

    fn read_raw(&mut self, parameters: &[u8]) -> Result<Vec<u8>, TransportError> {
        let index = self.raw_read_calls;
        self.raw_read_calls += 1;
        if self.fail_raw_read_at == Some(index) {
            return Err(TransportError::Timeout);
        }
        let [lo, hi, words] = parameters else {
            return Err(TransportError::TagResponse {
                code: ERR_NOT_SUPPORTED,
            });
        };
        // The tag reads whole words from the even address below.
        let start = u16::from_le_bytes([*lo, *hi]) as usize & !1;
        let len = *words as usize * 2;
        Self::check_range(start, len)?;
        Ok(self.memory[start..start + len].to_vec())
    }

    fn subcommand(&mut self, parameters: &[u8]) -> Result<Vec<u8>, TransportError> {
        match Subcommand::from_u8(parameters[0]) {
            Some(Subcommand::EnableStreaming) => {
                if self.streaming_failure {
                    return Err(TransportError::TagLost);
                }
                if self.verify_streaming_nonce && !self.nonce_matches(parameters) {
                    return Ok(vec![0x00; 4]);
                }
                Ok(self.streaming_response.clone())
            }
            Some(Subcommand::Activate) => Ok(self.activate_response.clone()),
            None => Err(TransportError::TagResponse {
                code: ERR_NOT_SUPPORTED,
            }),
        }
    }

    fn nonce_matches(&self, parameters: &[u8]) -> bool {
        let Ok(patch) = PatchInfo::new(self.patch_info.clone()) else {
            return false;
        };
        let Some(unlock) = parameters.get(1..5) else {
            return false;
        };
        let unlock = u32::from_le_bytes([unlock[0], unlock[1], unlock[2], unlock[3]]);
        let uid = TagUid::from_bytes(self.uid).sensor_uid();
        build_enable_streaming_command(unlock, &patch, &uid).parameters == parameters
    }
}

#[async_trait]
impl TagTransport for MockTransport {
    fn tag_uid(&self) -> &[u8] {
        &self.uid
    }

    async fn connect(&mut self) -> Result<(), TransportError> {
        self.calls.push(Call::Connect);
        if self.connect_failures > 0 {
            self.connect_failures -= 1;
            return Err(TransportError::NotConnected);
        }
        Ok(())
    }

    async fn system_info(&mut self) -> Result<SystemInfo, TransportError> {
        self.calls.push(Call::SystemInfo);
        let index = self.system_info_calls;
        self.system_info_calls += 1;
        if self.fail_system_info_at.contains(&index) {
            return Err(TransportError::Timeout);
        }
        if self.system_info_failures > 0 {
            self.system_info_failures -= 1;
            return Err(TransportError::Timeout);
        }
        Ok(self.system_info)
    }

    async fn custom_command(
        &mut self,
        code: u8,
        parameters: &[u8],
    ) -> Result<Vec<u8>, TransportError> {
        self.calls.push(Call::Custom {
            code,
            parameters: parameters.to_vec(),
        });
        match code {
            CMD_PATCH_INFO if parameters.is_empty() => match self.patch_info_script.pop_front() {
                Some(resp) => resp,
                None => Ok(self.patch_info.clone()),
            },
            CMD_PATCH_INFO => self.subcommand(parameters),
            CMD_UNLOCK => {
                self.unlocked = true;
                Ok(Vec::new())
            }
            CMD_LOCK => {
                self.unlocked = false;
                Ok(Vec::new())
            }
            CMD_READ_RAW => self.read_raw(parameters),
            _ => Err(TransportError::TagResponse {
                code: ERR_NOT_SUPPORTED,
            }),
        }
    }

    async fn read_multiple_blocks(
        &mut self,
        range: BlockRange,
    ) -> Result<Vec<Vec<u8>>, TransportError> {
        self.calls.push(Call::ReadBlocks(range));
        let index = self.read_calls;
        self.read_calls += 1;
        if self.fail_read_at == Some(index) {
            return Err(TransportError::TagLost);
        }
        let start = Self::fram_offset(range.first());
        Self::check_range(start, range.count() * BLOCK_SIZE)?;
        Ok(range
            .iter()
            .map(|b| {
                let off = Self::fram_offset(b);
                self.memory[off..off + BLOCK_SIZE].to_vec()
            })
            .collect())
    }

    async fn write_single_block(&mut self, block: u16, data: &[u8]) -> Result<(), TransportError> {
        self.calls.push(Call::WriteBlock(block));
        self.next_write()?;
        let start = block as usize * BLOCK_SIZE;
        Self::check_range(start, BLOCK_SIZE)?;
        self.memory[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }

    async fn write_multiple_blocks(
        &mut self,
        range: BlockRange,
        blocks: &[Vec<u8>],
    ) -> Result<(), TransportError> {
        self.calls.push(Call::WriteBlocks(range));
        self.next_write()?;
        let start = Self::fram_offset(range.first());
        Self::check_range(start, range.count() * BLOCK_SIZE)?;
        for (b, data) in range.iter().zip(blocks) {
            let off = Self::fram_offset(b);
            self.memory[off..off + data.len()].copy_from_slice(data);
        }
        Ok(())
    }

    async fn invalidate(&mut self, error_message: Option<&str>) {
        self.calls.push(Call::Invalidate(error_message.map(str::to_string)));
    }
}
