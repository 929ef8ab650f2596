// librenfc/src/types.rs

//! Newtypes for tag identifiers, patch info and memory images.

use std::convert::TryFrom;
use std::fmt;

use crate::constants::{BLOCK_SIZE, PATCH_INFO_MIN_LEN};
use crate::Error;

/// Tag UID as reported by the transport (wire order, `E0` first) - 8 バイト
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagUid([u8; 8]);

impl TagUid {
    /// Wrap raw UID bytes in wire order.
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    /// Raw bytes in wire order.
    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// IC manufacturer code (byte 1 of an ISO15693 UID).
    pub fn manufacturer_code(&self) -> u8 {
        self.0[1]
    }

    /// IC serial number, the six bytes after the manufacturer code.
    pub fn ic_serial_number(&self) -> &[u8] {
        &self.0[2..]
    }

    /// ROM identification byte of the RF430 chip.
    pub fn rom_code(&self) -> u8 {
        self.0[2]
    }

    /// Byte-reversed identifier used by the sensor protocol.
    pub fn sensor_uid(&self) -> SensorUid {
        let mut reversed = self.0;
        reversed.reverse();
        SensorUid(reversed)
    }

    /// Lowercase hex without separators.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for TagUid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 8] = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: 8,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }
}

/// Sensor UID: the tag identifier in reversed byte order. Identifies the
/// physical sensor and keys the nonce transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorUid([u8; 8]);

impl SensorUid {
    /// Wrap UID bytes that are already reversed.
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    /// Raw bytes, reversed relative to the tag UID.
    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// Lowercase hex without separators.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for SensorUid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 8] = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: 8,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }
}

/// Patch info returned by the `0xA1` command. Always at least 6 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatchInfo(Vec<u8>);

impl PatchInfo {
    /// Validate the length. Shorter responses are [`Error::InvalidPatchInfo`].
    pub fn new(bytes: Vec<u8>) -> Result<Self, Error> {
        if bytes.len() < PATCH_INFO_MIN_LEN {
            return Err(Error::InvalidPatchInfo {
                length: bytes.len(),
            });
        }
        Ok(Self(bytes))
    }

    /// Raw response bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a validated patch info.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Little-endian word at bytes 4..6, mixed into the streaming nonce.
    pub fn nonce_word(&self) -> u16 {
        u16::from_le_bytes([self.0[4], self.0[5]])
    }

    /// Lowercase hex without separators.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for PatchInfo {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::new(bytes.to_vec())
    }
}

/// ISO15693 system information of the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemInfo {
    /// IC reference byte.
    pub ic_reference: u8,
    /// AFI, when the tag reports one.
    pub application_family_id: Option<u8>,
    /// DSFID, when the tag reports one.
    pub data_storage_format_id: Option<u8>,
    /// Number of blocks of the tag.
    pub total_blocks: u16,
    /// Block size in bytes.
    pub block_size: usize,
}

impl SystemInfo {
    /// System info without AFI and DSFID.
    pub fn new(ic_reference: u8, total_blocks: u16, block_size: usize) -> Self {
        Self {
            ic_reference,
            application_family_id: None,
            data_storage_format_id: None,
            total_blocks,
            block_size,
        }
    }

    /// Total addressable memory in bytes.
    pub fn memory_size(&self) -> usize {
        self.total_blocks as usize * self.block_size
    }
}

/// Inclusive range of block numbers addressed by one multi-block request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    first: u16,
    count: u16,
}

impl BlockRange {
    /// `count` blocks from `first`.
    pub fn new(first: u16, count: u16) -> Self {
        Self { first, count }
    }

    /// First block of the range.
    pub fn first(&self) -> u16 {
        self.first
    }

    /// Last block of the range, inclusive.
    pub fn last(&self) -> u16 {
        self.first + self.count.saturating_sub(1)
    }

    /// Number of blocks.
    pub fn count(&self) -> usize {
        self.count as usize
    }

    /// Whether the range covers no blocks.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Block numbers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u16> {
        self.first..self.first + self.count
    }

    /// Split `total` blocks starting at `first` into requests of at most
    /// `per_request` blocks each.
    pub fn partition(first: u16, total: usize, per_request: usize) -> Vec<BlockRange> {
        let per_request = per_request.max(1);
        (0..total)
            .step_by(per_request)
            .map(|offset| {
                let count = per_request.min(total - offset);
                BlockRange::new(first + offset as u16, count as u16)
            })
            .collect()
    }
}

impl fmt::Display for BlockRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02} - #{:02}", self.first, self.last())
    }
}

/// Contiguous FRAM image assembled from 8-byte blocks in block order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryImage(Vec<u8>);

impl MemoryImage {
    /// Assemble an image from blocks that are already in address order.
    pub fn from_blocks<I, B>(blocks: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let mut bytes = Vec::new();
        for block in blocks {
            let block = block.as_ref();
            if block.len() != BLOCK_SIZE {
                return Err(Error::UnexpectedResponse {
                    what: "block",
                    expected: BLOCK_SIZE,
                    actual: block.len(),
                });
            }
            bytes.extend_from_slice(block);
        }
        Ok(Self(bytes))
    }

    /// Image bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the image, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was read.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of whole 8-byte blocks.
    pub fn block_count(&self) -> usize {
        self.0.len() / BLOCK_SIZE
    }

    /// Block `index`, relative to the start of the image.
    pub fn block(&self, index: usize) -> Option<&[u8]> {
        self.0.chunks_exact(BLOCK_SIZE).nth(index)
    }

    /// 8-byte blocks in address order.
    pub fn blocks(&self) -> impl Iterator<Item = &[u8]> {
        self.0.chunks_exact(BLOCK_SIZE)
    }
}
