// librenfc/src/memory/read.rs

//! Raw memory and FRAM block reads.

use log::{debug, trace};

use crate::constants::{BLOCK_SIZE, MAX_BYTES_PER_READ};
use crate::protocol::{Command, read_raw_words};
use crate::transport::TagTransport;
use crate::types::{BlockRange, MemoryImage};
use crate::utils::bytes_to_hex_spaced;
use crate::{Error, Result};

/// Read `length` bytes of raw memory starting at `address`.
///
/// Chunks are requested with the read-raw command, at most 12 words each.
/// Any chunk failure aborts the read and the partial buffer is dropped.
pub async fn read_raw<T>(transport: &mut T, address: u16, length: usize) -> Result<Vec<u8>>
where
    T: TagTransport + ?Sized,
{
    super::check_range(address, length)?;

    let mut buffer = Vec::with_capacity(length);
    while buffer.len() < length {
        let remaining = length - buffer.len();
        let chunk_address = address + buffer.len() as u16;
        let bytes_to_read = remaining.min(MAX_BYTES_PER_READ);
        let words = read_raw_words(chunk_address, remaining);

        let cmd = Command::ReadRaw {
            address: chunk_address,
            words,
        }
        .to_nfc();
        if buffer.is_empty() {
            debug!("NFC: sending {} command (read raw)", cmd.to_hex());
        }

        let mut data = transport.send_command(&cmd).await.map_err(|e| {
            debug!(
                "NFC: error while reading {} words at raw memory {:#06x}: {}",
                words, chunk_address, e
            );
            e
        })?;

        // An odd start address is served from the word below it.
        if chunk_address % 2 == 1 && !data.is_empty() {
            data.remove(0);
        }
        if data.len() == bytes_to_read + 1 {
            data.pop();
        }
        if data.is_empty() {
            return Err(Error::UnexpectedResponse {
                what: "read raw",
                expected: bytes_to_read,
                actual: 0,
            });
        }
        data.truncate(remaining);
        trace!("NFC: raw {:#06x}: {}", chunk_address, bytes_to_hex_spaced(&data));
        buffer.extend_from_slice(&data);
    }

    Ok(buffer)
}

/// Read `total` blocks starting at block `first` with multi-block requests
/// of `per_request` blocks, and assemble them in block order.
///
/// `on_progress` is called with (blocks read, total) after each request.
pub async fn read_blocks<T, F>(
    transport: &mut T,
    first: u16,
    total: usize,
    per_request: usize,
    mut on_progress: F,
) -> Result<MemoryImage>
where
    T: TagTransport + ?Sized,
    F: FnMut(usize, usize),
{
    let mut slots: Vec<Option<Vec<u8>>> = vec![None; total];
    let mut done = 0;

    for range in BlockRange::partition(first, total, per_request) {
        let blocks = transport.read_multiple_blocks(range).await.map_err(|e| {
            debug!("NFC: error while reading multiple blocks ({}): {}", range, e);
            e
        })?;
        if blocks.len() != range.count() {
            return Err(Error::UnexpectedResponse {
                what: "read multiple blocks",
                expected: range.count(),
                actual: blocks.len(),
            });
        }
        for (block_number, data) in range.iter().zip(blocks) {
            if data.len() != BLOCK_SIZE {
                return Err(Error::UnexpectedResponse {
                    what: "block",
                    expected: BLOCK_SIZE,
                    actual: data.len(),
                });
            }
            slots[(block_number - first) as usize] = Some(data);
        }
        done += range.count();
        on_progress(done, total);
    }

    let mut blocks = Vec::with_capacity(total);
    for (n, slot) in slots.into_iter().enumerate() {
        let data = slot.ok_or(Error::InvalidLength {
            expected: total,
            actual: n,
        })?;
        debug!("NFC: block #{:02}  {}", n, bytes_to_hex_spaced(&data).to_uppercase());
        blocks.push(data);
    }
    MemoryImage::from_blocks(blocks)
}
