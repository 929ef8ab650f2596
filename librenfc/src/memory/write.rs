// librenfc/src/memory/write.rs

//! Raw memory writes through the backdoor.

use log::{debug, warn};

use crate::constants::{BLOCK_SIZE, BLOCKS_PER_FRAM_WRITE, FRAM_ADDRESS};
use crate::memory::read::read_raw;
use crate::protocol::Command;
use crate::transport::TagTransport;
use crate::types::BlockRange;
use crate::utils::bytes_to_hex_spaced;
use crate::Result;

/// Write `data` to raw memory at `address`.
///
/// The tag is unlocked with the backdoor, the surrounding 8-byte blocks are
/// read back and patched, then written block by block. The tag is locked
/// again afterwards, also when a write aborts.
///
/// Addresses below the FRAM go through extended single-block writes at
/// absolute block numbers; FRAM addresses use multi-block writes of two
/// blocks, numbered relative to the FRAM start.
pub async fn write_raw<T>(transport: &mut T, address: u16, data: &[u8]) -> Result<()>
where
    T: TagTransport + ?Sized,
{
    if data.is_empty() {
        return Ok(());
    }
    super::check_range(address, data.len())?;

    let unlock = Command::Unlock.to_nfc();
    debug!("NFC: sending {} command (unlock)", unlock.to_hex());
    // The unlock response carries nothing useful.
    match transport.send_command(&unlock).await {
        Ok(resp) => debug!("NFC: unlock command response: {}", bytes_to_hex_spaced(&resp)),
        Err(e) => debug!("NFC: unlock command error: {}", e),
    }

    let written = write_unlocked(transport, address, data).await;

    let lock = Command::Lock.to_nfc();
    debug!("NFC: sending {} command (lock)", lock.to_hex());
    let locked = transport.send_command(&lock).await;
    if let Err(e) = &locked {
        warn!("NFC: lock command error: {}", e);
    }

    written?;
    locked?;
    Ok(())
}

async fn write_unlocked<T>(transport: &mut T, address: u16, data: &[u8]) -> Result<()>
where
    T: TagTransport + ?Sized,
{
    let aligned = address - address % BLOCK_SIZE as u16;
    let offset = (address - aligned) as usize;
    let end = address as usize + data.len() - 1;
    let block_count = (end - aligned as usize) / BLOCK_SIZE + 1;

    let mut bytes = read_raw(transport, aligned, block_count * BLOCK_SIZE).await?;
    debug!(
        "NFC: {} blocks at {:#06x} before patching: {}",
        block_count,
        aligned,
        bytes_to_hex_spaced(&bytes)
    );
    bytes[offset..offset + data.len()].copy_from_slice(data);

    let blocks: Vec<Vec<u8>> = bytes.chunks(BLOCK_SIZE).map(<[u8]>::to_vec).collect();
    let first_block = aligned / BLOCK_SIZE as u16;

    if address < FRAM_ADDRESS {
        for (i, block) in blocks.iter().enumerate() {
            let number = first_block + i as u16;
            transport
                .write_single_block(number, block)
                .await
                .map_err(|e| {
                    debug!("NFC: error while writing block {:#06x}: {}", number, e);
                    e
                })?;
            debug!(
                "NFC: wrote block {:#06x} at {:#06x}: {}",
                number,
                number as usize * BLOCK_SIZE,
                bytes_to_hex_spaced(block)
            );
        }
    } else {
        let fram_first = first_block - FRAM_ADDRESS / BLOCK_SIZE as u16;
        for range in BlockRange::partition(fram_first, blocks.len(), BLOCKS_PER_FRAM_WRITE) {
            let start = (range.first() - fram_first) as usize;
            let chunk = &blocks[start..start + range.count()];
            transport
                .write_multiple_blocks(range, chunk)
                .await
                .map_err(|e| {
                    debug!("NFC: error while writing multiple blocks {}: {}", range, e);
                    e
                })?;
            debug!("NFC: wrote FRAM blocks {}", range);
        }
    }

    Ok(())
}
