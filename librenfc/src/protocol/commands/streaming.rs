// librenfc/src/protocol/commands/streaming.rs

//! Subcommands of `0xA1` keyed by the vendor nonce.

use super::{NfcCommand, Subcommand};
use crate::constants::{ACTIVATE_NONCE, CMD_PATCH_INFO};
use crate::protocol::crypto::obfuscate;
use crate::types::{PatchInfo, SensorUid};

/// Build the command that arms the sensor's BLE radio.
///
/// Layout: `1e` + unlock code (4, little endian) + nonce (4).
/// The same unlock code has to be presented to the BLE login later.
pub fn build_enable_streaming_command(
    unlock_code: u32,
    patch_info: &PatchInfo,
    uid: &SensorUid,
) -> NfcCommand {
    let b = unlock_code.to_le_bytes();
    let y = patch_info.nonce_word() ^ u16::from_be_bytes([b[1], b[0]]);
    let sub = Subcommand::EnableStreaming;
    let d = obfuscate(uid, sub.as_u8() as u16, y);

    let mut parameters = Vec::with_capacity(1 + b.len() + d.len());
    parameters.push(sub.as_u8());
    parameters.extend_from_slice(&b);
    parameters.extend_from_slice(&d);
    NfcCommand::new(CMD_PATCH_INFO, parameters)
}

/// Build the activate command: `1b` + nonce (4).
pub fn build_activate_command(uid: &SensorUid) -> NfcCommand {
    let sub = Subcommand::Activate;
    let d = obfuscate(uid, sub.as_u8() as u16, ACTIVATE_NONCE);

    let mut parameters = Vec::with_capacity(1 + d.len());
    parameters.push(sub.as_u8());
    parameters.extend_from_slice(&d);
    NfcCommand::new(CMD_PATCH_INFO, parameters)
}
