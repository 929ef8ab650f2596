// librenfc/src/protocol/commands/mod.rs

//! Custom command encoding.

pub mod raw;
pub mod streaming;

pub use raw::{encode_lock, encode_read_raw, encode_unlock, read_raw_words};
pub use streaming::{build_activate_command, build_enable_streaming_command};

use derive_more::Display;

use crate::constants::{CMD_LOCK, CMD_PATCH_INFO, CMD_READ_RAW, CMD_UNLOCK};
use crate::types::{PatchInfo, SensorUid};

/// The unit sent through the transport's custom-command primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfcCommand {
    /// ISO15693 custom command code.
    pub code: u8,
    /// Parameter bytes after the code.
    pub parameters: Vec<u8>,
}

impl NfcCommand {
    /// A command from its code and parameters.
    pub fn new(code: u8, parameters: Vec<u8>) -> Self {
        Self { code, parameters }
    }

    /// Code and parameters as one hex string, for logging.
    pub fn to_hex(&self) -> String {
        format!(
            "{:02x} {}",
            self.code,
            crate::utils::bytes_to_hex(&self.parameters)
        )
    }
}

/// Subcommand byte carried as the first parameter of an `0xA1` command.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Subcommand {
    #[display(fmt = "activate")]
    Activate = 0x1b,
    #[display(fmt = "enable BLE streaming")]
    EnableStreaming = 0x1e,
}

impl Subcommand {
    /// Subcommand for its leading parameter byte.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x1b => Some(Self::Activate),
            0x1e => Some(Self::EnableStreaming),
            _ => None,
        }
    }

    /// Leading parameter byte of the subcommand.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// High-level Command enum. New commands should be added here and their
/// parameter encoder placed in `protocol::commands::<name>.rs`.
#[derive(Debug, Clone)]
pub enum Command {
    /// Read the patch info (no parameters).
    PatchInfo,
    /// Activate a new sensor.
    Activate {
        /// Sensor UID keying the nonce.
        uid: SensorUid,
    },
    /// Enable BLE streaming with `unlock_code`.
    EnableStreaming {
        /// Code the app later uses to authenticate over BLE.
        unlock_code: u32,
        /// Patch info of the sensor.
        patch_info: PatchInfo,
        /// Sensor UID keying the nonce.
        uid: SensorUid,
    },
    /// Read `words` 16-bit words at `address`.
    ReadRaw {
        /// Start address.
        address: u16,
        /// Word count, at most 12 per request.
        words: u8,
    },
    /// Backdoor unlock (`0xA4`).
    Unlock,
    /// Backdoor lock (`0xA2`).
    Lock,
}

impl Command {
    /// Vendor custom-command code.
    pub fn command_code(&self) -> u8 {
        match self {
            Self::PatchInfo | Self::Activate { .. } | Self::EnableStreaming { .. } => {
                CMD_PATCH_INFO
            }
            Self::ReadRaw { .. } => CMD_READ_RAW,
            Self::Unlock => CMD_UNLOCK,
            Self::Lock => CMD_LOCK,
        }
    }

    /// Encode the command parameters in exact wire order.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::PatchInfo => Vec::new(),
            Self::Activate { uid } => build_activate_command(uid).parameters,
            Self::EnableStreaming {
                unlock_code,
                patch_info,
                uid,
            } => build_enable_streaming_command(*unlock_code, patch_info, uid).parameters,
            Self::ReadRaw { address, words } => encode_read_raw(*address, *words),
            Self::Unlock => encode_unlock(),
            Self::Lock => encode_lock(),
        }
    }

    /// Code and parameters ready for the transport.
    pub fn to_nfc(&self) -> NfcCommand {
        NfcCommand::new(self.command_code(), self.encode())
    }
}

impl From<Command> for NfcCommand {
    fn from(cmd: Command) -> Self {
        cmd.to_nfc()
    }
}
