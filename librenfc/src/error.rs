// librenfc/src/error.rs

//! Error types for the transport and for scans.

use thiserror::Error;

/// Errors reported by the contactless transport collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No tag session is open.
    #[error("tag not connected")]
    NotConnected,

    /// The tag left the field.
    #[error("tag connection lost")]
    TagLost,

    /// The tag did not answer in time.
    #[error("transport timed out")]
    Timeout,

    /// ISO15693 error code returned by the tag.
    #[error("tag responded with error code {code:#04x}")]
    TagResponse { code: u8 },

    /// Any other transport failure.
    #[error("transport error: {0}")]
    Other(String),
}

/// 共通エラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A transport call failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Connecting failed on every attempt.
    #[error("no sensor found after {attempts} attempts")]
    NoSensorFound { attempts: u32 },

    /// System info could not be read.
    #[error("no valid information retrieved after {attempts} attempts")]
    NoValidInformation { attempts: u32 },

    /// Patch info shorter than 6 bytes.
    #[error("invalid patch info: expected at least 6 bytes, got {length}")]
    InvalidPatchInfo { length: usize },

    /// A byte slice of the wrong length.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A response of the wrong size.
    #[error("unexpected {what} response: expected {expected}, got {actual}")]
    UnexpectedResponse {
        /// Which response.
        what: &'static str,
        /// Expected size in bytes.
        expected: usize,
        /// Received size in bytes.
        actual: usize,
    },

    /// The range does not fit in the 16-bit address space.
    #[error("address range {address:#06x}+{length} is outside tag memory")]
    AddressOutOfRange { address: u16, length: usize },

    /// The scan was cancelled through its [`CancelToken`](crate::session::CancelToken).
    #[error("scan cancelled")]
    Cancelled,
}

impl Error {
    /// Transport failures may be retried by the phase that saw them.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// The sensor answered with structurally wrong data. Retrying does not help.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidPatchInfo { .. }
                | Self::InvalidLength { .. }
                | Self::UnexpectedResponse { .. }
        )
    }
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;
