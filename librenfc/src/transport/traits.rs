// librenfc/src/transport/traits.rs

//! The NFC transport trait.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::protocol::NfcCommand;
use crate::types::{BlockRange, SystemInfo};

/// Transport trait abstracts the host's ISO15693 tag session away from the
/// sensor protocol.
///
/// Every call may suspend for a transport round-trip. Timeouts are the
/// transport's business; the protocol only sees the resulting error.
#[async_trait]
pub trait TagTransport: Send {
    /// UID of the discovered tag, in wire order.
    fn tag_uid(&self) -> &[u8];

    /// Connect to the discovered tag. May be called again after a failure.
    async fn connect(&mut self) -> Result<(), TransportError>;

    /// Query the ISO15693 system information.
    async fn system_info(&mut self) -> Result<SystemInfo, TransportError>;

    /// Send a vendor custom command. The response length is
    /// command-dependent and validated by the caller.
    async fn custom_command(
        &mut self,
        code: u8,
        parameters: &[u8],
    ) -> Result<Vec<u8>, TransportError>;

    /// Read the blocks of `range`, returned in range order.
    async fn read_multiple_blocks(
        &mut self,
        range: BlockRange,
    ) -> Result<Vec<Vec<u8>>, TransportError>;

    /// Write one block using extended (16-bit) block addressing.
    async fn write_single_block(&mut self, block: u16, data: &[u8]) -> Result<(), TransportError>;

    /// Write the blocks of `range`; `blocks` is in range order.
    async fn write_multiple_blocks(
        &mut self,
        range: BlockRange,
        blocks: &[Vec<u8>],
    ) -> Result<(), TransportError>;

    /// End the tag session. `error_message` is shown to the user when the
    /// session ends because of a failure.
    async fn invalidate(&mut self, error_message: Option<&str>);

    /// Send an encoded command. Default implementation forwards to
    /// `custom_command`.
    async fn send_command(&mut self, cmd: &NfcCommand) -> Result<Vec<u8>, TransportError> {
        self.custom_command(cmd.code, &cmd.parameters).await
    }
}
