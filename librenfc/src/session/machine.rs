// librenfc/src/session/machine.rs

//! The scan state machine.
//!
//! `Idle -> Connecting -> InfoRetrieval -> BulkRead -> Identify ->
//! StreamingEnable -> Done`, with `Failed` reachable from every phase. The
//! transport session is invalidated on the way out of both terminal states.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::constants::{
    ACTIVATE_RESPONSE_LEN, BLOCK_SIZE, CONFIG_RAM_ADDRESS, CONFIG_RAM_LEN, FRAM_ADDRESS,
    PATCH_TABLE_ADDRESS, PATCH_TABLE_LEN, STREAMING_RESPONSE_LEN,
};
use crate::memory::{read_blocks, read_raw};
use crate::protocol::{Command, Subcommand};
use crate::sensor::{self, SensorType};
use crate::session::cancel::CancelToken;
use crate::session::config::ScanConfig;
use crate::session::events::{LogObserver, ScanEvent, ScanObserver, ScanPhase};
use crate::session::outcome::{ScanResult, SessionOutcome};
use crate::session::retry::RetryCounter;
use crate::transport::TagTransport;
use crate::types::{MemoryImage, PatchInfo, SensorUid, SystemInfo, TagUid};
use crate::utils::{backoff, bytes_to_hex_spaced, hex_dump};
use crate::{Error, Result};

/// Drives one scan of a tag over a [`TagTransport`].
///
/// ```no_run
/// # async fn run(transport: &mut librenfc::transport::MockTransport) {
/// use librenfc::session::{ScanConfig, Scanner, SessionOutcome};
///
/// let scanner = Scanner::new(ScanConfig::default());
/// match scanner.scan(transport).await {
///     SessionOutcome::Success(r) => println!("{} {}", r.sensor_type, r.serial_number),
///     SessionOutcome::Failure(e) => eprintln!("scan failed: {}", e),
/// }
/// # }
/// ```
pub struct Scanner<O: ScanObserver = LogObserver> {
    config: ScanConfig,
    observer: Arc<O>,
    cancel: CancelToken,
}

impl Scanner<LogObserver> {
    /// Create a scanner reporting progress to the `log` facade.
    pub fn new(config: ScanConfig) -> Self {
        Self::with_observer(config, Arc::new(LogObserver))
    }
}

/// Progress of a scan through its phases.
struct ScanContext {
    phase: ScanPhase,
}

impl<O: ScanObserver> Scanner<O> {
    /// Create a scanner reporting progress to `observer`.
    pub fn with_observer(config: ScanConfig, observer: Arc<O>) -> Self {
        Self {
            config,
            observer,
            cancel: CancelToken::new(),
        }
    }

    /// Use `token` to abort scans started by this scanner.
    ///
    /// A cancelled token stays cancelled, so later scans fail at once with
    /// [`Error::Cancelled`] until [`CancelToken::reset`] is called.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// The token checked by this scanner. Cancel it to abort a running scan.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Configuration used for every scan.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Run a complete scan. Always ends the transport session, with an
    /// error message when the scan failed.
    pub async fn scan<T>(&self, transport: &mut T) -> SessionOutcome
    where
        T: TagTransport + ?Sized,
    {
        let mut ctx = ScanContext {
            phase: ScanPhase::Idle,
        };
        let result = self.run(transport, &mut ctx).await;

        match &result {
            Ok(_) => {
                self.transition(&mut ctx, ScanPhase::Done);
                transport.invalidate(None).await;
            }
            Err(e) => {
                warn!("NFC: scan failed during {}: {}", ctx.phase, e);
                self.transition(&mut ctx, ScanPhase::Failed);
                transport.invalidate(Some(&e.to_string())).await;
            }
        }
        result.into()
    }

    /// Send the activate subcommand and hand back the raw response.
    ///
    /// The transport must already be connected. The response is not
    /// interpreted.
    pub async fn activate<T>(&self, transport: &mut T) -> Result<Vec<u8>>
    where
        T: TagTransport + ?Sized,
    {
        let uid = TagUid::try_from(transport.tag_uid())?.sensor_uid();
        let cmd = Command::Activate { uid }.to_nfc();
        debug!("NFC: sending {} command ({})", cmd.to_hex(), Subcommand::Activate);

        let resp = transport.send_command(&cmd).await?;
        debug!(
            "NFC: '{}' command response ({} bytes): {}",
            Subcommand::Activate,
            resp.len(),
            bytes_to_hex_spaced(&resp)
        );
        if resp.len() != ACTIVATE_RESPONSE_LEN {
            debug!(
                "NFC: activate response is {} bytes, usually {}",
                resp.len(),
                ACTIVATE_RESPONSE_LEN
            );
        }
        Ok(resp)
    }

    async fn run<T>(&self, transport: &mut T, ctx: &mut ScanContext) -> Result<ScanResult>
    where
        T: TagTransport + ?Sized,
    {
        self.enter(ctx, ScanPhase::Connecting)?;
        self.connect(transport).await?;

        self.enter(ctx, ScanPhase::InfoRetrieval)?;
        let (system_info, patch_info) = self.retrieve_info(transport).await?;

        self.enter(ctx, ScanPhase::BulkRead)?;
        let memory = self.bulk_read(transport).await?;

        self.enter(ctx, ScanPhase::Identify)?;
        let tag_uid = TagUid::try_from(transport.tag_uid())?;
        let sensor_uid = tag_uid.sensor_uid();
        let sensor_type = SensorType::from_patch_info(&patch_info);
        let serial_number = sensor::serial_number(&sensor_uid, sensor_type);
        self.log_identity(&tag_uid, &patch_info, &system_info, sensor_type, &serial_number);

        if self.config.dump_raw_memory {
            self.dump_raw_memory(transport).await;
        }

        let mut streaming_address = None;
        if self.config.enable_streaming {
            self.enter(ctx, ScanPhase::StreamingEnable)?;
            streaming_address = self.enable_streaming(transport, &patch_info, &sensor_uid).await;
            self.observer.on_event(&ScanEvent::StreamingEnabled {
                success: streaming_address.is_some(),
            });
        }

        Ok(ScanResult {
            tag_uid,
            sensor_uid,
            patch_info,
            system_info,
            memory,
            sensor_type,
            serial_number,
            streaming_enabled: streaming_address.is_some(),
            streaming_address,
        })
    }

    /// Phase boundary: cancellation is honoured before the next phase runs.
    fn enter(&self, ctx: &mut ScanContext, to: ScanPhase) -> Result<()> {
        self.check_cancelled()?;
        self.transition(ctx, to);
        Ok(())
    }

    fn transition(&self, ctx: &mut ScanContext, to: ScanPhase) {
        let from = ctx.phase;
        ctx.phase = to;
        self.observer.on_event(&ScanEvent::PhaseChanged { from, to });
    }

    fn check_cancelled(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        Ok(())
    }

    async fn retry_after_backoff(&self, phase: ScanPhase, retries: &RetryCounter) {
        self.observer.on_event(&ScanEvent::Retrying {
            phase,
            attempt: retries.failures(),
            max: retries.max(),
        });
        backoff(self.config.retry_backoff).await;
    }

    async fn connect<T>(&self, transport: &mut T) -> Result<()>
    where
        T: TagTransport + ?Sized,
    {
        let mut retries = RetryCounter::new(self.config.max_retries);
        loop {
            self.check_cancelled()?;
            match transport.connect().await {
                Ok(()) => {
                    debug!("NFC: connected to tag {}", bytes_to_hex_spaced(transport.tag_uid()));
                    return Ok(());
                }
                Err(e) => {
                    debug!("NFC: connection error: {}", e);
                    if retries.record_failure() {
                        return Err(Error::NoSensorFound {
                            attempts: retries.failures(),
                        });
                    }
                    self.retry_after_backoff(ScanPhase::Connecting, &retries).await;
                }
            }
        }
    }

    /// Patch info, system info, patch info again. The first patch info read
    /// primes the sensor firmware; the latest successful read is kept.
    ///
    /// System info and the authoritative patch info each have their own
    /// retry budget. Only running out of system info retries is fatal.
    async fn retrieve_info<T>(&self, transport: &mut T) -> Result<(SystemInfo, PatchInfo)>
    where
        T: TagTransport + ?Sized,
    {
        let mut system_retries = RetryCounter::new(self.config.max_retries);
        let mut patch_retries = RetryCounter::new(self.config.max_retries);
        let mut patch_info: Option<Vec<u8>> = None;
        let patch_cmd = Command::PatchInfo.to_nfc();

        let system_info = loop {
            self.check_cancelled()?;

            match transport.send_command(&patch_cmd).await {
                Ok(p) => patch_info = Some(p),
                Err(e) => debug!("NFC: error while getting patch info: {}", e),
            }

            let system_info = match transport.system_info().await {
                Ok(si) => si,
                Err(e) => {
                    debug!("NFC: error while getting system info: {}", e);
                    if system_retries.record_failure() {
                        return Err(Error::NoValidInformation {
                            attempts: system_retries.failures(),
                        });
                    }
                    self.retry_after_backoff(ScanPhase::InfoRetrieval, &system_retries)
                        .await;
                    continue;
                }
            };

            match transport.send_command(&patch_cmd).await {
                Ok(p) => {
                    patch_info = Some(p);
                    break system_info;
                }
                Err(e) => {
                    debug!("NFC: error while getting patch info: {}", e);
                    if patch_retries.record_failure() {
                        // TODO: confirm whether a stale patch info is acceptable here
                        warn!(
                            "NFC: no patch info after {} attempts, continuing with the last one read",
                            patch_retries.failures()
                        );
                        break system_info;
                    }
                    self.retry_after_backoff(ScanPhase::InfoRetrieval, &patch_retries)
                        .await;
                }
            }
        };

        let patch_info = PatchInfo::new(patch_info.unwrap_or_default())?;
        debug!(
            "NFC: IC reference: {:#04x}, blocks: {}, block size: {}",
            system_info.ic_reference, system_info.total_blocks, system_info.block_size
        );
        Ok((system_info, patch_info))
    }

    async fn bulk_read<T>(&self, transport: &mut T) -> Result<MemoryImage>
    where
        T: TagTransport + ?Sized,
    {
        let observer = &self.observer;
        let memory = read_blocks(
            transport,
            0,
            self.config.fram_blocks,
            self.config.blocks_per_read,
            |done, total| observer.on_event(&ScanEvent::BlocksRead { done, total }),
        )
        .await?;
        info!("NFC: read {} bytes of FRAM", memory.len());
        Ok(memory)
    }

    fn log_identity(
        &self,
        tag_uid: &TagUid,
        patch_info: &PatchInfo,
        system_info: &SystemInfo,
        sensor_type: SensorType,
        serial_number: &str,
    ) {
        info!("NFC: IC identifier: {}", bytes_to_hex_spaced(tag_uid.as_bytes()));
        info!(
            "NFC: IC manufacturer code: {:#04x} ({})",
            tag_uid.manufacturer_code(),
            sensor::manufacturer_name(tag_uid).unwrap_or("unknown")
        );
        info!("NFC: IC serial number: {}", bytes_to_hex_spaced(tag_uid.ic_serial_number()));
        match sensor::rom_description(tag_uid) {
            Some(rom) => info!("NFC: {}", rom),
            None => info!("NFC: unknown ROM {:#04x}", tag_uid.rom_code()),
        }
        info!("NFC: IC reference: {:#04x}", system_info.ic_reference);
        info!("NFC: patch info: {}", bytes_to_hex_spaced(patch_info.as_bytes()));
        info!("NFC: sensor type: {}", sensor_type);
        info!("NFC: sensor serial number: {}", serial_number);
    }

    /// Hexdump FRAM, config RAM and the patch table. Failures only log.
    async fn dump_raw_memory<T>(&self, transport: &mut T)
    where
        T: TagTransport + ?Sized,
    {
        let regions = [
            ("FRAM", FRAM_ADDRESS, self.config.fram_blocks * BLOCK_SIZE),
            ("config RAM", CONFIG_RAM_ADDRESS, CONFIG_RAM_LEN),
            ("patch table", PATCH_TABLE_ADDRESS, PATCH_TABLE_LEN),
        ];
        for (name, address, length) in regions {
            match read_raw(transport, address, length).await {
                Ok(bytes) => debug!(
                    "NFC: {} ({} bytes at {:#06x}):\n{}",
                    name,
                    bytes.len(),
                    address,
                    hex_dump(&bytes, address)
                ),
                Err(e) => warn!("NFC: could not read {} at {:#06x}: {}", name, address, e),
            }
        }
    }

    /// Returns the sensor's radio address on success.
    async fn enable_streaming<T>(
        &self,
        transport: &mut T,
        patch_info: &PatchInfo,
        sensor_uid: &SensorUid,
    ) -> Option<[u8; 6]>
    where
        T: TagTransport + ?Sized,
    {
        let cmd = Command::EnableStreaming {
            unlock_code: self.config.unlock_code,
            patch_info: patch_info.clone(),
            uid: *sensor_uid,
        }
        .to_nfc();
        debug!("NFC: sending {} command ({})", cmd.to_hex(), Subcommand::EnableStreaming);

        let resp = match transport.send_command(&cmd).await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("NFC: '{}' command error: {}", Subcommand::EnableStreaming, e);
                return None;
            }
        };
        debug!(
            "NFC: '{}' command response ({} bytes): {}",
            Subcommand::EnableStreaming,
            resp.len(),
            bytes_to_hex_spaced(&resp)
        );

        let Ok(mut address) = <[u8; STREAMING_RESPONSE_LEN]>::try_from(resp.as_slice()) else {
            warn!(
                "NFC: '{}' response is {} bytes, expected {}",
                Subcommand::EnableStreaming,
                resp.len(),
                STREAMING_RESPONSE_LEN
            );
            return None;
        };
        address.reverse();
        info!(
            "NFC: enabled BLE streaming on sensor {} (unlock code: {}, MAC address: {})",
            sensor_uid.to_hex(),
            self.config.unlock_code,
            bytes_to_hex_spaced(&address).replace(' ', ":").to_uppercase()
        );
        Some(address)
    }
}
