// librenfc/src/session/outcome.rs

//! Scan results.

use crate::error::Error;
use crate::sensor::SensorType;
use crate::types::{MemoryImage, PatchInfo, SensorUid, SystemInfo, TagUid};

/// Data captured by a successful scan.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanResult {
    /// UID in wire order.
    pub tag_uid: TagUid,
    /// UID in sensor order.
    pub sensor_uid: SensorUid,
    /// Latest patch info read successfully.
    pub patch_info: PatchInfo,
    /// System info of the tag.
    pub system_info: SystemInfo,
    /// FRAM image.
    pub memory: MemoryImage,
    /// Family detected from the patch info.
    pub sensor_type: SensorType,
    /// Printed serial number, e.g. `3MH00A1C2D3`.
    pub serial_number: String,
    /// Whether the sensor accepted the enable-streaming command.
    pub streaming_enabled: bool,
    /// Radio address of the sensor, in display order.
    pub streaming_address: Option<[u8; 6]>,
}

impl ScanResult {
    /// `AA:BB:CC:DD:EE:FF` form of the radio address.
    pub fn streaming_address_string(&self) -> Option<String> {
        self.streaming_address.map(|a| {
            a.iter()
                .map(|b| format!("{:02X}", b))
                .collect::<Vec<_>>()
                .join(":")
        })
    }
}

/// Terminal result of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Every required phase completed.
    Success(ScanResult),
    /// The error that ended the scan.
    Failure(Error),
}

impl SessionOutcome {
    /// Whether the scan succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The scan result, if any.
    pub fn result(&self) -> Option<&ScanResult> {
        match self {
            Self::Success(r) => Some(r),
            Self::Failure(_) => None,
        }
    }

    /// The error, if the scan failed.
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Success(_) => None,
            Self::Failure(e) => Some(e),
        }
    }

    /// Convert into a `Result`.
    pub fn into_result(self) -> crate::Result<ScanResult> {
        match self {
            Self::Success(r) => Ok(r),
            Self::Failure(e) => Err(e),
        }
    }
}

impl From<crate::Result<ScanResult>> for SessionOutcome {
    fn from(r: crate::Result<ScanResult>) -> Self {
        match r {
            Ok(r) => Self::Success(r),
            Err(e) => Self::Failure(e),
        }
    }
}
