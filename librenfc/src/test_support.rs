// librenfc/src/test_support.rs

//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common MockTransport setup so tests across the
//! crate, the tests/ directory and the benches reuse the same simulated tag.
#![allow(dead_code)]

use crate::constants::FRAM_ADDRESS;
use crate::transport::mock::MockTransport;

/// Wire-order UID of the reference Libre 2 tag.
#[doc(hidden)]
pub const LIBRE2_UID: [u8; 8] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

/// Patch info of the reference Libre 2 tag.
#[doc(hidden)]
pub const LIBRE2_PATCH_INFO: [u8; 6] = [0x9d, 0x08, 0x30, 0x01, 0x00, 0x00];

/// Enable-streaming response of the reference tag (radio address, reversed).
#[doc(hidden)]
pub const LIBRE2_STREAMING_RESPONSE: [u8; 6] = [0x11, 0x22, 0x33, 0x44, 0x55, 0x66];

/// A MockTransport answering like a Libre 2 sensor with zeroed FRAM.
#[doc(hidden)]
pub fn libre2_mock() -> MockTransport {
    let mut mock = MockTransport::new(LIBRE2_UID);
    mock.patch_info = LIBRE2_PATCH_INFO.to_vec();
    mock.streaming_response = LIBRE2_STREAMING_RESPONSE.to_vec();
    mock
}

/// Like [`libre2_mock`], with FRAM filled by a byte pattern so block order
/// mistakes show up.
#[doc(hidden)]
pub fn libre2_mock_with_pattern() -> MockTransport {
    let mut mock = libre2_mock();
    let fram: Vec<u8> = (0..43 * 8).map(|i| (i * 7 % 256) as u8).collect();
    mock.load(FRAM_ADDRESS, &fram);
    mock
}

