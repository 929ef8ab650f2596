// librenfc/src/protocol/crypto.rs

//! Vendor nonce transform keyed by the sensor UID.
//!
//! The sensor only accepts the activate / enable-streaming subcommands when
//! their trailing four bytes match this transform bit for bit. It is a pure
//! function and safe to call from any number of concurrent sessions.

use crate::types::SensorUid;

const KEY: [u16; 4] = [0xA0C5, 0x6860, 0x0000, 0x14C6];

/// Shift out the two low bits, folding each set bit back in through the key.
fn op(value: u16) -> u16 {
    let mut res = value >> 2;
    if value & 1 != 0 {
        res ^= KEY[1];
    }
    if value & 2 != 0 {
        res ^= KEY[0];
    }
    res
}

fn prepare_variables(uid: &SensorUid, x: u16, y: u16) -> [u16; 4] {
    let id = uid.as_bytes();
    let s1 = u16::from_be_bytes([id[5], id[4]])
        .wrapping_add(x)
        .wrapping_add(y);
    let s2 = u16::from_be_bytes([id[3], id[2]]).wrapping_add(KEY[2]);
    let s3 = u16::from_be_bytes([id[1], id[0]]).wrapping_add(x.wrapping_mul(2));
    let s4 = 0x241a ^ KEY[3];
    [s1, s2, s3, s4]
}

fn process(input: [u16; 4]) -> [u16; 4] {
    let r0 = op(input[0]) ^ input[3];
    let r1 = op(r0) ^ input[2];
    let r2 = op(r1) ^ input[1];
    let r3 = op(r2) ^ input[0];
    let r4 = op(r3);
    let r5 = op(r4 ^ r0);
    let r6 = op(r5 ^ r1);
    let r7 = op(r6 ^ r2);

    [r3 ^ r7, r2 ^ r6, r1 ^ r5, r0 ^ r4]
}

/// Compute the 4-byte nonce for subcommand `x` and nonce input `y`.
pub fn obfuscate(uid: &SensorUid, x: u16, y: u16) -> [u8; 4] {
    let block_key = process(prepare_variables(uid, x, y));
    let r1 = (block_key[0] ^ 0x4163).to_le_bytes();
    let r2 = (block_key[1] ^ 0x4344).to_le_bytes();
    [r1[0], r1[1], r2[0], r2[1]]
}
