//! Bit packing primitives shared by the embedding and recovery pipelines.
//!
//! One data bit goes into the least-significant bit of one carrier byte,
//! most-significant bit of the value first. The upper 7 bits of every
//! carrier byte are never touched.

use crate::constants::{CARRIER_BYTES_PER_BYTE, CARRIER_BYTES_PER_INT};

/// Spread the 8 bits of `value` over the LSBs of 8 carrier bytes.
pub fn pack_byte(value: u8, carrier: &mut [u8; CARRIER_BYTES_PER_BYTE]) {
    for (i, byte) in carrier.iter_mut().enumerate() {
        let bit = (value >> (7 - i)) & 1;
        *byte = (*byte & !1) | bit;
    }
}

/// Rebuild a byte from the LSBs of 8 carrier bytes.
pub fn unpack_byte(carrier: &[u8; CARRIER_BYTES_PER_BYTE]) -> u8 {
    carrier.iter().fold(0, |acc, &byte| (acc << 1) | (byte & 1))
}

/// Spread the 32 bits of `value` over the LSBs of 32 carrier bytes.
/// The sign bit travels like any other bit, two's complement as-is.
pub fn pack_int(value: i32, carrier: &mut [u8; CARRIER_BYTES_PER_INT]) {
    let bits = value as u32;
    for (i, byte) in carrier.iter_mut().enumerate() {
        let bit = ((bits >> (31 - i)) & 1) as u8;
        *byte = (*byte & !1) | bit;
    }
}

/// Rebuild a 32-bit signed integer from the LSBs of 32 carrier bytes.
pub fn unpack_int(carrier: &[u8; CARRIER_BYTES_PER_INT]) -> i32 {
    carrier
        .iter()
        .fold(0u32, |acc, &byte| (acc << 1) | u32::from(byte & 1)) as i32
}
