//! Minimal parsing of the fixed 54-byte BMP header.

use crate::constants::{BMP_BYTES_PER_PIXEL, BMP_HEADER_SIZE, BMP_WIDTH_OFFSET};
use crate::error::StegError;

fn read_le_i32(header: &[u8; BMP_HEADER_SIZE], offset: usize) -> i32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&header[offset..offset + 4]);
    i32::from_le_bytes(raw)
}

/// Pixel payload size in bytes, read from the width and height fields:
/// width × height × 3.
///
/// Row padding is not accounted for, so for widths that are not a multiple
/// of 4 this is a lower bound on the bytes that actually follow the header.
pub fn payload_len(header: &[u8; BMP_HEADER_SIZE]) -> Result<usize, StegError> {
    let width = read_le_i32(header, BMP_WIDTH_OFFSET);
    let height = read_le_i32(header, BMP_WIDTH_OFFSET + 4);
    if width <= 0 || height <= 0 {
        return Err(StegError::InvalidDimensions { width, height });
    }
    Ok(width as usize * height as usize * BMP_BYTES_PER_PIXEL)
}
