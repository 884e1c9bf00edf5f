//! ASCII hex <-> bytes, two characters per byte.

use crate::error::HexError;

const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Uppercase hex digit for the low nibble of `nibble`.
#[inline(always)]
pub const fn nibble_to_char(nibble: u8) -> u8 {
    DIGITS[(nibble & 0x0F) as usize]
}

/// Value of one hex digit, either case.
#[inline(always)]
pub const fn char_to_nibble(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        _ => None,
    }
}

/// Write `bytes` as uppercase hex into `out`. Returns the number of characters written.
pub fn from_buf(out: &mut [u8], bytes: &[u8]) -> Result<usize, HexError> {
    let needed = bytes.len() * 2;
    if out.len() < needed {
        return Err(HexError::BufferTooSmall);
    }
    for (pair, &byte) in out.chunks_exact_mut(2).zip(bytes) {
        pair[0] = nibble_to_char(byte >> 4);
        pair[1] = nibble_to_char(byte);
    }
    Ok(needed)
}

/// Decode `hex` into `out`. Returns the number of bytes written.
///
/// Bytes before a bad digit may already have been written when this fails.
pub fn to_buf(out: &mut [u8], hex: &[u8]) -> Result<usize, HexError> {
    if hex.len() % 2 != 0 {
        return Err(HexError::OddLength);
    }
    let count = hex.len() / 2;
    if out.len() < count {
        return Err(HexError::BufferTooSmall);
    }
    for (i, pair) in hex.chunks_exact(2).enumerate() {
        let hi = char_to_nibble(pair[0]).ok_or(HexError::InvalidDigit { index: 2 * i })?;
        let lo = char_to_nibble(pair[1]).ok_or(HexError::InvalidDigit { index: 2 * i + 1 })?;
        out[i] = (hi << 4) | lo;
    }
    Ok(count)
}
