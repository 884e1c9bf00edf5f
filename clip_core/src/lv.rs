//! Length-value framing for byte arrays.
//!
//! Short payloads (under 128 bytes) carry their length in the header byte. Longer ones set the
//! header's high bit, put the count of little-endian length bytes in its low nibble, and follow it
//! with those length bytes. At most [`LV_INLINE_CAPACITY`] length bytes are used.

use crate::config::LV_INLINE_CAPACITY;
use crate::error::LvError;

const LONG_FORM: u8 = 0x80;
const SHORT_MAX: usize = 0x7F;

/// Number of little-endian length bytes following the header.
pub const fn length_bytes(len: usize) -> usize {
    if len <= SHORT_MAX {
        return 0;
    }
    let mut count = 0;
    let mut rest = len;
    while rest != 0 {
        count += 1;
        rest >>= 8;
    }
    count
}

/// Header size (header byte plus length bytes) for a payload of `len` bytes.
pub const fn header_len(len: usize) -> usize {
    1 + length_bytes(len)
}

/// Total encoded size for a payload of `len` bytes.
pub const fn encoded_len(len: usize) -> usize {
    header_len(len) + len
}

/// Write the header for a payload of `len` bytes. Returns where the payload starts.
pub fn write_header(out: &mut [u8], len: usize) -> Result<usize, LvError> {
    let extra = length_bytes(len);
    if extra > LV_INLINE_CAPACITY {
        return Err(LvError::TooLong);
    }
    let needed = 1 + extra;
    if out.len() < needed {
        return Err(LvError::BufferTooSmall { needed, available: out.len() });
    }

    if extra == 0 {
        out[0] = len as u8;
    } else {
        out[0] = LONG_FORM | extra as u8;
        for (i, slot) in out[1..needed].iter_mut().enumerate() {
            *slot = (len >> (8 * i)) as u8;
        }
    }
    Ok(needed)
}

/// Frame `data` into `out`. Returns the encoded size.
pub fn encode(out: &mut [u8], data: &[u8]) -> Result<usize, LvError> {
    let needed = encoded_len(data.len());
    if out.len() < needed {
        return Err(LvError::BufferTooSmall { needed, available: out.len() });
    }
    let offset = write_header(out, data.len())?;
    out[offset..needed].copy_from_slice(data);
    Ok(needed)
}

/// Read a header. Returns `(payload length, header size)`.
///
/// Length bytes missing from a truncated buffer count as zero.
pub fn decode_header(encoded: &[u8]) -> (usize, usize) {
    let Some(&header) = encoded.first() else {
        return (0, 0);
    };
    if header & LONG_FORM == 0 {
        return (header as usize, 1);
    }

    let extra = (header & 0x0F) as usize;
    let mut len = 0usize;
    for (i, &b) in encoded.iter().skip(1).take(extra).enumerate() {
        if i < core::mem::size_of::<usize>() {
            len |= (b as usize) << (8 * i);
        }
    }
    (len, 1 + extra)
}

/// Payload of an encoded array, clamped to the bytes actually present.
pub fn decode(encoded: &[u8]) -> &[u8] {
    let (len, offset) = decode_header(encoded);
    let payload = encoded.get(offset..).unwrap_or(&[]);
    &payload[..len.min(payload.len())]
}
