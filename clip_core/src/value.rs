//! Typed argument values and the per-type token parsers.
//!
//! Values borrow from the line buffer they were parsed out of. A hex array is decoded in place:
//! its length-value framing is written over the ASCII digits it replaces, which always fits since
//! two digits shrink to one byte.

use core::fmt;

use crate::config::LV_INLINE_CAPACITY;
use crate::error::ArgError;
use crate::tree::ArgType;
use crate::{hex, lv};

/// Length-value framed bytes living in the line buffer.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HexArray<'a> {
    encoded: &'a [u8],
}

impl HexArray<'static> {
    /// A zero length array, used when there is no token memory to frame it in.
    pub const EMPTY: Self = Self { encoded: &[0] };
}

impl<'a> HexArray<'a> {
    pub const fn from_encoded(encoded: &'a [u8]) -> Self {
        Self { encoded }
    }

    /// Header, length bytes and payload.
    pub const fn encoded(&self) -> &'a [u8] {
        self.encoded
    }

    /// Payload bytes.
    pub fn data(&self) -> &'a [u8] {
        lv::decode(self.encoded)
    }

    pub fn len(&self) -> usize {
        self.data().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for HexArray<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HexArray").field(&self.data()).finish()
    }
}

/// A bound argument.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArgValue<'a> {
    /// Raw token bytes, quotes and escapes already removed.
    Str(&'a [u8]),
    Bool(bool),
    Int(i32),
    Uint(u32),
    Float(f32),
    HexArray(HexArray<'a>),
}

impl<'a> ArgValue<'a> {
    pub fn kind(&self) -> ArgType {
        match self {
            ArgValue::Str(_) => ArgType::String,
            ArgValue::Bool(_) => ArgType::Bool,
            ArgValue::Int(_) => ArgType::Int,
            ArgValue::Uint(_) => ArgType::Uint,
            ArgValue::Float(_) => ArgType::Float,
            ArgValue::HexArray(_) => ArgType::HexArray,
        }
    }

    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match *self {
            ArgValue::Str(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// String argument as text; `None` for other kinds or invalid UTF-8.
    pub fn as_str(&self) -> Option<&'a str> {
        self.as_bytes().and_then(|bytes| core::str::from_utf8(bytes).ok())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            ArgValue::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match *self {
            ArgValue::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u32> {
        match *self {
            ArgValue::Uint(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match *self {
            ArgValue::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Payload of a hex array argument.
    pub fn as_hex_array(&self) -> Option<&'a [u8]> {
        match *self {
            ArgValue::HexArray(array) => Some(array.data()),
            _ => None,
        }
    }
}

/// Parse `token` as `kind`. Strings are passed through untouched.
pub fn parse(kind: ArgType, token: &mut [u8]) -> Result<ArgValue<'_>, ArgError> {
    match kind {
        ArgType::String => Ok(ArgValue::Str(token)),
        ArgType::Bool => parse_bool(token).map(ArgValue::Bool).ok_or(ArgError::ParseBool),
        ArgType::Int => parse_int(token).map(ArgValue::Int).ok_or(ArgError::ParseInt),
        ArgType::Uint => parse_uint(token).map(ArgValue::Uint).ok_or(ArgError::ParseUint),
        ArgType::Float => parse_float(token).map(ArgValue::Float).ok_or(ArgError::ParseFloat),
        ArgType::HexArray => parse_hex_array(token).map(ArgValue::HexArray),
    }
}

/// Only `0` and `1` are booleans.
pub fn parse_bool(token: &[u8]) -> Option<bool> {
    match token {
        b"0" => Some(false),
        b"1" => Some(true),
        _ => None,
    }
}

/// C-style integer literal (`0x` hex, leading `0` octal, otherwise decimal), wrapping modulo 2^32.
pub fn parse_int(token: &[u8]) -> Option<i32> {
    parse_integer(token, true).map(|value| value as i32)
}

/// As [`parse_int`], but a minus sign is rejected.
pub fn parse_uint(token: &[u8]) -> Option<u32> {
    parse_integer(token, false)
}

fn parse_integer(token: &[u8], signed: bool) -> Option<u32> {
    let mut s = token;
    while let [first, rest @ ..] = s {
        if !first.is_ascii_whitespace() {
            break;
        }
        s = rest;
    }

    let negative = match s.first() {
        Some(b'-') if !signed => return None,
        Some(b'-') => true,
        _ => false,
    };
    if let [b'-' | b'+', rest @ ..] = s {
        s = rest;
    }

    let (radix, digits) = match s {
        [b'0', b'x' | b'X', rest @ ..] if rest.first().is_some_and(u8::is_ascii_hexdigit) => (16, rest),
        [b'0', ..] => (8, s),
        _ => (10, s),
    };
    if digits.is_empty() {
        return None;
    }

    let mut value: u32 = 0;
    for &b in digits {
        let digit = (b as char).to_digit(radix)?;
        value = value.wrapping_mul(radix).wrapping_add(digit);
    }
    Some(if negative { value.wrapping_neg() } else { value })
}

/// Decimal float literal, the whole token must be consumed.
pub fn parse_float(token: &[u8]) -> Option<f32> {
    let text = core::str::from_utf8(token).ok()?;
    text.trim_start_matches(|c: char| c.is_ascii_whitespace())
        .parse::<f32>()
        .ok()
}

/// Turn the hex digits in `token` into a length-value framed array over the same memory.
///
/// The first bytes are decoded into a small scratch buffer because the header may cover the
/// digits they came from. Later pairs are always read before their position is overwritten.
pub fn parse_hex_array(token: &mut [u8]) -> Result<HexArray<'_>, ArgError> {
    if token.len() % 2 != 0 || !token.iter().all(u8::is_ascii_hexdigit) {
        return Err(ArgError::ParseHexArray);
    }
    let len = token.len() / 2;
    if len == 0 {
        return Ok(HexArray::EMPTY);
    }

    let head = len.min(LV_INLINE_CAPACITY);
    let mut scratch = [0u8; LV_INLINE_CAPACITY];
    hex::to_buf(&mut scratch[..head], &token[..2 * head]).map_err(|_| ArgError::ParseHexArray)?;

    let offset = lv::write_header(token, len).map_err(|_| ArgError::ParseHexArray)?;
    for i in head..len {
        let mut byte = [0u8; 1];
        hex::to_buf(&mut byte, &token[2 * i..2 * i + 2]).map_err(|_| ArgError::ParseHexArray)?;
        token[offset + i] = byte[0];
    }
    token[offset..offset + head].copy_from_slice(&scratch[..head]);

    let token: &[u8] = token;
    Ok(HexArray::from_encoded(&token[..offset + len]))
}
