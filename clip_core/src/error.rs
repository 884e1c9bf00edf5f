//! Error types reported by the argument binder and the codecs.

use thiserror::Error;

/// Why a terminal command was not invoked.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArgError {
    #[error("NOT ENOUGH ARGUMENTS")]
    NotEnoughArguments,

    #[error("BOOLEAN PARSING ERROR")]
    ParseBool,

    #[error("SIGNED INTEGER PARSING ERROR")]
    ParseInt,

    #[error("UNSIGNED INTEGER PARSING ERROR")]
    ParseUint,

    #[error("FLOAT NUMBER PARSING ERROR")]
    ParseFloat,

    #[error("ASCII HEX ARRAY PARSING ERROR")]
    ParseHexArray,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HexError {
    #[error("odd number of hex digits")]
    OddLength,

    #[error("invalid hex digit at index {index}")]
    InvalidDigit { index: usize },

    #[error("output buffer too small")]
    BufferTooSmall,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LvError {
    #[error("buffer too small: {needed} bytes needed, {available} available")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("payload length does not fit the length field")]
    TooLong,
}
