// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Custom error types for buffer-based NTP packet parsing and serialization.
//!
//! [`ParseError`] is designed to be `no_std`-compatible, using no heap allocation.
//! When the `std` feature is enabled, it also implements [`std::error::Error`] and
//! can be converted to [`std::io::Error`].

use core::fmt;

/// Errors that can occur during buffer-based NTP packet parsing or serialization.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The buffer is too short for the expected data.
    BufferTooShort {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },
    /// A datagram whose length matches neither the bare 48-byte header nor
    /// the 68-byte authenticated form.
    UnexpectedLength {
        /// The datagram length that was rejected.
        length: usize,
    },
    /// An invalid or unrecognized field value was encountered.
    InvalidField {
        /// Name of the field that was invalid.
        field: &'static str,
        /// The invalid value.
        value: u32,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::BufferTooShort { needed, available } => {
                write!(
                    f,
                    "buffer too short: needed {} bytes, got {}",
                    needed, available
                )
            }
            ParseError::UnexpectedLength { length } => {
                write!(f, "unexpected datagram length: {} bytes", length)
            }
            ParseError::InvalidField { field, value } => {
                write!(f, "invalid {} value: {}", field, value)
            }
        }
    }
}

#[cfg(feature = "std")]
impl From<ParseError> for std::io::Error {
    fn from(err: ParseError) -> std::io::Error {
        let kind = match &err {
            ParseError::BufferTooShort { .. } => std::io::ErrorKind::UnexpectedEof,
            ParseError::UnexpectedLength { .. } => std::io::ErrorKind::InvalidData,
            ParseError::InvalidField { .. } => std::io::ErrorKind::InvalidData,
        };
        std::io::Error::new(kind, err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}
