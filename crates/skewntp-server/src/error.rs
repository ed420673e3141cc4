// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Custom error types for the drifting NTP server.
//!
//! All public APIs return `io::Result<T>`. Internally, errors are constructed
//! as [`SkewServerError`] variants and converted to `io::Error` automatically
//! via `From<SkewServerError> for io::Error`. Users who want programmatic
//! error matching can downcast via `io::Error::get_ref()`.

// Re-export proto error types for convenience.
pub use skewntp_proto::error::ParseError;

use std::fmt;
use std::io;

/// Errors that can occur while running the drifting NTP server.
#[derive(Debug)]
pub enum SkewServerError {
    /// A request failed protocol validation (malformed, wrong version or mode).
    Protocol(ProtocolError),
    /// Invalid configuration (bad listen addresses).
    Config(ConfigError),
    /// Underlying I/O error (socket bind, send/recv, etc.).
    Io(io::Error),
}

/// Validation errors for incoming client requests.
///
/// All of these cause the offending datagram to be logged and dropped; none
/// produce a reply and none are fatal to the server loop.
#[derive(Clone, Debug)]
pub enum ProtocolError {
    /// The datagram could not be decoded as an NTP packet.
    MalformedPacket(ParseError),
    /// The request version is outside the supported set {3, 4}.
    UnsupportedVersion {
        /// The version value received.
        version: u8,
    },
    /// The request mode is not Client (3).
    UnexpectedMode {
        /// The mode value received.
        mode: u8,
    },
}

/// Server configuration errors.
#[derive(Clone, Debug)]
pub enum ConfigError {
    /// Invalid or unresolvable listen address.
    InvalidListenAddress {
        /// The address that was invalid.
        address: String,
        /// Detail about why it is invalid.
        detail: String,
    },
}

// Display implementations.

impl fmt::Display for SkewServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkewServerError::Protocol(e) => write!(f, "NTP protocol error: {e}"),
            SkewServerError::Config(e) => write!(f, "server config error: {e}"),
            SkewServerError::Io(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::MalformedPacket(e) => write!(f, "malformed NTP packet: {e}"),
            ProtocolError::UnsupportedVersion { version } => {
                write!(f, "unsupported NTP version: {version}")
            }
            ProtocolError::UnexpectedMode { mode } => {
                write!(f, "not a client request (mode {mode})")
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidListenAddress { address, detail } => {
                write!(f, "invalid listen address {address:?}: {detail}")
            }
        }
    }
}

// Error trait implementations.

impl std::error::Error for SkewServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SkewServerError::Protocol(e) => Some(e),
            SkewServerError::Config(e) => Some(e),
            SkewServerError::Io(e) => Some(e),
        }
    }
}

impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProtocolError::MalformedPacket(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}

// Conversion implementations.

impl From<ProtocolError> for SkewServerError {
    fn from(err: ProtocolError) -> Self {
        SkewServerError::Protocol(err)
    }
}

impl From<ConfigError> for SkewServerError {
    fn from(err: ConfigError) -> Self {
        SkewServerError::Config(err)
    }
}

impl From<io::Error> for SkewServerError {
    fn from(err: io::Error) -> Self {
        SkewServerError::Io(err)
    }
}

impl From<SkewServerError> for io::Error {
    fn from(err: SkewServerError) -> io::Error {
        let kind = match &err {
            SkewServerError::Io(e) => e.kind(),
            SkewServerError::Protocol(ProtocolError::MalformedPacket(p)) => {
                io::Error::from(p.clone()).kind()
            }
            SkewServerError::Protocol(_) => io::ErrorKind::InvalidData,
            SkewServerError::Config(_) => io::ErrorKind::InvalidInput,
        };
        match err {
            SkewServerError::Io(e) => e,
            other => io::Error::new(kind, other),
        }
    }
}
