//! Types and constants that precisely match the on-wire NTP header.
//!
//! Provides slice-based [`FromBytes`]/[`ToBytes`] codecs suitable for
//! `no_std` use, plus `ReadBytes` and `WriteBytes` implementations which
//! extend the byteorder crate `WriteBytesExt` and `ReadBytesExt` traits with
//! the ability to read and write NTP protocol types (`std` only).
//!
//! Documentation is largely derived (and often copied directly) from IETF RFC 5905.

/// NTP port number.
pub const PORT: u16 = 123;

/// Datagram length of a bare NTP header.
pub const DATAGRAM_SIZE: usize = 48;

/// Datagram length of an NTP header followed by the legacy authenticator
/// (4-byte key identifier plus 16-byte MD5 digest, RFC 5905 Appendix A).
///
/// The only datagram length other than [`DATAGRAM_SIZE`] accepted on input.
/// The authenticator is never inspected and never re-emitted.
pub const DATAGRAM_SIZE_WITH_MAC: usize = DATAGRAM_SIZE + 20;

mod bytes;
#[cfg(feature = "std")]
mod io;
mod traits;
mod types;

pub use self::traits::*;
pub use self::types::*;
