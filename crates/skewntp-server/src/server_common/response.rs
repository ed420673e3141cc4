use std::io;

use crate::protocol::{self, ConstPackedSizeBytes, WriteBytes};

/// The reference identifier stamped on every reply.
///
/// An experimental tag: reference identifiers beginning with ASCII "X" are
/// reserved for unregistered experimentation, which is exactly what a fake
/// clock is.
pub const DEFAULT_REFERENCE_ID: protocol::ReferenceIdentifier =
    protocol::ReferenceIdentifier(*b"XFAK");

/// Build a server reply for a validated client request.
///
/// The version is echoed from the request and the origin timestamp is the
/// client's transmit timestamp, verbatim. Reference, receive, and transmit
/// timestamps all carry the same drifted-clock sample; with no upstream
/// source there is no interval between them worth modelling. Everything else
/// stays at the packet defaults.
pub(crate) fn build_drift_response(
    request: &protocol::Packet,
    reference_id: protocol::ReferenceIdentifier,
    ts: protocol::TimestampFormat,
) -> protocol::Packet {
    protocol::Packet {
        leap_indicator: protocol::LeapIndicator::NoWarning,
        version: request.version,
        mode: protocol::Mode::Server,
        stratum: protocol::Stratum::PRIMARY,
        poll: 0,
        precision: 0,
        root_delay: protocol::ShortFormat::default(),
        root_dispersion: protocol::ShortFormat::default(),
        reference_id,
        reference_timestamp: ts,
        origin_timestamp: request.transmit_timestamp,
        receive_timestamp: ts,
        transmit_timestamp: ts,
    }
}

/// Serialize a response packet to its canonical 48-byte wire form.
pub(crate) fn serialize_response(
    response: &protocol::Packet,
) -> io::Result<[u8; protocol::Packet::PACKED_SIZE_BYTES]> {
    let mut buf = [0u8; protocol::Packet::PACKED_SIZE_BYTES];
    (&mut buf[..]).write_bytes(*response)?;
    Ok(buf)
}
