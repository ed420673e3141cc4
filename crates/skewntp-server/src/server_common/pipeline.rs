use std::net::SocketAddr;

use tracing::{debug, info};

use crate::protocol::{self, ConstPackedSizeBytes};

use super::{DriftClock, build_drift_response, serialize_response, validate_client_request};

/// The complete result of handling a client datagram.
pub(crate) enum HandleResult {
    /// Send this response buffer back to the client (fixed 48 bytes).
    Response([u8; protocol::Packet::PACKED_SIZE_BYTES]),
    /// Drop the datagram; no reply is ever sent for invalid input.
    Drop,
}

/// Handle a single incoming datagram (pure logic, no I/O).
///
/// Validates the request, samples the drift clock once, and builds the reply.
/// A response is either fully built and returned, or the datagram is dropped;
/// there is no partial output.
pub(crate) fn handle_request(
    recv_buf: &[u8],
    recv_len: usize,
    src_addr: SocketAddr,
    clock: &DriftClock,
    reference_id: protocol::ReferenceIdentifier,
) -> HandleResult {
    info!("received {} byte packet from {}", recv_len, src_addr.ip());

    let request = match validate_client_request(recv_buf, recv_len) {
        Ok(req) => req,
        Err(e) => {
            info!("dropping request from {}: {}", src_addr.ip(), e);
            return HandleResult::Drop;
        }
    };

    debug!("client time: {}", request.transmit_timestamp);

    // One clock sample serves all three server-side timestamp fields.
    let ts = protocol::TimestampFormat::from_posix_secs(clock.now());
    let response = build_drift_response(&request, reference_id, ts);

    match serialize_response(&response) {
        Ok(buf) => HandleResult::Response(buf),
        Err(e) => {
            debug!("failed to serialize response for {}: {}", src_addr.ip(), e);
            HandleResult::Drop
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{
        DATAGRAM_SIZE_WITH_MAC, FromBytes, Mode, Packet, Stratum, TimestampFormat, ToBytes,
        Version,
    };
    use crate::server_common::DEFAULT_REFERENCE_ID;

    fn test_clock() -> DriftClock {
        DriftClock::with_start(1_700_000_000.0, DriftClock::DEFAULT_SPEED)
    }

    fn src() -> SocketAddr {
        "[::1]:12345".parse().unwrap()
    }

    fn make_client_request(version: Version) -> [u8; Packet::PACKED_SIZE_BYTES] {
        let packet = Packet {
            version,
            mode: Mode::Client,
            transmit_timestamp: TimestampFormat {
                seconds: 3_913_056_000,
                fraction: 12345,
            },
            ..Packet::default()
        };
        let mut buf = [0u8; Packet::PACKED_SIZE_BYTES];
        packet.to_bytes(&mut buf).unwrap();
        buf
    }

    fn parse_response(buf: &[u8; Packet::PACKED_SIZE_BYTES]) -> Packet {
        let (packet, _) = Packet::from_bytes(buf).unwrap();
        packet
    }

    #[test]
    fn client_request_produces_drifted_reply() {
        let buf = make_client_request(Version::V4);
        let result = handle_request(&buf, buf.len(), src(), &test_clock(), DEFAULT_REFERENCE_ID);

        let HandleResult::Response(out) = result else {
            panic!("expected a response");
        };
        let response = parse_response(&out);
        assert_eq!(response.version, Version::V4);
        assert_eq!(response.mode, Mode::Server);
        assert_eq!(response.stratum, Stratum::PRIMARY);
        assert_eq!(
            response.origin_timestamp,
            TimestampFormat {
                seconds: 3_913_056_000,
                fraction: 12345,
            }
        );
        assert_eq!(response.reference_timestamp, response.receive_timestamp);
        assert_eq!(response.receive_timestamp, response.transmit_timestamp);
    }

    #[test]
    fn version_is_echoed() {
        let buf = make_client_request(Version::V3);
        let result = handle_request(&buf, buf.len(), src(), &test_clock(), DEFAULT_REFERENCE_ID);
        let HandleResult::Response(out) = result else {
            panic!("expected a response");
        };
        assert_eq!(parse_response(&out).version, Version::V3);
    }

    #[test]
    fn symmetric_active_is_dropped() {
        let mut buf = make_client_request(Version::V4);
        buf[0] = (buf[0] & 0b1111_1000) | 1; // Mode::SymmetricActive
        assert!(matches!(
            handle_request(&buf, buf.len(), src(), &test_clock(), DEFAULT_REFERENCE_ID),
            HandleResult::Drop
        ));
    }

    #[test]
    fn version_2_is_dropped() {
        let mut buf = make_client_request(Version::V4);
        buf[0] = (buf[0] & 0b11_000_111) | (2 << 3);
        assert!(matches!(
            handle_request(&buf, buf.len(), src(), &test_clock(), DEFAULT_REFERENCE_ID),
            HandleResult::Drop
        ));
    }

    #[test]
    fn truncated_datagram_is_dropped() {
        let buf = make_client_request(Version::V4);
        assert!(matches!(
            handle_request(&buf, 20, src(), &test_clock(), DEFAULT_REFERENCE_ID),
            HandleResult::Drop
        ));
    }

    #[test]
    fn authenticated_request_is_answered() {
        let mut buf = [0u8; DATAGRAM_SIZE_WITH_MAC];
        buf[..48].copy_from_slice(&make_client_request(Version::V4));
        buf[48..].fill(0x5A);
        let result = handle_request(&buf, buf.len(), src(), &test_clock(), DEFAULT_REFERENCE_ID);
        let HandleResult::Response(out) = result else {
            panic!("expected a response");
        };
        // The reply is always the bare 48-byte header.
        assert_eq!(out.len(), Packet::PACKED_SIZE_BYTES);
    }
}
