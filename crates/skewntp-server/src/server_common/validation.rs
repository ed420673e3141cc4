use std::io;

use crate::error::{ProtocolError, SkewServerError};
use crate::protocol::{self, Mode, Version};

/// Validate an incoming NTP client request datagram.
///
/// The datagram must decode as a 48-byte header (or the 68-byte
/// header-plus-authenticator form), carry version 3 or 4, and be a Client
/// (mode 3) request. Every other field value is accepted verbatim.
///
/// Returns the parsed packet on success.
pub(crate) fn validate_client_request(
    recv_buf: &[u8],
    recv_len: usize,
) -> io::Result<protocol::Packet> {
    let request = protocol::Packet::from_datagram(&recv_buf[..recv_len])
        .map_err(|e| SkewServerError::Protocol(ProtocolError::MalformedPacket(e)))?;

    if request.version != Version::V3 && request.version != Version::V4 {
        return Err(SkewServerError::Protocol(ProtocolError::UnsupportedVersion {
            version: request.version.value(),
        })
        .into());
    }

    if request.mode != Mode::Client {
        return Err(SkewServerError::Protocol(ProtocolError::UnexpectedMode {
            mode: request.mode as u8,
        })
        .into());
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{
        ConstPackedSizeBytes, DATAGRAM_SIZE_WITH_MAC, LeapIndicator, Mode, Packet, ShortFormat,
        Stratum, TimestampFormat, ToBytes, Version,
    };

    fn make_valid_client_buf() -> [u8; Packet::PACKED_SIZE_BYTES] {
        let pkt = Packet {
            leap_indicator: LeapIndicator::NoWarning,
            version: Version::V4,
            mode: Mode::Client,
            stratum: Stratum::UNSPECIFIED,
            poll: 6,
            precision: -20,
            root_delay: ShortFormat::default(),
            root_dispersion: ShortFormat::default(),
            reference_id: crate::protocol::ReferenceIdentifier::default(),
            reference_timestamp: TimestampFormat::default(),
            origin_timestamp: TimestampFormat::default(),
            receive_timestamp: TimestampFormat::default(),
            transmit_timestamp: TimestampFormat {
                seconds: 1000,
                fraction: 1,
            },
        };
        let mut buf = [0u8; Packet::PACKED_SIZE_BYTES];
        pkt.to_bytes(&mut buf).unwrap();
        buf
    }

    #[test]
    fn valid_client_request() {
        let buf = make_valid_client_buf();
        let result = validate_client_request(&buf, buf.len());
        assert!(result.is_ok());
        let pkt = result.unwrap();
        assert_eq!(pkt.mode, Mode::Client);
        assert_eq!(pkt.version, Version::V4);
    }

    #[test]
    fn buffer_too_short_0() {
        let buf = [];
        assert!(validate_client_request(&buf, 0).is_err());
    }

    #[test]
    fn buffer_too_short_47() {
        let buf = [0u8; 47];
        assert!(validate_client_request(&buf, 47).is_err());
    }

    #[test]
    fn buffer_exactly_48() {
        let buf = make_valid_client_buf();
        assert!(validate_client_request(&buf, 48).is_ok());
    }

    #[test]
    fn buffer_between_header_and_mac_rejected() {
        let mut buf = [0u8; 60];
        buf[..48].copy_from_slice(&make_valid_client_buf());
        assert!(validate_client_request(&buf, 60).is_err());
    }

    #[test]
    fn buffer_exactly_68_accepted() {
        let mut buf = [0u8; DATAGRAM_SIZE_WITH_MAC];
        buf[..48].copy_from_slice(&make_valid_client_buf());
        assert!(validate_client_request(&buf, DATAGRAM_SIZE_WITH_MAC).is_ok());
    }

    #[test]
    fn buffer_over_68_rejected() {
        let mut buf = [0u8; 100];
        buf[..48].copy_from_slice(&make_valid_client_buf());
        assert!(validate_client_request(&buf, 100).is_err());
    }

    #[test]
    fn mode_symmetric_active_rejected() {
        let mut buf = make_valid_client_buf();
        // Byte 0: LI(2)|VN(3)|Mode(3). Replace mode bits with SymmetricActive.
        buf[0] = (buf[0] & 0b1111_1000) | 1;
        let result = validate_client_request(&buf, buf.len());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("mode"));
    }

    #[test]
    fn mode_server_rejected() {
        let mut buf = make_valid_client_buf();
        buf[0] = (buf[0] & 0b1111_1000) | 4; // Mode::Server
        assert!(validate_client_request(&buf, buf.len()).is_err());
    }

    #[test]
    fn mode_broadcast_rejected() {
        let mut buf = make_valid_client_buf();
        buf[0] = (buf[0] & 0b1111_1000) | 5; // Mode::Broadcast
        assert!(validate_client_request(&buf, buf.len()).is_err());
    }

    #[test]
    fn version_0_rejected() {
        let mut buf = make_valid_client_buf();
        buf[0] &= 0b1100_0111;
        assert!(validate_client_request(&buf, buf.len()).is_err());
    }

    #[test]
    fn version_2_rejected() {
        let mut buf = make_valid_client_buf();
        buf[0] = (buf[0] & 0b11_000_111) | (2 << 3);
        let result = validate_client_request(&buf, buf.len());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("version"));
    }

    #[test]
    fn version_3_accepted() {
        let mut buf = make_valid_client_buf();
        buf[0] = (buf[0] & 0b11_000_111) | (3 << 3);
        assert!(validate_client_request(&buf, buf.len()).is_ok());
    }

    #[test]
    fn version_5_rejected() {
        let mut buf = make_valid_client_buf();
        buf[0] = (buf[0] & 0b11_000_111) | (5 << 3);
        assert!(validate_client_request(&buf, buf.len()).is_err());
    }

    #[test]
    fn zero_transmit_timestamp_accepted() {
        // Only version and mode are checked; all other fields pass through.
        let mut buf = make_valid_client_buf();
        buf[40..48].fill(0);
        assert!(validate_client_request(&buf, buf.len()).is_ok());
    }
}
