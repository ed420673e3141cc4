use proptest::prelude::*;
use skewntp_proto::protocol::{
    ConstPackedSizeBytes, FromBytes, Packet, ShortFormat, TimestampFormat, ToBytes,
};

/// Strategy that generates exactly 48 random bytes.
fn arb_48_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 48)
}

proptest! {
    #[test]
    fn short_format_roundtrip(seconds in any::<u16>(), fraction in any::<u16>()) {
        let sf = ShortFormat { seconds, fraction };
        let mut buf = [0u8; 4];
        let written = sf.to_bytes(&mut buf).unwrap();
        prop_assert_eq!(written, 4);
        let (parsed, consumed) = ShortFormat::from_bytes(&buf).unwrap();
        prop_assert_eq!(consumed, 4);
        prop_assert_eq!(sf, parsed);
    }

    #[test]
    fn timestamp_format_roundtrip(seconds in any::<u32>(), fraction in any::<u32>()) {
        let ts = TimestampFormat { seconds, fraction };
        let mut buf = [0u8; 8];
        let written = ts.to_bytes(&mut buf).unwrap();
        prop_assert_eq!(written, 8);
        let (parsed, consumed) = TimestampFormat::from_bytes(&buf).unwrap();
        prop_assert_eq!(consumed, 8);
        prop_assert_eq!(ts, parsed);
    }

    /// Any 48 random bytes parse as a Packet and roundtrip losslessly: every
    /// bit pattern of the header is representable.
    #[test]
    fn packet_roundtrip_from_arbitrary_bytes(bytes in arb_48_bytes()) {
        let (packet, consumed) = Packet::from_bytes(&bytes).unwrap();
        prop_assert_eq!(consumed, Packet::PACKED_SIZE_BYTES);
        let mut buf = [0u8; Packet::PACKED_SIZE_BYTES];
        let written = packet.to_bytes(&mut buf).unwrap();
        prop_assert_eq!(written, Packet::PACKED_SIZE_BYTES);
        prop_assert_eq!(&buf[..], &bytes[..]);
    }

    /// Buffers shorter than 48 bytes must always return Err.
    #[test]
    fn packet_from_short_buffer_always_errors(len in 0usize..48) {
        let buf = vec![0u8; len];
        let result = Packet::from_bytes(&buf);
        prop_assert!(result.is_err());
    }

    /// The datagram entry point accepts only the two wire lengths.
    #[test]
    fn from_datagram_length_gate(len in 0usize..256) {
        let buf = vec![0u8; len];
        let result = Packet::from_datagram(&buf);
        if len == 48 || len == 68 {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(result.is_err());
        }
    }

    /// POSIX conversion roundtrips to sub-nanosecond precision for era-0 times.
    #[test]
    fn posix_secs_roundtrip(secs in 0u32..2_000_000_000, micros in 0u32..1_000_000) {
        let t = secs as f64 + micros as f64 * 1e-6;
        let ts = TimestampFormat::from_posix_secs(t);
        prop_assert!((ts.to_posix_secs() - t).abs() < 1e-6);
    }
}
