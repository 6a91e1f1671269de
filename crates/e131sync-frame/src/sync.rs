use bytes::{BufMut, Bytes, BytesMut};
use tracing::{debug, trace};

use crate::error::{DecodeError, Layer, Result, ValidationError};
use crate::fault::FaultConfig;
use crate::fields::{Sequence, SessionId, SyncAddress};
use crate::root::{
    decode_root_layer, encode_root_layer, flags_and_length, read_vector, ROOT_LAYER_SIZE,
    VECTOR_ROOT_E131_EXTENDED,
};

/// Framing vector identifying a synchronization packet.
pub const VECTOR_E131_EXTENDED_SYNCHRONIZATION: [u8; 4] = [0x00, 0x00, 0x00, 0x01];

/// Total length of an encoded synchronization packet.
pub const SYNC_PACKET_LEN: usize = 49;

/// Shortest buffer [`SyncPacket::decode`] accepts (reserved bytes may be absent).
pub const MIN_SYNC_PACKET_LEN: usize = 47;

/// Offset of the framing layer flags+length field.
pub const SYNC_FLAGS_LENGTH_OFFSET: usize = ROOT_LAYER_SIZE;

/// Offset of the framing vector.
pub const SYNC_VECTOR_OFFSET: usize = 40;

/// Offset of the sequence byte.
pub const SEQUENCE_OFFSET: usize = 44;

/// Offset of the big-endian sync address.
pub const SYNC_ADDRESS_OFFSET: usize = 45;

/// Offset of the two reserved bytes.
pub const RESERVED_OFFSET: usize = 47;

/// The framing flags+length field counts bytes from this offset onwards.
pub const SYNC_LENGTH_BASE: usize = SYNC_FLAGS_LENGTH_OFFSET;

/// How the two sync address bytes are combined on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressDecoding {
    /// Standard big-endian: `256 * high + low`.
    #[default]
    BigEndian,
    /// `255 * high + low`, as computed by some deployed receivers.
    ///
    /// Does not round-trip for addresses above 255.
    Legacy,
}

impl AddressDecoding {
    fn combine(self, high: u8, low: u8) -> u16 {
        match self {
            AddressDecoding::BigEndian => u16::from_be_bytes([high, low]),
            AddressDecoding::Legacy => 255 * u16::from(high) + u16::from(low),
        }
    }
}

/// Options for [`SyncPacket::decode_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    pub address_decoding: AddressDecoding,
}

/// An E1.31 synchronization packet.
///
/// Wire format (49 bytes, big-endian):
/// ```text
/// ┌────────────────────┬──────────────┬───────────┬─────┬──────────┬──────────┐
/// │ Root layer         │ Flags+Length │ Vector    │ Seq │ Sync     │ Reserved │
/// │ (38B, see `root`)  │ (2B)         │ 0x00000001│ (1B)│ Address  │ (2B)     │
/// │ vector 0x00000008  │ 0x7 | 11     │ (4B)      │     │ (2B)     │ 0x0000   │
/// └────────────────────┴──────────────┴───────────┴─────┴──────────┴──────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SyncPacket {
    session_id: SessionId,
    sync_address: SyncAddress,
    sequence: Sequence,
}

impl SyncPacket {
    /// Create a packet, validating the sync address.
    pub fn new(
        session_id: impl Into<SessionId>,
        sync_address: u16,
        sequence: u8,
    ) -> std::result::Result<Self, ValidationError> {
        Ok(Self::from_parts(
            session_id.into(),
            SyncAddress::new(sync_address)?,
            Sequence::new(sequence),
        ))
    }

    /// Create a packet from already validated fields.
    pub fn from_parts(
        session_id: SessionId,
        sync_address: SyncAddress,
        sequence: Sequence,
    ) -> Self {
        Self {
            session_id,
            sync_address,
            sequence,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn sync_address(&self) -> SyncAddress {
        self.sync_address
    }

    pub fn sequence(&self) -> Sequence {
        self.sequence
    }

    pub fn set_session_id(&mut self, session_id: impl Into<SessionId>) {
        self.session_id = session_id.into();
    }

    /// Replace the sync address. Leaves the packet unchanged on error.
    pub fn set_sync_address(
        &mut self,
        sync_address: u16,
    ) -> std::result::Result<(), ValidationError> {
        self.sync_address = SyncAddress::new(sync_address)?;
        Ok(())
    }

    pub fn set_sequence(&mut self, sequence: impl Into<Sequence>) {
        self.sequence = sequence.into();
    }

    /// Step the sequence counter, wrapping after 255.
    pub fn advance_sequence(&mut self) {
        self.sequence.advance();
    }

    /// Encode without fault injection.
    pub fn encode(&self) -> Bytes {
        self.encode_with(&FaultConfig::default())
    }

    /// Encode, applying `faults` to the wire bytes.
    pub fn encode_with(&self, faults: &FaultConfig) -> Bytes {
        let mut buf = BytesMut::with_capacity(SYNC_PACKET_LEN);
        self.encode_into(faults, &mut buf);
        buf.freeze()
    }

    /// Append the encoded packet to `dst`.
    pub fn encode_into(&self, faults: &FaultConfig, dst: &mut BytesMut) {
        if faults.is_active() {
            debug!(
                ?faults,
                sync_address = %self.sync_address,
                "encoding sync packet with fault injection"
            );
        }

        let start = dst.len();
        dst.reserve(SYNC_PACKET_LEN);

        encode_root_layer(
            dst,
            SYNC_PACKET_LEN,
            VECTOR_ROOT_E131_EXTENDED,
            &self.session_id,
        );
        dst.put_u16(flags_and_length(SYNC_PACKET_LEN - SYNC_LENGTH_BASE));
        dst.put_slice(&VECTOR_E131_EXTENDED_SYNCHRONIZATION);
        dst.put_u8(self.sequence.get().wrapping_add(faults.sequence_offset));
        dst.put_u16(self.sync_address.get().wrapping_add(faults.sync_address_offset));
        dst.put_u16(0);

        faults.corrupt(&mut dst[start..]);
        trace!(len = dst.len() - start, "encoded sync packet");
    }

    /// Decode a packet using the standard big-endian sync address.
    pub fn decode(src: &[u8]) -> Result<Self> {
        Self::decode_with(src, DecodeOptions::default())
    }

    /// Decode a packet.
    ///
    /// Fails on short buffers, on either vector not matching a
    /// synchronization packet, and on out-of-range field values.
    pub fn decode_with(src: &[u8], options: DecodeOptions) -> Result<Self> {
        let result = decode_fields(src, options);
        if let Err(err) = &result {
            debug!(len = src.len(), error = %err, "rejected sync packet");
        }
        result
    }
}

fn decode_fields(src: &[u8], options: DecodeOptions) -> Result<SyncPacket> {
    if src.len() < MIN_SYNC_PACKET_LEN {
        return Err(DecodeError::TooShort {
            len: src.len(),
            min: MIN_SYNC_PACKET_LEN,
        }
        .into());
    }

    let session_id = decode_root_layer(src, VECTOR_ROOT_E131_EXTENDED)?;

    let vector = read_vector(src, SYNC_VECTOR_OFFSET);
    if vector != VECTOR_E131_EXTENDED_SYNCHRONIZATION {
        return Err(DecodeError::VectorMismatch {
            layer: Layer::Sync,
            expected: VECTOR_E131_EXTENDED_SYNCHRONIZATION,
            actual: vector,
        }
        .into());
    }

    let sequence = Sequence::new(src[SEQUENCE_OFFSET]);
    let address = options
        .address_decoding
        .combine(src[SYNC_ADDRESS_OFFSET], src[SYNC_ADDRESS_OFFSET + 1]);
    let sync_address = SyncAddress::new(address)?;

    Ok(SyncPacket::from_parts(session_id, sync_address, sequence))
}

/// Whether `src` carries both synchronization packet vectors.
///
/// Cheaper than a full decode; does not validate field values.
pub fn is_sync_packet(src: &[u8]) -> bool {
    src.len() >= MIN_SYNC_PACKET_LEN
        && read_vector(src, crate::root::VECTOR_OFFSET) == VECTOR_ROOT_E131_EXTENDED
        && read_vector(src, SYNC_VECTOR_OFFSET) == VECTOR_E131_EXTENDED_SYNCHRONIZATION
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Field, PacketError};

    fn cid() -> SessionId {
        SessionId::new([
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xAA, 0xBB, 0xCC, 0xDD,
            0xEE, 0xFF,
        ])
    }

    #[test]
    fn test_encode_golden_bytes() {
        let packet = SyncPacket::new(cid(), 0x0102, 7).unwrap();
        let bytes = packet.encode();

        let expected: [u8; SYNC_PACKET_LEN] = [
            0x00, 0x10, 0x00, 0x00, // preamble, postamble
            b'A', b'S', b'C', b'-', b'E', b'1', b'.', b'1', b'7', 0x00, 0x00, 0x00, // ACN PID
            0x70, 0x21, // root flags+length (33)
            0x00, 0x00, 0x00, 0x08, // root vector
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xAA, 0xBB, 0xCC, 0xDD,
            0xEE, 0xFF, // CID
            0x70, 0x0B, // framing flags+length (11)
            0x00, 0x00, 0x00, 0x01, // framing vector
            0x07, // sequence
            0x01, 0x02, // sync address
            0x00, 0x00, // reserved
        ];
        assert_eq!(bytes.as_ref(), &expected[..]);
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let packet = SyncPacket::new(cid(), 63999, 255).unwrap();
        let decoded = SyncPacket::decode(&packet.encode()).unwrap();
        assert_eq!(decoded, packet);
    }

    #[test]
    fn test_all_ones_cid_address_one() {
        let packet = SyncPacket::new([0x01; 16], 1, 0).unwrap();
        let bytes = packet.encode();

        assert_eq!(bytes.len(), SYNC_PACKET_LEN);
        let address = u16::from_be_bytes([
            bytes[SYNC_ADDRESS_OFFSET],
            bytes[SYNC_ADDRESS_OFFSET + 1],
        ]);
        assert_eq!(address, 1);
    }

    #[test]
    fn test_new_rejects_out_of_range_address() {
        let err = SyncPacket::new(cid(), 0, 0).unwrap_err();
        assert_eq!(err.field, Field::SyncAddress);
        assert!(SyncPacket::new(cid(), 64000, 0).is_err());
        assert!(SyncPacket::new(cid(), 1, 0).is_ok());
        assert!(SyncPacket::new(cid(), 63999, 0).is_ok());
    }

    #[test]
    fn test_set_sync_address_keeps_old_value_on_error() {
        let mut packet = SyncPacket::new(cid(), 10, 0).unwrap();
        assert!(packet.set_sync_address(64000).is_err());
        assert_eq!(packet.sync_address().get(), 10);

        packet.set_sync_address(20).unwrap();
        assert_eq!(packet.sync_address().get(), 20);
    }

    #[test]
    fn test_advance_sequence_wraps() {
        let mut packet = SyncPacket::new(cid(), 1, 255).unwrap();
        packet.advance_sequence();
        assert_eq!(packet.sequence().get(), 0);
    }

    #[test]
    fn test_decode_too_short() {
        let bytes = SyncPacket::new(cid(), 1, 0).unwrap().encode();
        let err = SyncPacket::decode(&bytes[..46]).unwrap_err();
        assert_eq!(
            err,
            PacketError::Decode(DecodeError::TooShort { len: 46, min: 47 })
        );
    }

    #[test]
    fn test_decode_minimum_length() {
        let packet = SyncPacket::new(cid(), 300, 9).unwrap();
        let bytes = packet.encode();
        assert_eq!(SyncPacket::decode(&bytes[..47]).unwrap(), packet);
    }

    #[test]
    fn test_decode_root_vector_mismatch() {
        let mut bytes = SyncPacket::new(cid(), 1, 0).unwrap().encode().to_vec();
        bytes[19] ^= 0x01;
        let err = SyncPacket::decode(&bytes).unwrap_err();
        assert!(matches!(
            err,
            PacketError::Decode(DecodeError::VectorMismatch {
                layer: Layer::Root,
                ..
            })
        ));
    }

    #[test]
    fn test_decode_sync_vector_mismatch() {
        let mut bytes = SyncPacket::new(cid(), 1, 0).unwrap().encode().to_vec();
        bytes[43] = 0x02;
        let err = SyncPacket::decode(&bytes).unwrap_err();
        assert_eq!(
            err,
            PacketError::Decode(DecodeError::VectorMismatch {
                layer: Layer::Sync,
                expected: VECTOR_E131_EXTENDED_SYNCHRONIZATION,
                actual: [0x00, 0x00, 0x00, 0x02],
            })
        );
    }

    #[test]
    fn test_decode_rejects_zero_address() {
        let mut bytes = SyncPacket::new(cid(), 1, 0).unwrap().encode().to_vec();
        bytes[SYNC_ADDRESS_OFFSET + 1] = 0;
        let err = SyncPacket::decode(&bytes).unwrap_err();
        assert!(matches!(
            err,
            PacketError::Validation(ValidationError {
                field: Field::SyncAddress,
                actual: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_decode_rejects_address_above_range() {
        let mut bytes = SyncPacket::new(cid(), 1, 0).unwrap().encode().to_vec();
        bytes[SYNC_ADDRESS_OFFSET] = 0xFA;
        bytes[SYNC_ADDRESS_OFFSET + 1] = 0x00;
        assert!(matches!(
            SyncPacket::decode(&bytes),
            Err(PacketError::Validation(_))
        ));
    }

    #[test]
    fn test_decode_ignores_preamble_and_flags() {
        let packet = SyncPacket::new(cid(), 5, 5).unwrap();
        let mut bytes = packet.encode().to_vec();
        bytes[1] = 0x01;
        bytes[9] = 0x00;
        bytes[16] = 0x00;
        bytes[38] = 0x00;
        assert_eq!(SyncPacket::decode(&bytes).unwrap(), packet);
    }

    #[test]
    fn test_decode_legacy_address() {
        let packet = SyncPacket::new(cid(), 0x0102, 0).unwrap();
        let options = DecodeOptions {
            address_decoding: AddressDecoding::Legacy,
        };
        let decoded = SyncPacket::decode_with(&packet.encode(), options).unwrap();
        assert_eq!(decoded.sync_address().get(), 255 + 2);

        // Addresses below 256 agree under both conventions.
        let packet = SyncPacket::new(cid(), 200, 0).unwrap();
        let decoded = SyncPacket::decode_with(&packet.encode(), options).unwrap();
        assert_eq!(decoded, packet);
    }

    #[test]
    fn test_sequence_offset_only_changes_wire() {
        let packet = SyncPacket::new(cid(), 1, 250).unwrap();
        let faults = FaultConfig {
            sequence_offset: 10,
            ..FaultConfig::default()
        };
        let bytes = packet.encode_with(&faults);
        assert_eq!(bytes[SEQUENCE_OFFSET], 4);
        assert_eq!(packet.sequence().get(), 250);
    }

    #[test]
    fn test_sync_address_offset_may_leave_range() {
        let packet = SyncPacket::new(cid(), 63999, 0).unwrap();
        let faults = FaultConfig {
            sync_address_offset: 100,
            ..FaultConfig::default()
        };
        let bytes = packet.encode_with(&faults);
        let wire = u16::from_be_bytes([bytes[45], bytes[46]]);
        assert_eq!(wire, 64099);
        assert!(matches!(
            SyncPacket::decode(&bytes),
            Err(PacketError::Validation(_))
        ));
    }

    #[test]
    fn test_encode_into_appends() {
        let packet = SyncPacket::new(cid(), 42, 1).unwrap();
        let mut buf = BytesMut::from(&b"xx"[..]);
        let faults = FaultConfig {
            corrupt_envelope_preamble: true,
            ..FaultConfig::default()
        };
        packet.encode_into(&faults, &mut buf);

        assert_eq!(buf.len(), 2 + SYNC_PACKET_LEN);
        assert_eq!(&buf[..2], b"xx");
        assert_eq!(buf[2 + 1], 0x01);
    }

    #[test]
    fn test_is_sync_packet() {
        let bytes = SyncPacket::new(cid(), 1, 0).unwrap().encode();
        assert!(is_sync_packet(&bytes));
        assert!(!is_sync_packet(&bytes[..46]));

        let faults = FaultConfig {
            corrupt_envelope_vector: true,
            ..FaultConfig::default()
        };
        let corrupted = SyncPacket::new(cid(), 1, 0).unwrap().encode_with(&faults);
        assert!(!is_sync_packet(&corrupted));
    }
}
