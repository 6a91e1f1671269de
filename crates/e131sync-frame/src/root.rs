//! ACN root layer: the envelope shared by every E1.31 frame type.
//!
//! Wire format:
//! ```text
//! ┌──────────┬───────────┬──────────────────┬──────────────┬────────┬──────────┐
//! │ Preamble │ Postamble │ ACN Packet ID    │ Flags+Length │ Vector │ CID      │
//! │ (2B BE)  │ (2B BE)   │ "ASC-E1.17\0\0\0"│ (2B BE)      │ (4B)   │ (16B)    │
//! │ 0x0010   │ 0x0000    │ (12B)            │ 0x7 | len    │        │          │
//! └──────────┴───────────┴──────────────────┴──────────────┴────────┴──────────┘
//! ```
//!
//! Frame layers call into these functions rather than extending a base type.

use bytes::BufMut;

use crate::error::{DecodeError, Layer};
use crate::fields::{SessionId, SESSION_ID_LEN};

/// Preamble size field value.
pub const PREAMBLE_SIZE: u16 = 0x0010;

/// Postamble size field value.
pub const POSTAMBLE_SIZE: u16 = 0x0000;

/// ACN packet identifier.
pub const ACN_PACKET_IDENTIFIER: [u8; 12] = *b"ASC-E1.17\0\0\0";

/// Root vector for extended (synchronization, discovery) frames.
pub const VECTOR_ROOT_E131_EXTENDED: [u8; 4] = [0x00, 0x00, 0x00, 0x08];

/// Root vector for data frames.
pub const VECTOR_ROOT_E131_DATA: [u8; 4] = [0x00, 0x00, 0x00, 0x04];

/// Offset of the preamble size field.
pub const PREAMBLE_OFFSET: usize = 0;

/// Offset of the ACN packet identifier.
pub const ACN_PID_OFFSET: usize = 4;

/// Offset of the root flags+length field.
pub const FLAGS_LENGTH_OFFSET: usize = 16;

/// Offset of the root vector.
pub const VECTOR_OFFSET: usize = 18;

/// Offset of the CID.
pub const CID_OFFSET: usize = 22;

/// Size of the root layer including the preamble region.
pub const ROOT_LAYER_SIZE: usize = CID_OFFSET + SESSION_ID_LEN;

/// The root flags+length field counts bytes from this offset onwards.
pub const ROOT_LENGTH_BASE: usize = FLAGS_LENGTH_OFFSET;

const FLAGS: u16 = 0x7 << 12;
const LENGTH_MASK: u16 = 0x0FFF;

/// Pack a PDU length into a flags+length field.
///
/// Only the low 12 bits of `length` are kept.
pub fn flags_and_length(length: usize) -> u16 {
    FLAGS | (length as u16 & LENGTH_MASK)
}

/// Split a flags+length field into its flag nibble and 12-bit length.
pub fn split_flags_and_length(field: u16) -> (u8, u16) {
    ((field >> 12) as u8, field & LENGTH_MASK)
}

/// Write the root layer for a frame of `total_len` bytes.
pub fn encode_root_layer<B: BufMut>(
    dst: &mut B,
    total_len: usize,
    vector: [u8; 4],
    cid: &SessionId,
) {
    dst.put_u16(PREAMBLE_SIZE);
    dst.put_u16(POSTAMBLE_SIZE);
    dst.put_slice(&ACN_PACKET_IDENTIFIER);
    dst.put_u16(flags_and_length(total_len - ROOT_LENGTH_BASE));
    dst.put_slice(&vector);
    dst.put_slice(cid.as_bytes());
}

/// Read the root vector without validating anything else.
pub fn peek_root_vector(src: &[u8]) -> Option<[u8; 4]> {
    src.get(VECTOR_OFFSET..VECTOR_OFFSET + 4)?.try_into().ok()
}

/// Check the root vector and extract the CID.
pub fn decode_root_layer(
    src: &[u8],
    expected_vector: [u8; 4],
) -> Result<SessionId, DecodeError> {
    if src.len() < ROOT_LAYER_SIZE {
        return Err(DecodeError::TooShort {
            len: src.len(),
            min: ROOT_LAYER_SIZE,
        });
    }

    let actual = read_vector(src, VECTOR_OFFSET);
    if actual != expected_vector {
        return Err(DecodeError::VectorMismatch {
            layer: Layer::Root,
            expected: expected_vector,
            actual,
        });
    }

    let mut cid = [0u8; SESSION_ID_LEN];
    cid.copy_from_slice(&src[CID_OFFSET..ROOT_LAYER_SIZE]);
    Ok(SessionId::new(cid))
}

pub(crate) fn read_vector(src: &[u8], offset: usize) -> [u8; 4] {
    let mut vector = [0u8; 4];
    vector.copy_from_slice(&src[offset..offset + 4]);
    vector
}
