//! Encoder and validating decoder for E1.31 synchronization packets.
//!
//! A synchronization packet tells receivers to apply the data they have
//! buffered for a sync universe, all at once. It is 49 bytes:
//! - An ACN root layer (preamble, packet identifier, vector, 16-byte CID)
//! - A framing layer with the synchronization vector
//! - A 1-byte sequence number and a 2-byte big-endian sync address
//!
//! Decoding untrusted input never panics; malformed buffers come back as
//! [`PacketError`]. Encoding can deliberately corrupt the wire bytes through
//! [`FaultConfig`] to exercise receivers with non-conformant packets.

pub mod error;
pub mod fault;
pub mod fields;
pub mod root;
pub mod sync;

pub use error::{DecodeError, Field, Layer, PacketError, Result, ValidationError};
pub use fault::FaultConfig;
pub use fields::{
    Sequence, SessionId, SyncAddress, MAX_SYNC_ADDRESS, MIN_SYNC_ADDRESS, SESSION_ID_LEN,
};
pub use root::VECTOR_ROOT_E131_EXTENDED;
pub use sync::{
    is_sync_packet, AddressDecoding, DecodeOptions, SyncPacket, MIN_SYNC_PACKET_LEN,
    SYNC_PACKET_LEN, VECTOR_E131_EXTENDED_SYNCHRONIZATION,
};
