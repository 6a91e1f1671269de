use std::fmt;

/// A validated field of a synchronization packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The 16-byte component identifier.
    SessionId,
    /// The synchronization universe.
    SyncAddress,
    /// The sequence counter.
    Sequence,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::SessionId => "session_id",
            Field::SyncAddress => "sync_address",
            Field::Sequence => "sequence",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The framing layer whose vector failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// ACN root layer (the envelope).
    Root,
    /// E1.31 synchronization framing layer.
    Sync,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Root => f.write_str("root"),
            Layer::Sync => f.write_str("sync"),
        }
    }
}

/// A field value fell outside its allowed range.
///
/// For [`Field::SessionId`] the range is the required byte length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{field} must be in [{min}, {max}], got {actual}")]
pub struct ValidationError {
    pub field: Field,
    pub min: i64,
    pub max: i64,
    pub actual: i64,
}

impl ValidationError {
    pub(crate) fn new(field: Field, min: i64, max: i64, actual: i64) -> Self {
        Self {
            field,
            min,
            max,
            actual,
        }
    }
}

/// A buffer is not a structurally valid synchronization packet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The buffer is shorter than the minimum decodable length.
    #[error("packet too short ({len} bytes, min {min})")]
    TooShort { len: usize, min: usize },

    /// A layer's vector tag does not match the synchronization packet.
    #[error("{layer} vector mismatch (expected {expected:02x?}, got {actual:02x?})")]
    VectorMismatch {
        layer: Layer,
        expected: [u8; 4],
        actual: [u8; 4],
    },
}

/// Errors produced while building, encoding, or decoding a packet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PacketError {
    /// A logical field is out of range.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The wire bytes are malformed.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

pub type Result<T> = std::result::Result<T, PacketError>;
