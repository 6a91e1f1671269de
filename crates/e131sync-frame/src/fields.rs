//! Validated packet fields.
//!
//! Each type can only hold a value the wire format allows, so a constructed
//! [`SyncPacket`](crate::SyncPacket) never needs re-checking at encode time.

use std::fmt;

use crate::error::{Field, ValidationError};

/// Length of the component identifier in bytes.
pub const SESSION_ID_LEN: usize = 16;

/// Lowest valid synchronization address.
pub const MIN_SYNC_ADDRESS: u16 = 1;

/// Highest valid synchronization address.
pub const MAX_SYNC_ADDRESS: u16 = 63999;

/// Sequence numbers this far behind the last accepted one are treated as a
/// restarted source rather than a late packet.
const SEQUENCE_RESET_WINDOW: i8 = -20;

/// The 16-byte component identifier (CID) of the sending source.
///
/// Opaque; the codec never interprets its contents.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SessionId([u8; SESSION_ID_LEN]);

impl SessionId {
    pub const fn new(bytes: [u8; SESSION_ID_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SESSION_ID_LEN] {
        &self.0
    }
}

impl From<[u8; SESSION_ID_LEN]> for SessionId {
    fn from(bytes: [u8; SESSION_ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for SessionId {
    type Error = ValidationError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; SESSION_ID_LEN] = bytes.try_into().map_err(|_| {
            ValidationError::new(
                Field::SessionId,
                SESSION_ID_LEN as i64,
                SESSION_ID_LEN as i64,
                bytes.len() as i64,
            )
        })?;
        Ok(Self(bytes))
    }
}

impl AsRef<[u8]> for SessionId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({self})")
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Synchronization universe, always within `1..=63999`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SyncAddress(u16);

impl SyncAddress {
    /// Validate and wrap an address.
    pub fn new(value: u16) -> Result<Self, ValidationError> {
        if (MIN_SYNC_ADDRESS..=MAX_SYNC_ADDRESS).contains(&value) {
            Ok(Self(value))
        } else {
            Err(out_of_range(value.into()))
        }
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for SyncAddress {
    type Error = ValidationError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for SyncAddress {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let narrowed = u16::try_from(value).map_err(|_| out_of_range(value))?;
        Self::new(narrowed)
    }
}

impl From<SyncAddress> for u16 {
    fn from(address: SyncAddress) -> Self {
        address.0
    }
}

impl fmt::Display for SyncAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn out_of_range(actual: i64) -> ValidationError {
    ValidationError::new(
        Field::SyncAddress,
        MIN_SYNC_ADDRESS.into(),
        MAX_SYNC_ADDRESS.into(),
        actual,
    )
}

/// One-byte sequence counter. Wraps from 255 to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sequence(u8);

impl Sequence {
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Step to the next sequence number, wrapping after 255.
    pub fn advance(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    /// The sequence number following this one.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Whether a receiver that last accepted `last` should accept `self`.
    ///
    /// Differences in `(-20, 0]` are late or duplicate packets. Anything
    /// further behind is taken as a source restart and accepted.
    pub fn is_newer_than(self, last: Sequence) -> bool {
        let diff = self.0.wrapping_sub(last.0) as i8;
        !(diff <= 0 && diff > SEQUENCE_RESET_WINDOW)
    }
}

impl From<u8> for Sequence {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl TryFrom<i64> for Sequence {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map(Self)
            .map_err(|_| ValidationError::new(Field::Sequence, 0, u8::MAX.into(), value))
    }
}

impl From<Sequence> for u8 {
    fn from(sequence: Sequence) -> Self {
        sequence.0
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
