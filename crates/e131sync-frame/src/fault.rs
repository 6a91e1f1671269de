//! Fault injection for negative and interoperability testing.
//!
//! A [`FaultConfig`] is passed to [`SyncPacket::encode_with`](crate::SyncPacket::encode_with)
//! to produce deliberately non-conformant packets. Only the wire bytes are
//! affected; the packet's validated fields stay as constructed.

use crate::root::{ACN_PID_OFFSET, PREAMBLE_OFFSET, VECTOR_OFFSET};
use crate::sync::SYNC_VECTOR_OFFSET;

/// Byte overwritten by `corrupt_acn_packet_identifier` (the `'1'` of `"E1.17"`).
pub const ACN_PID_FAULT_OFFSET: usize = ACN_PID_OFFSET + 5;
/// Value written by `corrupt_acn_packet_identifier`.
pub const ACN_PID_FAULT_VALUE: u8 = 0x00;

/// Byte overwritten by `corrupt_envelope_preamble` (preamble size, low byte).
pub const PREAMBLE_FAULT_OFFSET: usize = PREAMBLE_OFFSET + 1;
/// Value written by `corrupt_envelope_preamble`.
pub const PREAMBLE_FAULT_VALUE: u8 = 0x01;

/// Byte overwritten by `corrupt_envelope_vector`.
pub const ENVELOPE_VECTOR_FAULT_OFFSET: usize = VECTOR_OFFSET + 3;
/// Value written by `corrupt_envelope_vector`.
pub const ENVELOPE_VECTOR_FAULT_VALUE: u8 = 0x10;

/// Byte overwritten by `corrupt_sync_vector`.
pub const SYNC_VECTOR_FAULT_OFFSET: usize = SYNC_VECTOR_OFFSET + 2;
/// Value written by `corrupt_sync_vector`.
pub const SYNC_VECTOR_FAULT_VALUE: u8 = 0x11;

/// Encode-time corruption switches. The default injects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct FaultConfig {
    /// Zero one byte of the ACN packet identifier.
    pub corrupt_acn_packet_identifier: bool,
    /// Write a wrong preamble size.
    pub corrupt_envelope_preamble: bool,
    /// Break the root layer vector.
    pub corrupt_envelope_vector: bool,
    /// Break the synchronization layer vector.
    pub corrupt_sync_vector: bool,
    /// Added to the wire sequence byte, modulo 256.
    pub sequence_offset: u8,
    /// Added to the wire sync address, modulo 65536.
    pub sync_address_offset: u16,
}

impl FaultConfig {
    /// Whether any switch would change the encoded bytes.
    pub fn is_active(&self) -> bool {
        *self != Self::default()
    }

    /// Overwrite the corrupted positions in an already encoded packet.
    pub(crate) fn corrupt(&self, packet: &mut [u8]) {
        let patches = [
            (
                self.corrupt_acn_packet_identifier,
                ACN_PID_FAULT_OFFSET,
                ACN_PID_FAULT_VALUE,
            ),
            (
                self.corrupt_envelope_preamble,
                PREAMBLE_FAULT_OFFSET,
                PREAMBLE_FAULT_VALUE,
            ),
            (
                self.corrupt_envelope_vector,
                ENVELOPE_VECTOR_FAULT_OFFSET,
                ENVELOPE_VECTOR_FAULT_VALUE,
            ),
            (
                self.corrupt_sync_vector,
                SYNC_VECTOR_FAULT_OFFSET,
                SYNC_VECTOR_FAULT_VALUE,
            ),
        ];

        for (enabled, offset, value) in patches {
            if enabled {
                packet[offset] = value;
            }
        }
    }
}
