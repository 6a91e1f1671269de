//! E1.31 synchronization packets.
//!
//! e131sync encodes and decodes the streaming-ACN synchronization frame, with
//! optional fault injection for exercising receivers.
//!
//! # Crate Structure
//!
//! - [`frame`] — Packet model, root and synchronization layers, fault injection
//!
//! The `e131sync` binary (behind the `cli` feature) wraps the same codec for
//! generating and inspecting packets from the shell.

/// Re-export frame types.
pub mod frame {
    pub use e131sync_frame::*;
}

pub use e131sync_frame::{
    DecodeError, DecodeOptions, FaultConfig, PacketError, SyncPacket, ValidationError,
};
