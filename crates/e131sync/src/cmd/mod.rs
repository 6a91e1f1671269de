use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a synchronization packet, optionally with injected faults.
    Encode(EncodeArgs),
    /// Decode and validate a captured synchronization packet.
    Decode(DecodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Component identifier (32 hex digits).
    #[arg(long)]
    pub cid: String,
    /// Synchronization universe (1-63999).
    #[arg(long, short = 'a')]
    pub sync_address: u16,
    /// Sequence number (0-255).
    #[arg(long, short = 's', default_value = "0")]
    pub sequence: u8,
    /// JSON fault configuration file. Flags below are applied on top.
    #[arg(long, value_name = "FILE")]
    pub faults: Option<PathBuf>,
    /// Zero one byte of the ACN packet identifier.
    #[arg(long)]
    pub corrupt_acn_pid: bool,
    /// Write a wrong preamble size.
    #[arg(long)]
    pub corrupt_preamble: bool,
    /// Break the root layer vector.
    #[arg(long)]
    pub corrupt_root_vector: bool,
    /// Break the synchronization layer vector.
    #[arg(long)]
    pub corrupt_sync_vector: bool,
    /// Added to the wire sequence number (mod 256).
    #[arg(long, value_name = "N")]
    pub sequence_offset: Option<u8>,
    /// Added to the wire sync address (mod 65536).
    #[arg(long, value_name = "N")]
    pub sync_address_offset: Option<u16>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Packet bytes as hex (whitespace and ':' separators allowed).
    #[arg(conflicts_with = "file")]
    pub hex: Option<String>,
    /// Read raw packet bytes from a file.
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,
    /// Combine sync address bytes as 255 * high + low.
    #[arg(long)]
    pub legacy_address: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
