use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use e131sync_frame::{FaultConfig, SyncPacket};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct PacketFields {
    session_id: String,
    sync_address: u16,
    sequence: u8,
}

impl From<&SyncPacket> for PacketFields {
    fn from(packet: &SyncPacket) -> Self {
        Self {
            session_id: packet.session_id().to_string(),
            sync_address: packet.sync_address().get(),
            sequence: packet.sequence().get(),
        }
    }
}

#[derive(Serialize)]
struct EncodedOutput<'a> {
    packet: PacketFields,
    faults: &'a FaultConfig,
    length: usize,
    bytes: String,
}

#[derive(Serialize)]
struct DecodedOutput {
    packet: PacketFields,
    length: usize,
}

/// Print an encoded packet. Raw writes the wire bytes unmodified.
pub fn print_encoded(
    packet: &SyncPacket,
    faults: &FaultConfig,
    bytes: &[u8],
    format: OutputFormat,
) {
    match format {
        OutputFormat::Json => {
            let out = EncodedOutput {
                packet: packet.into(),
                faults,
                length: bytes.len(),
                bytes: hex::encode(bytes),
            };
            print_json(&out);
        }
        OutputFormat::Table => {
            let mut table = fields_table(packet);
            table.add_row(vec!["FAULTS".to_string(), fault_summary(faults)]);
            table.add_row(vec!["LENGTH".to_string(), bytes.len().to_string()]);
            table.add_row(vec!["BYTES".to_string(), hex::encode(bytes)]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "cid={} sync_address={} sequence={} faults={} len={}",
                packet.session_id(),
                packet.sync_address(),
                packet.sequence(),
                fault_summary(faults),
                bytes.len()
            );
            println!("{}", hex::encode(bytes));
        }
        OutputFormat::Raw => print_raw(bytes),
    }
}

/// Print a decoded packet. Raw re-encodes it without faults.
pub fn print_decoded(packet: &SyncPacket, length: usize, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = DecodedOutput {
                packet: packet.into(),
                length,
            };
            print_json(&out);
        }
        OutputFormat::Table => {
            let mut table = fields_table(packet);
            table.add_row(vec!["LENGTH".to_string(), length.to_string()]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "cid={} sync_address={} sequence={} len={}",
                packet.session_id(),
                packet.sync_address(),
                packet.sequence(),
                length
            );
        }
        OutputFormat::Raw => print_raw(&packet.encode()),
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

fn fields_table(packet: &SyncPacket) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["FIELD", "VALUE"])
        .add_row(vec!["CID".to_string(), packet.session_id().to_string()])
        .add_row(vec![
            "SYNC ADDRESS".to_string(),
            packet.sync_address().to_string(),
        ])
        .add_row(vec!["SEQUENCE".to_string(), packet.sequence().to_string()]);
    table
}

fn fault_summary(faults: &FaultConfig) -> String {
    if !faults.is_active() {
        return "none".to_string();
    }

    let mut parts = Vec::new();
    if faults.corrupt_acn_packet_identifier {
        parts.push("acn-pid".to_string());
    }
    if faults.corrupt_envelope_preamble {
        parts.push("preamble".to_string());
    }
    if faults.corrupt_envelope_vector {
        parts.push("root-vector".to_string());
    }
    if faults.corrupt_sync_vector {
        parts.push("sync-vector".to_string());
    }
    if faults.sequence_offset != 0 {
        parts.push(format!("sequence+{}", faults.sequence_offset));
    }
    if faults.sync_address_offset != 0 {
        parts.push(format!("address+{}", faults.sync_address_offset));
    }
    parts.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_summary_lists_active_switches() {
        assert_eq!(fault_summary(&FaultConfig::default()), "none");

        let faults = FaultConfig {
            corrupt_sync_vector: true,
            sequence_offset: 10,
            ..FaultConfig::default()
        };
        assert_eq!(fault_summary(&faults), "sync-vector,sequence+10");
    }
}
