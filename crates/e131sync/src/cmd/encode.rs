use std::fs;
use std::path::Path;

use e131sync_frame::{FaultConfig, SessionId, SyncPacket, SESSION_ID_LEN};

use crate::cmd::EncodeArgs;
use crate::exit::{config_error, io_error, validation_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_encoded, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let cid = parse_cid(&args.cid)?;
    let faults = resolve_faults(&args)?;
    let packet = SyncPacket::new(cid, args.sync_address, args.sequence)
        .map_err(|err| validation_error("--sync-address", err))?;

    if faults.is_active() {
        tracing::warn!(?faults, "emitting non-conformant sync packet");
    }

    let bytes = packet.encode_with(&faults);
    tracing::info!(
        sync_address = %packet.sync_address(),
        sequence = %packet.sequence(),
        len = bytes.len(),
        "encoded sync packet"
    );
    print_encoded(&packet, &faults, &bytes, format);

    Ok(SUCCESS)
}

fn parse_cid(input: &str) -> CliResult<SessionId> {
    let bytes = hex::decode(input.trim())
        .map_err(|err| CliError::new(USAGE, format!("--cid is not valid hex: {err}")))?;
    SessionId::try_from(bytes.as_slice()).map_err(|_| {
        CliError::new(
            USAGE,
            format!(
                "--cid must be {SESSION_ID_LEN} bytes ({} hex digits), got {}",
                SESSION_ID_LEN * 2,
                bytes.len()
            ),
        )
    })
}

fn resolve_faults(args: &EncodeArgs) -> CliResult<FaultConfig> {
    let mut faults = match &args.faults {
        Some(path) => load_fault_file(path)?,
        None => FaultConfig::default(),
    };

    faults.corrupt_acn_packet_identifier |= args.corrupt_acn_pid;
    faults.corrupt_envelope_preamble |= args.corrupt_preamble;
    faults.corrupt_envelope_vector |= args.corrupt_root_vector;
    faults.corrupt_sync_vector |= args.corrupt_sync_vector;
    if let Some(offset) = args.sequence_offset {
        faults.sequence_offset = offset;
    }
    if let Some(offset) = args.sync_address_offset {
        faults.sync_address_offset = offset;
    }

    Ok(faults)
}

fn load_fault_file(path: &Path) -> CliResult<FaultConfig> {
    let text = fs::read_to_string(path)
        .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?;
    let faults = serde_json::from_str(&text)
        .map_err(|err| config_error(&format!("invalid fault config {}", path.display()), err))?;
    tracing::debug!(path = %path.display(), ?faults, "loaded fault config");
    Ok(faults)
}
