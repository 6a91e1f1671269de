use std::fs;

use e131sync_frame::{AddressDecoding, DecodeOptions, SyncPacket};

use crate::cmd::DecodeArgs;
use crate::exit::{io_error, packet_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_decoded, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let bytes = resolve_input(&args)?;
    let options = DecodeOptions {
        address_decoding: if args.legacy_address {
            AddressDecoding::Legacy
        } else {
            AddressDecoding::BigEndian
        },
    };

    let packet = SyncPacket::decode_with(&bytes, options)
        .map_err(|err| packet_error("decode failed", err))?;
    tracing::info!(
        cid = %packet.session_id(),
        sync_address = %packet.sync_address(),
        sequence = %packet.sequence(),
        "decoded sync packet"
    );
    print_decoded(&packet, bytes.len(), format);

    Ok(SUCCESS)
}

fn resolve_input(args: &DecodeArgs) -> CliResult<Vec<u8>> {
    if let Some(text) = &args.hex {
        return parse_hex(text);
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Err(CliError::new(USAGE, "provide packet hex or --file"))
}

fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let digits: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    hex::decode(digits).map_err(|err| CliError::new(USAGE, format!("invalid packet hex: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_skips_separators() {
        assert_eq!(parse_hex("00 10:00\n00").unwrap(), vec![0x00, 0x10, 0x00, 0x00]);
    }

    #[test]
    fn parse_hex_rejects_odd_length() {
        assert_eq!(parse_hex("abc").unwrap_err().code, USAGE);
    }

    #[test]
    fn missing_input_is_usage_error() {
        let args = DecodeArgs {
            hex: None,
            file: None,
            legacy_address: false,
        };
        assert_eq!(resolve_input(&args).unwrap_err().code, USAGE);
    }
}
