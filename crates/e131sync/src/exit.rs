use std::fmt;
use std::io;

use e131sync_frame::{PacketError, ValidationError};

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const CONFIG_INVALID: i32 = 78;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

/// Bad values typed on the command line are usage errors.
pub fn validation_error(context: &str, err: ValidationError) -> CliError {
    CliError::new(USAGE, format!("{context}: {err}"))
}

/// Packets that fail to decode are invalid data, whatever the cause.
pub fn packet_error(context: &str, err: PacketError) -> CliError {
    CliError::new(DATA_INVALID, format!("{context}: {err}"))
}

pub fn config_error(context: &str, err: serde_json::Error) -> CliError {
    CliError::new(CONFIG_INVALID, format!("{context}: {err}"))
}

#[cfg(test)]
mod tests {
    use e131sync_frame::{DecodeError, SyncAddress};

    use super::*;

    #[test]
    fn decode_failures_map_to_data_invalid() {
        let err = packet_error(
            "decode failed",
            DecodeError::TooShort { len: 1, min: 47 }.into(),
        );
        assert_eq!(err.code, DATA_INVALID);
        assert_eq!(err.to_string(), "decode failed: packet too short (1 bytes, min 47)");
    }

    #[test]
    fn validation_failures_map_to_usage() {
        let source = SyncAddress::new(0).unwrap_err();
        let err = validation_error("--sync-address", source);
        assert_eq!(err.code, USAGE);
        assert!(err.message.contains("sync_address must be in [1, 63999], got 0"));
    }

    #[test]
    fn permission_denied_is_distinct() {
        let err = io_error(
            "read failed",
            io::Error::new(io::ErrorKind::PermissionDenied, "nope"),
        );
        assert_eq!(err.code, PERMISSION_DENIED);
    }
}
