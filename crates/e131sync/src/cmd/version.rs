use e131sync_frame::{MIN_SYNC_PACKET_LEN, SYNC_PACKET_LEN};

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("e131sync {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: e131sync");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("E131SYNC_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!("wire: E1.31-2016 synchronization packet");
    println!("packet_len: {SYNC_PACKET_LEN} (decode min {MIN_SYNC_PACKET_LEN})");

    Ok(SUCCESS)
}
