//! Fuzz target: `telemetry::codec::decode_command`
//!
//! Feeds arbitrary response bodies to the command decoder.  It must never
//! panic, anything it accepts must be a JSON object, and an accepted
//! command must re-encode to a body that decodes to the same command.
//!
//! cargo fuzz run fuzz_command_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use roomnode::telemetry::codec::decode_command;

fuzz_target!(|data: &[u8]| {
    if let Ok(cmd) = decode_command(data) {
        let parsed: serde_json::Value = serde_json::from_slice(data).expect("accepted body is JSON");
        assert!(parsed.is_object(), "accepted a non-object body");
        let body = serde_json::to_vec(&cmd).expect("command serialises");
        assert_eq!(decode_command(&body).ok(), Some(cmd));
    }
});
