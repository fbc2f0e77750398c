//! Replaying adapters that serve recorded interactions.
//!
//! All adapters of one context share a single replayer; it keeps a
//! separate cursor per port/method pair.

pub mod clock;
pub mod counter;
pub mod filesystem;

pub use clock::ReplayingClock;
pub use counter::ReplayingCounterSource;
pub use filesystem::ReplayingFileSystem;

use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cassette::replayer::CassetteReplayer;

/// Takes the next recorded output for `port`/`method`.
///
/// # Panics
///
/// Panics if the cassette has no further interaction for the pair.
pub(crate) fn next_output(replayer: &Arc<Mutex<CassetteReplayer>>, port: &str, method: &str) -> Value {
    let mut guard = replayer.lock().unwrap_or_else(PoisonError::into_inner);
    guard.next_interaction(port, method).output.clone()
}

/// Decodes a recorded `{"ok": value}` / `{"err": message}` output.
///
/// An `err` entry becomes `Err(message)`; a malformed `ok` value is also
/// reported as `Err` so the caller sees it through its normal error path.
pub(crate) fn replay_result<T: DeserializeOwned>(output: Value, context: &str) -> Result<T, String> {
    if let Some(err) = output.get("err") {
        return Err(err.as_str().unwrap_or("unknown error").to_string());
    }
    let value = output.get("ok").cloned().unwrap_or(output);
    serde_json::from_value(value).map_err(|e| format!("{context}: failed to decode recorded value: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn replay_result_reads_ok_and_err() {
        let ok: Result<u64, String> = replay_result(json!({"ok": 7}), "test");
        assert_eq!(ok, Ok(7));

        let err: Result<u64, String> = replay_result(json!({"err": "boom"}), "test");
        assert_eq!(err, Err("boom".to_string()));

        let bad: Result<u64, String> = replay_result(json!({"ok": "seven"}), "test");
        assert!(bad.unwrap_err().contains("failed to decode"));
    }
}
